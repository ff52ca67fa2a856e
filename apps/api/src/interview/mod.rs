// Resume-driven mock interview.
// Implements: upload handling, prompt formatting, session storage, the five-question flow.
// All LLM calls go through llm_client; nothing here talks to the provider directly.

pub mod controller;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
pub mod uploads;

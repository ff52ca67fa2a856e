//! Interview controller for the five-question protocol.
//!
//! Upload → extract → first question → (answer → next question) x4 → answer → assessment.
//! All LLM traffic goes through `TextGenerator`; sessions live in the injected store.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::interview::models::{InterviewSession, InterviewStep, StartedInterview};
use crate::interview::prompts::{
    assessment_prompt, first_question_prompt, next_question_prompt, PromptError,
};
use crate::interview::store::{SessionStore, StoreError};
use crate::interview::uploads::ResumeUploads;
use crate::llm_client::{LlmError, TextGenerator};
use crate::pdf::{ExtractionError, TextExtractor};

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Empty file selected")]
    EmptyUpload,

    #[error("Failed to extract resume text: {0}")]
    ExtractionFailed(#[from] ExtractionError),

    #[error("Failed to generate interview content: {0}")]
    GenerationFailed(#[from] LlmError),

    #[error("Session expired")]
    SessionNotFound,

    #[error(transparent)]
    MissingVariable(#[from] PromptError),

    #[error("Session {0} already exists")]
    DuplicateSession(Uuid),

    #[error("Failed to store resume: {0}")]
    Storage(anyhow::Error),
}

impl From<StoreError> for InterviewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => InterviewError::SessionNotFound,
            StoreError::AlreadyExists(id) => InterviewError::DuplicateSession(id),
        }
    }
}

pub struct InterviewController {
    store: Arc<dyn SessionStore>,
    llm: Arc<dyn TextGenerator>,
    extractor: Arc<dyn TextExtractor>,
    uploads: ResumeUploads,
    idle_timeout: chrono::Duration,
}

impl InterviewController {
    pub fn new(
        store: Arc<dyn SessionStore>,
        llm: Arc<dyn TextGenerator>,
        extractor: Arc<dyn TextExtractor>,
        uploads: ResumeUploads,
        idle_timeout: chrono::Duration,
    ) -> Self {
        Self {
            store,
            llm,
            extractor,
            uploads,
            idle_timeout,
        }
    }

    /// Stores the resume, asks the first question and opens a session.
    /// Nothing is left behind on failure.
    pub async fn start_interview(
        &self,
        resume_bytes: &[u8],
    ) -> Result<StartedInterview, InterviewError> {
        if resume_bytes.is_empty() {
            return Err(InterviewError::EmptyUpload);
        }

        let path = self
            .uploads
            .save(resume_bytes)
            .await
            .map_err(InterviewError::Storage)?;

        match self.open_session(&path).await {
            Ok(started) => Ok(started),
            Err(e) => {
                self.uploads.discard(&path).await;
                Err(e)
            }
        }
    }

    async fn open_session(&self, path: &Path) -> Result<StartedInterview, InterviewError> {
        let resume_text = self.extractor.extract(path).await?;

        let prompt = first_question_prompt(&resume_text)?;
        let question_text = self.llm.generate(&prompt).await?;

        let session_id = Uuid::new_v4();
        let session =
            InterviewSession::new(session_id, resume_text, &question_text, path.to_path_buf());
        self.store.create(session_id, session).await?;

        info!("Interview session {session_id} started");

        Ok(StartedInterview {
            session_id,
            question_text,
        })
    }

    /// Records the answer to the current question, then asks the next one or,
    /// after the last question, returns the assessment and closes the session.
    ///
    /// The answer is persisted before generation runs and stays recorded if
    /// generation fails.
    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        answer: &str,
    ) -> Result<InterviewStep, InterviewError> {
        let _turn = self
            .store
            .lock(session_id)
            .await
            .ok_or(InterviewError::SessionNotFound)?;

        // Re-read under the lock: a previous holder may have finished the session.
        let mut session = self
            .store
            .get(session_id)
            .await
            .ok_or(InterviewError::SessionNotFound)?;

        session.record_answer(answer);
        self.store.update(session_id, session.clone()).await?;

        if !session.is_final_question() {
            let prompt = next_question_prompt(&session.resume_text, &session.chat_history)?;
            let question_text = self.llm.generate(&prompt).await?;

            session.record_question(&question_text);
            let question_num = session.question_num;
            self.store.update(session_id, session).await?;

            return Ok(InterviewStep::NextQuestion {
                question_num,
                question_text,
            });
        }

        let prompt = assessment_prompt(&session.resume_text, &session.chat_history)?;
        let assessment_text = self.llm.generate(&prompt).await?;

        self.uploads.discard(&session.resume_path).await;
        self.store.remove(session_id).await;

        info!(
            "Interview session {session_id} completed after {}s",
            (Utc::now() - session.created_at).num_seconds()
        );

        Ok(InterviewStep::FinalAssessment { assessment_text })
    }

    /// Drops sessions idle longer than the configured timeout along with their files.
    pub async fn expire_idle(&self, now: DateTime<Utc>) -> usize {
        let expired = self.store.take_idle(now - self.idle_timeout).await;
        for session in &expired {
            self.uploads.discard(&session.resume_path).await;
            info!("Interview session {} expired", session.session_id);
        }
        expired.len()
    }

    /// Runs `expire_idle` every `every` until the runtime shuts down.
    pub fn spawn_idle_sweeper(self: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                let expired = self.expire_idle(Utc::now()).await;
                if expired > 0 {
                    info!("Expired {expired} abandoned interview session(s)");
                }
            }
        })
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }
}

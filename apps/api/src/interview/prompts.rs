// Interview prompt templates and the formatter that fills them.
// Placeholders are `{name}`; values are substituted in a single pass so text
// inside a resume or an answer is never re-expanded.

use thiserror::Error;

/// First question. Replace: {resume_text}
pub const FIRST_QUESTION_TEMPLATE: &str = "Thank you for uploading your resume. Based on your listed experiences, projects, and technical skills, please answer the following questions as part of your AI Engineer interview:
(Only ask one question, do not summarize the resume. Assume you're the interviewer assessing the candidate's suitability for an AI Engineer role.)

Resume:

{resume_text}";

/// Follow-up question. Replace: {resume_text}, {chat_history}
pub const NEXT_QUESTION_TEMPLATE: &str = "You're an AI hiring manager. Continue the interview based on the following conversation so far. Ask ONE new and relevant technical or behavioral question for the AI Engineer position. Only ask the next question, nothing else.

Resume:
{resume_text}

Interview So Far:
{chat_history}

Ask only the next question.";

/// Final evaluation. Replace: {chat_history}, {resume_text}
pub const ASSESSMENT_TEMPLATE: &str = "You're an AI interviewer. The following are a candidate's responses to questions in an AI Engineer interview:

{chat_history}

Here is the resume:
{resume_text}

Based on the responses, provide a short evaluation of the candidate's strengths, areas to improve, and their suitability for the AI Engineer role.
Respond in a professional, concise tone with 3 bullet points.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Missing prompt variable '{0}'")]
    MissingVariable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    FirstQuestion,
    NextQuestion,
    Assessment,
}

impl PromptTemplate {
    pub fn text(self) -> &'static str {
        match self {
            PromptTemplate::FirstQuestion => FIRST_QUESTION_TEMPLATE,
            PromptTemplate::NextQuestion => NEXT_QUESTION_TEMPLATE,
            PromptTemplate::Assessment => ASSESSMENT_TEMPLATE,
        }
    }

    pub fn variables(self) -> &'static [&'static str] {
        match self {
            PromptTemplate::FirstQuestion => &["resume_text"],
            PromptTemplate::NextQuestion | PromptTemplate::Assessment => {
                &["resume_text", "chat_history"]
            }
        }
    }
}

/// Fills `template` with `values`. Fails if any variable the template needs is absent.
pub fn format_prompt(
    template: PromptTemplate,
    values: &[(&str, &str)],
) -> Result<String, PromptError> {
    let lookup = |name: &str| values.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

    if let Some(missing) = template
        .variables()
        .iter()
        .copied()
        .find(|name| lookup(*name).is_none())
    {
        return Err(PromptError::MissingVariable(missing.to_string()));
    }

    let text = template.text();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(PromptError::MissingVariable(name.to_string())),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

pub fn first_question_prompt(resume_text: &str) -> Result<String, PromptError> {
    format_prompt(PromptTemplate::FirstQuestion, &[("resume_text", resume_text)])
}

pub fn next_question_prompt(resume_text: &str, chat_history: &str) -> Result<String, PromptError> {
    format_prompt(
        PromptTemplate::NextQuestion,
        &[("resume_text", resume_text), ("chat_history", chat_history)],
    )
}

pub fn assessment_prompt(resume_text: &str, chat_history: &str) -> Result<String, PromptError> {
    format_prompt(
        PromptTemplate::Assessment,
        &[("resume_text", resume_text), ("chat_history", chat_history)],
    )
}

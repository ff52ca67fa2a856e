use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Questions asked before the assessment is produced.
pub const MAX_QUESTIONS: u32 = 5;

/// One candidate's interview, from resume upload until the assessment.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub session_id: Uuid,
    pub resume_text: String,
    /// Transcript of `Q1: ...\n`, `A1: ...\n`, `Q2: ...\n` lines.
    pub chat_history: String,
    /// Number of the question currently awaiting an answer, in `1..=MAX_QUESTIONS`.
    pub question_num: u32,
    pub resume_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl InterviewSession {
    /// A fresh session holding the first question.
    pub fn new(
        session_id: Uuid,
        resume_text: String,
        first_question: &str,
        resume_path: PathBuf,
    ) -> Self {
        Self {
            session_id,
            resume_text,
            chat_history: format!("Q1: {first_question}\n"),
            question_num: 1,
            resume_path,
            created_at: Utc::now(),
        }
    }

    pub fn record_answer(&mut self, answer: &str) {
        self.chat_history
            .push_str(&format!("A{}: {answer}\n", self.question_num));
    }

    /// Advances the counter and appends the new question under it.
    pub fn record_question(&mut self, question: &str) {
        self.question_num += 1;
        self.chat_history
            .push_str(&format!("Q{}: {question}\n", self.question_num));
    }

    pub fn is_final_question(&self) -> bool {
        self.question_num >= MAX_QUESTIONS
    }
}

/// Outcome of a single answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterviewStep {
    NextQuestion {
        question_num: u32,
        question_text: String,
    },
    FinalAssessment {
        assessment_text: String,
    },
}

/// Returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedInterview {
    pub session_id: Uuid,
    pub question_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> InterviewSession {
        InterviewSession::new(
            Uuid::new_v4(),
            "Experienced ML engineer".into(),
            "What did you build with PyTorch?",
            PathBuf::from("uploads/x.pdf"),
        )
    }

    #[test]
    fn test_new_session_starts_at_question_one() {
        let s = session();
        assert_eq!(s.question_num, 1);
        assert_eq!(s.chat_history, "Q1: What did you build with PyTorch?\n");
    }

    #[test]
    fn test_history_alternates_questions_and_answers() {
        let mut s = session();
        s.record_answer("A recommender");
        s.record_question("How did you evaluate it?");
        s.record_answer("");

        assert_eq!(
            s.chat_history,
            "Q1: What did you build with PyTorch?\n\
             A1: A recommender\n\
             Q2: How did you evaluate it?\n\
             A2: \n"
        );
        assert_eq!(s.question_num, 2);
    }

    #[test]
    fn test_final_question_detection() {
        let mut s = session();
        for n in 1..MAX_QUESTIONS {
            assert!(!s.is_final_question());
            s.record_answer("answer");
            s.record_question(&format!("question {}", n + 1));
        }
        assert_eq!(s.question_num, MAX_QUESTIONS);
        assert!(s.is_final_question());
    }

    #[test]
    fn test_step_serializes_with_kind_tag() {
        let step = InterviewStep::NextQuestion {
            question_num: 2,
            question_text: "Why Rust?".into(),
        };
        let value = serde_json::to_value(step).unwrap();
        assert_eq!(value["kind"], "next_question");
        assert_eq!(value["question_num"], 2);
    }
}

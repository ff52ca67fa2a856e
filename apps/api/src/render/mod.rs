//! HTML page rendering for the interview UI.
//!
//! A single `index.html` template is embedded at compile time and switched on `state`.

use anyhow::Result;
use minijinja::{context, Environment};
use uuid::Uuid;

use crate::interview::models::MAX_QUESTIONS;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const INDEX_NAME: &str = "index.html";

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Start,
    Question {
        session_id: Uuid,
        question_num: u32,
        question: String,
    },
    Assessment {
        assessment: String,
    },
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        let template = self.env.get_template(INDEX_NAME)?;
        let html = match view {
            PageView::Start => template.render(context! { state => "start" })?,
            PageView::Question {
                session_id,
                question_num,
                question,
            } => template.render(context! {
                state => "question",
                session_id => session_id.to_string(),
                question_num => question_num,
                max_questions => MAX_QUESTIONS,
                question => question,
            })?,
            PageView::Assessment { assessment } => template.render(context! {
                state => "assessment",
                assessment => assessment,
            })?,
        };
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_page_has_upload_form() {
        let html = PageRenderer::new().unwrap().render(&PageView::Start).unwrap();
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains(r#"name="resume""#));
        assert!(!html.contains(r#"action="/answer""#));
    }

    #[test]
    fn test_question_page_carries_session_id() {
        let session_id = Uuid::new_v4();
        let html = PageRenderer::new()
            .unwrap()
            .render(&PageView::Question {
                session_id,
                question_num: 3,
                question: "How did you deploy the model?".into(),
            })
            .unwrap();
        assert!(html.contains("Question 3 of 5"));
        assert!(html.contains(&format!(r#"value="{session_id}""#)));
        assert!(html.contains("How did you deploy the model?"));
    }

    #[test]
    fn test_generated_text_is_escaped() {
        let html = PageRenderer::new()
            .unwrap()
            .render(&PageView::Assessment {
                assessment: "<script>alert(1)</script>".into(),
            })
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

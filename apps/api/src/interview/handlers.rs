//! Axum route handlers for the interview pages.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        FromRequest, Multipart, Request, State,
    },
    http::{header, StatusCode},
    response::Html,
    Form,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller::InterviewError;
use crate::interview::models::InterviewStep;
use crate::render::PageView;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Default, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub session_id: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(&PageView::Start)?))
}

/// POST /upload
///
/// Multipart field `resume` carries the PDF. Responds with the first question page.
/// A body that is not multipart at all counts as "no file".
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let Ok(mut multipart) = multipart else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };
    let limit = state.config.max_upload_bytes;

    let mut resume: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        // A `resume` part without a filename is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| upload_error(e, limit))?;
        resume = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        resume.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("Empty file selected".to_string()));
    }

    let started = state.interviews.start_interview(&bytes).await?;

    let page = state.pages.render(&PageView::Question {
        session_id: started.session_id,
        question_num: 1,
        question: started.question_text,
    })?;
    Ok(Html(page))
}

fn upload_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Multipart(err)
    }
}

/// POST /answer
///
/// Form fields `answer` and `session_id`, urlencoded or multipart.
/// Responds with the next question or the assessment.
pub async fn handle_answer(
    State(state): State<AppState>,
    request: Request,
) -> Result<Html<String>, AppError> {
    let form = read_answer_form(request, &state).await;

    // Anything that is not a live session id is reported the same way.
    let session_id =
        Uuid::parse_str(form.session_id.trim()).map_err(|_| InterviewError::SessionNotFound)?;

    let view = match state
        .interviews
        .submit_answer(session_id, &form.answer)
        .await?
    {
        InterviewStep::NextQuestion {
            question_num,
            question_text,
        } => PageView::Question {
            session_id,
            question_num,
            question: question_text,
        },
        InterviewStep::FinalAssessment { assessment_text } => PageView::Assessment {
            assessment: assessment_text,
        },
    };

    Ok(Html(state.pages.render(&view)?))
}

/// Unreadable or missing form data yields empty fields.
async fn read_answer_form(request: Request, state: &AppState) -> AnswerForm {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        return Form::<AnswerForm>::from_request(request, state)
            .await
            .map(|Form(form)| form)
            .unwrap_or_default();
    }

    let mut form = AnswerForm::default();
    let Ok(mut multipart) = Multipart::from_request(request, state).await else {
        return form;
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        let Ok(value) = field.text().await else {
            break;
        };
        match name.as_deref() {
            Some("answer") => form.answer = value,
            Some("session_id") => form.session_id = value,
            _ => {}
        }
    }
    form
}

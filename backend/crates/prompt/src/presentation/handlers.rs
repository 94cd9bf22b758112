//! HTTP Handlers

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::{GenerateInput, GenerateUseCase};
use crate::domain::generator::TextGenerator;
use crate::error::{PromptError, PromptResult};
use crate::presentation::dto::PromptRequest;

/// Shared state for prompt handlers
#[derive(Clone)]
pub struct PromptAppState<G>
where
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    pub generator: Arc<G>,
}

/// POST /prompt
///
/// Relays the upstream reply untouched: status, Content-Type and body
/// all come from the generation API. The identity extension is set by
/// the session gate in front of this route.
pub async fn prompt<G>(
    State(state): State<PromptAppState<G>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> PromptResult<Response>
where
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    // Any undecodable body reads as a plain 400
    let Json(req) = payload.map_err(|e| PromptError::Validation(e.body_text()))?;

    let use_case = GenerateUseCase::new(state.generator.clone());

    let input = GenerateInput {
        email: user.email,
        text: req.text,
    };

    let generation = use_case.execute(input).await?;

    let status = StatusCode::from_u16(generation.status).map_err(|_| {
        PromptError::Internal(format!("Invalid upstream status: {}", generation.status))
    })?;

    let response = match generation.content_type {
        Some(content_type) => (
            status,
            [(header::CONTENT_TYPE, content_type)],
            generation.body,
        )
            .into_response(),
        None => (status, generation.body).into_response(),
    };

    Ok(response)
}

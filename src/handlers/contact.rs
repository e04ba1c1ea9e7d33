use crate::dtos::{ContactRequest, ContactResponse};
use crate::error::AppError;
use crate::services::ContactEmail;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[tracing::instrument(skip(state, request))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    if request.name.is_empty() || request.email.is_empty() || request.message.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "All fields are required"
        )));
    }

    // The message body is relayed as-is; no escaping or length limits.
    let email = ContactEmail {
        reply_to: request.email.clone(),
        subject: format!("New Message from {}", request.name),
        body_html: format!("<p>{}</p>", request.message),
    };

    // One send per submission; failures are logged here and reported to the
    // client as a generic server error.
    state.mailer.send(&email).await.map_err(|e| {
        tracing::error!(reply_to = %request.email, "Failed to relay contact email: {}", e);
        AppError::EmailError(e.to_string())
    })?;

    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            message: "Message sent successfully".to_string(),
        }),
    ))
}

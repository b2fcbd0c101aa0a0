use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::api::state::AppState;
use crate::domain::participant::ParticipantDraft;
use crate::domain::team::{TeamDocument, TeamRegistration};
use crate::domain::validation::{validated, Field, FieldError, Problem};
use crate::registration::{Feedback, FeedbackCategory, SubmissionOrchestrator};

/// Response to a registration attempt
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub feedback: Feedback,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl RegistrationResponse {
    fn feedback(feedback: Feedback) -> Self {
        Self {
            feedback,
            field_errors: Vec::new(),
            team_id: None,
        }
    }

    fn invalid(field_errors: Vec<FieldError>) -> Self {
        Self {
            feedback: Feedback::new(FeedbackCategory::IncompleteFields),
            field_errors,
            team_id: None,
        }
    }
}

/// Why the registration form could not be read
#[derive(Debug, PartialEq, Eq)]
enum FormError {
    /// The request body went over the upload limit
    TooLarge,
    /// `participants` is not a JSON array of participant rows
    Participants(String),
    Malformed(String),
}

impl FormError {
    fn from_multipart(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            FormError::TooLarge
        } else {
            FormError::Malformed(error.body_text())
        }
    }

    fn into_response(self) -> (StatusCode, Json<RegistrationResponse>) {
        tracing::info!(error = ?self, "unreadable registration form");
        match self {
            FormError::TooLarge => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RegistrationResponse::invalid(vec![FieldError::new(
                    Field::Document,
                    Problem::TooLarge,
                )])),
            ),
            FormError::Participants(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RegistrationResponse::invalid(vec![FieldError::new(
                    Field::Participants,
                    Problem::Malformed,
                )])),
            ),
            FormError::Malformed(_) => (
                StatusCode::BAD_REQUEST,
                Json(RegistrationResponse::invalid(Vec::new())),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrationWindow {
    pub abierta: bool,
    pub fecha_limite: String,
}

/// Whether registrations are still accepted
///
/// GET /api/inscripcion/estado
pub async fn registration_window(State(state): State<AppState>) -> Json<RegistrationWindow> {
    Json(RegistrationWindow {
        abierta: state.settings.registration_open_at(Utc::now()),
        fecha_limite: state.settings.registration_deadline.to_rfc3339(),
    })
}

/// Register a team
///
/// POST /api/inscripcion (multipart: `team_name`, `privacy_accepted`,
/// `participants` as a JSON array, `document` file)
///
/// Every outcome, including an unreadable form, answers with feedback.
pub async fn register_team(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<RegistrationResponse>) {
    if !state.settings.registration_open_at(Utc::now()) {
        return (
            StatusCode::FORBIDDEN,
            Json(RegistrationResponse::feedback(Feedback::new(
                FeedbackCategory::RegistrationClosed,
            ))),
        );
    }

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => return FormError::Malformed(e.body_text()).into_response(),
    };

    let registration = match read_form(multipart).await {
        Ok(registration) => registration,
        Err(e) => return e.into_response(),
    };

    let registration = match validated(registration, &state.rules) {
        Ok(registration) => registration,
        Err(report) => {
            let feedback = Feedback::from_validation(&report)
                .unwrap_or_else(|| Feedback::new(FeedbackCategory::IncompleteFields));
            tracing::info!(category = ?feedback.category, "registration rejected by validation");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RegistrationResponse {
                    feedback,
                    field_errors: report.field_errors,
                    team_id: None,
                }),
            );
        }
    };

    match SubmissionOrchestrator::new(&state.backend).submit(registration).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(RegistrationResponse {
                feedback: Feedback::success(),
                field_errors: Vec::new(),
                team_id: Some(receipt.team.id),
            }),
        ),
        Err(failure) => {
            if let Some(team_id) = failure.orphaned_team() {
                tracing::error!(team_id, "registration left a team behind, delete it by hand");
            }
            let feedback = Feedback::from_submission_error(&failure.error);
            let status = match feedback.category {
                FeedbackCategory::DuplicateTeamName | FeedbackCategory::DuplicateEmail => {
                    StatusCode::CONFLICT
                }
                FeedbackCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(RegistrationResponse::feedback(feedback)))
        }
    }
}

/// Builds a registration draft from the multipart form
///
/// Unknown fields are ignored.
async fn read_form(mut multipart: Multipart) -> Result<TeamRegistration, FormError> {
    let mut team_name = String::new();
    let mut privacy_accepted = false;
    let mut participants: Vec<ParticipantDraft> = Vec::new();
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(FormError::from_multipart)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "team_name" => team_name = read_text(field).await?,
            "privacy_accepted" => {
                let value = read_text(field).await?;
                privacy_accepted = matches!(value.trim(), "true" | "on" | "1" | "si" | "sí");
            }
            "participants" => {
                let raw = read_text(field).await?;
                participants = serde_json::from_str(&raw)
                    .map_err(|e| FormError::Participants(e.to_string()))?;
            }
            "document" => {
                let file_name = field.file_name().unwrap_or("documento.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(FormError::from_multipart)?;
                document = Some(TeamDocument::new(file_name, content_type, bytes.to_vec()));
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    let mut registration =
        TeamRegistration::new(team_name, participants).with_privacy_accepted(privacy_accepted);
    if let Some(document) = document {
        registration = registration.with_document(document);
    }
    Ok(registration)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, FormError> {
    field.text().await.map_err(FormError::from_multipart)
}

use serde::Serialize;

use super::errors::SubmissionError;
use crate::domain::gateways::GatewayErrorKind;
use crate::domain::validation::{CrossRecordError, ValidationReport};

/// Category of a message shown after a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Success,
    IncompleteFields,
    PrivacyNotAccepted,
    RepeatedDisciplines,
    IncompleteGender,
    DuplicateTeamName,
    DuplicateEmail,
    Timeout,
    DocumentUpload,
    ParticipantRegistration,
    RegistrationClosed,
    Generic,
}

impl FeedbackCategory {
    fn text(&self) -> (&'static str, &'static str) {
        match self {
            FeedbackCategory::Success => (
                "Inscripción exitosa",
                "Tu inscripción fue enviada correctamente.",
            ),
            FeedbackCategory::IncompleteFields => (
                "Campos incompletos",
                "Por favor complete todos los campos correctamente antes de enviar el formulario.",
            ),
            FeedbackCategory::PrivacyNotAccepted => (
                "Aviso de privacidad",
                "Debe aceptar el aviso de privacidad y tratamiento de datos para continuar con la inscripción.",
            ),
            FeedbackCategory::RepeatedDisciplines => (
                "Disciplinas repetidas",
                "Cada participante debe tener una disciplina diferente. Verifique e inténtelo nuevamente.",
            ),
            FeedbackCategory::IncompleteGender => (
                "Género incompleto",
                "El equipo debe tener al menos una participante femenina y un participante masculino.",
            ),
            FeedbackCategory::DuplicateTeamName => (
                "Nombre de equipo repetido",
                "El nombre de tu equipo ya está registrado. Por favor cámbialo e inténtalo nuevamente.",
            ),
            FeedbackCategory::DuplicateEmail => (
                "Correo repetido",
                "Uno de los correos ingresados ya está registrado. Por favor verifique los participantes e intente nuevamente.",
            ),
            FeedbackCategory::Timeout => (
                "Tiempo de espera agotado",
                "El servidor tardó demasiado en responder. Intente nuevamente en unos minutos.",
            ),
            FeedbackCategory::DocumentUpload => (
                "Error con el documento",
                "No se pudo subir el documento del equipo y la inscripción fue cancelada. Intente nuevamente.",
            ),
            FeedbackCategory::ParticipantRegistration => (
                "Error",
                "Ocurrió un problema al registrar los participantes. Intente nuevamente.",
            ),
            FeedbackCategory::RegistrationClosed => (
                "Inscripciones cerradas",
                "El periodo de inscripción ha finalizado.",
            ),
            FeedbackCategory::Generic => (
                "Error",
                "No se pudo completar la inscripción. Intenta nuevamente.",
            ),
        }
    }
}

/// What closing the dialog should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseAction {
    /// Clear the form and go back to the landing page
    ResetFormAndGoHome,
    /// Keep the form as is so the user can fix it
    Dismiss,
}

/// Modal dialog content for a registration outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub category: FeedbackCategory,
    pub title: &'static str,
    pub message: &'static str,
    pub success: bool,
    pub on_close: CloseAction,
}

impl Feedback {
    pub fn new(category: FeedbackCategory) -> Self {
        let (title, message) = category.text();
        let success = category == FeedbackCategory::Success;

        Self {
            category,
            title,
            message,
            success,
            on_close: if success {
                CloseAction::ResetFormAndGoHome
            } else {
                CloseAction::Dismiss
            },
        }
    }

    pub fn success() -> Self {
        Self::new(FeedbackCategory::Success)
    }

    /// Message for a failed validation; `None` when the report is clean
    ///
    /// Field errors win over cross-record errors.
    pub fn from_validation(report: &ValidationReport) -> Option<Self> {
        if !report.field_errors.is_empty() {
            return Some(Self::new(FeedbackCategory::IncompleteFields));
        }

        report.cross_record.map(|error| {
            Self::new(match error {
                CrossRecordError::MissingPrivacyConsent => FeedbackCategory::PrivacyNotAccepted,
                CrossRecordError::DuplicateDiscipline => FeedbackCategory::RepeatedDisciplines,
                CrossRecordError::MissingGenderDiversity => FeedbackCategory::IncompleteGender,
            })
        })
    }

    pub fn from_submission_error(error: &SubmissionError) -> Self {
        let category = match (error, error.gateway_kind()) {
            (_, Some(GatewayErrorKind::Timeout)) => FeedbackCategory::Timeout,
            (SubmissionError::TeamCreation(_), Some(GatewayErrorKind::DuplicateTeamName)) => {
                FeedbackCategory::DuplicateTeamName
            }
            (SubmissionError::ParticipantRegistration { .. }, Some(GatewayErrorKind::DuplicateEmail)) => {
                FeedbackCategory::DuplicateEmail
            }
            (SubmissionError::ParticipantRegistration { .. }, _) => {
                FeedbackCategory::ParticipantRegistration
            }
            (SubmissionError::DocumentUpload(_), _) => FeedbackCategory::DocumentUpload,
            _ => FeedbackCategory::Generic,
        };
        Self::new(category)
    }

    pub fn on_close(&self) -> CloseAction {
        self.on_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::GatewayError;
    use crate::domain::validation::{Field, FieldError, Problem};

    fn participant_error(kind: GatewayErrorKind) -> SubmissionError {
        SubmissionError::ParticipantRegistration {
            index: 1,
            source: GatewayError::new(kind, "x"),
        }
    }

    #[test]
    fn success_resets_form() {
        let feedback = Feedback::success();
        assert!(feedback.success);
        assert_eq!(feedback.on_close(), CloseAction::ResetFormAndGoHome);
    }

    #[test]
    fn failures_only_dismiss() {
        let feedback = Feedback::new(FeedbackCategory::DuplicateEmail);
        assert!(!feedback.success);
        assert_eq!(feedback.on_close(), CloseAction::Dismiss);
    }

    #[test]
    fn clean_report_has_no_feedback() {
        assert_eq!(Feedback::from_validation(&ValidationReport::default()), None);
    }

    #[test]
    fn field_errors_take_precedence() {
        let report = ValidationReport {
            field_errors: vec![FieldError {
                field: Field::TeamName,
                problem: Problem::Required,
            }],
            cross_record: Some(CrossRecordError::DuplicateDiscipline),
        };

        let feedback = Feedback::from_validation(&report).unwrap();
        assert_eq!(feedback.category, FeedbackCategory::IncompleteFields);
    }

    #[test]
    fn cross_record_errors_map_to_categories() {
        let report = ValidationReport {
            field_errors: vec![],
            cross_record: Some(CrossRecordError::MissingGenderDiversity),
        };
        assert_eq!(
            Feedback::from_validation(&report).unwrap().title,
            "Género incompleto"
        );
    }

    #[test]
    fn duplicate_team_name() {
        let error = SubmissionError::TeamCreation(GatewayError::new(
            GatewayErrorKind::DuplicateTeamName,
            "exists",
        ));
        assert_eq!(
            Feedback::from_submission_error(&error).category,
            FeedbackCategory::DuplicateTeamName
        );
    }

    #[test]
    fn other_team_failures_are_generic() {
        let error = SubmissionError::TeamCreation(GatewayError::new(GatewayErrorKind::Transport, "down"));
        assert_eq!(
            Feedback::from_submission_error(&error).category,
            FeedbackCategory::Generic
        );
    }

    #[test]
    fn participant_failures() {
        assert_eq!(
            Feedback::from_submission_error(&participant_error(GatewayErrorKind::DuplicateEmail)).category,
            FeedbackCategory::DuplicateEmail
        );
        assert_eq!(
            Feedback::from_submission_error(&participant_error(GatewayErrorKind::Rejected)).category,
            FeedbackCategory::ParticipantRegistration
        );
    }

    #[test]
    fn timeouts_have_their_own_message() {
        assert_eq!(
            Feedback::from_submission_error(&participant_error(GatewayErrorKind::Timeout)).category,
            FeedbackCategory::Timeout
        );
    }

    #[test]
    fn document_failure() {
        let error = SubmissionError::DocumentUpload(GatewayError::new(GatewayErrorKind::Rejected, "x"));
        assert_eq!(
            Feedback::from_submission_error(&error).category,
            FeedbackCategory::DocumentUpload
        );
    }
}

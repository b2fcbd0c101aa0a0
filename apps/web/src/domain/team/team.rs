use serde::{Deserialize, Serialize};

use super::document::TeamDocument;
use crate::domain::participant::ParticipantDraft;
use crate::domain::validation::Problem;

/// Number of participants a team must register
pub const TEAM_SIZE: usize = 3;

/// Maximum length of a team name, in characters
pub const MAX_TEAM_NAME_CHARS: usize = 60;

/// Team registration being filled in by a user
///
/// Built fresh for every attempt and consumed once by the submission
/// workflow. Nothing here is validated on construction; see
/// [`crate::domain::validation::validate`].
///
/// # Example
/// ```
/// use triatlon_web::domain::participant::ParticipantDraft;
/// use triatlon_web::domain::team::TeamRegistration;
///
/// let registration = TeamRegistration::new("Aguilas", vec![ParticipantDraft::default(); 3]);
/// assert_eq!(registration.name(), "Aguilas");
/// assert!(registration.document().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TeamRegistration {
    name: String,
    document: Option<TeamDocument>,
    participants: Vec<ParticipantDraft>,
    privacy_accepted: bool,
}

impl TeamRegistration {
    pub fn new(name: impl Into<String>, participants: Vec<ParticipantDraft>) -> Self {
        Self {
            name: name.into(),
            document: None,
            participants,
            privacy_accepted: false,
        }
    }

    /// Attaches the team document, renaming it after the team
    pub fn with_document(mut self, document: TeamDocument) -> Self {
        self.document = Some(document.renamed_for(&self.name));
        self
    }

    pub fn with_privacy_accepted(mut self, accepted: bool) -> Self {
        self.privacy_accepted = accepted;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as sent to the backend
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    pub fn document(&self) -> Option<&TeamDocument> {
        self.document.as_ref()
    }

    pub fn participants(&self) -> &[ParticipantDraft] {
        &self.participants
    }

    pub fn privacy_accepted(&self) -> bool {
        self.privacy_accepted
    }

    /// Splits the draft into name, document and participants
    pub fn into_parts(self) -> (String, Option<TeamDocument>, Vec<ParticipantDraft>) {
        (self.name, self.document, self.participants)
    }
}

/// Request body for `POST /equipos`
#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub nombre: String,
}

/// Request body for `PUT /equipos/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamUpdate {
    pub nombre: String,
}

impl TeamUpdate {
    /// Checks the new name with the same rules as a registration
    pub fn new(nombre: &str) -> Result<Self, Problem> {
        let nombre = nombre.trim();
        if nombre.is_empty() {
            return Err(Problem::Required);
        }
        if nombre.chars().count() > MAX_TEAM_NAME_CHARS {
            return Err(Problem::TooLong);
        }
        Ok(Self {
            nombre: nombre.to_string(),
        })
    }
}

/// Team as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub tiempo_total: Option<String>,
    #[serde(default)]
    pub posicion: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_renamed_after_team() {
        let registration = TeamRegistration::new("Los Halcones", vec![])
            .with_document(TeamDocument::new("scan.pdf", "application/pdf", vec![1, 2, 3]));

        let document = registration.document().unwrap();
        assert_eq!(document.file_name(), "Los_Halcones_documentacion.pdf");
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn privacy_defaults_to_not_accepted() {
        let registration = TeamRegistration::new("Aguilas", vec![]);
        assert!(!registration.privacy_accepted());
        assert!(registration.with_privacy_accepted(true).privacy_accepted());
    }

    #[test]
    fn trimmed_name_strips_whitespace() {
        let registration = TeamRegistration::new("  Aguilas ", vec![]);
        assert_eq!(registration.trimmed_name(), "Aguilas");
    }

    #[test]
    fn team_record_parses_minimal_payload() {
        let record: TeamRecord = serde_json::from_str(r#"{"id":"t1","nombre":"Aguilas"}"#).unwrap();
        assert_eq!(record.id, "t1");
        assert_eq!(record.posicion, None);
    }

    #[test]
    fn team_update_checks_name() {
        assert_eq!(TeamUpdate::new("  Cóndores ").unwrap().nombre, "Cóndores");
        assert_eq!(TeamUpdate::new("   "), Err(Problem::Required));
        assert_eq!(TeamUpdate::new(&"x".repeat(61)), Err(Problem::TooLong));
    }
}

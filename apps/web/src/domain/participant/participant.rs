use serde::{Deserialize, Deserializer, Serialize};

use super::value_objects::{external_discipline, Campus, Discipline, Gender, Role};

/// A participant as typed into the registration form
///
/// Every field is kept verbatim; normalization happens when the draft is
/// turned into a [`NewParticipant`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDraft {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub genero: String,
    #[serde(default)]
    pub seccional: String,
    #[serde(default)]
    pub rol: String,
    #[serde(default)]
    pub disciplina: String,
    /// "si" / "no": whether the participant also competes at the external games
    #[serde(default)]
    pub participacion: String,
    #[serde(default)]
    pub disciplina_ascun: String,
}

/// Participant payload sent to the backend when registering a team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    pub genero: Gender,
    pub seccional: Campus,
    pub rol: Role,
    pub delegado: bool,
    pub disciplina: Discipline,
    pub disciplina_ascun: Discipline,
    pub equipo_id: String,
}

impl NewParticipant {
    /// Normalizes a draft for the team `equipo_id`
    ///
    /// The first participant of a team (`index == 0`) is its delegate.
    pub fn from_draft(draft: &ParticipantDraft, index: usize, equipo_id: &str) -> Self {
        Self {
            nombre: draft.nombre.trim().to_string(),
            correo: draft.correo.trim().to_string(),
            telefono: draft.telefono.trim().to_string(),
            genero: Gender::normalize(&draft.genero),
            seccional: Campus::normalize(&draft.seccional),
            rol: Role::normalize(&draft.rol),
            delegado: index == 0,
            disciplina: Discipline::normalize(&draft.disciplina),
            disciplina_ascun: external_discipline(&draft.participacion, &draft.disciplina_ascun),
            equipo_id: equipo_id.to_string(),
        }
    }
}

/// Participant as returned by the backend
///
/// Enumerated fields stay optional because records created by older
/// versions of the site may carry nulls. Free-text values such as
/// `"Natación"` are normalized instead of rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub genero: Option<Gender>,
    #[serde(default, deserialize_with = "lenient_discipline")]
    pub disciplina: Option<Discipline>,
    #[serde(default)]
    pub delegado: bool,
    #[serde(default)]
    pub tiempo: Option<String>,
    #[serde(default)]
    pub penalizado: bool,
    #[serde(default)]
    pub premio_especial: bool,
    #[serde(default)]
    pub equipo_id: Option<String>,
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|value| Gender::normalize(&value)))
}

pub(crate) fn lenient_discipline<'de, D>(deserializer: D) -> Result<Option<Discipline>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|value| Discipline::normalize(&value)))
}

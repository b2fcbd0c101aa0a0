use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lower-cases a form value and strips its diacritics
///
/// # Example
/// ```
/// use triatlon_web::domain::participant::value_objects::fold;
///
/// assert_eq!(fold("Natación"), "natacion");
/// assert_eq!(fold("CHIQUINQUIRÁ"), "chiquinquira");
/// ```
pub fn fold(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Race discipline assigned to a participant
///
/// Form input is matched by substring after [`fold`]. Anything that does not
/// match maps to `Ninguno` instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Natacion,
    Ciclismo,
    Atletismo,
    Ninguno,
}

impl Discipline {
    /// Disciplines in race order
    pub const RACE_ORDER: [Discipline; 3] =
        [Discipline::Natacion, Discipline::Ciclismo, Discipline::Atletismo];

    pub fn normalize(value: &str) -> Self {
        let folded = fold(value);
        if folded.contains("natacion") {
            Discipline::Natacion
        } else if folded.contains("ciclismo") {
            Discipline::Ciclismo
        } else if folded.contains("atletismo") {
            Discipline::Atletismo
        } else {
            Discipline::Ninguno
        }
    }

    /// Position in the race, `None` for `Ninguno`
    pub fn race_position(&self) -> Option<usize> {
        Self::RACE_ORDER.iter().position(|d| d == self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Natacion => "natacion",
            Discipline::Ciclismo => "ciclismo",
            Discipline::Atletismo => "atletismo",
            Discipline::Ninguno => "ninguno",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculino,
    Femenino,
    Ninguno,
}

impl Gender {
    pub fn normalize(value: &str) -> Self {
        let folded = fold(value);
        if folded.contains("masculino") {
            Gender::Masculino
        } else if folded.contains("femenino") {
            Gender::Femenino
        } else {
            Gender::Ninguno
        }
    }
}

/// University campus ("seccional") a participant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Campus {
    Tunja,
    Sogamoso,
    Chiquinquira,
    Duitama,
    Aguazul,
    Ninguno,
}

impl Campus {
    pub fn normalize(value: &str) -> Self {
        let folded = fold(value);
        [
            ("tunja", Campus::Tunja),
            ("sogamoso", Campus::Sogamoso),
            ("chiquinquira", Campus::Chiquinquira),
            ("duitama", Campus::Duitama),
            ("aguazul", Campus::Aguazul),
        ]
        .into_iter()
        .find(|(needle, _)| folded.contains(needle))
        .map(|(_, campus)| campus)
        .unwrap_or(Campus::Ninguno)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Estudiante,
    Funcionario,
    Ninguno,
}

impl Role {
    pub fn normalize(value: &str) -> Self {
        let folded = fold(value);
        if folded.contains("estudiante") {
            Role::Estudiante
        } else if folded.contains("funcionario") {
            Role::Funcionario
        } else {
            Role::Ninguno
        }
    }
}

/// Discipline a participant also competes in at the external (ASCUN) games
///
/// Answering "no" to external participation forces `Ninguno` whatever the
/// discipline field holds.
pub fn external_discipline(participation: &str, discipline: &str) -> Discipline {
    if participation.trim().eq_ignore_ascii_case("no") {
        Discipline::Ninguno
    } else {
        Discipline::normalize(discipline)
    }
}

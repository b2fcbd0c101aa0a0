use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::domain::participant::{Discipline, Gender, ParticipantDraft};
use crate::domain::team::document::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::domain::team::team::MAX_TEAM_NAME_CHARS;
use crate::domain::team::{TeamDocument, TeamRegistration, TEAM_SIZE};

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10}$").expect("phone pattern compiles"));

/// Tunable parts of the validation rules
#[derive(Debug, Clone)]
pub struct ValidationRules {
    email: Regex,
    max_document_bytes: usize,
}

impl ValidationRules {
    /// Builds rules for an institutional email domain such as `uptc.edu.co`
    pub fn new(institutional_domain: &str, max_document_bytes: usize) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"(?i)^[a-z0-9._%+-]+@{}$",
            regex::escape(institutional_domain.trim())
        );

        Ok(Self {
            email: Regex::new(&pattern)?,
            max_document_bytes,
        })
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    pub fn is_institutional_email(&self, email: &str) -> bool {
        self.email.is_match(email.trim())
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new("uptc.edu.co", DEFAULT_MAX_DOCUMENT_BYTES)
            .expect("default email pattern compiles")
    }
}

/// Form field an error is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Field {
    TeamName,
    Document,
    Participants,
    Participant { index: usize, field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    Required,
    TooLong,
    NotPdf,
    TooLarge,
    NotInstitutionalEmail,
    InvalidPhone,
    WrongCount,
    /// Could not be read at all
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub problem: Problem,
}

impl FieldError {
    pub fn new(field: Field, problem: Problem) -> Self {
        Self { field, problem }
    }
}

/// Rule spanning several participants or the whole form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossRecordError {
    MissingPrivacyConsent,
    DuplicateDiscipline,
    MissingGenderDiversity,
}

/// Outcome of validating a registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub field_errors: Vec<FieldError>,
    pub cross_record: Option<CrossRecordError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.cross_record.is_none()
    }

    fn push(&mut self, field: Field, problem: Problem) {
        self.field_errors.push(FieldError::new(field, problem));
    }
}

/// Validates a registration without side effects
///
/// All field errors are collected. At most one cross-record error is
/// reported, checked in the order privacy consent, repeated disciplines,
/// gender coverage.
///
/// # Example
/// ```
/// use triatlon_web::domain::team::TeamRegistration;
/// use triatlon_web::domain::validation::{validate, CrossRecordError, ValidationRules};
///
/// let report = validate(&TeamRegistration::new("", vec![]), &ValidationRules::default());
/// assert!(!report.is_valid());
/// assert_eq!(report.cross_record, Some(CrossRecordError::MissingPrivacyConsent));
/// ```
pub fn validate(registration: &TeamRegistration, rules: &ValidationRules) -> ValidationReport {
    let mut report = ValidationReport::default();

    let name = registration.trimmed_name();
    if name.is_empty() {
        report.push(Field::TeamName, Problem::Required);
    } else if name.chars().count() > MAX_TEAM_NAME_CHARS {
        report.push(Field::TeamName, Problem::TooLong);
    }

    match registration.document() {
        None => report.push(Field::Document, Problem::Required),
        Some(doc) if doc.is_empty() => report.push(Field::Document, Problem::Required),
        Some(doc) if !doc.is_pdf() => report.push(Field::Document, Problem::NotPdf),
        Some(doc) if doc.len() > rules.max_document_bytes => {
            report.push(Field::Document, Problem::TooLarge)
        }
        Some(_) => {}
    }

    let participants = registration.participants();
    if participants.len() != TEAM_SIZE {
        report.push(Field::Participants, Problem::WrongCount);
    }

    for (index, participant) in participants.iter().enumerate() {
        validate_participant(index, participant, rules, &mut report);
    }

    report.cross_record = cross_record_error(registration);
    report
}

/// Registration that passed validation, ready to be submitted once
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    name: String,
    document: TeamDocument,
    participants: Vec<ParticipantDraft>,
}

impl ValidatedRegistration {
    /// Trimmed team name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &TeamDocument {
        &self.document
    }

    pub fn participants(&self) -> &[ParticipantDraft] {
        &self.participants
    }
}

/// Validates and, on success, seals the registration for submission
pub fn validated(
    registration: TeamRegistration,
    rules: &ValidationRules,
) -> Result<ValidatedRegistration, ValidationReport> {
    let report = validate(&registration, rules);
    if !report.is_valid() {
        return Err(report);
    }

    let (name, document, participants) = registration.into_parts();
    match document {
        Some(document) => Ok(ValidatedRegistration {
            name: name.trim().to_string(),
            document,
            participants,
        }),
        None => Err(report),
    }
}

fn validate_participant(
    index: usize,
    participant: &ParticipantDraft,
    rules: &ValidationRules,
    report: &mut ValidationReport,
) {
    let required = [
        ("nombre", &participant.nombre),
        ("genero", &participant.genero),
        ("seccional", &participant.seccional),
        ("rol", &participant.rol),
        ("disciplina", &participant.disciplina),
        ("participacion", &participant.participacion),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            report.push(Field::Participant { index, field }, Problem::Required);
        }
    }

    let email = participant.correo.trim();
    if email.is_empty() {
        report.push(Field::Participant { index, field: "correo" }, Problem::Required);
    } else if !rules.is_institutional_email(email) {
        report.push(
            Field::Participant { index, field: "correo" },
            Problem::NotInstitutionalEmail,
        );
    }

    let phone = participant.telefono.trim();
    if phone.is_empty() {
        report.push(Field::Participant { index, field: "telefono" }, Problem::Required);
    } else if !PHONE.is_match(phone) {
        report.push(Field::Participant { index, field: "telefono" }, Problem::InvalidPhone);
    }
}

fn cross_record_error(registration: &TeamRegistration) -> Option<CrossRecordError> {
    if !registration.privacy_accepted() {
        return Some(CrossRecordError::MissingPrivacyConsent);
    }

    let participants = registration.participants();

    let mut seen = HashSet::new();
    let repeated = participants
        .iter()
        .map(|p| Discipline::normalize(&p.disciplina))
        .any(|discipline| !seen.insert(discipline));
    if repeated {
        return Some(CrossRecordError::DuplicateDiscipline);
    }

    let genders: HashSet<Gender> = participants
        .iter()
        .map(|p| Gender::normalize(&p.genero))
        .collect();
    if !genders.contains(&Gender::Masculino) || !genders.contains(&Gender::Femenino) {
        return Some(CrossRecordError::MissingGenderDiversity);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamDocument;

    fn participant(name: &str, discipline: &str, gender: &str) -> ParticipantDraft {
        ParticipantDraft {
            nombre: name.to_string(),
            correo: format!("{}@uptc.edu.co", name.to_lowercase()),
            telefono: "3101234567".to_string(),
            genero: gender.to_string(),
            seccional: "Tunja".to_string(),
            rol: "Estudiante".to_string(),
            disciplina: discipline.to_string(),
            participacion: "No".to_string(),
            disciplina_ascun: String::new(),
        }
    }

    fn aguilas() -> TeamRegistration {
        TeamRegistration::new(
            "Aguilas",
            vec![
                participant("Juan", "Natación", "Masculino"),
                participant("Maria", "Ciclismo", "Femenino"),
                participant("Pedro", "Atletismo", "Masculino"),
            ],
        )
        .with_document(TeamDocument::new("docs.pdf", "application/pdf", vec![0; 1024]))
        .with_privacy_accepted(true)
    }

    fn with_participants(participants: Vec<ParticipantDraft>) -> TeamRegistration {
        TeamRegistration::new("Aguilas", participants)
            .with_document(TeamDocument::new("docs.pdf", "application/pdf", vec![0; 16]))
            .with_privacy_accepted(true)
    }

    #[test]
    fn aguilas_is_valid() {
        let report = validate(&aguilas(), &ValidationRules::default());
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn validated_keeps_renamed_document_and_order() {
        let sealed = validated(aguilas(), &ValidationRules::default()).unwrap();

        assert_eq!(sealed.name(), "Aguilas");
        assert_eq!(sealed.document().file_name(), "Aguilas_documentacion.pdf");
        assert_eq!(sealed.participants()[0].nombre, "Juan");
    }

    #[test]
    fn validated_returns_report_on_failure() {
        let registration = aguilas().with_privacy_accepted(false);
        let report = validated(registration, &ValidationRules::default()).unwrap_err();

        assert_eq!(report.cross_record, Some(CrossRecordError::MissingPrivacyConsent));
    }

    #[test]
    fn shared_discipline_is_rejected() {
        let registration = with_participants(vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Maria", "natacion", "Femenino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ]);

        let report = validate(&registration, &ValidationRules::default());
        assert!(report.field_errors.is_empty());
        assert_eq!(report.cross_record, Some(CrossRecordError::DuplicateDiscipline));
    }

    #[test]
    fn single_gender_team_is_rejected() {
        let registration = with_participants(vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Luis", "Ciclismo", "Masculino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ]);

        let report = validate(&registration, &ValidationRules::default());
        assert_eq!(
            report.cross_record,
            Some(CrossRecordError::MissingGenderDiversity)
        );
    }

    #[test]
    fn privacy_is_checked_before_disciplines() {
        let registration = TeamRegistration::new(
            "Aguilas",
            vec![
                participant("Juan", "Natación", "Masculino"),
                participant("Luis", "Natación", "Masculino"),
                participant("Pedro", "Natación", "Masculino"),
            ],
        );

        let report = validate(&registration, &ValidationRules::default());
        assert_eq!(report.cross_record, Some(CrossRecordError::MissingPrivacyConsent));
    }

    #[test]
    fn two_garbled_disciplines_count_as_duplicates() {
        // Unrecognised input normalizes to "ninguno" instead of failing.
        let registration = with_participants(vec![
            participant("Juan", "swimming", "Masculino"),
            participant("Maria", "running", "Femenino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ]);

        let report = validate(&registration, &ValidationRules::default());
        assert!(report.field_errors.is_empty());
        assert_eq!(report.cross_record, Some(CrossRecordError::DuplicateDiscipline));
    }

    #[test]
    fn one_garbled_discipline_passes() {
        let registration = with_participants(vec![
            participant("Juan", "swimming", "Masculino"),
            participant("Maria", "Ciclismo", "Femenino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ]);

        assert!(validate(&registration, &ValidationRules::default()).is_valid());
    }

    #[test]
    fn wrong_participant_count() {
        let registration = with_participants(vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Maria", "Ciclismo", "Femenino"),
        ]);

        let report = validate(&registration, &ValidationRules::default());
        assert!(report.field_errors.contains(&FieldError {
            field: Field::Participants,
            problem: Problem::WrongCount,
        }));
    }

    #[test]
    fn foreign_email_domain_is_rejected() {
        let mut people = vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Maria", "Ciclismo", "Femenino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ];
        people[1].correo = "maria@gmail.com".to_string();

        let report = validate(&with_participants(people), &ValidationRules::default());
        assert_eq!(
            report.field_errors,
            vec![FieldError {
                field: Field::Participant { index: 1, field: "correo" },
                problem: Problem::NotInstitutionalEmail,
            }]
        );
    }

    #[test]
    fn email_domain_match_ignores_case() {
        let rules = ValidationRules::default();
        assert!(rules.is_institutional_email("Juan.Perez@UPTC.EDU.CO"));
        assert!(!rules.is_institutional_email("juan@uptc.edu.co.evil.com"));
        assert!(!rules.is_institutional_email("juan@uptcXedu.co"));
    }

    #[test]
    fn phone_format() {
        let mut people = vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Maria", "Ciclismo", "Femenino"),
            participant("Pedro", "Atletismo", "Masculino"),
        ];
        people[0].telefono = "+573101234567".to_string();
        people[1].telefono = "+3101234567".to_string();
        people[2].telefono = "310-123-4567".to_string();

        let report = validate(&with_participants(people), &ValidationRules::default());
        assert_eq!(report.field_errors.len(), 2);
        assert!(report
            .field_errors
            .iter()
            .all(|e| e.problem == Problem::InvalidPhone));
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let mut people = vec![
            participant("Juan", "Natación", "Masculino"),
            participant("Maria", "Ciclismo", "Femenino"),
            ParticipantDraft::default(),
        ];
        people[0].rol = " ".to_string();

        let report = validate(&with_participants(people), &ValidationRules::default());
        // rol of #0, plus 8 required fields of the empty participant
        assert_eq!(report.field_errors.len(), 9);
    }

    #[test]
    fn document_rules() {
        let rules = ValidationRules::new("uptc.edu.co", 10).unwrap();

        let missing = TeamRegistration::new("A", vec![]);
        let not_pdf = TeamRegistration::new("A", vec![])
            .with_document(TeamDocument::new("a.png", "image/png", vec![1]));
        let too_large = TeamRegistration::new("A", vec![])
            .with_document(TeamDocument::new("a.pdf", "application/pdf", vec![0; 11]));

        let problem_of = |r: &TeamRegistration| {
            validate(r, &rules)
                .field_errors
                .into_iter()
                .find(|e| e.field == Field::Document)
                .map(|e| e.problem)
        };

        assert_eq!(problem_of(&missing), Some(Problem::Required));
        assert_eq!(problem_of(&not_pdf), Some(Problem::NotPdf));
        assert_eq!(problem_of(&too_large), Some(Problem::TooLarge));
    }

    #[test]
    fn team_name_length() {
        let long = "x".repeat(61);
        let registration = TeamRegistration::new(long, vec![]);
        let report = validate(&registration, &ValidationRules::default());

        assert!(report.field_errors.contains(&FieldError {
            field: Field::TeamName,
            problem: Problem::TooLong,
        }));
    }
}

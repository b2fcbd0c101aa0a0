/// Content type every team document must have
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Default upper bound for a team document: 5 MiB
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Team documentation file uploaded with a registration
#[derive(Clone, PartialEq, Eq)]
pub struct TeamDocument {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl TeamDocument {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Renames the document to `<team>_documentacion.pdf`
    ///
    /// Whitespace runs in the team name become a single `_`. A blank name
    /// falls back to `equipo`.
    pub fn renamed_for(self, team_name: &str) -> Self {
        let stem = team_name.split_whitespace().collect::<Vec<_>>().join("_");
        let stem = if stem.is_empty() { "equipo".to_string() } else { stem };

        Self {
            file_name: format!("{}_documentacion.pdf", stem),
            ..self
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

impl std::fmt::Debug for TeamDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamDocument")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

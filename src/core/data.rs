use chrono::NaiveDateTime;

/// Identificação da empresa impressa no cabeçalho dos documentos.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub cnpj: String,
    pub address: String,
    pub phone: String,
}

/// Metadados gravados no dicionário /Info do PDF.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: Option<String>,
    pub created_at: NaiveDateTime,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, author: impl Into<String>, created_at: NaiveDateTime) -> Self {
        DocumentMetadata {
            title: title.into(),
            author: author.into(),
            subject: None,
            created_at,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Data no formato PDF `D:YYYYMMDDHHmmSS`.
    pub fn pdf_date(&self) -> String {
        self.created_at.format("D:%Y%m%d%H%M%S").to_string()
    }
}

use qrcode::types::QrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Erro de validação: {0}")]
    Validation(String),

    #[error("Erro de renderização: {0}")]
    Render(String),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DocumentError::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        DocumentError::Render(msg.into())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, DocumentError::Validation(_))
    }
}

impl From<lopdf::Error> for DocumentError {
    fn from(error: lopdf::Error) -> Self {
        DocumentError::Render(error.to_string())
    }
}

impl From<QrError> for DocumentError {
    fn from(error: QrError) -> Self {
        match error {
            // conteúdo vem do cliente (URL, nome, número)
            QrError::DataTooLong => {
                DocumentError::Validation("Conteúdo longo demais para o QR code".to_string())
            }
            other => DocumentError::Render(format!("QR code: {}", other)),
        }
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;

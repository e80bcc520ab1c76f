use chrono::NaiveDate;
use std::fmt;

use super::{CertificateTemplate, InvoiceFormat, LineItem};
use crate::core::{DocumentError, DocumentResult};
use crate::pdf::Color;

pub const DEFAULT_CLIENT: &str = "Cliente Teste";
pub const DEFAULT_SERVICE: &str = "Serviço X";
pub const DEFAULT_AMOUNT: f64 = 100.0;
pub const DEFAULT_WARRANTY_DAYS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Budget,
    Invoice,
    Contract,
    Receipt,
    Letter,
    Certificate,
}

impl DocumentKind {
    /// Identifier used in filenames, logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Budget => "orcamento",
            DocumentKind::Invoice => "nota_fiscal",
            DocumentKind::Contract => "contrato",
            DocumentKind::Receipt => "recibo",
            DocumentKind::Letter => "carta",
            DocumentKind::Certificate => "certificado",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Budget => "Orçamento",
            DocumentKind::Invoice => "Nota Fiscal",
            DocumentKind::Contract => "Contrato de Prestação de Serviços",
            DocumentKind::Receipt => "Recibo",
            DocumentKind::Letter => "Carta",
            DocumentKind::Certificate => "Certificado de Conclusão",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRequest {
    pub client: String,
    pub items: Vec<LineItem>,
}

impl Default for BudgetRequest {
    fn default() -> Self {
        BudgetRequest {
            client: DEFAULT_CLIENT.to_string(),
            items: vec![LineItem::new(DEFAULT_SERVICE, DEFAULT_AMOUNT)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRequest {
    pub number: String,
    pub client: String,
    /// CPF ou CNPJ do cliente, impresso ao lado do nome.
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub items: Vec<LineItem>,
    /// Free-form notes printed in their own block.
    pub notes: Option<String>,
    /// Printed verbatim when present; otherwise the generation time is used.
    pub date: Option<String>,
    pub warranty_days: u32,
    pub format: InvoiceFormat,
    pub qr_code: bool,
    pub barcode: bool,
}

impl Default for InvoiceRequest {
    fn default() -> Self {
        InvoiceRequest {
            number: "0001".to_string(),
            client: DEFAULT_CLIENT.to_string(),
            tax_id: None,
            address: None,
            items: vec![LineItem::new(DEFAULT_SERVICE, DEFAULT_AMOUNT)],
            notes: None,
            date: None,
            warranty_days: DEFAULT_WARRANTY_DAYS,
            format: InvoiceFormat::A4,
            qr_code: false,
            barcode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractRequest {
    pub client: String,
    pub description: String,
}

impl Default for ContractRequest {
    fn default() -> Self {
        ContractRequest {
            client: DEFAULT_CLIENT.to_string(),
            description: "Serviço contratado".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRequest {
    pub client: String,
    pub amount: f64,
    pub reference: Option<String>,
}

impl Default for ReceiptRequest {
    fn default() -> Self {
        ReceiptRequest {
            client: DEFAULT_CLIENT.to_string(),
            amount: DEFAULT_AMOUNT,
            reference: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterRequest {
    pub recipient: String,
    pub message: String,
}

impl Default for LetterRequest {
    fn default() -> Self {
        LetterRequest {
            recipient: "Destinatário".to_string(),
            message: "Mensagem padrão".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateRequest {
    pub name: String,
    pub course: String,
    pub hours: u32,
    /// Missing dates fall back to the generation date.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub instructor: String,
    pub signature_label: String,
    pub theme: Color,
    pub template: CertificateTemplate,
    pub verification_url: Option<String>,
    pub qr_code: bool,
}

impl Default for CertificateRequest {
    fn default() -> Self {
        CertificateRequest {
            name: "Nome do Aluno".to_string(),
            course: "Curso Exemplo".to_string(),
            hours: 8,
            start_date: None,
            end_date: None,
            location: "Jundiaí/SP".to_string(),
            instructor: "Instrutor Responsável".to_string(),
            signature_label: "Coordenação do Curso".to_string(),
            theme: Color::rgb(0x1f, 0x4e, 0x79),
            template: CertificateTemplate::Classic,
            verification_url: None,
            qr_code: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRequest {
    Budget(BudgetRequest),
    Invoice(InvoiceRequest),
    Contract(ContractRequest),
    Receipt(ReceiptRequest),
    Letter(LetterRequest),
    Certificate(CertificateRequest),
}

impl DocumentRequest {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRequest::Budget(_) => DocumentKind::Budget,
            DocumentRequest::Invoice(_) => DocumentKind::Invoice,
            DocumentRequest::Contract(_) => DocumentKind::Contract,
            DocumentRequest::Receipt(_) => DocumentKind::Receipt,
            DocumentRequest::Letter(_) => DocumentKind::Letter,
            DocumentRequest::Certificate(_) => DocumentKind::Certificate,
        }
    }

    /// Download filename, derived from the document number or subject name.
    pub fn filename(&self) -> String {
        let stem = match self {
            DocumentRequest::Budget(r) => format!("orcamento_{}", r.client),
            DocumentRequest::Invoice(r) => format!("nota_{}", r.number),
            DocumentRequest::Contract(r) => format!("contrato_{}", r.client),
            DocumentRequest::Receipt(r) => format!("recibo_{}", r.client),
            DocumentRequest::Letter(r) => format!("carta_{}", r.recipient),
            DocumentRequest::Certificate(r) => format!("certificado_{}", r.name),
        };
        format!("{}.pdf", sanitize_filename(&stem, self.kind().as_str()))
    }

    pub fn items(&self) -> &[LineItem] {
        match self {
            DocumentRequest::Budget(r) => &r.items,
            DocumentRequest::Invoice(r) => &r.items,
            _ => &[],
        }
    }

    /// Checks the invariants that the layouts rely on.
    pub fn validate(&self, max_items: usize) -> DocumentResult<()> {
        let items = self.items();
        if items.len() > max_items {
            return Err(DocumentError::validation(format!(
                "Número máximo de itens excedido ({} > {}).",
                items.len(),
                max_items
            )));
        }

        for (index, item) in items.iter().enumerate() {
            if !item.amount.is_finite() {
                return Err(DocumentError::validation(format!(
                    "Valor inválido para o item {}: {}",
                    index + 1,
                    item.amount
                )));
            }
        }

        match self {
            DocumentRequest::Receipt(r) if !r.amount.is_finite() => Err(DocumentError::validation(
                format!("Valor inválido: {}", r.amount),
            )),
            DocumentRequest::Certificate(r) => {
                if r.hours == 0 {
                    return Err(DocumentError::validation("A carga horária deve ser maior que zero."));
                }
                match (r.start_date, r.end_date) {
                    (Some(start), Some(end)) if end < start => Err(DocumentError::validation(format!(
                        "Data final ({}) anterior à data inicial ({}).",
                        end.format("%d/%m/%Y"),
                        start.format("%d/%m/%Y")
                    ))),
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}

/// The output of one render: PDF bytes plus the suggested download name.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub filename: String,
    pub pages: usize,
    pub bytes: Vec<u8>,
}

/// Lower-cases, replaces whitespace runs with `_` and keeps the name
/// ASCII-safe for the `Content-Disposition` header.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = true;
            continue;
        }

        let folded = match fold_to_ascii(ch) {
            Some(c) if c.is_ascii_alphanumeric() || matches!(c, '_' | '-') => c.to_ascii_lowercase(),
            _ => continue,
        };

        if pending_separator && !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
        pending_separator = false;
        result.push(folded);
    }

    let trimmed = result.trim_matches('_');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn fold_to_ascii(ch: char) -> Option<char> {
    if ch.is_ascii() {
        return Some(ch);
    }

    let folded = match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_lowercases_and_replaces_spaces() {
        let request = DocumentRequest::Budget(BudgetRequest {
            client: "João da Silva".to_string(),
            items: vec![],
        });
        assert_eq!(request.filename(), "orcamento_joao_da_silva.pdf");
    }

    #[test]
    fn invoice_filename_uses_number() {
        let request = DocumentRequest::Invoice(InvoiceRequest {
            number: "2025 0042".to_string(),
            ..InvoiceRequest::default()
        });
        assert_eq!(request.filename(), "nota_2025_0042.pdf");
    }

    #[test]
    fn header_breaking_characters_are_dropped() {
        assert_eq!(sanitize_filename("carta_\"../etc\"", "carta"), "carta_etc");
        assert_eq!(sanitize_filename("   ", "recibo"), "recibo");
        assert_eq!(sanitize_filename("recibo_", "recibo"), "recibo");
    }

    #[test]
    fn rejects_too_many_items() {
        let request = DocumentRequest::Budget(BudgetRequest {
            client: "A".to_string(),
            items: vec![LineItem::new("x", 1.0); 3],
        });
        assert!(request.validate(3).is_ok());
        assert!(request.validate(2).unwrap_err().is_client_error());
    }

    #[test]
    fn rejects_non_finite_amounts() {
        let request = DocumentRequest::Invoice(InvoiceRequest {
            items: vec![LineItem::new("x", f64::NAN)],
            ..InvoiceRequest::default()
        });
        assert!(request.validate(10).is_err());
    }

    #[test]
    fn rejects_inverted_certificate_dates() {
        let request = DocumentRequest::Certificate(CertificateRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..CertificateRequest::default()
        });
        let err = request.validate(10).unwrap_err();
        assert!(err.to_string().contains("01/03/2025"));
    }
}

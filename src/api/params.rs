//! Query-string parsing for the GET endpoints.
//!
//! Each parameter falls back to its demo default on its own, so a request
//! that only sends `servicos` still gets the default `valores` (and fails the
//! length check if they differ).

use chrono::NaiveDate;

use crate::core::{DocumentError, DocumentResult};
use crate::models::{
    pair_items, parse_flag, BudgetRequest, CertificateRequest, ContractRequest, DocumentRequest, InvoiceRequest,
    LetterRequest, ReceiptRequest, DEFAULT_AMOUNT, DEFAULT_SERVICE,
};
use crate::pdf::Color;

/// Parses an amount, accepting both `1234.56` and `1.234,56`.
pub fn parse_amount(field: &str, raw: &str) -> DocumentResult<f64> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DocumentError::validation(format!(
            "Valor inválido para '{}': {}",
            field, raw
        ))),
    }
}

/// Accepts ISO dates (`2025-03-01`) and Brazilian ones (`01/03/2025`).
pub fn parse_date(field: &str, raw: &str) -> DocumentResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| DocumentError::validation(format!("Data inválida para '{}': {}", field, raw)))
}

pub fn parse_color(field: &str, raw: &str) -> DocumentResult<Color> {
    Color::from_hex(raw.trim()).ok_or_else(|| {
        DocumentError::validation(format!(
            "Cor inválida para '{}': {} (use o formato #rrggbb)",
            field, raw
        ))
    })
}

fn parse_count(field: &str, raw: &str) -> DocumentResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| DocumentError::validation(format!("Número inteiro inválido para '{}': {}", field, raw)))
}

/// Query-string pairs in request order; repeated keys form lists.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        QueryParams { pairs }
    }
}

impl QueryParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        self.first(key).unwrap_or(default).to_string()
    }

    /// Present and not blank.
    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.first(key)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
    }

    pub fn texts(&self, key: &str, default: &[&str]) -> Vec<String> {
        let values = self.all(key);
        let values = if values.is_empty() { default.to_vec() } else { values };
        values.into_iter().map(str::to_string).collect()
    }

    pub fn amount(&self, key: &str, default: f64) -> DocumentResult<f64> {
        self.first(key).map_or(Ok(default), |raw| parse_amount(key, raw))
    }

    pub fn amounts(&self, key: &str, default: &[f64]) -> DocumentResult<Vec<f64>> {
        let values = self.all(key);
        if values.is_empty() {
            return Ok(default.to_vec());
        }
        values.into_iter().map(|raw| parse_amount(key, raw)).collect()
    }

    pub fn count(&self, key: &str, default: u32) -> DocumentResult<u32> {
        self.first(key).map_or(Ok(default), |raw| parse_count(key, raw))
    }

    pub fn flag(&self, key: &str) -> DocumentResult<bool> {
        self.first(key).map_or(Ok(false), |raw| parse_flag(key, raw))
    }

    pub fn date(&self, key: &str) -> DocumentResult<Option<NaiveDate>> {
        match self.optional_text(key) {
            Some(raw) => parse_date(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn color(&self, key: &str, default: Color) -> DocumentResult<Color> {
        match self.optional_text(key) {
            Some(raw) => parse_color(key, &raw),
            None => Ok(default),
        }
    }

    pub fn parsed<T>(&self, key: &str) -> DocumentResult<T>
    where
        T: std::str::FromStr<Err = DocumentError> + Default,
    {
        self.first(key).map_or(Ok(T::default()), str::parse)
    }

    fn items(&self) -> DocumentResult<Vec<crate::models::LineItem>> {
        let services = self.texts("servicos", &[DEFAULT_SERVICE]);
        let amounts = self.amounts("valores", &[DEFAULT_AMOUNT])?;
        pair_items(services, amounts)
    }

    pub fn budget(&self) -> DocumentResult<DocumentRequest> {
        let defaults = BudgetRequest::default();
        Ok(DocumentRequest::Budget(BudgetRequest {
            client: self.text("cliente", &defaults.client),
            items: self.items()?,
        }))
    }

    pub fn invoice(&self) -> DocumentResult<DocumentRequest> {
        let defaults = InvoiceRequest::default();
        Ok(DocumentRequest::Invoice(InvoiceRequest {
            number: self.text("numero", &defaults.number),
            client: self.text("cliente", &defaults.client),
            tax_id: self.optional_text("cpf_cnpj"),
            address: self.optional_text("endereco"),
            items: self.items()?,
            notes: self.optional_text("observacoes"),
            date: self.optional_text("data"),
            warranty_days: self.count("garantia_dias", defaults.warranty_days)?,
            format: self.parsed("formato")?,
            qr_code: self.flag("qrcode")?,
            barcode: self.flag("codigo_barras")?,
        }))
    }

    pub fn contract(&self) -> DocumentResult<DocumentRequest> {
        let defaults = ContractRequest::default();
        Ok(DocumentRequest::Contract(ContractRequest {
            client: self.text("cliente", &defaults.client),
            description: self.text("descricao", &defaults.description),
        }))
    }

    pub fn receipt(&self) -> DocumentResult<DocumentRequest> {
        let defaults = ReceiptRequest::default();
        Ok(DocumentRequest::Receipt(ReceiptRequest {
            client: self.text("cliente", &defaults.client),
            amount: self.amount("valor", defaults.amount)?,
            reference: self.optional_text("referente"),
        }))
    }

    pub fn letter(&self) -> DocumentResult<DocumentRequest> {
        let defaults = LetterRequest::default();
        Ok(DocumentRequest::Letter(LetterRequest {
            recipient: self.text("destinatario", &defaults.recipient),
            message: self.text("mensagem", &defaults.message),
        }))
    }

    pub fn certificate(&self) -> DocumentResult<DocumentRequest> {
        let defaults = CertificateRequest::default();
        Ok(DocumentRequest::Certificate(CertificateRequest {
            name: self.text("nome", &defaults.name),
            course: self.text("curso", &defaults.course),
            hours: self.count("carga_horaria", defaults.hours)?,
            start_date: self.date("data_inicio")?,
            end_date: self.date("data_fim")?,
            location: self.text("local", &defaults.location),
            instructor: self.text("instrutor", &defaults.instructor),
            signature_label: self.text("assinatura", &defaults.signature_label),
            theme: self.color("cor", defaults.theme)?,
            template: self.parsed("modelo")?,
            verification_url: self.optional_text("url_validacao"),
            qr_code: self.flag("qrcode")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertificateTemplate, InvoiceFormat, LineItem};

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn amounts_accept_both_decimal_styles() {
        assert_eq!(parse_amount("valor", "1234.5").unwrap(), 1234.5);
        assert_eq!(parse_amount("valor", "1.234,50").unwrap(), 1234.5);
        assert_eq!(parse_amount("valor", " 10,00 ").unwrap(), 10.0);
        assert!(parse_amount("valor", "abc").is_err());
        assert!(parse_amount("valor", "NaN").is_err());
        assert!(parse_amount("valor", "inf").is_err());
    }

    #[test]
    fn empty_query_uses_demo_defaults() {
        let request = params(&[]).budget().unwrap();
        assert_eq!(
            request,
            DocumentRequest::Budget(BudgetRequest {
                client: "Cliente Teste".to_string(),
                items: vec![LineItem::new("Serviço X", 100.0)],
            })
        );
    }

    #[test]
    fn repeated_keys_form_lists() {
        let request = params(&[
            ("cliente", "Ana"),
            ("servicos", "A"),
            ("valores", "10"),
            ("servicos", "B"),
            ("valores", "20.5"),
        ])
        .budget()
        .unwrap();

        assert_eq!(request.items(), &[LineItem::new("A", 10.0), LineItem::new("B", 20.5)]);
    }

    #[test]
    fn lists_default_independently() {
        let err = params(&[("servicos", "A"), ("servicos", "B")]).budget().unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn invoice_options() {
        let request = params(&[
            ("numero", "0042"),
            ("formato", "termica"),
            ("qrcode", "1"),
            ("garantia_dias", "30"),
            ("cpf_cnpj", "123.456.789-00"),
            ("endereco", " "),
            ("observacoes", "Aparelho com tela trincada"),
        ])
        .invoice()
        .unwrap();

        match request {
            DocumentRequest::Invoice(invoice) => {
                assert_eq!(invoice.number, "0042");
                assert_eq!(invoice.tax_id.as_deref(), Some("123.456.789-00"));
                assert_eq!(invoice.address, None);
                assert_eq!(invoice.notes.as_deref(), Some("Aparelho com tela trincada"));
                assert_eq!(invoice.format, InvoiceFormat::Thermal);
                assert!(invoice.qr_code);
                assert!(!invoice.barcode);
                assert_eq!(invoice.warranty_days, 30);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn certificate_fields() {
        let request = params(&[
            ("nome", "Ana"),
            ("data_inicio", "2025-03-03"),
            ("data_fim", "07/03/2025"),
            ("cor", "#aa0000"),
            ("modelo", "moderno"),
        ])
        .certificate()
        .unwrap();

        match request {
            DocumentRequest::Certificate(cert) => {
                assert_eq!(cert.start_date, NaiveDate::from_ymd_opt(2025, 3, 3));
                assert_eq!(cert.end_date, NaiveDate::from_ymd_opt(2025, 3, 7));
                assert_eq!(cert.theme, Color::rgb(0xaa, 0, 0));
                assert_eq!(cert.template, CertificateTemplate::Modern);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn malformed_values_are_client_errors() {
        assert!(params(&[("valor", "dez")]).receipt().unwrap_err().is_client_error());
        assert!(params(&[("cor", "azul")]).certificate().unwrap_err().is_client_error());
        assert!(params(&[("data_inicio", "2025-13-01")]).certificate().unwrap_err().is_client_error());
        assert!(params(&[("carga_horaria", "-2")]).certificate().unwrap_err().is_client_error());
    }
}

//! JSON bodies accepted by the POST endpoints.

use serde::Deserialize;

use super::params::{parse_color, parse_date};
use crate::core::DocumentResult;
use crate::models::{
    pair_items, BudgetRequest, CertificateRequest, ContractRequest, DocumentRequest, InvoiceRequest, LetterRequest,
    LineItem, ReceiptRequest, DEFAULT_WARRANTY_DAYS,
};

/// Items may come as `itens` objects, as parallel `servicos`/`valores`
/// arrays, or both; objects come first.
#[derive(Debug, Default, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    pub itens: Vec<LineItem>,
    #[serde(default)]
    pub servicos: Vec<String>,
    #[serde(default)]
    pub valores: Vec<f64>,
}

impl ItemFields {
    pub fn into_items(self) -> DocumentResult<Vec<LineItem>> {
        let mut items = self.itens;
        items.extend(pair_items(self.servicos, self.valores)?);
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
pub struct OrcamentoBody {
    pub cliente: String,
    #[serde(flatten)]
    pub items: ItemFields,
}

impl OrcamentoBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        Ok(DocumentRequest::Budget(BudgetRequest {
            client: self.cliente,
            items: self.items.into_items()?,
        }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_warranty_days() -> u32 {
    DEFAULT_WARRANTY_DAYS
}

#[derive(Debug, Deserialize)]
pub struct NotaFiscalBody {
    pub numero: String,
    pub cliente: String,
    pub cpf_cnpj: Option<String>,
    pub endereco: Option<String>,
    #[serde(flatten)]
    pub items: ItemFields,
    pub observacoes: Option<String>,
    pub data: Option<String>,
    #[serde(default = "default_warranty_days")]
    pub garantia_dias: u32,
    pub formato: Option<String>,
    #[serde(default)]
    pub qrcode: bool,
    #[serde(default)]
    pub codigo_barras: bool,
}

impl NotaFiscalBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        Ok(DocumentRequest::Invoice(InvoiceRequest {
            number: self.numero,
            client: self.cliente,
            tax_id: non_blank(self.cpf_cnpj),
            address: non_blank(self.endereco),
            items: self.items.into_items()?,
            notes: non_blank(self.observacoes),
            date: non_blank(self.data),
            warranty_days: self.garantia_dias,
            format: self.formato.as_deref().unwrap_or_default().parse()?,
            qr_code: self.qrcode,
            barcode: self.codigo_barras,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct ContratoBody {
    pub cliente: String,
    pub descricao: String,
}

impl ContratoBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        Ok(DocumentRequest::Contract(ContractRequest {
            client: self.cliente,
            description: self.descricao,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct ReciboBody {
    pub cliente: String,
    pub valor: f64,
    pub referente: Option<String>,
}

impl ReciboBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        Ok(DocumentRequest::Receipt(ReceiptRequest {
            client: self.cliente,
            amount: self.valor,
            reference: self.referente,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct CartaBody {
    pub destinatario: String,
    pub mensagem: String,
}

impl CartaBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        Ok(DocumentRequest::Letter(LetterRequest {
            recipient: self.destinatario,
            message: self.mensagem,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct CertificadoBody {
    pub nome: String,
    pub curso: String,
    pub carga_horaria: Option<u32>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub local: Option<String>,
    pub instrutor: Option<String>,
    pub assinatura: Option<String>,
    pub cor: Option<String>,
    pub modelo: Option<String>,
    pub url_validacao: Option<String>,
    #[serde(default)]
    pub qrcode: bool,
}

impl CertificadoBody {
    pub fn into_request(self) -> DocumentResult<DocumentRequest> {
        let defaults = CertificateRequest::default();
        let date = |field: &str, value: Option<String>| -> DocumentResult<_> {
            match value.filter(|v| !v.trim().is_empty()) {
                Some(raw) => parse_date(field, &raw).map(Some),
                None => Ok(None),
            }
        };

        Ok(DocumentRequest::Certificate(CertificateRequest {
            name: self.nome,
            course: self.curso,
            hours: self.carga_horaria.unwrap_or(defaults.hours),
            start_date: date("data_inicio", self.data_inicio)?,
            end_date: date("data_fim", self.data_fim)?,
            location: self.local.unwrap_or(defaults.location),
            instructor: self.instrutor.unwrap_or(defaults.instructor),
            signature_label: self.assinatura.unwrap_or(defaults.signature_label),
            theme: match self.cor {
                Some(raw) => parse_color("cor", &raw)?,
                None => defaults.theme,
            },
            template: self.modelo.as_deref().unwrap_or_default().parse()?,
            verification_url: self.url_validacao.filter(|u| !u.trim().is_empty()),
            qr_code: self.qrcode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn budget_merges_objects_and_parallel_lists() {
        let body: OrcamentoBody = serde_json::from_value(json!({
            "cliente": "João",
            "itens": [{"descricao": "Troca de Tela", "valor": 199.9}],
            "servicos": ["Película"],
            "valores": [30.0]
        }))
        .unwrap();

        let request = body.into_request().unwrap();
        assert_eq!(
            request.items(),
            &[LineItem::new("Troca de Tela", 199.9), LineItem::new("Película", 30.0)]
        );
    }

    #[test]
    fn parallel_lists_must_match() {
        let body: OrcamentoBody = serde_json::from_value(json!({
            "cliente": "João",
            "servicos": ["A", "B"],
            "valores": [10.0]
        }))
        .unwrap();

        assert!(body.into_request().unwrap_err().is_client_error());
    }

    #[test]
    fn invoice_defaults() {
        let body: NotaFiscalBody = serde_json::from_value(json!({
            "numero": "0001",
            "cliente": "João",
            "data": "2025-10-06 09:00"
        }))
        .unwrap();

        match body.into_request().unwrap() {
            DocumentRequest::Invoice(invoice) => {
                assert_eq!(invoice.warranty_days, 90);
                assert_eq!(invoice.date.as_deref(), Some("2025-10-06 09:00"));
                assert!(invoice.items.is_empty());
                assert_eq!(invoice.tax_id, None);
                assert_eq!(invoice.notes, None);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn invoice_client_details() {
        let body: NotaFiscalBody = serde_json::from_value(json!({
            "numero": "0002",
            "cliente": "Oficina Silva",
            "cpf_cnpj": "12.345.678/0001-90",
            "endereco": "Rua A, 1",
            "observacoes": ""
        }))
        .unwrap();

        match body.into_request().unwrap() {
            DocumentRequest::Invoice(invoice) => {
                assert_eq!(invoice.tax_id.as_deref(), Some("12.345.678/0001-90"));
                assert_eq!(invoice.address.as_deref(), Some("Rua A, 1"));
                assert_eq!(invoice.notes, None);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn certificate_rejects_bad_colour() {
        let body: CertificadoBody = serde_json::from_value(json!({
            "nome": "Ana",
            "curso": "Eletrônica",
            "cor": "#12"
        }))
        .unwrap();

        assert!(body.into_request().unwrap_err().is_client_error());
    }
}

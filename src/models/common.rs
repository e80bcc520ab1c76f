use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::DocumentError;

/// A description/amount pair on an itemized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        LineItem {
            description: description.into(),
            amount,
        }
    }
}

/// Pairs parallel description/amount lists. Lengths must match.
pub fn pair_items(descriptions: Vec<String>, amounts: Vec<f64>) -> Result<Vec<LineItem>, DocumentError> {
    if descriptions.len() != amounts.len() {
        return Err(DocumentError::validation(format!(
            "Quantidade de serviços não bate com a de valores ({} serviços, {} valores).",
            descriptions.len(),
            amounts.len()
        )));
    }

    Ok(descriptions
        .into_iter()
        .zip(amounts)
        .map(|(description, amount)| LineItem { description, amount })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceFormat {
    #[default]
    A4,
    /// Bobina de impressora térmica de 80mm.
    Thermal,
}

impl FromStr for InvoiceFormat {
    type Err = DocumentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "a4" => Ok(InvoiceFormat::A4),
            "termica" | "térmica" | "termico" | "térmico" | "thermal" | "80mm" => Ok(InvoiceFormat::Thermal),
            other => Err(DocumentError::validation(format!(
                "Formato inválido: '{}' (use 'a4' ou 'termica')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertificateTemplate {
    /// Moldura dupla na cor do tema.
    #[default]
    Classic,
    /// Faixa lateral na cor do tema.
    Modern,
}

impl FromStr for CertificateTemplate {
    type Err = DocumentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "classico" | "clássico" | "classic" => Ok(CertificateTemplate::Classic),
            "moderno" | "modern" => Ok(CertificateTemplate::Modern),
            other => Err(DocumentError::validation(format!(
                "Modelo de certificado inválido: '{}' (use 'classico' ou 'moderno')",
                other
            ))),
        }
    }
}

/// Parses a boolean flag the way HTML forms and query strings send them.
pub fn parse_flag(field: &str, value: &str) -> Result<bool, DocumentError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "sim" | "yes" => Ok(true),
        "" | "0" | "false" | "off" | "nao" | "não" | "no" => Ok(false),
        other => Err(DocumentError::validation(format!(
            "Valor booleano inválido para '{}': {}",
            field, other
        ))),
    }
}

use serde::Deserialize;
use std::path::PathBuf;

use super::data::Company;

/// Pontos tipográficos por milímetro.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    A4,
    A4Landscape,
    /// Bobina térmica de 80mm; a altura acompanha o conteúdo.
    Thermal80 { height_mm: f32 },
}

impl PageSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A4Landscape => (297.0, 210.0),
            PageSize::Thermal80 { height_mm } => (80.0, *height_mm),
        }
    }

    /// Dimensões em pontos (largura, altura).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions();
        (mm(w), mm(h))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        // valores em pt, os mesmos usados pelo layout A4 original
        Margin {
            top: 42.0,
            bottom: 80.0,
            left: 70.0,
            right: 55.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Runtime settings, loaded from defaults, `.env` and `HELPTECH_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub company_name: String,
    pub company_cnpj: String,
    pub company_address: String,
    pub company_phone: String,
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
    pub max_items: usize,
    /// Comma separated list; empty means any origin.
    #[serde(default)]
    pub cors_origins: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_format: LogFormat::Pretty,
            company_name: "HelpTech Antunes - Assistência Técnica".to_string(),
            company_cnpj: "12.345.678/0001-99".to_string(),
            company_address: "Av. Luís Pereira dos Santos, 556 - Jundiaí/SP".to_string(),
            company_phone: "(11) 95780-5217".to_string(),
            archive_dir: None,
            max_items: 500,
            cors_origins: String::new(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_format", "pretty")?
            .set_default("company_name", defaults.company_name)?
            .set_default("company_cnpj", defaults.company_cnpj)?
            .set_default("company_address", defaults.company_address)?
            .set_default("company_phone", defaults.company_phone)?
            .set_default("max_items", defaults.max_items as i64)?
            .set_default("cors_origins", defaults.cors_origins)?
            .add_source(config::Environment::with_prefix("HELPTECH").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn company(&self) -> Company {
        Company {
            name: self.company_name.clone(),
            cnpj: self.company_cnpj.clone(),
            address: self.company_address.clone(),
            phone: self.company_phone.clone(),
        }
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

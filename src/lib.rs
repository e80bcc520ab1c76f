pub mod api;
pub mod core;
pub mod layouts;
pub mod models;
pub mod pdf;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{Company, DocumentError, DocumentResult, Settings};
pub use layouts::{render, RenderContext};
pub use models::{DocumentKind, DocumentRequest, LineItem, RenderedDocument};

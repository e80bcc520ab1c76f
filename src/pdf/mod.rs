pub mod barcode;
pub mod builder;
pub mod color;
pub mod fonts;
pub mod generator;
pub mod qr;

pub use builder::{Canvas, DrawOp, Page, Stroke};
pub use color::Color;
pub use fonts::Font;
pub use generator::PdfGenerator;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

use crate::core::{DocumentMetadata, DocumentResult};

use super::builder::{Canvas, DrawOp, Page, Stroke};
use super::color::Color;
use super::fonts::{encode_win_ansi, Font};

const PRODUCER: &str = concat!("helptech-documents ", env!("CARGO_PKG_VERSION"));

/// Serializa um [`Canvas`] em bytes PDF.
pub struct PdfGenerator {
    metadata: DocumentMetadata,
    compress: bool,
}

impl PdfGenerator {
    pub fn new(metadata: DocumentMetadata) -> Self {
        PdfGenerator {
            metadata,
            compress: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    pub fn generate(&self, canvas: &Canvas) -> DocumentResult<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(canvas.page_count());
        for page in canvas.pages() {
            let content_id = self.add_content_stream(&mut doc, page)?;
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let (width, height) = canvas.page_size().dimensions_pt();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(canvas.page_count() as i64),
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width.into(), height.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = self.add_info(&mut doc);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| crate::core::DocumentError::render(format!("Falha ao gravar PDF: {}", e)))?;

        Ok(buffer)
    }

    fn add_content_stream(&self, doc: &mut Document, page: &Page) -> DocumentResult<ObjectId> {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode()?;

        let stream = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&encoded)?;
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, encoder.finish()?)
        } else {
            Stream::new(Dictionary::new(), encoded)
        };

        Ok(doc.add_object(stream))
    }

    fn add_info(&self, doc: &mut Document) -> ObjectId {
        let mut info = dictionary! {
            "Title" => text_string(&self.metadata.title),
            "Author" => text_string(&self.metadata.author),
            "Producer" => text_string(PRODUCER),
            "CreationDate" => Object::string_literal(self.metadata.pdf_date()),
        };
        if let Some(subject) = &self.metadata.subject {
            info.set("Subject", text_string(subject));
        }
        doc.add_object(info)
    }
}

/// String de texto do dicionário /Info: ASCII literal ou UTF-16BE com BOM.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn real(value: f32) -> Object {
    value.into()
}

fn color_operands(color: &Color) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

fn stroke_operations(ops: &mut Vec<Operation>, stroke: &Stroke) {
    ops.push(Operation::new("w", vec![real(stroke.width)]));
    ops.push(Operation::new("RG", color_operands(&stroke.color)));
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, font, size, color, text } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.resource_name().as_bytes().to_vec()), real(*size)],
                ));
                ops.push(Operation::new("rg", color_operands(color)));
                ops.push(Operation::new("Td", vec![real(*x), real(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line { from, to, stroke } => {
                ops.push(Operation::new("q", vec![]));
                stroke_operations(&mut ops, stroke);
                ops.push(Operation::new("m", vec![real(from.0), real(from.1)]));
                ops.push(Operation::new("l", vec![real(to.0), real(to.1)]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Rect { x, y, width, height, fill, stroke } => {
                ops.push(Operation::new("q", vec![]));
                if let Some(color) = fill {
                    ops.push(Operation::new("rg", color_operands(color)));
                }
                if let Some(stroke) = stroke {
                    stroke_operations(&mut ops, stroke);
                }
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                let paint = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    _ => "S",
                };
                ops.push(Operation::new(paint, vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

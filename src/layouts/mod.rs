pub mod blocks;
pub mod documents;
pub mod helpers;
pub mod layout_trait;

pub use documents::*;
pub use layout_trait::Layout;

use chrono::{Local, NaiveDateTime};
use std::time::Instant;
use tracing::debug;

use crate::core::{Company, DocumentMetadata, DocumentResult};
use crate::models::{DocumentRequest, RenderedDocument};
use crate::pdf::{Canvas, PdfGenerator};

/// O que um layout precisa além dos dados da requisição.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub company: Company,
    pub generated_at: NaiveDateTime,
}

impl RenderContext {
    pub fn new(company: Company, generated_at: NaiveDateTime) -> Self {
        RenderContext { company, generated_at }
    }

    /// Contexto com o horário local atual.
    pub fn now(company: Company) -> Self {
        RenderContext::new(company, Local::now().naive_local())
    }
}

/// Desenha e serializa o documento pedido.
pub fn render(request: &DocumentRequest, ctx: &RenderContext) -> DocumentResult<RenderedDocument> {
    let started = Instant::now();
    let canvas = draw(request, ctx)?;

    let kind = request.kind();
    let filename = request.filename();
    let metadata = DocumentMetadata::new(kind.title(), ctx.company.name.clone(), ctx.generated_at)
        .with_subject(filename.trim_end_matches(".pdf"));
    let bytes = PdfGenerator::new(metadata).generate(&canvas)?;

    debug!(
        kind = %kind,
        pages = canvas.page_count(),
        size = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Documento renderizado"
    );

    Ok(RenderedDocument {
        kind,
        filename,
        pages: canvas.page_count(),
        bytes,
    })
}

/// Só o desenho, sem serializar; usado também nos testes.
pub fn draw(request: &DocumentRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
    match request {
        DocumentRequest::Budget(r) => BudgetLayout.draw(r, ctx),
        DocumentRequest::Invoice(r) => InvoiceLayout.draw(r, ctx),
        DocumentRequest::Contract(r) => ContractLayout.draw(r, ctx),
        DocumentRequest::Receipt(r) => ReceiptLayout.draw(r, ctx),
        DocumentRequest::Letter(r) => LetterLayout.draw(r, ctx),
        DocumentRequest::Certificate(r) => CertificateLayout.draw(r, ctx),
    }
}

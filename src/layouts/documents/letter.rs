use crate::core::DocumentResult;
use crate::layouts::blocks::A4Flow;
use crate::layouts::{Layout, RenderContext};
use crate::models::{DocumentKind, LetterRequest};
use crate::pdf::{Canvas, Font};

const EMPTY_MESSAGE: &str = "Mensagem vazia.";

pub struct LetterLayout;

impl Layout for LetterLayout {
    type Request = LetterRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Letter
    }

    fn draw(&self, request: &LetterRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let mut flow = A4Flow::new(ctx, self.kind().title());
        flow.line(Font::Helvetica, 12.0, &format!("Para: {}", request.recipient));
        flow.advance(10.0);

        let message = if request.message.is_empty() {
            EMPTY_MESSAGE
        } else {
            request.message.as_str()
        };
        flow.free_text(message, 12.0);

        flow.advance(20.0);
        flow.line(Font::Helvetica, 12.0, "Atenciosamente,");
        flow.line(Font::HelveticaBold, 12.0, &ctx.company.name);

        Ok(flow.finish())
    }
}

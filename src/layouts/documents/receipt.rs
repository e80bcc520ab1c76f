use crate::core::DocumentResult;
use crate::layouts::blocks::A4Flow;
use crate::layouts::helpers::{format_currency, format_date};
use crate::layouts::{Layout, RenderContext};
use crate::models::{DocumentKind, ReceiptRequest};
use crate::pdf::{Canvas, Font};

pub struct ReceiptLayout;

impl Layout for ReceiptLayout {
    type Request = ReceiptRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Receipt
    }

    fn draw(&self, request: &ReceiptRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let mut flow = A4Flow::new(ctx, self.kind().title());
        flow.line(Font::Helvetica, 12.0, &format!("Recebemos de: {}", request.client));
        flow.line(Font::Helvetica, 12.0, &format!("Valor: {}", format_currency(request.amount)));
        if let Some(reference) = request.reference.as_deref().filter(|r| !r.trim().is_empty()) {
            flow.paragraph(None, &format!("Referente a: {}", reference), 12.0);
        }

        flow.advance(10.0);
        flow.paragraph(
            None,
            &format!(
                "Para clareza, firmamos o presente recibo dando plena quitação do valor acima. {}, {}.",
                ctx.company.address,
                format_date(&ctx.generated_at.date())
            ),
            11.0,
        );

        flow.advance(30.0);
        let width = 240.0;
        let x = flow.left() + (flow.content_width() - width) / 2.0;
        flow.signature(x, width, &ctx.company.name);

        Ok(flow.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;

    #[test]
    fn prints_payer_and_formatted_amount() {
        let request = ReceiptRequest {
            client: "Maria".to_string(),
            amount: 1250.5,
            reference: Some("Troca de tela".to_string()),
        };
        let canvas = ReceiptLayout.draw(&request, &context()).unwrap();
        let texts: Vec<&str> = canvas.texts().collect();

        assert!(texts.contains(&"Recebemos de: Maria"));
        assert!(texts.contains(&"Valor: R$ 1.250,50"));
        assert!(texts.contains(&"Referente a: Troca de tela"));
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        let request = ReceiptRequest {
            amount: -1.0,
            ..ReceiptRequest::default()
        };
        let canvas = ReceiptLayout.draw(&request, &context()).unwrap();
        assert!(canvas.texts().any(|t| t == "Valor: R$ -1,00"));
    }
}

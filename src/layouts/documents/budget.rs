use crate::core::DocumentResult;
use crate::models::{BudgetRequest, DocumentKind};
use crate::pdf::{Canvas, Font};

use crate::layouts::blocks::A4Flow;
use crate::layouts::{Layout, RenderContext};

pub struct BudgetLayout;

impl Layout for BudgetLayout {
    type Request = BudgetRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Budget
    }

    fn draw(&self, request: &BudgetRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let mut flow = A4Flow::new(ctx, self.kind().title());
        flow.line(Font::Helvetica, 12.0, &format!("Cliente: {}", request.client));
        flow.advance(8.0);
        flow.item_table(&request.items);
        flow.line(
            Font::HelveticaOblique,
            9.0,
            "Orçamento válido por 15 dias. Valores sujeitos a confirmação após diagnóstico.",
        );
        Ok(flow.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;
    use crate::models::LineItem;

    #[test]
    fn prints_client_and_every_item() {
        let request = BudgetRequest {
            client: "João da Silva".to_string(),
            items: vec![LineItem::new("Troca de Tela", 199.9), LineItem::new("Bateria", 1000.0)],
        };
        let canvas = BudgetLayout.draw(&request, &context()).unwrap();
        let texts: Vec<&str> = canvas.texts().collect();

        assert!(texts.contains(&"Cliente: João da Silva"));
        assert!(texts.contains(&"1. Troca de Tela"));
        assert!(texts.contains(&"199,90"));
        assert!(texts.contains(&"2. Bateria"));
        assert!(texts.contains(&"1.000,00"));
        assert!(texts.contains(&"Total: R$ 1.199,90"));
    }

    #[test]
    fn empty_budget_still_has_a_total() {
        let request = BudgetRequest {
            client: "Ana".to_string(),
            items: vec![],
        };
        let canvas = BudgetLayout.draw(&request, &context()).unwrap();
        assert!(canvas.texts().any(|t| t == "Total: R$ 0,00"));
    }
}

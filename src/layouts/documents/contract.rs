use crate::core::DocumentResult;
use crate::layouts::blocks::A4Flow;
use crate::layouts::{Layout, RenderContext};
use crate::models::{ContractRequest, DocumentKind};
use crate::pdf::{Canvas, Font};

pub struct ContractLayout;

impl Layout for ContractLayout {
    type Request = ContractRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Contract
    }

    fn draw(&self, request: &ContractRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let mut flow = A4Flow::new(ctx, self.kind().title());
        flow.line(Font::Helvetica, 12.0, &format!("Cliente: {}", request.client));
        flow.advance(6.0);
        flow.line(Font::HelveticaBold, 12.0, "Descrição do serviço:");
        flow.advance(4.0);
        flow.free_text(&request.description, 12.0);

        flow.advance(30.0);
        let half = (flow.content_width() - 40.0) / 2.0;
        let (left, second) = (flow.left(), flow.left() + half + 40.0);
        flow.ensure_space(50.0);
        flow.signature(left, half, &format!("CONTRATANTE: {}", request.client));
        flow.signature(second, half, "CONTRATADA");

        Ok(flow.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;

    #[test]
    fn description_is_printed_verbatim() {
        let request = ContractRequest {
            client: "Cliente Teste".to_string(),
            description: "Formatação e backup do notebook".to_string(),
        };
        let canvas = ContractLayout.draw(&request, &context()).unwrap();
        let texts: Vec<&str> = canvas.texts().collect();

        assert!(texts.contains(&"Contrato de Prestação de Serviços"));
        assert!(texts.contains(&"Cliente: Cliente Teste"));
        assert!(texts.contains(&"Formatação e backup do notebook"));
        assert!(texts.contains(&"CONTRATANTE: Cliente Teste"));
    }

    #[test]
    fn long_descriptions_continue_on_the_next_page() {
        let request = ContractRequest {
            client: "Cliente Teste".to_string(),
            description: "Cláusula de prestação de serviço técnico. ".repeat(500),
        };
        let canvas = ContractLayout.draw(&request, &context()).unwrap();

        assert!(canvas.page_count() > 1);
        for page in canvas.pages() {
            assert!(page.texts().any(|t| t.starts_with("Documento gerado automaticamente")));
        }
    }
}

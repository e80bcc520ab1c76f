//! Blocos comuns aos documentos A4: cabeçalho da empresa, título, tabela de
//! itens, parágrafos e rodapé, com quebra de página.

use crate::core::{Margin, PageSize};
use crate::models::LineItem;
use crate::pdf::{Canvas, Color, Font};

use super::helpers::{format_currency, format_number_with_separators, format_timestamp, truncate_to_width, wrap_text};
use super::RenderContext;

pub const FOOTER_Y: f32 = 40.0;
const ROW_GAP: f32 = 18.0;
const DESCRIPTION_WIDTH: f32 = 360.0;

/// Cursor vertical sobre um canvas A4 que abre páginas novas quando o
/// conteúdo chega à margem inferior.
pub struct A4Flow<'a> {
    canvas: Canvas,
    ctx: &'a RenderContext,
    margin: Margin,
    y: f32,
}

impl<'a> A4Flow<'a> {
    /// Primeira página com cabeçalho da empresa, título e data de geração.
    pub fn new(ctx: &'a RenderContext, title: &str) -> Self {
        let mut flow = A4Flow {
            canvas: Canvas::new(PageSize::A4),
            ctx,
            margin: Margin::default(),
            y: 0.0,
        };
        flow.company_header();
        flow.title_block(title);
        flow
    }

    pub fn left(&self) -> f32 {
        self.margin.left
    }

    pub fn right(&self) -> f32 {
        self.canvas.width() - self.margin.right
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y - height >= self.margin.bottom
    }

    /// Abre uma página nova se `height` não couber na atual.
    pub fn ensure_space(&mut self, height: f32) {
        if !self.fits(height) {
            self.new_page();
        }
    }

    /// Fecha a página corrente com rodapé e abre outra com o cabeçalho da empresa.
    pub fn new_page(&mut self) {
        self.footer();
        self.canvas.show_page();
        self.company_header();
    }

    /// Uma linha de texto na margem esquerda.
    pub fn line(&mut self, font: Font, size: f32, text: &str) {
        let leading = size * 1.5;
        self.ensure_space(leading);
        let x = self.left();
        self.canvas.set_fill_color(Color::BLACK).set_font(font, size).draw_string(x, self.y, text);
        self.y -= leading;
    }

    /// Parágrafo com título opcional, quebrado na largura útil.
    ///
    /// Parágrafos que cabem numa página não são divididos; os maiores fluem
    /// linha a linha para as páginas seguintes.
    pub fn paragraph(&mut self, heading: Option<&str>, text: &str, size: f32) {
        let leading = size * 1.35;
        let lines = wrap_text(text, Font::Helvetica, size, self.content_width());
        let heading_height = if heading.is_some() { 16.0 } else { 0.0 };
        let needed = heading_height + lines.len() as f32 * leading;

        let fresh_page_room = self.fresh_page_top() - self.margin.bottom;
        if !self.fits(needed) && needed <= fresh_page_room {
            self.new_page();
        }

        if let Some(heading) = heading {
            self.ensure_space(heading_height + leading);
            let x = self.left();
            self.canvas.set_fill_color(Color::BLACK).set_font(Font::HelveticaBold, 11.0).draw_string(x, self.y, heading);
            self.y -= heading_height;
        }

        for line in &lines {
            self.ensure_space(leading);
            let x = self.left();
            self.canvas.set_fill_color(Color::BLACK).set_font(Font::Helvetica, size).draw_string(x, self.y, line);
            self.y -= leading;
        }
        self.y -= leading / 2.0;
    }

    /// Texto livre: cada linha do original vira um parágrafo; linhas vazias
    /// viram espaço em branco.
    pub fn free_text(&mut self, text: &str, size: f32) {
        let leading = size * 1.35;
        for raw in text.lines() {
            if raw.trim().is_empty() {
                self.ensure_space(leading);
                self.y -= leading;
                continue;
            }
            for line in wrap_text(raw, Font::Helvetica, size, self.content_width()) {
                self.ensure_space(leading);
                let x = self.left();
                self.canvas.set_fill_color(Color::BLACK).set_font(Font::Helvetica, size).draw_string(x, self.y, &line);
                self.y -= leading;
            }
        }
    }

    /// Tabela de serviços com total; devolve a soma dos valores.
    pub fn item_table(&mut self, items: &[LineItem]) -> f64 {
        self.ensure_space(48.0 + ROW_GAP);
        self.table_heading("Descrição dos Serviços");

        let mut total = 0.0;
        for (index, item) in items.iter().enumerate() {
            if self.y < self.margin.bottom {
                self.new_page();
                self.table_heading("Descrição dos Serviços (continuação)");
            }

            let label = truncate_to_width(
                &format!("{}. {}", index + 1, item.description),
                Font::Helvetica,
                11.0,
                DESCRIPTION_WIDTH,
            );
            let (left, right) = (self.left(), self.right());
            self.canvas
                .set_fill_color(Color::BLACK)
                .set_font(Font::Helvetica, 11.0)
                .draw_string(left, self.y, &label)
                .draw_right_string(right, self.y, &format_number_with_separators(item.amount, 2));

            total += item.amount;
            self.y -= ROW_GAP;
        }

        if !self.fits(24.0) {
            self.new_page();
            self.table_heading("Descrição dos Serviços (continuação)");
        }

        let right = self.right();
        self.y -= 6.0;
        self.canvas
            .set_font(Font::HelveticaBold, 12.0)
            .draw_right_string(right, self.y, &format!("Total: {}", format_currency(total)));
        self.y -= 30.0;

        total
    }

    /// Linha para assinatura, com legenda abaixo.
    pub fn signature(&mut self, x: f32, width: f32, caption: &str) {
        self.ensure_space(50.0);
        let line_y = self.y - 20.0;
        self.canvas
            .set_stroke_color(Color::BLACK)
            .set_line_width(0.8)
            .line(x, line_y, x + width, line_y)
            .set_fill_color(Color::BLACK)
            .set_font(Font::Helvetica, 10.0)
            .draw_centred_string(x + width / 2.0, line_y - 13.0, caption);
    }

    pub fn finish(mut self) -> Canvas {
        self.footer();
        self.canvas
    }

    fn fresh_page_top(&self) -> f32 {
        self.canvas.height() - self.margin.top - 55.0
    }

    fn company_header(&mut self) {
        let company = &self.ctx.company;
        let top = self.canvas.height() - self.margin.top;
        let (left, right) = (self.left(), self.right());

        self.canvas
            .set_fill_color(Color::BLACK)
            .set_font(Font::HelveticaBold, 14.0)
            .draw_string(left, top, &company.name)
            .set_font(Font::Helvetica, 9.0)
            .draw_string(left, top - 13.0, &format!("CNPJ: {}", company.cnpj))
            .draw_string(left, top - 24.0, &format!("Endereço: {}", company.address))
            .draw_string(left, top - 35.0, &format!("WhatsApp: {}", company.phone))
            .set_stroke_color(Color::GRAY)
            .set_line_width(0.5)
            .line(left, top - 45.0, right, top - 45.0);

        self.y = top - 55.0;
    }

    fn title_block(&mut self, title: &str) {
        let left = self.left();
        let generated = format!("Gerado em: {}", format_timestamp(&self.ctx.generated_at));
        self.y -= 17.0;
        self.canvas
            .set_fill_color(Color::BLACK)
            .set_font(Font::HelveticaBold, 16.0)
            .draw_string(left, self.y, title)
            .set_font(Font::Helvetica, 10.0)
            .draw_string(left, self.y - 15.0, &generated);
        self.y -= 38.0;
    }

    fn table_heading(&mut self, caption: &str) {
        let (left, right) = (self.left(), self.right());
        self.y -= 4.0;
        self.canvas
            .set_fill_color(Color::BLACK)
            .set_font(Font::HelveticaBold, 12.0)
            .draw_string(left, self.y, caption);
        self.y -= 20.0;

        self.canvas
            .set_font(Font::HelveticaBold, 11.0)
            .draw_string(left, self.y, "Serviço")
            .draw_right_string(right, self.y, "Valor (R$)")
            .set_stroke_color(Color::BLACK)
            .set_line_width(0.8)
            .line(left, self.y - 6.0, right, self.y - 6.0);
        self.y -= 24.0;
    }

    fn footer(&mut self) {
        let left = self.left();
        let text = format!("Documento gerado automaticamente pelo sistema {}", self.ctx.company.name);
        self.canvas
            .set_fill_color(Color::GRAY)
            .set_font(Font::HelveticaOblique, 9.0)
            .draw_string(left, FOOTER_Y, &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;

    fn row_count(canvas: &Canvas) -> usize {
        canvas
            .texts()
            .filter(|t| t.split_once(". ").map_or(false, |(n, _)| n.parse::<usize>().is_ok()))
            .count()
    }

    #[test]
    fn header_and_title_on_first_page() {
        let ctx = context();
        let canvas = A4Flow::new(&ctx, "Orçamento").finish();
        let texts: Vec<&str> = canvas.texts().collect();

        assert_eq!(texts[0], ctx.company.name);
        assert!(texts.contains(&"Orçamento"));
        assert!(texts.contains(&"Gerado em: 06/10/2025 09:00"));
        assert!(texts.last().unwrap().starts_with("Documento gerado automaticamente"));
    }

    #[test]
    fn table_sums_items_and_prints_total_once() {
        let ctx = context();
        let mut flow = A4Flow::new(&ctx, "Orçamento");
        let total = flow.item_table(&[LineItem::new("A", 10.0), LineItem::new("B", 20.0)]);
        let canvas = flow.finish();

        assert_eq!(total, 30.0);
        assert_eq!(row_count(&canvas), 2);
        assert_eq!(canvas.texts().filter(|t| *t == "Total: R$ 30,00").count(), 1);
    }

    #[test]
    fn long_tables_repeat_the_column_header() {
        let ctx = context();
        let items: Vec<LineItem> = (0..80).map(|i| LineItem::new(format!("Item {}", i), 1.0)).collect();
        let mut flow = A4Flow::new(&ctx, "Orçamento");
        flow.item_table(&items);
        let canvas = flow.finish();

        assert!(canvas.page_count() >= 2);
        assert_eq!(row_count(&canvas), 80);
        for page in canvas.pages() {
            assert!(page.texts().any(|t| t == "Valor (R$)"));
            assert!(page.texts().any(|t| t == ctx.company.name));
        }
        let second: Vec<&str> = canvas.pages()[1].texts().collect();
        assert!(second.contains(&"Descrição dos Serviços (continuação)"));
        assert_eq!(canvas.texts().filter(|t| t.starts_with("Total:")).count(), 1);
        let last = canvas.pages().last().unwrap();
        assert!(last.texts().any(|t| t == "Total: R$ 80,00"));
    }

    #[test]
    fn rows_stay_above_the_bottom_margin() {
        let ctx = context();
        let items: Vec<LineItem> = (0..120).map(|i| LineItem::new(format!("Item {}", i), 1.0)).collect();
        let mut flow = A4Flow::new(&ctx, "Nota");
        flow.item_table(&items);
        let canvas = flow.finish();

        for page in canvas.pages() {
            for op in &page.ops {
                if let crate::pdf::DrawOp::Text { y, text, .. } = op {
                    if !text.starts_with("Documento gerado") {
                        assert!(*y >= Margin::default().bottom - ROW_GAP, "{} at {}", text, y);
                    }
                }
            }
        }
    }

    #[test]
    fn free_text_flows_to_new_pages() {
        let ctx = context();
        let text = "Cláusula com bastante texto para ocupar espaço. ".repeat(400);
        let mut flow = A4Flow::new(&ctx, "Contrato");
        flow.free_text(&text, 12.0);
        let canvas = flow.finish();

        assert!(canvas.page_count() > 1);
    }
}

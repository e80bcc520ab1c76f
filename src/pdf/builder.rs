use crate::core::PageSize;

use super::color::Color;
use super::fonts::Font;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Uma operação de desenho em coordenadas absolutas (pt, origem no canto inferior esquerdo).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Superfície de desenho com estado de fonte e cores, no estilo de um canvas.
///
/// Cada operação registra o estado corrente, então a ordem das chamadas de
/// `set_*` só afeta o que vem depois delas.
#[derive(Debug, Clone)]
pub struct Canvas {
    page_size: PageSize,
    pages: Vec<Page>,
    font: Font,
    font_size: f32,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
}

impl Canvas {
    pub fn new(page_size: PageSize) -> Self {
        Canvas {
            page_size,
            pages: vec![Page::default()],
            font: Font::Helvetica,
            font_size: 12.0,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn width(&self) -> f32 {
        self.page_size.dimensions_pt().0
    }

    pub fn height(&self) -> f32 {
        self.page_size.dimensions_pt().1
    }

    pub fn set_font(&mut self, font: Font, size: f32) -> &mut Self {
        self.font = font;
        self.font_size = size;
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.fill_color = color;
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stroke_color = color;
        self
    }

    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.line_width = width;
        self
    }

    /// Largura do texto com a fonte corrente.
    pub fn string_width(&self, text: &str) -> f32 {
        self.font.string_width(text, self.font_size)
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) -> &mut Self {
        let op = DrawOp::Text {
            x,
            y,
            font: self.font,
            size: self.font_size,
            color: self.fill_color,
            text: text.to_string(),
        };
        self.push(op)
    }

    /// Desenha o texto terminando em `x`.
    pub fn draw_right_string(&mut self, x: f32, y: f32, text: &str) -> &mut Self {
        let width = self.string_width(text);
        self.draw_string(x - width, y, text)
    }

    /// Desenha o texto centralizado em `x`.
    pub fn draw_centred_string(&mut self, x: f32, y: f32, text: &str) -> &mut Self {
        let width = self.string_width(text);
        self.draw_string(x - width / 2.0, y, text)
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        let op = DrawOp::Line {
            from: (x1, y1),
            to: (x2, y2),
            stroke: self.current_stroke(),
        };
        self.push(op)
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, stroke: bool, fill: bool) -> &mut Self {
        if !stroke && !fill {
            return self;
        }

        let op = DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: fill.then_some(self.fill_color),
            stroke: stroke.then(|| self.current_stroke()),
        };
        self.push(op)
    }

    /// Encerra a página corrente e começa uma nova.
    pub fn show_page(&mut self) -> &mut Self {
        self.pages.push(Page::default());
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Todos os textos desenhados, em ordem, de todas as páginas.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| page.texts())
    }

    fn current_stroke(&self) -> Stroke {
        Stroke {
            color: self.stroke_color,
            width: self.line_width,
        }
    }

    fn push(&mut self, op: DrawOp) -> &mut Self {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_string_ends_at_anchor() {
        let mut canvas = Canvas::new(PageSize::A4);
        canvas.set_font(Font::Courier, 10.0);
        canvas.draw_right_string(100.0, 50.0, "abcd");

        match &canvas.pages()[0].ops[0] {
            DrawOp::Text { x, .. } => assert!((x - 76.0).abs() < 1e-4),
            other => panic!("unexpected op: {:?}", other),
        }
    }

    #[test]
    fn ops_capture_state_at_call_time() {
        let mut canvas = Canvas::new(PageSize::A4);
        canvas.set_fill_color(Color::GRAY).draw_string(0.0, 0.0, "a");
        canvas.set_fill_color(Color::BLACK).draw_string(0.0, 0.0, "b");

        let colors: Vec<Color> = canvas.pages()[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::GRAY, Color::BLACK]);
    }

    #[test]
    fn show_page_starts_a_fresh_page() {
        let mut canvas = Canvas::new(PageSize::A4);
        canvas.draw_string(10.0, 10.0, "primeira");
        canvas.show_page();
        canvas.draw_string(10.0, 10.0, "segunda");

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.pages()[1].texts().collect::<Vec<_>>(), vec!["segunda"]);
    }

    #[test]
    fn rect_without_paint_is_skipped() {
        let mut canvas = Canvas::new(PageSize::A4);
        canvas.rect(0.0, 0.0, 10.0, 10.0, false, false);
        assert!(canvas.pages()[0].ops.is_empty());
    }
}

//! Nota em bobina térmica de 80mm: uma única página cuja altura acompanha
//! o conteúdo.

use crate::core::{mm, DocumentResult, PageSize, PT_PER_MM};
use crate::layouts::helpers::{format_currency, format_number_with_separators, truncate_to_width, wrap_text};
use crate::layouts::{Layout, RenderContext};
use crate::models::{DocumentKind, InvoiceRequest};
use crate::pdf::barcode::draw_code128;
use crate::pdf::qr::draw_qr_code;
use crate::pdf::{Canvas, Color, Font};

use super::invoice::{issue_date, qr_summary, warranty_text, NOT_NFE_NOTICE};

const ROLL_WIDTH_MM: f32 = 80.0;
const SIDE_MARGIN_MM: f32 = 4.0;
const VERTICAL_MARGIN: f32 = 12.0;
const BODY_SIZE: f32 = 8.0;
const SMALL_SIZE: f32 = 6.5;
const BARCODE_HEIGHT: f32 = 36.0;
const QR_SIZE: f32 = 110.0;

#[derive(Debug, Clone, PartialEq)]
enum Row {
    Centered { font: Font, size: f32, text: String },
    Left { font: Font, size: f32, text: String },
    Pair { font: Font, left: String, right: String },
    Separator,
    Barcode(String),
    Qr(String),
    Gap(f32),
}

impl Row {
    fn height(&self) -> f32 {
        match self {
            Row::Centered { size, .. } | Row::Left { size, .. } => size * 1.35,
            Row::Pair { .. } => BODY_SIZE * 1.35,
            Row::Separator => BODY_SIZE,
            Row::Barcode(_) => BARCODE_HEIGHT + BODY_SIZE * 1.6,
            Row::Qr(_) => QR_SIZE + 4.0,
            Row::Gap(height) => *height,
        }
    }
}

fn printable_width() -> f32 {
    mm(ROLL_WIDTH_MM - 2.0 * SIDE_MARGIN_MM)
}

fn centered(rows: &mut Vec<Row>, font: Font, size: f32, text: &str) {
    for line in wrap_text(text, font, size, printable_width()) {
        rows.push(Row::Centered { font, size, text: line });
    }
}

fn left(rows: &mut Vec<Row>, size: f32, text: &str) {
    for line in wrap_text(text, Font::Courier, size, printable_width()) {
        rows.push(Row::Left {
            font: Font::Courier,
            size,
            text: line,
        });
    }
}

fn pair(rows: &mut Vec<Row>, font: Font, label: &str, value: String) {
    let room = printable_width() - font.string_width(&value, BODY_SIZE) - font.string_width(" ", BODY_SIZE);
    rows.push(Row::Pair {
        font,
        left: truncate_to_width(label, font, BODY_SIZE, room),
        right: value,
    });
}

fn build_rows(request: &InvoiceRequest, ctx: &RenderContext) -> Vec<Row> {
    let company = &ctx.company;
    let mut rows = Vec::new();

    centered(&mut rows, Font::CourierBold, 9.0, &company.name);
    centered(&mut rows, Font::Courier, SMALL_SIZE, &format!("CNPJ: {}", company.cnpj));
    centered(&mut rows, Font::Courier, SMALL_SIZE, &company.address);
    centered(&mut rows, Font::Courier, SMALL_SIZE, &format!("WhatsApp: {}", company.phone));
    rows.push(Row::Separator);

    centered(&mut rows, Font::CourierBold, 9.0, &format!("NOTA FISCAL Nº {}", request.number));
    centered(&mut rows, Font::Courier, BODY_SIZE, &issue_date(request, ctx));
    rows.push(Row::Separator);

    left(&mut rows, BODY_SIZE, &format!("Cliente: {}", request.client));
    if let Some(tax_id) = &request.tax_id {
        left(&mut rows, BODY_SIZE, &format!("CPF/CNPJ: {}", tax_id));
    }
    if let Some(address) = &request.address {
        left(&mut rows, BODY_SIZE, &format!("End.: {}", address));
    }
    rows.push(Row::Separator);

    let mut total = 0.0;
    for (index, item) in request.items.iter().enumerate() {
        pair(
            &mut rows,
            Font::Courier,
            &format!("{}. {}", index + 1, item.description),
            format_number_with_separators(item.amount, 2),
        );
        total += item.amount;
    }
    rows.push(Row::Separator);
    pair(&mut rows, Font::CourierBold, "TOTAL", format_currency(total));
    rows.push(Row::Separator);

    if let Some(notes) = &request.notes {
        left(&mut rows, SMALL_SIZE, &format!("Obs.: {}", notes));
        rows.push(Row::Separator);
    }

    left(&mut rows, SMALL_SIZE, &warranty_text(request.warranty_days));
    rows.push(Row::Gap(4.0));
    left(&mut rows, SMALL_SIZE, NOT_NFE_NOTICE);

    if request.barcode {
        rows.push(Row::Gap(6.0));
        rows.push(Row::Barcode(request.number.clone()));
    }
    if request.qr_code {
        rows.push(Row::Gap(6.0));
        rows.push(Row::Qr(qr_summary(request)));
    }

    rows.push(Row::Separator);
    centered(&mut rows, Font::Courier, SMALL_SIZE, "Documento gerado automaticamente");
    rows
}

pub struct ThermalInvoiceLayout;

impl Layout for ThermalInvoiceLayout {
    type Request = InvoiceRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Invoice
    }

    fn draw(&self, request: &InvoiceRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let rows = build_rows(request, ctx);
        let content_height: f32 = rows.iter().map(Row::height).sum();
        let height_mm = (content_height + 2.0 * VERTICAL_MARGIN) / PT_PER_MM;

        let mut canvas = Canvas::new(PageSize::Thermal80 { height_mm });
        let x_left = mm(SIDE_MARGIN_MM);
        let x_right = canvas.width() - mm(SIDE_MARGIN_MM);
        let x_center = canvas.width() / 2.0;
        let mut top = canvas.height() - VERTICAL_MARGIN;

        canvas.set_fill_color(Color::BLACK).set_stroke_color(Color::BLACK);
        for row in &rows {
            let height = row.height();
            // linha de base a ~75% da altura da linha
            let baseline = top - height * 0.75;
            match row {
                Row::Centered { font, size, text } => {
                    canvas.set_font(*font, *size).draw_centred_string(x_center, baseline, text);
                }
                Row::Left { font, size, text } => {
                    canvas.set_font(*font, *size).draw_string(x_left, baseline, text);
                }
                Row::Pair { font, left, right } => {
                    canvas
                        .set_font(*font, BODY_SIZE)
                        .draw_string(x_left, baseline, left)
                        .draw_right_string(x_right, baseline, right);
                }
                Row::Separator => {
                    let y = top - height / 2.0;
                    canvas.set_line_width(0.5).line(x_left, y, x_right, y);
                }
                Row::Barcode(data) => {
                    draw_code128(&mut canvas, data, x_left, top - BARCODE_HEIGHT, x_right - x_left, BARCODE_HEIGHT)?;
                    canvas
                        .set_fill_color(Color::BLACK)
                        .set_font(Font::Courier, BODY_SIZE)
                        .draw_centred_string(x_center, top - height + 2.0, data);
                }
                Row::Qr(data) => {
                    draw_qr_code(&mut canvas, data, x_center - QR_SIZE / 2.0, top - QR_SIZE, QR_SIZE)?;
                    canvas.set_fill_color(Color::BLACK);
                }
                Row::Gap(_) => {}
            }
            top -= height;
        }

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;
    use crate::models::{InvoiceFormat, LineItem};
    use crate::pdf::DrawOp;

    fn request(items: usize) -> InvoiceRequest {
        InvoiceRequest {
            number: "0007".to_string(),
            client: "Cliente Balcão".to_string(),
            items: (0..items)
                .map(|i| LineItem::new(format!("Serviço de manutenção número {}", i), 10.0))
                .collect(),
            format: InvoiceFormat::Thermal,
            ..InvoiceRequest::default()
        }
    }

    #[test]
    fn page_is_80mm_wide_and_grows_with_content() {
        let short = ThermalInvoiceLayout.draw(&request(1), &context()).unwrap();
        let long = ThermalInvoiceLayout.draw(&request(40), &context()).unwrap();

        assert!((short.width() - mm(80.0)).abs() < 0.01);
        assert_eq!(short.page_count(), 1);
        assert_eq!(long.page_count(), 1);
        assert!(long.height() > short.height() + 40.0 * BODY_SIZE);
    }

    #[test]
    fn text_stays_on_the_roll() {
        let canvas = ThermalInvoiceLayout.draw(&request(12), &context()).unwrap();
        for op in &canvas.pages()[0].ops {
            if let DrawOp::Text { x, y, font, size, text, .. } = op {
                assert!(*x >= mm(SIDE_MARGIN_MM) - 0.01, "{}", text);
                assert!(x + font.string_width(text, *size) <= canvas.width() - mm(SIDE_MARGIN_MM) + 0.01, "{}", text);
                assert!(*y > 0.0 && *y < canvas.height(), "{}", text);
            }
        }
    }

    #[test]
    fn prints_total_and_codes() {
        let request = InvoiceRequest {
            qr_code: true,
            barcode: true,
            ..request(3)
        };
        let canvas = ThermalInvoiceLayout.draw(&request, &context()).unwrap();
        let texts: Vec<&str> = canvas.texts().collect();

        assert!(texts.contains(&"NOTA FISCAL Nº 0007"));
        assert!(texts.contains(&"TOTAL"));
        assert!(texts.contains(&"R$ 30,00"));
        assert!(texts.contains(&"0007"));
    }

    #[test]
    fn client_details_and_notes_follow_the_client_line() {
        let request = InvoiceRequest {
            tax_id: Some("12.345.678/0001-90".to_string()),
            address: Some("Av. Central, 200".to_string()),
            notes: Some("Troca em 7 dias".to_string()),
            ..request(2)
        };
        let canvas = ThermalInvoiceLayout.draw(&request, &context()).unwrap();
        let texts: Vec<&str> = canvas.texts().collect();

        let client = texts.iter().position(|t| *t == "Cliente: Cliente Balcão").unwrap();
        assert_eq!(texts[client + 1], "CPF/CNPJ: 12.345.678/0001-90");
        assert_eq!(texts[client + 2], "End.: Av. Central, 200");
        assert!(texts.contains(&"Obs.: Troca em 7 dias"));

        let plain = ThermalInvoiceLayout.draw(&self::request(2), &context()).unwrap();
        assert!(canvas.height() > plain.height());
    }

    #[test]
    fn invoice_layout_dispatches_on_format() {
        let canvas = super::super::InvoiceLayout.draw(&request(2), &context()).unwrap();
        assert!((canvas.width() - mm(80.0)).abs() < 0.01);
    }
}

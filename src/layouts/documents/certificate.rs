use chrono::NaiveDate;

use crate::core::{DocumentResult, PageSize};
use crate::layouts::helpers::{format_date, format_date_range, shrink_to_fit, truncate_to_width, wrap_text};
use crate::layouts::{Layout, RenderContext};
use crate::models::{CertificateRequest, CertificateTemplate, DocumentKind};
use crate::pdf::qr::draw_qr_code;
use crate::pdf::{Canvas, Color, Font};

const BODY_WIDTH: f32 = 600.0;
const BODY_SIZE: f32 = 14.0;
const QR_SIZE: f32 = 80.0;
const SIGNATURE_WIDTH: f32 = 260.0;
/// Linha de local e data; termina antes do QR code.
const FOOTER_WIDTH: f32 = 400.0;

/// Período do curso; datas ausentes caem na outra ou na data de geração.
pub(crate) fn course_period(request: &CertificateRequest, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => (start, end),
        (Some(date), None) | (None, Some(date)) => (date, date),
        (None, None) => (today, today),
    }
}

fn body_text(request: &CertificateRequest, start: &NaiveDate, end: &NaiveDate) -> String {
    let hours = if request.hours == 1 {
        "1 hora".to_string()
    } else {
        format!("{} horas", request.hours)
    };
    let period = if start == end {
        format!("em {}", format_date(start))
    } else {
        format!("no período de {}", format_date_range(start, end))
    };

    format!(
        "concluiu com êxito o curso {}, com carga horária de {}, realizado {}, em {}.",
        request.course, hours, period, request.location
    )
}

fn verification_data(request: &CertificateRequest, start: &NaiveDate, end: &NaiveDate) -> String {
    match request.verification_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => url.to_string(),
        None => format!(
            "Certificado | {} | {} | {}h | {}",
            request.name,
            request.course,
            request.hours,
            format_date_range(start, end)
        ),
    }
}

fn draw_decoration(canvas: &mut Canvas, template: CertificateTemplate, theme: Color) -> f32 {
    let (width, height) = (canvas.width(), canvas.height());
    match template {
        CertificateTemplate::Classic => {
            canvas
                .set_stroke_color(theme)
                .set_line_width(4.0)
                .rect(20.0, 20.0, width - 40.0, height - 40.0, true, false)
                .set_line_width(1.0)
                .rect(30.0, 30.0, width - 60.0, height - 60.0, true, false);
            width / 2.0
        }
        CertificateTemplate::Modern => {
            let band = 70.0;
            canvas
                .set_fill_color(theme)
                .rect(0.0, 0.0, band, height, false, true)
                .set_fill_color(theme.tint(0.6))
                .rect(band, 0.0, 8.0, height, false, true)
                .set_stroke_color(theme)
                .set_line_width(1.5)
                .line(band + 40.0, height - 40.0, width - 40.0, height - 40.0)
                .line(band + 40.0, 40.0, width - 40.0, 40.0);
            // centro da área útil, à direita da faixa
            band + 8.0 + (width - band - 8.0) / 2.0
        }
    }
}

pub struct CertificateLayout;

impl Layout for CertificateLayout {
    type Request = CertificateRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Certificate
    }

    fn draw(&self, request: &CertificateRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        let mut canvas = Canvas::new(PageSize::A4Landscape);
        let (width, height) = (canvas.width(), canvas.height());
        let center = draw_decoration(&mut canvas, request.template, request.theme);
        let (start, end) = course_period(request, ctx.generated_at.date());

        let company = truncate_to_width(&ctx.company.name, Font::Helvetica, 10.0, BODY_WIDTH);
        let (name_size, name) = shrink_to_fit(&request.name, Font::HelveticaBold, 26.0, 14.0, BODY_WIDTH);

        canvas
            .set_fill_color(Color::GRAY)
            .set_font(Font::Helvetica, 10.0)
            .draw_centred_string(center, height - 62.0, &company)
            .set_fill_color(request.theme)
            .set_font(Font::HelveticaBold, 38.0)
            .draw_centred_string(center, height - 120.0, "CERTIFICADO")
            .set_font(Font::Helvetica, 14.0)
            .draw_centred_string(center, height - 142.0, "DE CONCLUSÃO")
            .set_fill_color(Color::BLACK)
            .set_font(Font::Helvetica, BODY_SIZE)
            .draw_centred_string(center, height - 195.0, "Certificamos que")
            .set_font(Font::HelveticaBold, name_size)
            .draw_centred_string(center, height - 232.0, &name);

        let mut y = height - 270.0;
        canvas.set_font(Font::Helvetica, BODY_SIZE);
        for line in wrap_text(&body_text(request, &start, &end), Font::Helvetica, BODY_SIZE, BODY_WIDTH) {
            canvas.draw_centred_string(center, y, &line);
            y -= BODY_SIZE * 1.4;
        }

        let signature_y = 130.0;
        let instructor = truncate_to_width(&request.instructor, Font::HelveticaBold, 11.0, SIGNATURE_WIDTH);
        let label = truncate_to_width(&request.signature_label, Font::Helvetica, 10.0, SIGNATURE_WIDTH);
        let place_and_date = truncate_to_width(
            &format!("{}, {}", request.location, format_date(&ctx.generated_at.date())),
            Font::Helvetica,
            10.0,
            FOOTER_WIDTH,
        );
        canvas
            .set_stroke_color(Color::BLACK)
            .set_line_width(0.8)
            .line(center - 130.0, signature_y, center + 130.0, signature_y)
            .set_font(Font::HelveticaBold, 11.0)
            .draw_centred_string(center, signature_y - 15.0, &instructor)
            .set_fill_color(Color::GRAY)
            .set_font(Font::Helvetica, 10.0)
            .draw_centred_string(center, signature_y - 29.0, &label)
            .draw_centred_string(center, 60.0, &place_and_date);

        if request.qr_code {
            let data = verification_data(request, &start, &end);
            draw_qr_code(&mut canvas, &data, width - 50.0 - QR_SIZE, 50.0, QR_SIZE)?;
            canvas
                .set_fill_color(Color::GRAY)
                .set_font(Font::Helvetica, 7.0)
                .draw_centred_string(width - 50.0 - QR_SIZE / 2.0, 42.0, "Verificação");
        }

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::tests::context;
    use crate::pdf::DrawOp;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn request() -> CertificateRequest {
        CertificateRequest {
            name: "Ana Souza".to_string(),
            course: "Manutenção de Smartphones".to_string(),
            hours: 20,
            start_date: Some(date(3)),
            end_date: Some(date(7)),
            ..CertificateRequest::default()
        }
    }

    fn joined(canvas: &Canvas) -> String {
        canvas.texts().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn landscape_page_with_name_and_period() {
        let canvas = CertificateLayout.draw(&request(), &context()).unwrap();

        assert!(canvas.width() > canvas.height());
        assert_eq!(canvas.page_count(), 1);
        let text = joined(&canvas);
        assert!(text.contains("Ana Souza"));
        assert!(text.contains("03/03/2025 a 07/03/2025"));
        assert!(text.contains("20 horas"));
    }

    #[test]
    fn single_day_course_prints_one_date() {
        let request = CertificateRequest {
            end_date: Some(date(3)),
            ..request()
        };
        let text = joined(&CertificateLayout.draw(&request, &context()).unwrap());
        assert!(text.contains("em 03/03/2025"));
        assert!(!text.contains(" a 03/03/2025"));
    }

    #[test]
    fn missing_dates_fall_back_to_generation_day() {
        let request = CertificateRequest {
            start_date: None,
            end_date: None,
            ..request()
        };
        let (start, end) = course_period(&request, date(9));
        assert_eq!((start, end), (date(9), date(9)));
    }

    #[test]
    fn templates_differ_in_decoration() {
        let classic = CertificateLayout.draw(&request(), &context()).unwrap();
        let modern = CertificateLayout
            .draw(
                &CertificateRequest {
                    template: CertificateTemplate::Modern,
                    ..request()
                },
                &context(),
            )
            .unwrap();

        let stroked_rects = |canvas: &Canvas| {
            canvas.pages()[0]
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Rect { stroke: Some(_), .. }))
                .count()
        };
        let filled_band = |canvas: &Canvas| {
            canvas.pages()[0].ops.iter().any(|op| {
                matches!(op, DrawOp::Rect { x, fill: Some(_), height, .. } if *x == 0.0 && *height == canvas.height())
            })
        };

        assert_eq!(stroked_rects(&classic), 2);
        assert!(!filled_band(&classic));
        assert_eq!(stroked_rects(&modern), 0);
        assert!(filled_band(&modern));
    }

    #[test]
    fn long_fields_stay_on_the_page() {
        for template in [CertificateTemplate::Classic, CertificateTemplate::Modern] {
            let request = CertificateRequest {
                name: "Maria Aparecida dos Santos Oliveira de Albuquerque e Vasconcelos".to_string(),
                instructor: "Prof. ".repeat(20),
                signature_label: "Coordenação Pedagógica ".repeat(10),
                location: "São José dos Campos ".repeat(10),
                qr_code: true,
                template,
                ..request()
            };
            let mut ctx = context();
            ctx.company.name = "HelpTech Antunes ".repeat(20);
            let canvas = CertificateLayout.draw(&request, &ctx).unwrap();

            for op in &canvas.pages()[0].ops {
                if let DrawOp::Text { x, font, size, text, .. } = op {
                    assert!(*x >= 0.0, "{}", text);
                    assert!(x + font.string_width(text, *size) <= canvas.width(), "{}", text);
                }
            }
            let name_size = canvas.pages()[0].ops.iter().find_map(|op| match op {
                DrawOp::Text { size, text, .. } if text.starts_with("Maria") => Some(*size),
                _ => None,
            });
            assert!(name_size.unwrap() < 26.0);
        }
    }

    #[test]
    fn qr_prefers_the_verification_url() {
        let with_url = CertificateRequest {
            verification_url: Some("https://helptech.example/cert/123".to_string()),
            ..request()
        };
        assert_eq!(
            verification_data(&with_url, &date(3), &date(7)),
            "https://helptech.example/cert/123"
        );
        assert!(verification_data(&request(), &date(3), &date(7)).starts_with("Certificado | Ana Souza"));
    }

    #[test]
    fn qr_is_drawn_when_enabled() {
        let request = CertificateRequest {
            qr_code: true,
            ..request()
        };
        let canvas = CertificateLayout.draw(&request, &context()).unwrap();
        assert!(canvas.texts().any(|t| t == "Verificação"));
    }
}

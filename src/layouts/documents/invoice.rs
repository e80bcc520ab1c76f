use crate::core::DocumentResult;
use crate::layouts::blocks::A4Flow;
use crate::layouts::helpers::{format_number_with_separators, format_timestamp};
use crate::layouts::{Layout, RenderContext};
use crate::models::{DocumentKind, InvoiceFormat, InvoiceRequest};
use crate::pdf::barcode::draw_code128;
use crate::pdf::qr::draw_qr_code;
use crate::pdf::{Canvas, Color, Font};

use super::ThermalInvoiceLayout;

pub(crate) const LEGAL_BASIS: &str = "Base legal (CDC – Lei 8.078/1990): Art. 26, II – 90 dias para reclamar de vícios \
aparentes em produtos/serviços duráveis; Arts. 18 e 20 – responsabilidade por vícios e direito à reexecução do serviço, \
abatimento proporcional ou restituição, conforme o caso.";

pub(crate) const NOT_NFE_NOTICE: &str = "Este documento não é NF-e; uso interno para orçamento/serviço. A eventual \
emissão fiscal ocorrerá em sistema próprio.";

const CODES_BLOCK_HEIGHT: f32 = 110.0;

pub(crate) fn warranty_text(days: u32) -> String {
    format!(
        "Garantia: {} dias a contar da data de retirada/entrega, abrangendo exclusivamente o serviço/peça \
         substituída. Perde a validade em caso de violação de lacres, quedas, umidade/oxidação, mau uso, softwares \
         não licenciados ou intervenção de terceiros. A garantia não cobre dados, acessórios, carcaças, displays com \
         trincas ou danos decorrentes de agentes externos.",
        days
    )
}

/// Data impressa: a informada pelo cliente ou a de geração.
pub(crate) fn issue_date(request: &InvoiceRequest, ctx: &RenderContext) -> String {
    request
        .date
        .clone()
        .unwrap_or_else(|| format_timestamp(&ctx.generated_at))
}

/// Conteúdo do QR code da nota.
pub fn qr_summary(request: &InvoiceRequest) -> String {
    let total: f64 = request.items.iter().map(|item| item.amount).sum();
    format!(
        "NF {} | {} | Total R$ {}",
        request.number,
        request.client,
        format_number_with_separators(total, 2)
    )
}

pub struct InvoiceLayout;

impl Layout for InvoiceLayout {
    type Request = InvoiceRequest;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Invoice
    }

    fn draw(&self, request: &InvoiceRequest, ctx: &RenderContext) -> DocumentResult<Canvas> {
        if request.format == InvoiceFormat::Thermal {
            return ThermalInvoiceLayout.draw(request, ctx);
        }

        let mut flow = A4Flow::new(ctx, &format!("Nota Fiscal Nº {}", request.number));
        flow.line(Font::HelveticaBold, 12.0, "Dados do Cliente:");
        flow.line(Font::Helvetica, 11.0, &format!("Nome: {}", request.client));
        if let Some(tax_id) = &request.tax_id {
            flow.line(Font::Helvetica, 11.0, &format!("CPF/CNPJ: {}", tax_id));
        }
        if let Some(address) = &request.address {
            flow.paragraph(None, &format!("Endereço: {}", address), 11.0);
        }
        flow.line(Font::Helvetica, 11.0, &format!("Data: {}", issue_date(request, ctx)));
        flow.advance(6.0);

        flow.item_table(&request.items);

        if let Some(notes) = &request.notes {
            flow.advance(6.0);
            flow.paragraph(Some("OBSERVAÇÕES"), notes, 10.0);
        }

        if request.qr_code || request.barcode {
            flow.ensure_space(CODES_BLOCK_HEIGHT);
            let top = flow.y();
            let (left, right) = (flow.left(), flow.right());

            if request.barcode {
                draw_code128(flow.canvas_mut(), &request.number, left, top - 50.0, 200.0, 45.0)?;
                flow.canvas_mut()
                    .set_fill_color(Color::BLACK)
                    .set_font(Font::Courier, 9.0)
                    .draw_centred_string(left + 100.0, top - 62.0, &request.number);
            }
            if request.qr_code {
                draw_qr_code(flow.canvas_mut(), &qr_summary(request), right - 90.0, top - 95.0, 90.0)?;
            }
            flow.advance(CODES_BLOCK_HEIGHT);
        }

        flow.paragraph(Some("GARANTIA"), &warranty_text(request.warranty_days), 10.0);
        flow.paragraph(Some("BASE LEGAL (CDC)"), LEGAL_BASIS, 10.0);
        flow.paragraph(Some("OBSERVAÇÃO"), NOT_NFE_NOTICE, 10.0);

        flow.advance(10.0);
        flow.line(
            Font::Helvetica,
            10.0,
            "Assinatura do Cliente: ____________________________    Data: ____/____/______",
        );

        Ok(flow.finish())
    }
}

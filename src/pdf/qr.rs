use qrcode::{Color as Module, QrCode};

use crate::core::DocumentResult;

use super::builder::Canvas;
use super::color::Color;

/// Margem silenciosa, em módulos, ao redor do símbolo.
const QUIET_ZONE: usize = 2;

/// Desenha um QR code quadrado com canto inferior esquerdo em (x, y).
///
/// Módulos escuros consecutivos da mesma linha viram um único retângulo.
pub fn draw_qr_code(canvas: &mut Canvas, data: &str, x: f32, y: f32, size: f32) -> DocumentResult<()> {
    let code = QrCode::new(data.as_bytes())?;
    let width = code.width();
    let modules = code.to_colors();
    let module_size = size / (width + 2 * QUIET_ZONE) as f32;

    canvas.set_fill_color(Color::WHITE);
    canvas.rect(x, y, size, size, false, true);
    canvas.set_fill_color(Color::BLACK);

    for row in 0..width {
        let top = y + size - (row + QUIET_ZONE) as f32 * module_size;
        let mut col = 0;
        while col < width {
            if modules[row * width + col] != Module::Dark {
                col += 1;
                continue;
            }

            let start = col;
            while col < width && modules[row * width + col] == Module::Dark {
                col += 1;
            }

            canvas.rect(
                x + (start + QUIET_ZONE) as f32 * module_size,
                top - module_size,
                (col - start) as f32 * module_size,
                module_size,
                false,
                true,
            );
        }
    }

    Ok(())
}

//! Código de barras Code 128, subconjunto B (ASCII 32..=127).

use crate::core::{DocumentError, DocumentResult};

use super::builder::Canvas;
use super::color::Color;

/// Larguras barra/espaço de cada símbolo, em módulos. O índice é o valor do símbolo.
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212", "221213",
    "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221", "223211", "221132",
    "221231", "213212", "223112", "312131", "311222", "321122", "321221", "312212", "322112", "322211",
    "212123", "212321", "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121", "313121", "211331",
    "231131", "213113", "213311", "213131", "311123", "311321", "331121", "312113", "312311", "332111",
    "314111", "221411", "431111", "111224", "111422", "121124", "121421", "141122", "141221", "112214",
    "112412", "122114", "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311", "113141",
    "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

const START_B: usize = 104;
const STOP: usize = 106;
const QUIET_ZONE_MODULES: u32 = 10;

/// Valores dos símbolos: start B, dados, checksum e stop.
pub fn code128_symbols(data: &str) -> DocumentResult<Vec<usize>> {
    if data.is_empty() {
        return Err(DocumentError::validation("Código de barras sem conteúdo"));
    }

    let mut symbols = Vec::with_capacity(data.len() + 3);
    symbols.push(START_B);

    for ch in data.chars() {
        let code = ch as u32;
        if !(32..=127).contains(&code) {
            return Err(DocumentError::validation(format!(
                "Caractere '{}' não pode ser codificado em Code 128",
                ch
            )));
        }
        symbols.push((code - 32) as usize);
    }

    let checksum = symbols
        .iter()
        .enumerate()
        .map(|(position, value)| position.max(1) * value)
        .sum::<usize>()
        % 103;
    symbols.push(checksum);
    symbols.push(STOP);

    Ok(symbols)
}

/// Sequência de larguras alternando barra e espaço, começando por barra.
fn code128_modules(data: &str) -> DocumentResult<Vec<u32>> {
    let symbols = code128_symbols(data)?;
    Ok(symbols
        .iter()
        .flat_map(|&symbol| PATTERNS[symbol].bytes().map(|b| u32::from(b - b'0')))
        .collect())
}

/// Largura total em módulos, incluindo as margens silenciosas.
fn width_in_modules(modules: &[u32]) -> u32 {
    modules.iter().sum::<u32>() + 2 * QUIET_ZONE_MODULES
}

/// Desenha o código com canto inferior esquerdo em (x, y) ocupando `width` de largura.
pub fn draw_code128(canvas: &mut Canvas, data: &str, x: f32, y: f32, width: f32, height: f32) -> DocumentResult<()> {
    let modules = code128_modules(data)?;
    let module_width = width / width_in_modules(&modules) as f32;

    canvas.set_fill_color(Color::BLACK);
    let mut cursor = x + QUIET_ZONE_MODULES as f32 * module_width;
    for (index, &span) in modules.iter().enumerate() {
        let span_width = span as f32 * module_width;
        if index % 2 == 0 {
            canvas.rect(cursor, y, span_width, height, false, true);
        }
        cursor += span_width;
    }

    Ok(())
}

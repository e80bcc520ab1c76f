use chrono::{NaiveDate, NaiveDateTime};

use crate::pdf::Font;

/// Formata um número com separador de milhar `.` e decimal `,` (ex.: `1.234,56`).
pub fn format_number_with_separators(num: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, num.abs());
    let (integer, decimal) = match formatted.split_once('.') {
        Some((integer, decimal)) => (integer, decimal),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    // "-0,00" não faz sentido quando o valor arredondado é zero
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if num.is_sign_negative() && !is_zero { "-" } else { "" };

    if decimals > 0 {
        format!("{}{},{}", sign, grouped, decimal)
    } else {
        format!("{}{}", sign, grouped)
    }
}

/// Valor em reais: `R$ 1.234,56`.
pub fn format_currency(amount: f64) -> String {
    format!("R$ {}", format_number_with_separators(amount, 2))
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Período no formato "início a fim"; datas iguais viram uma só.
pub fn format_date_range(start: &NaiveDate, end: &NaiveDate) -> String {
    if start == end {
        format_date(start)
    } else {
        format!("{} a {}", format_date(start), format_date(end))
    }
}

/// Quebra o texto em linhas que caibam em `max_width` pontos.
///
/// Empacota palavras de forma gulosa; uma palavra que sozinha excede a
/// largura é partida entre caracteres.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if font.string_width(&candidate, size) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }

        if font.string_width(word, size) <= max_width {
            line = word.to_string();
        } else {
            let mut pieces = split_long_word(word, font, size, max_width);
            line = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

fn split_long_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if font.string_width(&piece, size) > max_width {
            piece.pop();
            if piece.is_empty() {
                // nem um caractere cabe; não há como respeitar a largura
                break;
            }
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }

    if !piece.is_empty() && font.string_width(&piece, size) <= max_width {
        pieces.push(piece);
    }

    pieces
}

/// Corta o texto com reticências para caber em `max_width`.
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if font.string_width(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis = "…";
    let mut result = String::new();
    for ch in text.chars() {
        result.push(ch);
        let candidate = format!("{}{}", result.trim_end(), ellipsis);
        if font.string_width(&candidate, size) > max_width {
            result.pop();
            break;
        }
    }

    format!("{}{}", result.trim_end(), ellipsis)
}

/// Reduz o corpo de `max_size` até `min_size` para o texto caber em
/// `max_width`; se nem assim couber, corta com reticências.
pub fn shrink_to_fit(text: &str, font: Font, max_size: f32, min_size: f32, max_width: f32) -> (f32, String) {
    let mut size = max_size;
    while size > min_size && font.string_width(text, size) > max_width {
        size = (size - 1.0).max(min_size);
    }
    (size, truncate_to_width(text, font, size, max_width))
}

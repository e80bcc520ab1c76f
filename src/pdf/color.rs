use std::fmt;

/// Cor RGB com componentes entre 0.0 e 1.0, como o operador `rg` espera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const GRAY: Color = Color { r: 0.45, g: 0.45, b: 0.45 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Aceita `#rrggbb` ou `rrggbb`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Versão clara da cor, misturada com branco.
    pub fn tint(&self, amount: f32) -> Self {
        let mix = |c: f32| c + (1.0 - c) * amount.clamp(0.0, 1.0);
        Color {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_or_without_hash() {
        assert_eq!(Color::from_hex("#1f4e79"), Some(Color::rgb(0x1f, 0x4e, 0x79)));
        assert_eq!(Color::from_hex("FFFFFF"), Some(Color::WHITE));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("azul"), None);
    }

    #[test]
    fn display_round_trips_through_hex() {
        let color = Color::rgb(0x1f, 0x4e, 0x79);
        assert_eq!(color.to_string(), "#1f4e79");
    }

    #[test]
    fn full_tint_is_white() {
        assert_eq!(Color::BLACK.tint(1.0), Color::WHITE);
    }
}

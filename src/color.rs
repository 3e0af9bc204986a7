//! Packed `0xRRGGBB` color helpers and label color rules.

/// Split a packed color into normalized RGB components.
#[must_use]
pub fn hex_to_rgb(color: u32) -> [f32; 3] {
    let [r, g, b] = channels(color);
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

fn channels(color: u32) -> [u32; 3] {
    [(color >> 16) & 0xFF, (color >> 8) & 0xFF, color & 0xFF]
}

fn pack([r, g, b]: [u32; 3]) -> u32 {
    (r << 16) | (g << 8) | b
}

/// Relative luminance on the 0..255 scale.
#[must_use]
pub fn luminance(color: u32) -> f32 {
    let [r, g, b] = channels(color);
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}

/// Darken bright colors and lighten dark ones so text stays readable on
/// top of the input color.
#[must_use]
pub fn adjust(color: u32) -> u32 {
    let bright = luminance(color) > 127.0;
    pack(channels(color).map(|c| {
        let c = c as f32;
        let out = if bright {
            c * 3.0 / 10.0
        } else {
            255.0 - (255.0 - c) * 3.0 / 10.0
        };
        out as u32
    }))
}

/// Per-channel complement.
#[must_use]
pub fn inverse(color: u32) -> u32 {
    pack(channels(color).map(|c| 255 - c))
}

/// How a label color is derived from the atom color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRule {
    /// Use the atom color unchanged.
    None,
    /// Contrast-adjusted atom color (see [`adjust`]).
    Adjust,
    /// Complement of the atom color.
    Inverse,
    /// Fixed color.
    Fixed(u32),
}

impl ColorRule {
    /// Parse `none`, `adjust`, `inverse` or a `0x`-prefixed hex literal.
    /// Anything else resolves to black.
    #[must_use]
    pub fn parse(rule: &str) -> Self {
        let rule = rule.trim();
        match rule {
            "none" => Self::None,
            "adjust" => Self::Adjust,
            "inverse" => Self::Inverse,
            _ => {
                let hex = rule
                    .strip_prefix("0x")
                    .or_else(|| rule.strip_prefix("0X"));
                let value = hex.and_then(|h| u32::from_str_radix(h, 16).ok());
                Self::Fixed(value.map_or(0, |v| v & 0xFF_FF_FF))
            }
        }
    }

    /// Resolve the rule against an atom color.
    #[must_use]
    pub fn apply(self, color: u32) -> u32 {
        match self {
            Self::None => color,
            Self::Adjust => adjust(color),
            Self::Inverse => inverse(color),
            Self::Fixed(c) => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_darkens_bright_and_lightens_dark() {
        assert_eq!(adjust(0xFF_FF_FF), 0x4C_4C_4C);
        assert_eq!(adjust(0x00_00_00), 0xB2_B2_B2);
    }

    #[test]
    fn inverse_complements_channels() {
        assert_eq!(inverse(0x20_40_80), 0xDF_BF_7F);
    }

    #[test]
    fn rules_parse() {
        assert_eq!(ColorRule::parse("none").apply(0x12_34_56), 0x12_34_56);
        assert_eq!(ColorRule::parse("0x202020"), ColorRule::Fixed(0x20_20_20));
        assert_eq!(ColorRule::parse("0xZZ"), ColorRule::Fixed(0));
        assert_eq!(ColorRule::parse("bogus"), ColorRule::Fixed(0));
    }

    #[test]
    fn rgb_is_normalized() {
        assert_eq!(hex_to_rgb(0xFF_00_00), [1.0, 0.0, 0.0]);
    }
}

//! Chemical element table: symbols, van der Waals radii and CPK colors.

/// Chemical elements known to the representation engine.
///
/// Anything not listed maps to [`Element::Unknown`], which still gets a
/// radius and a (hot pink) color so it stays visible.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    H,
    C,
    N,
    O,
    P,
    S,
    F,
    Cl,
    Br,
    I,
    Na,
    K,
    Mg,
    Ca,
    Fe,
    Zn,
    Se,
    #[default]
    Unknown,
}

impl Element {
    /// Parse an element symbol (case-insensitive, surrounding blanks
    /// ignored).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Self::H,
            "C" => Self::C,
            "N" => Self::N,
            "O" => Self::O,
            "P" => Self::P,
            "S" => Self::S,
            "F" => Self::F,
            "CL" => Self::Cl,
            "BR" => Self::Br,
            "I" => Self::I,
            "NA" => Self::Na,
            "K" => Self::K,
            "MG" => Self::Mg,
            "CA" => Self::Ca,
            "FE" => Self::Fe,
            "ZN" => Self::Zn,
            "SE" => Self::Se,
            _ => Self::Unknown,
        }
    }

    /// Element symbol as written in structure files.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::S => "S",
            Self::F => "F",
            Self::Cl => "Cl",
            Self::Br => "Br",
            Self::I => "I",
            Self::Na => "Na",
            Self::K => "K",
            Self::Mg => "Mg",
            Self::Ca => "Ca",
            Self::Fe => "Fe",
            Self::Zn => "Zn",
            Self::Se => "Se",
            Self::Unknown => "X",
        }
    }

    /// Van der Waals radius in angstroms.
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            Self::H => 1.2,
            Self::C => 1.7,
            Self::N => 1.55,
            Self::O => 1.52,
            Self::P | Self::S => 1.8,
            Self::F => 1.47,
            Self::Cl => 1.75,
            Self::Br => 1.85,
            Self::I => 1.98,
            Self::Na => 2.27,
            Self::K => 2.75,
            Self::Mg => 1.73,
            Self::Ca => 2.31,
            Self::Fe => 1.94,
            Self::Zn => 1.39,
            Self::Se => 1.9,
            Self::Unknown => 1.5,
        }
    }

    /// Jmol-style CPK color as `0xRRGGBB`.
    #[must_use]
    pub fn cpk_color(self) -> u32 {
        match self {
            Self::H => 0xFF_FF_FF,
            Self::C => 0x90_90_90,
            Self::N => 0x30_50_F8,
            Self::O => 0xFF_0D_0D,
            Self::P => 0xFF_80_00,
            Self::S => 0xFF_FF_30,
            Self::F => 0x90_E0_50,
            Self::Cl => 0x1F_F0_1F,
            Self::Br => 0xA6_29_29,
            Self::I => 0x94_00_94,
            Self::Na => 0xAB_5C_F2,
            Self::K => 0x8F_40_D4,
            Self::Mg => 0x8A_FF_00,
            Self::Ca => 0x3D_FF_00,
            Self::Fe => 0xE0_66_33,
            Self::Zn => 0x7D_80_B0,
            Self::Se => 0xFF_A1_00,
            Self::Unknown => 0xFF_14_93,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_parse_case_insensitively() {
        assert_eq!(Element::from_symbol("cl"), Element::Cl);
        assert_eq!(Element::from_symbol(" C "), Element::C);
        assert_eq!(Element::from_symbol("Xx"), Element::Unknown);
        assert_eq!(Element::from_symbol("CL").symbol(), "Cl");
    }

    #[test]
    fn carbon_is_gray() {
        assert_eq!(Element::C.cpk_color(), 0x90_90_90);
        assert!(Element::H.radius() < Element::C.radius());
    }
}

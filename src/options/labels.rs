use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::ColorRule;

/// Atom label text and colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Labels", inline)]
#[serde(default)]
pub struct LabelOptions {
    /// Text template; `{{Name}}`-style keys are substituted per atom.
    /// Empty means the atom's own label or name.
    #[schemars(title = "Template")]
    pub template: String,
    /// Text color rule: `none`, `adjust`, `inverse` or `0xRRGGBB`.
    #[schemars(title = "Text Color")]
    pub fg: String,
    /// Background color rule, same syntax as `fg`.
    #[schemars(title = "Background Color")]
    pub bg: String,
    /// Draw a background box behind the text.
    #[schemars(title = "Show Background")]
    pub show_bg: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            template: "{{Chain}}.{{Residue}}{{Sequence}}.{{Name}}".to_owned(),
            fg: "none".to_owned(),
            bg: "0x202020".to_owned(),
            show_bg: true,
        }
    }
}

impl LabelOptions {
    /// Options for plain name labels without a template.
    #[must_use]
    pub fn plain(show_bg: bool) -> Self {
        Self {
            template: String::new(),
            show_bg,
            ..Self::default()
        }
    }

    /// Parsed text color rule.
    #[must_use]
    pub fn fg_rule(&self) -> ColorRule {
        ColorRule::parse(&self.fg)
    }

    /// Parsed background color rule.
    #[must_use]
    pub fn bg_rule(&self) -> ColorRule {
        ColorRule::parse(&self.bg)
    }
}

use crate::groups::GroupKind;
use crate::options::LabelOptions;

use super::Mode;

/// Text labels at atom positions.
#[derive(Debug, Clone, Default)]
pub struct TextMode {
    opts: LabelOptions,
}

impl TextMode {
    /// Mode with the given label options.
    #[must_use]
    pub fn new(opts: LabelOptions) -> Self {
        Self { opts }
    }
}

impl Mode for TextMode {
    fn id(&self) -> &'static str {
        "TX"
    }

    fn name(&self) -> &'static str {
        "Text"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[GroupKind::TextLabels]
    }

    fn label_options(&self) -> LabelOptions {
        self.opts.clone()
    }
}

use crate::groups::GroupKind;
use crate::options::SurfaceOptions;

use super::Mode;

/// Molecular surface around element-radius atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceMode {
    opts: SurfaceOptions,
}

impl SurfaceMode {
    /// Mode with the given surface options.
    #[must_use]
    pub fn new(opts: SurfaceOptions) -> Self {
        Self { opts }
    }
}

impl Mode for SurfaceMode {
    fn id(&self) -> &'static str {
        "SU"
    }

    fn name(&self) -> &'static str {
        "Surface"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[GroupKind::Surface]
    }

    fn surface_options(&self) -> SurfaceOptions {
        self.opts
    }
}

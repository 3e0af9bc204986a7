use regex::{Captures, Regex};

use crate::chem::{Atom, Complex};
use crate::color::ColorRule;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Labels, Raycaster};
use crate::options::LabelOptions;
use crate::selection::Selection;

use super::{
    masked_chunks, BuildContext, GroupKind, Intersection, RepresentationGroup,
    SubsetMesh, TransformGroup,
};

/// `{{ Key }}` placeholders of a label template.
const TEMPLATE_KEY: &str = r"\{\{(\s*\w+\s*)\}\}";

/// One text label per selected atom.
///
/// Atoms whose label text comes out empty keep an empty chunk so the
/// chunk map stays one-to-one with the atom selection.
/// Labels have no pick geometry: `raycast` leaves the hit list untouched.
#[derive(Debug)]
pub struct AtomsTextGroup<'a> {
    selection: Selection<'a>,
    fg: ColorRule,
    bg: Option<ColorRule>,
    mesh: TransformGroup<Labels>,
}

impl<'a> AtomsTextGroup<'a> {
    /// Build labels from the mode's label options.
    ///
    /// # Errors
    ///
    /// Returns [`RepError::InvalidParameter`] if the template pattern
    /// cannot be compiled.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Result<Self, RepError> {
        let opts = ctx.mode.label_options();
        let geo = Labels::new(selection.chunks.len());
        let mesh = TransformGroup::new(geo, ctx.material.clone(), selection.complex.transforms());
        let mut group = Self {
            selection,
            fg: opts.fg_rule(),
            bg: opts.show_bg.then(|| opts.bg_rule()),
            mesh,
        };
        group.build(&opts, ctx)?;
        Ok(group)
    }

    fn build(&mut self, opts: &LabelOptions, ctx: &BuildContext<'_>) -> Result<(), RepError> {
        let key = Regex::new(TEMPLATE_KEY)
            .map_err(|e| RepError::InvalidParameter(format!("label template pattern: {e}")))?;
        let complex = self.selection.complex;
        let atoms = self.selection.atom_array();
        let (fg, bg) = (self.fg, self.bg);
        let geo = self.mesh.geometry_mut();
        let mut shown = 0usize;
        for (i, &idx) in self.selection.chunks.iter().enumerate() {
            let atom = &atoms[idx];
            let text = if opts.template.is_empty() {
                plain_text(atom)
            } else {
                Some(expand_template(&key, &opts.template, atom, complex))
            };
            let Some(text) = text.filter(|t| !t.is_empty()) else {
                continue;
            };
            let color = ctx.colorer.atom_color(atom, complex);
            geo.set_item(i, text, atom.position);
            geo.set_color(i, fg.apply(color), bg.map(|r| r.apply(color)));
            shown += 1;
        }
        geo.finalize();
        log::debug!(
            "atom labels: {shown} of {} atoms labelled",
            self.selection.chunks.len()
        );
        Ok(())
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The label buffer.
    #[must_use]
    pub fn labels(&self) -> &Labels {
        self.mesh.geometry()
    }
}

/// Text of an atom without a template: its own label, else its name when
/// name labels are visible.
fn plain_text(atom: &Atom) -> Option<String> {
    if let Some(label) = &atom.label {
        return Some(label.clone());
    }
    atom.label_visible.then(|| atom.visual_name().to_owned())
}

/// Substitute every `{{Key}}` in `template`. Keys are matched case- and
/// blank-insensitively; unknown keys become `null`.
fn expand_template(key: &Regex, template: &str, atom: &Atom, complex: &Complex) -> String {
    let residue = &complex.residues()[atom.residue];
    key.replace_all(template, |caps: &Captures<'_>| {
        let name: String = caps[1]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match name.as_str() {
            "serial" => atom.serial.to_string(),
            "name" => atom.visual_name().to_owned(),
            "elem" => atom.element.symbol().to_owned(),
            "residue" => residue.name.clone(),
            "sequence" => residue.sequence.to_string(),
            "chain" => complex.chains()[residue.chain].name.to_string(),
            "hetatm" => atom.het.to_string(),
            "water" => residue.is_water().to_string(),
            _ => "null".to_owned(),
        }
    })
    .into_owned()
}

impl RepresentationGroup for AtomsTextGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::TextLabels
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let atoms = self.selection.atom_array();
        let idc = &self.selection.chunks;
        masked_chunks(idc.len(), mask, |i| atoms[idc[i]].mask)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, _raycaster: &Raycaster, _intersects: &mut Vec<Intersection>) {}

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let atoms = self.selection.atom_array();
        let update_color = frame.needs_color_update(ctx.colorer);
        let (fg, bg) = (self.fg, self.bg);
        let geo = self.mesh.geometry_mut();
        for (i, &idx) in self.selection.chunks.iter().enumerate() {
            if geo.items()[i].text.is_empty() {
                continue;
            }
            geo.set_position(i, frame.atom_pos(idx));
            if update_color {
                let color = frame.atom_color(ctx.colorer, &atoms[idx]);
                geo.set_color(i, fg.apply(color), bg.map(|r| r.apply(color)));
            }
        }
        geo.finalize();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::colorer::{ElementColorer, SecondaryStructureColorer};
    use crate::frame::Frame;
    use crate::geometry::Ray;
    use crate::mode::{BallsAndSticksMode, TextMode};
    use crate::options::Material;
    use crate::test_fixtures::{benzene, peptide};

    fn ctx<'a>(mode: &'a dyn crate::mode::Mode, material: &'a Material) -> BuildContext<'a> {
        BuildContext {
            mode,
            colorer: &ElementColorer,
            poly_complexity: 0,
            material,
        }
    }

    #[test]
    fn default_template_names_chain_residue_and_atom() {
        let complex = peptide(2);
        let mode = TextMode::default();
        let material = Material::default();
        let group = AtomsTextGroup::new(Selection::atoms(&complex, 1), &ctx(&mode, &material)).unwrap();
        let labels = group.labels().items();
        assert_eq!(labels.len(), complex.atoms().len());
        assert_eq!(labels[1].text, "A.ALA1.CA");
        assert_eq!(labels[5].text, "A.ALA2.CA");
        assert_eq!(labels[0].background, Some(0x20_20_20));
        assert_eq!(labels[0].foreground, crate::chem::Element::N.cpk_color());
    }

    #[test]
    fn template_keys_ignore_case_and_blanks() {
        let complex = benzene();
        let key = Regex::new(TEMPLATE_KEY).unwrap();
        let h = &complex.atoms()[6];
        let text = expand_template(&key, "{{ ELEM }}/{{hetatm}}/{{Water}}/{{bogus}}/{{Serial}}", h, &complex);
        assert_eq!(text, format!("H/true/false/null/{}", h.serial));
    }

    #[test]
    fn plain_labels_prefer_the_atom_label() {
        let complex = peptide(1);
        let mut atom = complex.atoms()[0].clone();
        assert_eq!(plain_text(&atom).as_deref(), Some("N"));
        atom.label = Some("amide".to_owned());
        assert_eq!(plain_text(&atom).as_deref(), Some("amide"));
        atom.label = None;
        atom.label_visible = false;
        assert_eq!(plain_text(&atom), None);
    }

    #[test]
    fn plain_mode_has_no_background() {
        let complex = peptide(1);
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let group = AtomsTextGroup::new(Selection::atoms(&complex, 1), &ctx(&mode, &material)).unwrap();
        assert_eq!(group.labels().items()[1].text, "CA");
        assert!(group.labels().items().iter().all(|l| l.background.is_none()));
    }

    #[test]
    fn labels_add_no_hits() {
        let complex = peptide(1);
        let mode = TextMode::default();
        let material = Material::default();
        let group = AtomsTextGroup::new(Selection::atoms(&complex, 1), &ctx(&mode, &material)).unwrap();
        let ca = complex.atoms()[1].position;
        let ray = Ray::new(ca + Vec3::Z * 10.0, -Vec3::Z);
        let mut hits = Vec::new();
        group.raycast(&Raycaster::new(ray), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn frame_moves_labels_and_recolors() {
        let complex = peptide(2);
        let mode = TextMode::default();
        let material = Material::default();
        let colorer = SecondaryStructureColorer::default();
        let ctx = BuildContext {
            mode: &mode,
            colorer: &colorer,
            poly_complexity: 0,
            material: &material,
        };
        let mut group = AtomsTextGroup::new(Selection::atoms(&complex, 1), &ctx).unwrap();
        let shifted = complex.atoms().iter().map(|a| a.position + Vec3::Z).collect();
        let frame = Frame::new(&complex, shifted).unwrap();
        group.update_to_frame(&frame, &ctx).unwrap();
        let label = &group.labels().items()[2];
        assert_eq!(label.position, complex.atoms()[2].position + Vec3::Z);
        assert_eq!(label.foreground, colorer.coil);
        assert_eq!(label.text, "A.ALA1.C");
    }
}

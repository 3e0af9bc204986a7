use std::path::Path;

use glam::Vec3;
use molrep::chem::{BondType, Complex, ComplexBuilder, Element};
use molrep::colorer::ElementColorer;
use molrep::geometry::{Ray, Raycaster};
use molrep::groups::RepresentationGroup;
use molrep::mode::ModeKind;
use molrep::options::Options;
use molrep::representation::Representation;
use serde::Deserialize;

/// Structure shown when no file is given.
const DEFAULT_STRUCTURE: &str = include_str!("../demos/benzene.toml");

/// Single-residue structure description read from TOML.
#[derive(Debug, Deserialize)]
struct StructureFile {
    name: String,
    chain: char,
    residue: String,
    atoms: Vec<AtomEntry>,
    #[serde(default)]
    bonds: Vec<BondEntry>,
    #[serde(default)]
    cycles: Vec<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    name: String,
    element: String,
    position: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct BondEntry {
    atoms: [usize; 2],
    #[serde(default = "single")]
    order: u8,
    #[serde(default)]
    aromatic: bool,
}

const fn single() -> u8 {
    1
}

impl StructureFile {
    fn into_complex(self) -> Result<Complex, String> {
        let mut b = ComplexBuilder::new(self.name);
        let chain = b.add_chain(self.chain);
        let res = b.add_residue(chain, &self.residue, 1);
        let ids: Vec<usize> = self
            .atoms
            .iter()
            .map(|a| {
                let element = Element::from_symbol(&a.element);
                b.add_atom(res, &a.name, element, Vec3::from_array(a.position))
            })
            .collect();
        let atom = |i: usize| ids.get(i).copied().ok_or_else(|| format!("no atom {i}"));
        for bond in &self.bonds {
            let kind = if bond.aromatic {
                BondType::Aromatic
            } else {
                BondType::Covalent
            };
            let _ = b.add_bond(atom(bond.atoms[0])?, atom(bond.atoms[1])?, bond.order, kind);
        }
        for cycle in self.cycles {
            let ring = cycle.into_iter().map(&atom).collect::<Result<Vec<_>, _>>()?;
            b.add_cycle(ring);
        }
        Ok(b.build())
    }
}

fn load_structure(path: Option<&str>) -> Result<Complex, String> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?,
        None => DEFAULT_STRUCTURE.to_owned(),
    };
    let file: StructureFile = toml::from_str(&content).map_err(|e| e.to_string())?;
    file.into_complex()
}

fn load_options(path: Option<String>) -> Options {
    let Some(path) = path else {
        return Options::default();
    };
    match Options::load(Path::new(&path)) {
        Ok(options) => options,
        Err(e) => {
            log::warn!("{path}: {e}, using defaults");
            Options::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let id = args.next().unwrap_or_else(|| "BS".to_owned());
    let Some(kind) = ModeKind::from_id(&id) else {
        log::error!("Usage: molrep [MODE_ID] [STRUCTURE.toml] [OPTIONS.toml]");
        std::process::exit(1);
    };
    let complex = match load_structure(args.next().as_deref()) {
        Ok(complex) => complex,
        Err(e) => {
            log::error!("bad structure: {e}");
            std::process::exit(1);
        }
    };
    let options = load_options(args.next());

    let rep = match Representation::new(
        &complex,
        1,
        kind.create(&options),
        Box::new(ElementColorer),
        options.material.clone(),
        options.quality.resolution,
    ) {
        Ok(rep) => rep,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    for group in rep.groups() {
        log::info!("{}: {} chunks", group.kind().name(), group.chunk_count());
    }

    let ray = Ray::new(Vec3::new(20.0, 0.0, 0.0), -Vec3::X);
    for hit in rep.raycast(&Raycaster::new(ray)) {
        log::info!("hit {:?} at {:.2}", hit.target, hit.distance);
    }
}

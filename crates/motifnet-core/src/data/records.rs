use crate::core::models::bond::BondOrder;
use crate::core::models::molecule::{Molecule, StructureError};
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Bond between atoms {atom1} and {atom2} has unrecognized order '{order}'")]
    InvalidBondOrder {
        atom1: usize,
        atom2: usize,
        order: String,
    },

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// One bond of an archived molecule block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BondRecord {
    /// The two member atom indices, in the archived orientation.
    pub atoms: [usize; 2],
    /// Bond order string in toolkit notation (`"1"`, `"2"`, `"ar"`, …);
    /// single when absent.
    #[serde(default)]
    pub order: Option<String>,
}

/// The molecule block of an archive record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MoleculeRecord {
    /// Atomic numbers in atom index order.
    pub atomic_numbers: Vec<u8>,
    #[serde(default)]
    pub bonds: Vec<BondRecord>,
}

impl MoleculeRecord {
    /// Builds the in-memory topology from the archived block.
    ///
    /// # Errors
    ///
    /// Fails on unparseable bond orders or structurally invalid bonds
    /// (out-of-range or self-referential indices); the record is aborted,
    /// sibling records are unaffected.
    pub fn to_molecule(&self) -> Result<Molecule, RecordError> {
        let mut molecule = Molecule::new();
        for &atomic_number in &self.atomic_numbers {
            molecule.add_atom(atomic_number);
        }
        for bond in &self.bonds {
            let [atom1, atom2] = bond.atoms;
            let order = match &bond.order {
                None => BondOrder::default(),
                Some(raw) => raw
                    .parse()
                    .map_err(|_| RecordError::InvalidBondOrder {
                        atom1,
                        atom2,
                        order: raw.clone(),
                    })?,
            };
            molecule.add_bond(atom1, atom2, order)?;
        }
        Ok(molecule)
    }
}

/// One trajectory snapshot of an archive record, in archive-native units:
/// hartree energy, bohr geometry, hartree/bohr gradient or forces.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SnapshotRecord {
    pub energy: f64,
    pub geometry: Vec<[f64; 3]>,
    #[serde(default)]
    pub gradient: Option<Vec<[f64; 3]>>,
    #[serde(default)]
    pub forces: Option<Vec<[f64; 3]>>,
}

impl SnapshotRecord {
    /// Atom positions as geometric points, still in bohr.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.geometry
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect()
    }

    /// Per-atom forces, still in hartree/bohr.
    ///
    /// Explicit forces win when present; otherwise they are derived from the
    /// gradient (force = −gradient). Returns `None` when the snapshot
    /// carries neither, which makes the whole trajectory unreadable.
    pub fn resolve_forces(&self) -> Option<Vec<Vector3<f64>>> {
        if let Some(forces) = &self.forces {
            return Some(
                forces
                    .iter()
                    .map(|&[x, y, z]| Vector3::new(x, y, z))
                    .collect(),
            );
        }
        self.gradient.as_ref().map(|gradient| {
            gradient
                .iter()
                .map(|&[x, y, z]| -Vector3::new(x, y, z))
                .collect()
        })
    }
}

/// A complete archive record: the molecule block and, when the computation
/// produced one, its trajectory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveRecord {
    pub molecule: MoleculeRecord,
    /// Absent when the archived computation has no retrievable trajectory;
    /// an empty list is a successful, snapshot-free trajectory.
    #[serde(default)]
    pub trajectory: Option<Vec<SnapshotRecord>>,
}

use super::graph::{FactorGraph, FactorNodes};
use crate::core::models::molecule::{Molecule, StructureError};
use crate::core::motifs::extract::{MotifSet, extract_motifs};

/// Builds the typed factor graph for a molecule.
///
/// Motifs are enumerated with [`extract_motifs`] and assembled into node
/// collections in extraction order, so two constructions from the same
/// molecule produce identical graphs; later stages rely on this to address
/// factor instances by node index.
pub fn build_factor_graph(molecule: &Molecule) -> Result<FactorGraph, StructureError> {
    build_from_motifs(molecule.atom_count(), extract_motifs(molecule))
}

/// Assembles a factor graph from pre-extracted motif tuples.
///
/// Tuples may originate outside [`extract_motifs`], so every member index is
/// re-validated against `atom_count`; an out-of-range reference aborts the
/// whole construction.
pub fn build_from_motifs(
    atom_count: usize,
    motifs: MotifSet,
) -> Result<FactorGraph, StructureError> {
    let bonds = FactorNodes::from_tuples(motifs.bonds, atom_count)?;
    let angles = FactorNodes::from_tuples(motifs.angles, atom_count)?;
    let torsions = FactorNodes::from_tuples(motifs.torsions, atom_count)?;
    Ok(FactorGraph::new(atom_count, bonds, angles, torsions))
}

use crate::core::models::bond::Bond;
use crate::core::models::molecule::Molecule;

/// The ordered structural tuples of one molecule, grouped by arity.
///
/// Tuple order is deterministic for a given molecule: bonds follow insertion
/// order, angles and torsions follow ascending atom-index traversal. Later
/// stages reference motif instances positionally, so this order is part of
/// the contract, not an implementation detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifSet {
    pub bonds: Vec<[usize; 2]>,
    pub angles: Vec<[usize; 3]>,
    pub torsions: Vec<[usize; 4]>,
}

impl MotifSet {
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.bonds.len(), self.angles.len(), self.torsions.len())
    }
}

/// Enumerates all structural motifs of a molecule.
pub fn extract_motifs(molecule: &Molecule) -> MotifSet {
    MotifSet {
        bonds: bond_tuples(molecule),
        angles: angle_tuples(molecule),
        torsions: torsion_tuples(molecule),
    }
}

/// Bonds as ordered tuples, in stored orientation and insertion order.
pub fn bond_tuples(molecule: &Molecule) -> Vec<[usize; 2]> {
    molecule.bonds().iter().map(Bond::as_tuple).collect()
}

/// Enumerates angles `(a, b, c)` around each central atom `b`.
///
/// Each unordered pair of distinct bonded neighbors of `b` yields exactly one
/// angle, oriented so that `a < c`; the reversed traversal `(c, b, a)` is the
/// same physical motif and is never emitted separately.
pub fn angle_tuples(molecule: &Molecule) -> Vec<[usize; 3]> {
    let mut angles = Vec::new();
    for center in 0..molecule.atom_count() {
        let mut neighbors = molecule
            .neighbors(center)
            .map(<[usize]>::to_vec)
            .unwrap_or_default();
        neighbors.sort_unstable();

        for (i, &a) in neighbors.iter().enumerate() {
            for &c in &neighbors[i + 1..] {
                angles.push([a, center, c]);
            }
        }
    }
    angles
}

/// Enumerates proper torsions `(a, b, c, d)` around each central bond `(b, c)`.
///
/// For every stored bond, each combination of one further neighbor on each
/// end yields one torsion. Degenerate three-membered-ring traversals where
/// both ends reach the same atom (`a == d`) are skipped. Each tuple is
/// emitted in its canonical direction: the lexicographically smaller of the
/// end-to-end traversal and its reversal.
pub fn torsion_tuples(molecule: &Molecule) -> Vec<[usize; 4]> {
    let mut torsions = Vec::new();
    for bond in molecule.bonds() {
        let (b, c) = (bond.atom1, bond.atom2);
        let left = sorted_neighbors_excluding(molecule, b, c);
        let right = sorted_neighbors_excluding(molecule, c, b);

        for &a in &left {
            for &d in &right {
                if a == d {
                    continue;
                }
                torsions.push(canonical_torsion([a, b, c, d]));
            }
        }
    }
    torsions
}

fn sorted_neighbors_excluding(molecule: &Molecule, atom: usize, excluded: usize) -> Vec<usize> {
    let mut neighbors: Vec<usize> = molecule
        .neighbors(atom)
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(|&n| n != excluded)
        .collect();
    neighbors.sort_unstable();
    neighbors
}

fn canonical_torsion(tuple: [usize; 4]) -> [usize; 4] {
    let reversed = [tuple[3], tuple[2], tuple[1], tuple[0]];
    if reversed < tuple { reversed } else { tuple }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bond::BondOrder;

    /// A 4-atom butane-like carbon chain: 0-1-2-3.
    fn carbon_chain() -> Molecule {
        let mut molecule = Molecule::new();
        for _ in 0..4 {
            molecule.add_atom(6);
        }
        molecule.add_bond(0, 1, BondOrder::Single).unwrap();
        molecule.add_bond(1, 2, BondOrder::Single).unwrap();
        molecule.add_bond(2, 3, BondOrder::Single).unwrap();
        molecule
    }

    /// The 6-carbon ring of a cyclohexane skeleton (hydrogens omitted).
    fn cyclohexane_skeleton() -> Molecule {
        let mut molecule = Molecule::new();
        for _ in 0..6 {
            molecule.add_atom(6);
        }
        for i in 0..6 {
            molecule.add_bond(i, (i + 1) % 6, BondOrder::Single).unwrap();
        }
        molecule
    }

    /// Cyclopropane-like 3-ring: every atom bonded to every other.
    fn triangle() -> Molecule {
        let mut molecule = Molecule::new();
        for _ in 0..3 {
            molecule.add_atom(6);
        }
        molecule.add_bond(0, 1, BondOrder::Single).unwrap();
        molecule.add_bond(1, 2, BondOrder::Single).unwrap();
        molecule.add_bond(2, 0, BondOrder::Single).unwrap();
        molecule
    }

    #[test]
    fn bond_tuples_follow_insertion_order_and_orientation() {
        let molecule = carbon_chain();
        assert_eq!(bond_tuples(&molecule), vec![[0, 1], [1, 2], [2, 3]]);
    }

    #[test]
    fn chain_angles_are_oriented_with_smaller_outer_index_first() {
        let molecule = carbon_chain();
        assert_eq!(angle_tuples(&molecule), vec![[0, 1, 2], [1, 2, 3]]);
    }

    #[test]
    fn chain_has_single_torsion() {
        let molecule = carbon_chain();
        assert_eq!(torsion_tuples(&molecule), vec![[0, 1, 2, 3]]);
    }

    #[test]
    fn ring_counts_match_ring_size() {
        let molecule = cyclohexane_skeleton();
        let motifs = extract_motifs(&molecule);
        assert_eq!(motifs.counts(), (6, 6, 6));
    }

    #[test]
    fn ring_angles_have_one_entry_per_central_atom() {
        let molecule = cyclohexane_skeleton();
        let angles = angle_tuples(&molecule);
        for (center, angle) in angles.iter().enumerate() {
            assert_eq!(angle[1], center);
            assert!(angle[0] < angle[2]);
        }
    }

    #[test]
    fn triangle_has_no_degenerate_torsions() {
        let molecule = triangle();
        assert!(torsion_tuples(&molecule).is_empty());
    }

    #[test]
    fn torsions_are_canonical_under_reversal() {
        let molecule = cyclohexane_skeleton();
        for tuple in torsion_tuples(&molecule) {
            let reversed = [tuple[3], tuple[2], tuple[1], tuple[0]];
            assert!(tuple <= reversed);
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = extract_motifs(&cyclohexane_skeleton());
        let second = extract_motifs(&cyclohexane_skeleton());
        assert_eq!(first, second);
    }

    #[test]
    fn isolated_atoms_produce_no_motifs() {
        let mut molecule = Molecule::new();
        molecule.add_atom(8);
        molecule.add_atom(8);
        assert_eq!(extract_motifs(&molecule), MotifSet::default());
    }
}

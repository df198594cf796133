use super::atom::Atom;
use super::bond::{Bond, BondOrder};
use thiserror::Error;

/// Errors raised while assembling or validating molecular structure.
///
/// These are fatal for the molecule or graph being built: a topology that
/// references atoms outside its own atom table cannot produce a coherent
/// factor graph, so construction fails fast instead of truncating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Bond or tuple references atom index {index}, but the molecule has {atom_count} atoms")]
    AtomIndexOutOfRange { index: usize, atom_count: usize },

    #[error("Atom {atom} cannot be bonded to itself")]
    SelfBond { atom: usize },
}

/// Represents a molecule topology: atoms with atomic numbers, and bonds
/// between them, addressed by dense atom index.
///
/// This struct is the sole structural input to factor-graph construction.
/// It maintains a cached adjacency list so that angle and torsion
/// enumeration can walk bonded neighbors without rescanning the bond list.
///
/// Atom indices are assigned sequentially by [`Molecule::add_atom`] and are
/// stable for the lifetime of the molecule; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Atom table, indexed by dense atom index.
    atoms: Vec<Atom>,
    /// List of all bonds, in insertion order.
    bonds: Vec<Bond>,
    /// Cached adjacency list, indexed by atom index.
    adjacency: Vec<Vec<usize>>,
}

impl Molecule {
    /// Creates a new, empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom with the given atomic number and returns its index.
    pub fn add_atom(&mut self, atomic_number: u8) -> usize {
        self.atoms.push(Atom::new(atomic_number));
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Adds a bond between two atoms.
    ///
    /// The stored orientation `(atom1, atom2)` is preserved; it defines the
    /// canonical traversal direction for torsion enumeration. Adding an
    /// existing bond (in either orientation) succeeds without creating a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Fails fast with [`StructureError::AtomIndexOutOfRange`] if either
    /// index is outside the atom table, or [`StructureError::SelfBond`] if
    /// both indices are equal.
    pub fn add_bond(
        &mut self,
        atom1: usize,
        atom2: usize,
        order: BondOrder,
    ) -> Result<(), StructureError> {
        let atom_count = self.atoms.len();
        for index in [atom1, atom2] {
            if index >= atom_count {
                return Err(StructureError::AtomIndexOutOfRange { index, atom_count });
            }
        }
        if atom1 == atom2 {
            return Err(StructureError::SelfBond { atom: atom1 });
        }

        if self.adjacency[atom1].contains(&atom2) {
            // Bond already exists, operation is successful (idempotent)
            return Ok(());
        }

        self.bonds.push(Bond::new(atom1, atom2, order));
        self.adjacency[atom1].push(atom2);
        self.adjacency[atom2].push(atom1);
        Ok(())
    }

    /// Retrieves an atom by its index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns a slice of all atoms, in index order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns a slice of all bonds, in insertion order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of atoms in the molecule.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds in the molecule.
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Retrieves the bonded neighbors of an atom, in bond-insertion order.
    pub fn neighbors(&self, atom: usize) -> Option<&[usize]> {
        self.adjacency.get(atom).map(|v| v.as_slice())
    }

    /// Returns an iterator over atomic numbers, in atom index order.
    pub fn atomic_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.atoms.iter().map(|atom| atom.atomic_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn add_atom_assigns_sequential_indices() {
        let mut molecule = Molecule::new();
        assert_eq!(molecule.add_atom(1), 0);
        assert_eq!(molecule.add_atom(6), 1);
        assert_eq!(molecule.add_atom(8), 2);
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.atom(1).unwrap().atomic_number, 6);
    }

    #[test]
    fn add_bond_updates_bonds_and_adjacency() {
        let molecule = carbon_chain();

        assert_eq!(molecule.bond_count(), 3);
        assert_eq!(molecule.neighbors(0).unwrap(), &[1]);
        assert_eq!(molecule.neighbors(1).unwrap(), &[0, 2]);
        assert_eq!(molecule.neighbors(2).unwrap(), &[1, 3]);
        assert_eq!(molecule.neighbors(3).unwrap(), &[2]);
    }

    #[test]
    fn add_bond_preserves_stored_orientation() {
        let mut molecule = Molecule::new();
        molecule.add_atom(6);
        molecule.add_atom(8);
        molecule.add_bond(1, 0, BondOrder::Double).unwrap();

        assert_eq!(molecule.bonds()[0].as_tuple(), [1, 0]);
    }

    #[test]
    fn add_bond_is_idempotent_in_both_orientations() {
        let mut molecule = carbon_chain();
        molecule.add_bond(0, 1, BondOrder::Single).unwrap();
        molecule.add_bond(1, 0, BondOrder::Single).unwrap();

        assert_eq!(molecule.bond_count(), 3);
        assert_eq!(molecule.neighbors(0).unwrap(), &[1]);
    }

    #[test]
    fn add_bond_rejects_out_of_range_index() {
        let mut molecule = Molecule::new();
        molecule.add_atom(6);

        let result = molecule.add_bond(0, 5, BondOrder::Single);
        assert_eq!(
            result,
            Err(StructureError::AtomIndexOutOfRange {
                index: 5,
                atom_count: 1
            })
        );
        assert_eq!(molecule.bond_count(), 0);
    }

    #[test]
    fn add_bond_rejects_self_bond() {
        let mut molecule = Molecule::new();
        molecule.add_atom(6);

        let result = molecule.add_bond(0, 0, BondOrder::Single);
        assert_eq!(result, Err(StructureError::SelfBond { atom: 0 }));
    }

    #[test]
    fn neighbors_returns_none_for_unknown_atom() {
        let molecule = carbon_chain();
        assert!(molecule.neighbors(99).is_none());
    }

    #[test]
    fn atomic_numbers_iterates_in_index_order() {
        let mut molecule = Molecule::new();
        molecule.add_atom(1);
        molecule.add_atom(6);
        molecule.add_atom(7);

        let numbers: Vec<u8> = molecule.atomic_numbers().collect();
        assert_eq!(numbers, vec![1, 6, 7]);
    }
}

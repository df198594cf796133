/// Represents a single atom in a molecule topology.
///
/// Atoms are addressed by their dense index within the owning [`Molecule`];
/// the struct itself only carries the chemical identity needed for
/// featurization. Geometry lives on dataset snapshots, not on the topology.
///
/// [`Molecule`]: super::molecule::Molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The atomic number (e.g., 1 for hydrogen, 6 for carbon).
    pub atomic_number: u8,
}

impl Atom {
    /// Creates a new atom with the given atomic number.
    pub fn new(atomic_number: u8) -> Self {
        Self { atomic_number }
    }

    /// Returns the element symbol for common organic elements, if known.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.atomic_number {
            1 => Some("H"),
            6 => Some("C"),
            7 => Some("N"),
            8 => Some("O"),
            9 => Some("F"),
            15 => Some("P"),
            16 => Some("S"),
            17 => Some("Cl"),
            35 => Some("Br"),
            53 => Some("I"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_atomic_number() {
        let atom = Atom::new(6);
        assert_eq!(atom.atomic_number, 6);
    }

    #[test]
    fn symbol_covers_common_organic_elements() {
        assert_eq!(Atom::new(1).symbol(), Some("H"));
        assert_eq!(Atom::new(6).symbol(), Some("C"));
        assert_eq!(Atom::new(7).symbol(), Some("N"));
        assert_eq!(Atom::new(8).symbol(), Some("O"));
        assert_eq!(Atom::new(16).symbol(), Some("S"));
    }

    #[test]
    fn symbol_is_none_for_exotic_elements() {
        assert_eq!(Atom::new(0).symbol(), None);
        assert_eq!(Atom::new(26).symbol(), None);
        assert_eq!(Atom::new(118).symbol(), None);
    }
}

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl Default for BondOrder {
    fn default() -> Self {
        BondOrder::Single
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

/// A covalent bond between two atoms, stored by dense atom index.
///
/// The stored orientation `(atom1, atom2)` is the canonical traversal
/// direction used when enumerating higher-order motifs, so it is preserved
/// exactly as given at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,     // index of the first atom
    pub atom2: usize,     // index of the second atom
    pub order: BondOrder, // bond order (e.g., single, double, etc.)
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// The bond as an ordered structural tuple.
    pub fn as_tuple(&self) -> [usize; 2] {
        [self.atom1, self.atom2]
    }

    /// Given one member atom, returns the other, if the atom belongs to the bond.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if atom == self.atom1 {
            Some(self.atom2)
        } else if atom == self.atom2 {
            Some(self.atom1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("single".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("S".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("2".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("double".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("3".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("ar".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
        assert_eq!(
            "aromatic".parse::<BondOrder>().unwrap(),
            BondOrder::Aromatic
        );
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quadruple".parse::<BondOrder>().is_err());
        assert!("0".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_display_outputs_expected_strings() {
        assert_eq!(BondOrder::Single.to_string(), "Single");
        assert_eq!(BondOrder::Double.to_string(), "Double");
        assert_eq!(BondOrder::Triple.to_string(), "Triple");
        assert_eq!(BondOrder::Aromatic.to_string(), "Aromatic");
    }

    #[test]
    fn bond_order_default_is_single() {
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }

    #[test]
    fn bond_new_initializes_fields_correctly() {
        let bond = Bond::new(3, 7, BondOrder::Double);
        assert_eq!(bond.atom1, 3);
        assert_eq!(bond.atom2, 7);
        assert_eq!(bond.order, BondOrder::Double);
    }

    #[test]
    fn bond_contains_returns_true_for_both_atoms() {
        let bond = Bond::new(10, 20, BondOrder::Single);
        assert!(bond.contains(10));
        assert!(bond.contains(20));
        assert!(!bond.contains(30));
    }

    #[test]
    fn bond_as_tuple_preserves_stored_orientation() {
        let bond = Bond::new(5, 2, BondOrder::Single);
        assert_eq!(bond.as_tuple(), [5, 2]);
    }

    #[test]
    fn bond_partner_returns_opposite_member() {
        let bond = Bond::new(1, 4, BondOrder::Single);
        assert_eq!(bond.partner(1), Some(4));
        assert_eq!(bond.partner(4), Some(1));
        assert_eq!(bond.partner(9), None);
    }
}

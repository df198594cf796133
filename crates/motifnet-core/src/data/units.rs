//! Internal unit system and archive-unit conversions.
//!
//! Archive snapshots arrive in atomic units (hartree energies, bohr
//! geometries, hartree/bohr gradients). Everything written onto a graph uses
//! one fixed internal triple: kcal/mol for energy, Å for length, and
//! kcal/(mol·Å) for force. Conversions happen exactly once, at the adapter
//! boundary.

/// One hartree in kcal/mol (CODATA 2018).
pub const HARTREE_TO_KCAL_PER_MOL: f64 = 627.509_474_063_1;

/// One bohr in Å (CODATA 2018).
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903;

/// One hartree/bohr in kcal/(mol·Å).
pub const HARTREE_PER_BOHR_TO_KCAL_PER_MOL_ANGSTROM: f64 =
    HARTREE_TO_KCAL_PER_MOL / BOHR_TO_ANGSTROM;

/// Converts an archive energy (hartree) to the internal energy unit.
pub fn energy_to_internal(hartree: f64) -> f64 {
    hartree * HARTREE_TO_KCAL_PER_MOL
}

/// Converts an archive length (bohr) to the internal length unit.
pub fn length_to_internal(bohr: f64) -> f64 {
    bohr * BOHR_TO_ANGSTROM
}

/// Converts an archive force (hartree/bohr) to the internal force unit.
pub fn force_to_internal(hartree_per_bohr: f64) -> f64 {
    hartree_per_bohr * HARTREE_PER_BOHR_TO_KCAL_PER_MOL_ANGSTROM
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn one_hartree_is_roughly_627_kcal_per_mol() {
        assert!(f64_approx_equal(energy_to_internal(1.0), 627.509_474_063_1));
    }

    #[test]
    fn one_bohr_is_roughly_half_an_angstrom() {
        assert!(f64_approx_equal(length_to_internal(1.0), 0.529_177_210_903));
    }

    #[test]
    fn force_conversion_is_energy_over_length() {
        let expected = energy_to_internal(1.0) / length_to_internal(1.0);
        assert!(f64_approx_equal(force_to_internal(1.0), expected));
    }

    #[test]
    fn conversions_are_linear() {
        assert!(f64_approx_equal(
            energy_to_internal(-2.5),
            -2.5 * HARTREE_TO_KCAL_PER_MOL
        ));
        assert!(f64_approx_equal(length_to_internal(0.0), 0.0));
    }
}

//! # Core Models Module
//!
//! This module contains the data structures used to represent molecule
//! topologies, the sole structural input to factor-graph construction.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom identity (atomic number)
//! - [`bond`] - Bond connectivity and bond orders
//! - [`molecule`] - The complete topology with cached adjacency
//!
//! ## Usage
//!
//! ```ignore
//! use motifnet::core::models::{bond::BondOrder, molecule::Molecule};
//!
//! let mut molecule = Molecule::new();
//! let c1 = molecule.add_atom(6);
//! let c2 = molecule.add_atom(6);
//! molecule.add_bond(c1, c2, BondOrder::Single)?;
//! ```

pub mod atom;
pub mod bond;
pub mod molecule;

//! # Structural Motifs Module
//!
//! Enumerates the ordered atom-index tuples that identify 2-, 3-, and 4-body
//! structural motifs (bonds, angles, proper torsions) in a molecule topology.
//! These tuples are the raw material for factor-graph construction.

pub mod extract;

//! # MotifNet Core Library
//!
//! A library for building molecular factor graphs from quantum-chemistry
//! archive records and running a permutation-symmetric message-passing
//! update over them to learn energies and forces.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Stateless molecular models ([`Molecule`]),
//!   structural motif enumeration, and deterministic factor-graph
//!   construction with typed node collections and feature tables.
//!
//! - **[`nn`]: The Trainable Core.** The fixed-shape feed-forward transform,
//!   the reflection-symmetrizing combinator, and the per-layer factor update
//!   that gathers slot-indexed atom messages and rewrites factor
//!   representations in place.
//!
//! - **[`data`]: The Boundary.** Archive record types, unit conversion into
//!   one fixed internal unit system, and the dataset adapter that fetches
//!   records and emits labeled graphs, skipping records without usable
//!   trajectories.
//!
//! [`Molecule`]: core::models::molecule::Molecule

pub mod core;
pub mod data;
pub mod nn;

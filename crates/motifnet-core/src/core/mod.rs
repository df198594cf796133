//! # Core Module
//!
//! This module provides the fundamental building blocks for molecular
//! factor-graph construction in MotifNet, serving as the structural core of
//! the library.
//!
//! ## Overview
//!
//! The core module turns a molecule topology into the typed graph the
//! message-passing layers operate on. It is stateless and synchronous:
//! a graph is built once from a molecule and afterwards only its per-node
//! feature matrices change.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! stages of graph construction:
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, and the molecule topology
//! - **Structural Motifs** ([`motifs`]) - Enumeration of bond/angle/torsion tuples
//! - **Factor Graph** ([`graph`]) - Typed node collections, edge relations, and feature tables
//!
//! ## Key Capabilities
//!
//! - **Deterministic construction**: node and edge order follow extraction
//!   order, so factor instances can be addressed positionally
//! - **Fail-fast validation**: out-of-range atom references abort
//!   construction instead of silently truncating
//! - **Configurable featurization**: the element vocabulary is an explicit
//!   value, not a process-wide constant

pub mod graph;
pub mod models;
pub mod motifs;

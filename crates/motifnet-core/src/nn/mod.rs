//! # Neural Network Module
//!
//! The trainable core of MotifNet: a fixed-shape feed-forward transform and
//! the factor-update pass that applies it to every factor type of a graph.
//!
//! ## Overview
//!
//! One update layer gathers slot-indexed atom features into each factor
//! instance and rewrites the factor's representation through a shared
//! network, evaluated on both slot orderings and summed ([`symmetry`]).
//! The pass mutates a single exclusively borrowed graph; independent graphs
//! can be updated in parallel without shared state.
//!
//! ## Key Components
//!
//! - [`mlp`] - Two-hidden-layer ReLU network with width-checked application
//! - [`symmetry`] - The reflection-symmetrizing combinator
//! - [`update`] - The per-layer factor update and its configuration

pub mod mlp;
pub mod symmetry;
pub mod update;

use super::mlp::{DimensionError, Mlp};
use super::symmetry::symmetrize;
use crate::core::graph::graph::{FactorGraph, FactorKind, FactorNodes, GraphError, NodeType};
use ndarray::{Array2, s};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error, PartialEq)]
pub enum UpdateError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Representation widths of one factor type across a single update layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorDims {
    /// Width of the representation the layer reads.
    pub current: usize,
    /// Width of the representation the layer writes.
    pub updated: usize,
}

impl Default for FactorDims {
    fn default() -> Self {
        Self {
            current: 1,
            updated: 10,
        }
    }
}

/// Configuration of one factor-update layer.
///
/// Attribute names are per-layer so that stacked layers read their
/// predecessor's output and write a fresh destination; widths fix the
/// transform input contract `atom_dim * arity + current`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateConfig {
    /// Atom attribute gathered into slot messages.
    pub source_attribute: String,
    /// Factor attribute holding the representation the layer reads.
    pub current_attribute: String,
    /// Factor attribute the layer writes (overwriting any existing entry).
    pub updated_attribute: String,
    /// Width of the gathered atom attribute.
    pub atom_dim: usize,
    pub bond: FactorDims,
    pub angle: FactorDims,
    pub torsion: FactorDims,
}

impl UpdateConfig {
    pub fn dims(&self, kind: FactorKind) -> FactorDims {
        match kind {
            FactorKind::Bond => self.bond,
            FactorKind::Angle => self.angle,
            FactorKind::Torsion => self.torsion,
        }
    }

    /// Transform input width for one factor kind.
    pub fn input_width(&self, kind: FactorKind) -> usize {
        self.atom_dim * kind.arity() + self.dims(kind).current
    }
}

#[derive(Default)]
pub struct UpdateConfigBuilder {
    source_attribute: Option<String>,
    current_attribute: Option<String>,
    updated_attribute: Option<String>,
    atom_dim: Option<usize>,
    bond: FactorDims,
    angle: FactorDims,
    torsion: FactorDims,
}

impl UpdateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_attribute(mut self, name: impl Into<String>) -> Self {
        self.source_attribute = Some(name.into());
        self
    }
    pub fn current_attribute(mut self, name: impl Into<String>) -> Self {
        self.current_attribute = Some(name.into());
        self
    }
    pub fn updated_attribute(mut self, name: impl Into<String>) -> Self {
        self.updated_attribute = Some(name.into());
        self
    }
    pub fn atom_dim(mut self, width: usize) -> Self {
        self.atom_dim = Some(width);
        self
    }
    pub fn bond_dims(mut self, dims: FactorDims) -> Self {
        self.bond = dims;
        self
    }
    pub fn angle_dims(mut self, dims: FactorDims) -> Self {
        self.angle = dims;
        self
    }
    pub fn torsion_dims(mut self, dims: FactorDims) -> Self {
        self.torsion = dims;
        self
    }

    pub fn build(self) -> Result<UpdateConfig, ConfigError> {
        Ok(UpdateConfig {
            source_attribute: self
                .source_attribute
                .ok_or(ConfigError::MissingParameter("source_attribute"))?,
            current_attribute: self
                .current_attribute
                .ok_or(ConfigError::MissingParameter("current_attribute"))?,
            updated_attribute: self
                .updated_attribute
                .ok_or(ConfigError::MissingParameter("updated_attribute"))?,
            atom_dim: self
                .atom_dim
                .ok_or(ConfigError::MissingParameter("atom_dim"))?,
            bond: self.bond,
            angle: self.angle,
            torsion: self.torsion,
        })
    }
}

/// One trainable factor-update layer: gathers slot-indexed atom messages
/// into every factor type and rewrites each factor representation through a
/// shared, reflection-symmetrized transform.
///
/// For a factor with members `(a, b, c)` and current representation `r`, the
/// new representation is `F(x_a, x_b, x_c; r) + F(x_c, x_b, x_a; r)` with a
/// single shared network `F` per factor type, so the result is invariant
/// under the motif's end-to-end reversal without hand-coded symmetric
/// features.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorUpdate {
    config: UpdateConfig,
    bond_net: Mlp,
    angle_net: Mlp,
    torsion_net: Mlp,
}

impl FactorUpdate {
    /// Builds the three per-kind networks from the configured widths,
    /// drawing weights from the supplied generator in kind order
    /// (bond, angle, torsion).
    pub fn new(config: UpdateConfig, rng: &mut impl Rng) -> Self {
        let mut network = |kind: FactorKind| {
            Mlp::new(config.input_width(kind), config.dims(kind).updated, rng)
        };
        let bond_net = network(FactorKind::Bond);
        let angle_net = network(FactorKind::Angle);
        let torsion_net = network(FactorKind::Torsion);
        Self {
            config,
            bond_net,
            angle_net,
            torsion_net,
        }
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Runs one update layer over every factor type of the graph.
    ///
    /// Within one factor type, all slot messages are gathered before the
    /// symmetrized update runs; the three factor types share no state and
    /// are processed independently.
    pub fn apply(&self, graph: &mut FactorGraph) -> Result<(), UpdateError> {
        let (atoms, bonds, angles, torsions) = graph.split_mut();

        let source = atoms.require(NodeType::Atom, &self.config.source_attribute)?;
        if source.ncols() != self.config.atom_dim {
            return Err(DimensionError {
                expected: self.config.atom_dim,
                actual: source.ncols(),
                context: "gathered atom attribute",
            }
            .into());
        }

        self.update_factors(source, bonds, &self.bond_net, FactorKind::Bond)?;
        self.update_factors(source, angles, &self.angle_net, FactorKind::Angle)?;
        self.update_factors(source, torsions, &self.torsion_net, FactorKind::Torsion)?;
        Ok(())
    }

    fn update_factors<const N: usize>(
        &self,
        source: &Array2<f32>,
        nodes: &mut FactorNodes<N>,
        network: &Mlp,
        kind: FactorKind,
    ) -> Result<(), UpdateError> {
        let messages = gather_messages(nodes, source);

        let current = nodes
            .features()
            .require(kind.into(), &self.config.current_attribute)?;
        let dims = self.config.dims(kind);
        if current.ncols() != dims.current {
            return Err(DimensionError {
                expected: dims.current,
                actual: current.ncols(),
                context: "current factor representation",
            }
            .into());
        }

        let forward = assemble_input(&messages, current, false);
        let reverse = assemble_input(&messages, current, true);
        let updated = symmetrize(|x| network.forward(x), &forward, &reverse)?;

        nodes
            .features_mut()
            .insert(self.config.updated_attribute.clone(), updated)?;
        Ok(())
    }
}

/// Pulls the source attribute of every slot-k atom into a per-factor message
/// matrix, summing over all edges that land on the same factor instance.
///
/// Each forward relation carries exactly one edge per instance, so the sum
/// degenerates to a copy; summation is still the defined aggregator so that
/// multi-edge relations would combine deterministically.
fn gather_messages<const N: usize>(
    nodes: &FactorNodes<N>,
    source: &Array2<f32>,
) -> [Array2<f32>; N] {
    std::array::from_fn(|slot| {
        let mut destination = Array2::zeros((nodes.len(), source.ncols()));
        for &(atom, factor) in nodes.inbound(slot) {
            let mut row = destination.row_mut(factor);
            row += &source.row(atom);
        }
        destination
    })
}

/// Concatenates the slot messages (forward or reverse slot order) with the
/// current representation into the transform input matrix.
fn assemble_input<const N: usize>(
    messages: &[Array2<f32>; N],
    current: &Array2<f32>,
    reverse: bool,
) -> Array2<f32> {
    let rows = current.nrows();
    let width: usize = messages.iter().map(|m| m.ncols()).sum::<usize>() + current.ncols();
    let mut input = Array2::zeros((rows, width));

    let mut offset = 0;
    let mut append = |block: &Array2<f32>| {
        input
            .slice_mut(s![.., offset..offset + block.ncols()])
            .assign(block);
        offset += block.ncols();
    };
    if reverse {
        messages.iter().rev().for_each(&mut append);
    } else {
        messages.iter().for_each(&mut append);
    }
    append(current);
    input
}

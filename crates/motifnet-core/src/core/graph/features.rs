use super::graph::{FactorGraph, GraphError, NodeType};
use crate::core::models::molecule::Molecule;
use ndarray::Array2;
use thiserror::Error;

/// Attribute name of the one-hot element feature on atom nodes.
pub const ELEMENT_ATTRIBUTE: &str = "element";

/// Attribute name of the zero-width-1 factor representation written at
/// initialization time, read by the first update layer.
pub const INITIAL_REPRESENTATION_ATTRIBUTE: &str = "representation_0";

/// Attribute name of the factor representation after `layer` update layers.
///
/// Layer 0 is the initial representation; each update layer writes the next
/// name, so stacked layers never clobber each other's inputs.
pub fn representation_attribute(layer: usize) -> String {
    format!("representation_{layer}")
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error(
        "Atom {atom} has atomic number {atomic_number}, which is outside the element vocabulary"
    )]
    UnsupportedElement { atom: usize, atomic_number: u8 },

    #[error("Graph holds {graph_atoms} atom nodes, but the molecule has {molecule_atoms} atoms")]
    AtomCountMismatch {
        graph_atoms: usize,
        molecule_atoms: usize,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// The set of atomic numbers the one-hot element encoding can express.
///
/// The vocabulary is an explicit configuration value handed to the
/// initializer; its order fixes the one-hot index of each element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementVocabulary {
    atomic_numbers: Vec<u8>,
}

impl ElementVocabulary {
    /// Creates a vocabulary from the given atomic numbers, keeping the first
    /// occurrence of each.
    pub fn new(atomic_numbers: &[u8]) -> Self {
        let mut seen = Vec::with_capacity(atomic_numbers.len());
        for &z in atomic_numbers {
            if !seen.contains(&z) {
                seen.push(z);
            }
        }
        Self {
            atomic_numbers: seen,
        }
    }

    /// The default organic-subset vocabulary: H, C, N, O.
    pub fn organic() -> Self {
        Self::new(&[1, 6, 7, 8])
    }

    /// Width of the one-hot encoding.
    pub fn len(&self) -> usize {
        self.atomic_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atomic_numbers.is_empty()
    }

    /// One-hot index of an atomic number, if it is in the vocabulary.
    pub fn index_of(&self, atomic_number: u8) -> Option<usize> {
        self.atomic_numbers.iter().position(|&z| z == atomic_number)
    }
}

impl Default for ElementVocabulary {
    fn default() -> Self {
        Self::organic()
    }
}

/// What to do when an atom's element is outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownElementPolicy {
    /// Fail loudly with [`FeatureError::UnsupportedElement`].
    #[default]
    Reject,
    /// Encode the atom as an all-zero row. Zero-featured atoms are
    /// indistinguishable from padding downstream, so this is opt-in only.
    ZeroVector,
}

/// Writes the initial feature state onto a freshly built factor graph:
/// one-hot `element` vectors on atoms, and a width-1 zero `representation_0`
/// on every factor node collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInitializer {
    vocabulary: ElementVocabulary,
    policy: UnknownElementPolicy,
}

impl FeatureInitializer {
    pub fn new(vocabulary: ElementVocabulary) -> Self {
        Self {
            vocabulary,
            policy: UnknownElementPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownElementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn vocabulary(&self) -> &ElementVocabulary {
        &self.vocabulary
    }

    /// Initializes atom and factor features in place.
    ///
    /// # Errors
    ///
    /// Fails if the graph was built for a different atom count, or if an
    /// atomic number falls outside the vocabulary under the
    /// [`UnknownElementPolicy::Reject`] policy.
    pub fn initialize(
        &self,
        graph: &mut FactorGraph,
        molecule: &Molecule,
    ) -> Result<(), FeatureError> {
        if graph.atom_count() != molecule.atom_count() {
            return Err(FeatureError::AtomCountMismatch {
                graph_atoms: graph.atom_count(),
                molecule_atoms: molecule.atom_count(),
            });
        }

        let elements = self.encode_elements(molecule)?;
        graph.set_feature(NodeType::Atom, ELEMENT_ATTRIBUTE, elements)?;

        for node_type in [NodeType::Bond, NodeType::Angle, NodeType::Torsion] {
            let count = graph.node_count(node_type);
            graph.set_feature(
                node_type,
                INITIAL_REPRESENTATION_ATTRIBUTE,
                Array2::zeros((count, 1)),
            )?;
        }
        Ok(())
    }

    fn encode_elements(&self, molecule: &Molecule) -> Result<Array2<f32>, FeatureError> {
        let mut encoded = Array2::zeros((molecule.atom_count(), self.vocabulary.len()));
        for (atom, atomic_number) in molecule.atomic_numbers().enumerate() {
            match self.vocabulary.index_of(atomic_number) {
                Some(index) => encoded[[atom, index]] = 1.0,
                None => match self.policy {
                    UnknownElementPolicy::Reject => {
                        return Err(FeatureError::UnsupportedElement {
                            atom,
                            atomic_number,
                        });
                    }
                    UnknownElementPolicy::ZeroVector => {}
                },
            }
        }
        Ok(encoded)
    }
}

impl Default for FeatureInitializer {
    fn default() -> Self {
        Self::new(ElementVocabulary::organic())
    }
}

use crate::core::models::molecule::StructureError;
use ndarray::Array2;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Directed edge list stored as `(source, destination)` index pairs.
pub type EdgeList = Vec<(usize, usize)>;

/// The three factor types of the graph, one per structural motif arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorKind {
    Bond,
    Angle,
    Torsion,
}

impl FactorKind {
    pub const ALL: [FactorKind; 3] = [FactorKind::Bond, FactorKind::Angle, FactorKind::Torsion];

    /// Number of atoms participating in one motif instance of this kind.
    pub fn arity(&self) -> usize {
        match self {
            FactorKind::Bond => 2,
            FactorKind::Angle => 3,
            FactorKind::Torsion => 4,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FactorKind::Bond => "bond",
                FactorKind::Angle => "angle",
                FactorKind::Torsion => "torsion",
            }
        )
    }
}

/// A node collection of the factor graph, for type-erased feature access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Atom,
    Bond,
    Angle,
    Torsion,
}

impl From<FactorKind> for NodeType {
    fn from(kind: FactorKind) -> Self {
        match kind {
            FactorKind::Bond => NodeType::Bond,
            FactorKind::Angle => NodeType::Angle,
            FactorKind::Torsion => NodeType::Torsion,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NodeType::Atom => "atom",
                NodeType::Bond => "bond",
                NodeType::Angle => "angle",
                NodeType::Torsion => "torsion",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Feature '{name}' has {actual} rows, but the table holds {expected} nodes")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Feature '{name}' is not present on {node_type} nodes")]
    MissingFeature { node_type: NodeType, name: String },
}

/// Per-node-type feature storage: attribute name → numeric matrix.
///
/// Every matrix has one row per node instance; the row count is fixed at
/// construction and enforced on insertion, because downstream aggregation
/// addresses rows positionally. Column width is free to differ per attribute
/// (representations widen across update layers).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: usize,
    columns: HashMap<String, Array2<f32>>,
}

impl FeatureTable {
    /// Creates an empty table for `rows` node instances.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: HashMap::new(),
        }
    }

    /// Number of node instances the table describes.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Retrieves a feature matrix by attribute name.
    pub fn get(&self, name: &str) -> Option<&Array2<f32>> {
        self.columns.get(name)
    }

    /// Retrieves a feature matrix, failing loudly when it is absent.
    pub fn require(&self, node_type: NodeType, name: &str) -> Result<&Array2<f32>, GraphError> {
        self.get(name).ok_or_else(|| GraphError::MissingFeature {
            node_type,
            name: name.to_string(),
        })
    }

    /// Inserts (or overwrites) a feature matrix under the given name.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::RowCountMismatch`] if the matrix does not
    /// have exactly one row per node instance.
    pub fn insert(&mut self, name: impl Into<String>, matrix: Array2<f32>) -> Result<(), GraphError> {
        let name = name.into();
        if matrix.nrows() != self.rows {
            return Err(GraphError::RowCountMismatch {
                name,
                expected: self.rows,
                actual: matrix.nrows(),
            });
        }
        self.columns.insert(name, matrix);
        Ok(())
    }

    /// Attribute names present in the table, sorted for deterministic output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// One factor node collection of arity `N`: its member tuples, its slot-wise
/// inbound relations, its reverse relation, and its feature table.
///
/// Construction fixes the node and edge sets; only features mutate afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorNodes<const N: usize> {
    members: Vec<[usize; N]>,
    inbound: [EdgeList; N],
    contains: EdgeList,
    features: FeatureTable,
}

impl<const N: usize> FactorNodes<N> {
    /// Builds the node collection and its edge relations from member tuples.
    ///
    /// For each slot `k` the forward relation `(atom, in[k], factor)` pairs
    /// `(tuple[k], tuple_index)` in tuple order, so relation `k` holds
    /// exactly one edge per factor instance. The reverse relation
    /// `(factor, contains, atom)` collects `(tuple_index, tuple[k])` across
    /// all slots, grouped slot-major.
    ///
    /// # Errors
    ///
    /// Fails fast with [`StructureError::AtomIndexOutOfRange`] if any tuple
    /// member is outside the atom table; silent truncation would corrupt
    /// downstream aggregation.
    pub fn from_tuples(
        tuples: Vec<[usize; N]>,
        atom_count: usize,
    ) -> Result<Self, StructureError> {
        for tuple in &tuples {
            for &index in tuple {
                if index >= atom_count {
                    return Err(StructureError::AtomIndexOutOfRange { index, atom_count });
                }
            }
        }

        let mut inbound: [EdgeList; N] = std::array::from_fn(|_| EdgeList::new());
        let mut contains = EdgeList::new();
        for (slot, relation) in inbound.iter_mut().enumerate() {
            for (factor, tuple) in tuples.iter().enumerate() {
                relation.push((tuple[slot], factor));
                contains.push((factor, tuple[slot]));
            }
        }

        let features = FeatureTable::new(tuples.len());
        Ok(Self {
            members: tuples,
            inbound,
            contains,
            features,
        })
    }

    /// Number of factor instances.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The motif arity of this collection.
    pub fn arity(&self) -> usize {
        N
    }

    /// Member tuples in node-index order.
    pub fn members(&self) -> &[[usize; N]] {
        &self.members
    }

    /// The forward relation `(atom, in[slot], factor)`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= N`; slots are compile-time bounded per kind.
    pub fn inbound(&self, slot: usize) -> &EdgeList {
        &self.inbound[slot]
    }

    /// The reverse relation `(factor, contains, atom)`.
    pub fn contains(&self) -> &EdgeList {
        &self.contains
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureTable {
        &mut self.features
    }
}

/// The typed factor graph: atom nodes plus one node collection per motif
/// arity, each with its own edge relations and feature table.
///
/// Built once from a molecule; afterwards only feature matrices are written
/// (message passing), never nodes or edges.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorGraph {
    atom_features: FeatureTable,
    bonds: FactorNodes<2>,
    angles: FactorNodes<3>,
    torsions: FactorNodes<4>,
}

impl FactorGraph {
    pub(crate) fn new(
        atom_count: usize,
        bonds: FactorNodes<2>,
        angles: FactorNodes<3>,
        torsions: FactorNodes<4>,
    ) -> Self {
        Self {
            atom_features: FeatureTable::new(atom_count),
            bonds,
            angles,
            torsions,
        }
    }

    /// Number of atom nodes.
    pub fn atom_count(&self) -> usize {
        self.atom_features.rows()
    }

    pub fn atoms(&self) -> &FeatureTable {
        &self.atom_features
    }

    pub fn atoms_mut(&mut self) -> &mut FeatureTable {
        &mut self.atom_features
    }

    pub fn bonds(&self) -> &FactorNodes<2> {
        &self.bonds
    }

    pub fn angles(&self) -> &FactorNodes<3> {
        &self.angles
    }

    pub fn torsions(&self) -> &FactorNodes<4> {
        &self.torsions
    }

    /// Splits the graph into the atom feature table and mutable factor
    /// collections, so an update pass can read atom features while writing
    /// factor features.
    pub fn split_mut(
        &mut self,
    ) -> (
        &FeatureTable,
        &mut FactorNodes<2>,
        &mut FactorNodes<3>,
        &mut FactorNodes<4>,
    ) {
        (
            &self.atom_features,
            &mut self.bonds,
            &mut self.angles,
            &mut self.torsions,
        )
    }

    /// Number of nodes of the given type.
    pub fn node_count(&self, node_type: NodeType) -> usize {
        match node_type {
            NodeType::Atom => self.atom_features.rows(),
            NodeType::Bond => self.bonds.len(),
            NodeType::Angle => self.angles.len(),
            NodeType::Torsion => self.torsions.len(),
        }
    }

    /// Type-erased feature lookup for consumers that address node types
    /// dynamically (e.g., a training loop).
    pub fn feature(&self, node_type: NodeType, name: &str) -> Option<&Array2<f32>> {
        self.table(node_type).get(name)
    }

    /// Type-erased feature write; overwrites any existing attribute.
    pub fn set_feature(
        &mut self,
        node_type: NodeType,
        name: impl Into<String>,
        matrix: Array2<f32>,
    ) -> Result<(), GraphError> {
        self.table_mut(node_type).insert(name, matrix)
    }

    fn table(&self, node_type: NodeType) -> &FeatureTable {
        match node_type {
            NodeType::Atom => &self.atom_features,
            NodeType::Bond => self.bonds.features(),
            NodeType::Angle => self.angles.features(),
            NodeType::Torsion => self.torsions.features(),
        }
    }

    fn table_mut(&mut self, node_type: NodeType) -> &mut FeatureTable {
        match node_type {
            NodeType::Atom => &mut self.atom_features,
            NodeType::Bond => self.bonds.features_mut(),
            NodeType::Angle => self.angles.features_mut(),
            NodeType::Torsion => self.torsions.features_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn two_bond_nodes() -> FactorNodes<2> {
        FactorNodes::from_tuples(vec![[0, 1], [1, 2]], 3).unwrap()
    }

    #[test]
    fn factor_kind_arities_match_motif_sizes() {
        assert_eq!(FactorKind::Bond.arity(), 2);
        assert_eq!(FactorKind::Angle.arity(), 3);
        assert_eq!(FactorKind::Torsion.arity(), 4);
    }

    #[test]
    fn from_tuples_builds_one_forward_edge_per_instance_and_slot() {
        let nodes = two_bond_nodes();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.arity(), 2);
        assert_eq!(nodes.inbound(0), &vec![(0, 0), (1, 1)]);
        assert_eq!(nodes.inbound(1), &vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn from_tuples_builds_reverse_edges_slot_major() {
        let nodes = two_bond_nodes();
        assert_eq!(
            nodes.contains(),
            &vec![(0, 0), (1, 1), (0, 1), (1, 2)]
        );
    }

    #[test]
    fn from_tuples_rejects_out_of_range_member() {
        let result = FactorNodes::<2>::from_tuples(vec![[0, 5]], 3);
        assert_eq!(
            result.unwrap_err(),
            StructureError::AtomIndexOutOfRange {
                index: 5,
                atom_count: 3
            }
        );
    }

    #[test]
    fn feature_table_enforces_row_count() {
        let mut table = FeatureTable::new(2);

        assert!(table.insert("ok", arr2(&[[1.0], [2.0]])).is_ok());
        let result = table.insert("bad", arr2(&[[1.0], [2.0], [3.0]]));
        assert_eq!(
            result.unwrap_err(),
            GraphError::RowCountMismatch {
                name: "bad".to_string(),
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn feature_table_insert_overwrites_existing_attribute() {
        let mut table = FeatureTable::new(1);
        table.insert("x", arr2(&[[1.0, 2.0]])).unwrap();
        table.insert("x", arr2(&[[3.0]])).unwrap();

        assert_eq!(table.get("x").unwrap(), &arr2(&[[3.0]]));
        assert_eq!(table.names(), vec!["x"]);
    }

    #[test]
    fn feature_table_require_reports_missing_attribute() {
        let table = FeatureTable::new(1);
        let error = table.require(NodeType::Bond, "absent").unwrap_err();
        assert_eq!(
            error,
            GraphError::MissingFeature {
                node_type: NodeType::Bond,
                name: "absent".to_string()
            }
        );
    }

    #[test]
    fn graph_type_erased_access_reaches_every_node_type() {
        let bonds = two_bond_nodes();
        let angles = FactorNodes::from_tuples(vec![[0, 1, 2]], 3).unwrap();
        let torsions = FactorNodes::from_tuples(Vec::new(), 3).unwrap();
        let mut graph = FactorGraph::new(3, bonds, angles, torsions);

        graph
            .set_feature(NodeType::Atom, "element", arr2(&[[1.0], [0.0], [1.0]]))
            .unwrap();
        graph
            .set_feature(NodeType::Angle, "representation_0", arr2(&[[0.0]]))
            .unwrap();

        assert_eq!(graph.node_count(NodeType::Atom), 3);
        assert_eq!(graph.node_count(NodeType::Bond), 2);
        assert_eq!(graph.node_count(NodeType::Angle), 1);
        assert_eq!(graph.node_count(NodeType::Torsion), 0);
        assert!(graph.feature(NodeType::Atom, "element").is_some());
        assert!(graph.feature(NodeType::Angle, "representation_0").is_some());
        assert!(graph.feature(NodeType::Bond, "representation_0").is_none());
    }
}

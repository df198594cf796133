use super::records::{ArchiveRecord, RecordError, SnapshotRecord};
use super::units;
use crate::core::graph::builder::build_factor_graph;
use crate::core::graph::features::{FeatureError, FeatureInitializer};
use crate::core::graph::graph::FactorGraph;
use crate::core::models::molecule::{Molecule, StructureError};
use ndarray::{Array1, Array3};
use thiserror::Error;
use tracing::{debug, warn};

/// A remote or local archive of quantum-chemistry records, fetched by name.
///
/// This is the system boundary: each fetch is an independent, fallible unit
/// of work with no shared mutable state between records, so callers are free
/// to stop between fetches or run fetches for different records in parallel.
/// `Ok(None)` means the archive has no record under that name; transport
/// failures are errors.
pub trait ArchiveSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_record(&self, record_name: &str) -> Result<Option<ArchiveRecord>, Self::Error>;
}

/// How often a failing fetch is retried before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Fetching record '{record}' failed after {attempts} attempts: {source}")]
    Fetch {
        record: String,
        attempts: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Reference labels for one record, in internal units: per-snapshot energy
/// (kcal/mol), per-atom per-snapshot positions (Å) and forces (kcal/(mol·Å)).
///
/// Labels are typed fields rather than graph attributes: the adapter is
/// their only writer, and the training loop reads them next to the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLabels {
    pub energies: Array1<f32>,
    pub positions: Array3<f32>,
    pub forces: Array3<f32>,
}

impl ReferenceLabels {
    pub fn snapshot_count(&self) -> usize {
        self.energies.len()
    }
}

/// A fully prepared training example: the initialized factor graph plus its
/// reference labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledGraph {
    pub graph: FactorGraph,
    pub labels: ReferenceLabels,
}

/// Fetches archive records and turns them into labeled factor graphs.
///
/// Records without a usable trajectory are skipped with an explicit
/// `Ok(None)` outcome; only transport and structural failures are errors,
/// and each aborts just the record being processed.
#[derive(Debug, Clone)]
pub struct DatasetAdapter<S> {
    source: S,
    initializer: FeatureInitializer,
    retry: RetryPolicy,
}

impl<S: ArchiveSource> DatasetAdapter<S> {
    pub fn new(source: S, initializer: FeatureInitializer) -> Self {
        Self {
            source,
            initializer,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches one record and prepares its labeled graph.
    ///
    /// # Return
    ///
    /// `Ok(None)` when the record is absent, has no trajectory, or its
    /// trajectory is unreadable; the caller checks and skips. A present but
    /// empty trajectory is a success with zero snapshots, deliberately
    /// distinguishable from the skip outcome.
    pub fn fetch(&self, record_name: &str) -> Result<Option<LabeledGraph>, AdapterError> {
        let Some(record) = self.fetch_with_retry(record_name)? else {
            debug!(record = record_name, "record not present in archive");
            return Ok(None);
        };

        let Some(trajectory) = &record.trajectory else {
            debug!(record = record_name, "record has no trajectory, skipping");
            return Ok(None);
        };

        let molecule = record.molecule.to_molecule()?;
        let Some(labels) = convert_labels(&molecule, trajectory) else {
            warn!(record = record_name, "trajectory is unreadable, skipping");
            return Ok(None);
        };

        let mut graph = build_factor_graph(&molecule)?;
        self.initializer.initialize(&mut graph, &molecule)?;
        Ok(Some(LabeledGraph { graph, labels }))
    }

    fn fetch_with_retry(&self, record_name: &str) -> Result<Option<ArchiveRecord>, AdapterError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.fetch_record(record_name) {
                Ok(record) => return Ok(record),
                Err(error) if attempt < max_attempts => {
                    warn!(
                        record = record_name,
                        attempt,
                        max_attempts,
                        %error,
                        "archive fetch failed, retrying"
                    );
                }
                Err(error) => {
                    return Err(AdapterError::Fetch {
                        record: record_name.to_string(),
                        attempts: attempt,
                        source: Box::new(error),
                    });
                }
            }
        }
    }
}

/// Converts a trajectory into internal-unit label arrays.
///
/// Returns `None` when any snapshot is unreadable: geometry or force count
/// not matching the atom count, or neither forces nor a gradient present.
fn convert_labels(molecule: &Molecule, snapshots: &[SnapshotRecord]) -> Option<ReferenceLabels> {
    let atom_count = molecule.atom_count();
    let snapshot_count = snapshots.len();

    let mut energies = Array1::zeros(snapshot_count);
    let mut positions = Array3::zeros((snapshot_count, atom_count, 3));
    let mut forces = Array3::zeros((snapshot_count, atom_count, 3));

    for (s, snapshot) in snapshots.iter().enumerate() {
        if snapshot.geometry.len() != atom_count {
            return None;
        }
        let snapshot_forces = snapshot.resolve_forces()?;
        if snapshot_forces.len() != atom_count {
            return None;
        }

        energies[s] = units::energy_to_internal(snapshot.energy) as f32;
        for (i, point) in snapshot.positions().iter().enumerate() {
            for axis in 0..3 {
                positions[[s, i, axis]] = units::length_to_internal(point[axis]) as f32;
            }
        }
        for (i, force) in snapshot_forces.iter().enumerate() {
            for axis in 0..3 {
                forces[[s, i, axis]] = units::force_to_internal(force[axis]) as f32;
            }
        }
    }

    Some(ReferenceLabels {
        energies,
        positions,
        forces,
    })
}

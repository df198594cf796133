use crate::cli::PrepareArgs;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use motifnet::core::graph::features::{
    ELEMENT_ATTRIBUTE, FeatureInitializer, representation_attribute,
};
use motifnet::data::adapter::{DatasetAdapter, LabeledGraph};
use motifnet::data::archive::TomlArchive;
use motifnet::nn::update::{FactorDims, FactorUpdate, UpdateConfigBuilder};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

pub fn run(args: PrepareArgs) -> Result<()> {
    let archive = TomlArchive::load(&args.dataset)?;
    let record_names = archive.record_names();
    info!(
        "Loaded dataset with {} records from {:?}.",
        record_names.len(),
        args.dataset
    );

    let layers = build_layers(args.layers, args.updated_dim, args.seed)?;
    let adapter = DatasetAdapter::new(archive, FeatureInitializer::default());

    let pb = ProgressBar::new(record_names.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr_with_hz(2));

    let mut built = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for name in &record_names {
        pb.set_message(name.clone());
        // Failures abort only the record being processed.
        match prepare_record(&adapter, &layers, name) {
            Ok(Some(labeled)) => {
                debug!(
                    record = %name,
                    snapshots = labeled.labels.snapshot_count(),
                    "prepared record"
                );
                built += 1;
            }
            Ok(None) => {
                debug!(record = %name, "no usable trajectory, record skipped");
                skipped += 1;
            }
            Err(e) => {
                warn!(record = %name, error = %e, "record failed, continuing");
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    println!(
        "Prepared {built} of {} records ({skipped} skipped, {failed} failed).",
        record_names.len()
    );
    Ok(())
}

fn prepare_record(
    adapter: &DatasetAdapter<TomlArchive>,
    layers: &[FactorUpdate],
    name: &str,
) -> Result<Option<LabeledGraph>> {
    let Some(mut labeled) = adapter.fetch(name)? else {
        return Ok(None);
    };
    for layer in layers {
        layer.apply(&mut labeled.graph)?;
    }
    Ok(Some(labeled))
}

/// Builds one seeded update layer per requested depth.
///
/// Layer `i` reads `representation_{i-1}` and writes `representation_i`; the
/// first layer reads the width-1 initial representation, later layers read
/// the previous layer's output width.
fn build_layers(layers: usize, updated_dim: usize, seed: u64) -> Result<Vec<FactorUpdate>> {
    let atom_dim = FeatureInitializer::default().vocabulary().len();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut updates = Vec::with_capacity(layers);
    for layer in 1..=layers {
        let dims = FactorDims {
            current: if layer == 1 { 1 } else { updated_dim },
            updated: updated_dim,
        };
        let config = UpdateConfigBuilder::new()
            .source_attribute(ELEMENT_ATTRIBUTE)
            .current_attribute(representation_attribute(layer - 1))
            .updated_attribute(representation_attribute(layer))
            .atom_dim(atom_dim)
            .bond_dims(dims)
            .angle_dims(dims)
            .torsion_dims(dims)
            .build()?;
        updates.push(FactorUpdate::new(config, &mut rng));
    }
    Ok(updates)
}

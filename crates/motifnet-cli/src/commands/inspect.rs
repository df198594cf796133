use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use motifnet::core::graph::features::FeatureInitializer;
use motifnet::data::adapter::DatasetAdapter;
use motifnet::data::archive::TomlArchive;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let archive = TomlArchive::load(&args.dataset)?;
    if !archive.record_names().contains(&args.record) {
        return Err(CliError::RecordNotFound(args.record));
    }

    let adapter = DatasetAdapter::new(archive, FeatureInitializer::default());
    info!("Fetching record '{}'.", args.record);

    match adapter.fetch(&args.record)? {
        None => {
            println!(
                "Record '{}' has no usable trajectory and would be skipped.",
                args.record
            );
        }
        Some(labeled) => {
            let graph = &labeled.graph;
            println!("Record '{}'", args.record);
            println!("  atoms:    {:>6}", graph.atom_count());
            println!(
                "  bonds:    {:>6}  ({} forward relations, {} reverse edges)",
                graph.bonds().len(),
                graph.bonds().arity(),
                graph.bonds().contains().len()
            );
            println!(
                "  angles:   {:>6}  ({} forward relations, {} reverse edges)",
                graph.angles().len(),
                graph.angles().arity(),
                graph.angles().contains().len()
            );
            println!(
                "  torsions: {:>6}  ({} forward relations, {} reverse edges)",
                graph.torsions().len(),
                graph.torsions().arity(),
                graph.torsions().contains().len()
            );
            println!("  snapshots: {:>5}", labeled.labels.snapshot_count());
            println!("  atom attributes:   {:?}", graph.atoms().names());
            println!("  bond attributes:   {:?}", graph.bonds().features().names());
        }
    }
    Ok(())
}

// src/main.rs
mod batch;
mod extractors;
mod report;
mod source;
mod storage;
mod utils;

use std::path::PathBuf;

use batch::{Manifest, Router};
use clap::Parser;
use extractors::ExtractorRegistry;
use source::DocumentTextSource;
use storage::StorageManager;
use utils::AppError;

/// Extracts trade records from broker contract notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON manifest listing documents, trade dates and broker layouts
    #[arg(short, long, required_unless_present = "list_layouts")]
    manifest: Option<PathBuf>,

    /// Base directory for relative document paths (overrides the manifest)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output file for the extracted trades
    #[arg(short, long, default_value = "trades_output.json")]
    output: PathBuf,

    /// Debug mode - verbose logs and page text dumps with pattern matches marked
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug text dumps
    #[arg(long, default_value = "./debug")]
    debug_dir: PathBuf,

    /// Print the supported broker layouts and exit
    #[arg(long)]
    list_layouts: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::debug!("Starting with args: {:?}", args);

    let registry = ExtractorRegistry::with_defaults();

    if args.list_layouts {
        for layout in registry.layout_ids() {
            if let Some(extractor) = registry.get(layout) {
                println!("{:<16} {}", layout, extractor.broker_name());
            }
        }
        return Ok(());
    }

    // 3. Load the manifest
    let manifest_path = args
        .manifest
        .as_ref()
        .ok_or_else(|| AppError::Config("--manifest is required".to_string()))?;
    let manifest = Manifest::load(manifest_path)?;
    tracing::info!(
        "Loaded manifest {} with {} document(s)",
        manifest_path.display(),
        manifest.documents.len()
    );

    // 4. Initialize storage before the run so a bad output path fails fast
    let storage = StorageManager::new(&args.output)?;

    // 5. Process every document
    let text_source = DocumentTextSource;
    let mut router = Router::new(&registry, &text_source);
    if args.debug {
        router = router.with_debug_dir(&args.debug_dir);
    }
    let batch = router.run_batch(&manifest, args.input_dir.as_deref());

    // 6. Report and save
    match report::render_listing(&batch) {
        Ok(listing) => print!("{}", listing),
        Err(e) => tracing::error!("Failed to render trade listing: {}", e),
    }

    storage.save_records(&batch.records)?;

    if let Err(e) = storage.save_summary(&report::BatchSummary::from_batch(&batch)) {
        tracing::error!("Failed to save run summary: {}", e);
    }

    let processed = batch.outcomes.iter().filter(|o| o.is_processed()).count();
    tracing::info!(
        "Processing finished. Documents: {} processed, {} not processed. Trades: {}",
        processed,
        batch.outcomes.len() - processed,
        batch.records.len()
    );

    Ok(())
}

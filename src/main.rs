use anyhow::{anyhow, Result};
use clap::Parser;
use provax::{write_csv, Mode, Pipeline, PipelineParameters, RunReport, Selection};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "provax")]
#[command(about = "Scan a protein sequence for candidate MHC epitopes", long_about = None)]
struct Cli {
    /// Protein sequence (20 standard residues, upper case)
    #[arg(short, long)]
    sequence: String,

    /// MHC-1 (windows of 10), MHC-2 (windows of 15) or BOTH
    #[arg(short, long, default_value = "MHC-1")]
    mode: Mode,

    /// Directory holding models.json and the model files
    #[arg(long, default_value = "models")]
    models: PathBuf,

    /// Reference allele catalog (csv with an HLA column, or one entry per line)
    #[arg(long, default_value = "reference.csv")]
    catalog: PathBuf,

    /// Pipeline parameters (json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Write every window to this csv file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the reports as json
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show a progress bar over the windows
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("provax=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut params = match &cli.config {
        Some(path) => PipelineParameters::load_json(path)?,
        None => PipelineParameters::default(),
    };
    if cli.threads.is_some() {
        params.num_threads = cli.threads;
    }
    params.show_progress |= cli.progress;

    let sequence = cli.sequence.trim();
    if sequence.is_empty() {
        return Err(anyhow!("Empty protein sequence"));
    }

    let pipeline = Pipeline::load(&cli.models, &cli.catalog, params)?;
    let reports = pipeline.predict(sequence, cli.mode)?;

    if let Some(path) = &cli.output {
        write_csv(&reports, path)?;
        log::info!("Wrote {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "{} (windows of {}): {} windows, {} valid, {} epitopes",
        report.class,
        report.window_length,
        report.rows.len(),
        report.n_valid(),
        report.epitopes().count()
    );
    match &report.selection {
        Selection::Filtered(rows) => {
            println!("start\tend\tepitope\tmatched_hla");
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.start,
                    row.end,
                    row.epitope,
                    row.matched_hla.join(";")
                );
            }
        }
        Selection::TopScored(rows) => {
            println!("start\tend\tepitope\tXGB_predicted_score\textra_tree_hla\tmatched_hla");
            for row in rows {
                if let Some(p) = &row.prediction {
                    println!(
                        "{}\t{}\t{}\t{:.4}\t{:.4}\t{}",
                        row.start,
                        row.end,
                        row.epitope,
                        p.scores.xgb,
                        p.affinity.extra_tree,
                        p.matched_hla.join(";")
                    );
                }
            }
        }
    }
    println!();
}

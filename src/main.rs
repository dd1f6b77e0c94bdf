use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use email_purify::{
    ExportFile, Exporter, Ingestor, Runner, Summary, ValidationRules, format_duration,
    format_file_size,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "email-purify")]
#[command(about = "Extract, validate and deduplicate email addresses from CSV, TXT or XLSX files")]
struct Cli {
    /// Input file (.csv, .txt, .xlsx, .xls; anything else is read as text)
    input: PathBuf,

    /// Skip the address format check
    #[arg(long)]
    no_format: bool,

    /// Keep disposable-domain addresses
    #[arg(long)]
    no_disposable: bool,

    /// Keep role-based addresses (admin@, support@, ...)
    #[arg(long)]
    no_role_based: bool,

    /// Directory for the exported files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,
}

impl Cli {
    const fn rules(&self) -> ValidationRules {
        ValidationRules::new(!self.no_format, !self.no_disposable, !self.no_role_based)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("email_purify=info")),
        )
        .init();

    let cli = Cli::parse();
    let rules = cli.rules();
    rules.validate()?;

    let content = tokio::fs::read(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let file_name = cli.input.to_string_lossy();
    info!(
        "Loaded {file_name} ({})",
        format_file_size(content.len() as u64)
    );

    let addresses = Ingestor::default().ingest_file(&file_name, &content)?;
    info!("Found {} unique addresses", addresses.len());

    let runner = Runner::default();
    let mut report_progress = |processed: usize, total: usize| {
        debug!("Validated {processed}/{total}");
    };
    let result = runner
        .run_with_progress(&addresses, &rules, &mut report_progress)
        .await?;
    let summary = Summary::from_result(&result);

    println!("{summary} in {}", format_duration(result.stats.elapsed));
    println!("{} distinct valid domains", summary.unique_domains());
    for domain in summary.top_domains(5) {
        println!("  {:<30} {:>8} ({:.1}%)", domain.domain, domain.count, domain.share);
    }
    for reason in &summary.reasons {
        println!("  {:<30} {:>8}", reason.reason.label(), reason.count);
    }

    let mut exporter = Exporter::default();
    tokio::fs::create_dir_all(&cli.out_dir)
        .await
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;

    write_export(&cli.out_dir, exporter.export_clean(&result.valid)).await?;
    write_export(&cli.out_dir, exporter.export_detailed(&result)).await?;
    if cli.json {
        write_export(&cli.out_dir, exporter.export_json(&result, &summary)?).await?;
    }

    Ok(())
}

async fn write_export(dir: &std::path::Path, file: ExportFile) -> Result<()> {
    let path = dir.join(&file.filename);
    tokio::fs::write(&path, &file.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

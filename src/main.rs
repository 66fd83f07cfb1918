// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use syllabus_extractor::utils::logging::{
    format_error, format_info, format_page_list, format_success, format_warning, init_logger,
};
use syllabus_extractor::{
    Config, ExtractorError, LopdfBackend, PageIndexer, PdfBackend, SearchOutcome,
    SyllabusService, Validator, source_from_config,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "syllabus_extractor")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Find a subject in the syllabus PDF and extract its pages", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml",
        env = "SYLLABUS_EXTRACTOR_CONFIG"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a subject and extract its pages into a new PDF
    Search {
        /// Subject name, e.g. "software testing"
        #[arg(required = true, num_args = 1..)]
        subject: Vec<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Write the extracted PDF here instead of keeping it in the store
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Copy a previously extracted PDF out of the store
    Download {
        token: String,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Remove the stored file once copied
        #[arg(long)]
        discard: bool,
    },

    /// Report cache and storage health
    Health {
        /// Load the syllabus first
        #[arg(long)]
        warm: bool,

        #[arg(long)]
        json: bool,
    },

    /// Fetch and index the syllabus, printing statistics
    Index {
        /// Print the extracted text of page N
        #[arg(long, value_name = "N")]
        show: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    init_logger(cli.color, cli.verbose);

    let config = load_config(&cli.config)?;

    let outcome = match cli.command {
        Commands::Search {
            subject,
            json,
            output,
        } => cmd_search(&config, &subject.join(" "), json, output).await,
        Commands::Download {
            token,
            output,
            discard,
        } => cmd_download(&config, &token, &output, discard).await,
        Commands::Health { warm, json } => cmd_health(&config, warm, json).await,
        Commands::Index { show } => cmd_index(&config, cli.color, show).await,
    };

    if let Err(err) = outcome {
        eprintln!("{}", format_error(&format!("{:#}", err)));
        let retryable = err
            .downcast_ref::<ExtractorError>()
            .is_some_and(|e| e.is_retryable());
        if retryable {
            eprintln!(
                "{}",
                format_info("The syllabus could not be downloaded, try again shortly")
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        info!("Loading configuration from: {}", path.display());
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using built-in defaults",
        path.display()
    );
    let config = Config::default_config();
    config.validate()?;
    Ok(config)
}

async fn cmd_search(
    config: &Config,
    subject: &str,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let service = SyllabusService::from_config(config).context("Failed to set up service")?;
    let outcome = service.search(subject).await?;

    if let (Some(path), Some(token)) = (&output, &outcome.download_token) {
        let bytes = service.fetch_download(token).await?;
        write_pdf(path, &bytes).await?;
        service.discard_download(token).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_outcome(&outcome, output.as_deref());
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, output: Option<&Path>) {
    if !outcome.found {
        println!(
            "{}",
            format_warning(&format!("No pages matched \"{}\"", outcome.subject))
        );
        println!("Try the full subject name as printed in the syllabus, or its course code.");
        return;
    }

    println!(
        "{}",
        format_success(&format!(
            "Found {} page(s) for \"{}\"",
            outcome.page_numbers.len(),
            outcome.subject
        ))
    );
    println!("  {}", format_page_list(&outcome.page_numbers));

    for m in &outcome.matches {
        println!(
            "  page {:>4}  score {:>6.2}{}",
            m.page_number,
            m.score,
            m.course_code
                .as_deref()
                .map(|code| format!("  {}", code))
                .unwrap_or_default()
        );
    }

    match (output, &outcome.download_token) {
        (Some(path), _) => println!("{}", format_info(&format!("Saved to {}", path.display()))),
        (None, Some(token)) => println!("{}", format_info(&format!("Download token: {}", token))),
        (None, None) => {}
    }
}

async fn cmd_download(config: &Config, token: &str, output: &Path, discard: bool) -> Result<()> {
    let service = SyllabusService::from_config(config).context("Failed to set up service")?;

    let bytes = service.fetch_download(token).await?;
    write_pdf(output, &bytes).await?;

    if discard {
        service.discard_download(token).await?;
    }

    println!(
        "{}",
        format_success(&format!("Wrote {} bytes to {}", bytes.len(), output.display()))
    );
    Ok(())
}

async fn cmd_health(config: &Config, warm: bool, json: bool) -> Result<()> {
    let service = SyllabusService::from_config(config).context("Failed to set up service")?;

    if warm {
        service
            .load_syllabus()
            .await
            .context("Failed to load syllabus")?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&service.health().await)?);
    } else {
        print!("{}", service.health_report().await.format());
    }

    Ok(())
}

async fn cmd_index(config: &Config, colored: bool, show: Option<u32>) -> Result<()> {
    let backend: Arc<dyn PdfBackend> = Arc::new(LopdfBackend::new());
    let indexer =
        PageIndexer::new(Arc::clone(&backend), &config.matcher)?.with_progress(colored);
    let source = source_from_config(&config.source)?;

    let service = SyllabusService::with_parts(source, backend, indexer, config)
        .context("Failed to set up service")?;
    let syllabus = service
        .load_syllabus()
        .await
        .context("Failed to load syllabus")?;

    let stats = &syllabus.stats;
    println!(
        "{}",
        format_success(&format!(
            "Indexed {} pages from {}",
            stats.pages, syllabus.source
        ))
    );
    println!("  sha256        {}", syllabus.digest);
    println!("  failed pages  {}", stats.failed);
    println!("  blank pages   {}", stats.blank);
    println!("  header pages  {}", stats.header_pages);
    println!(
        "  throughput    {:.1} pages/s ({:.1}% extracted)",
        stats.pages_per_second(),
        stats.success_rate()
    );

    if let Some(page_number) = show {
        match syllabus.index.get(page_number) {
            Some(entry) => {
                println!("\n--- page {} ---", page_number);
                println!("{}", Validator::truncate_text(&entry.text, 4000));
            }
            None => println!(
                "{}",
                format_warning(&format!(
                    "Page {} is outside 1-{}",
                    page_number,
                    syllabus.index.total_pages()
                ))
            ),
        }
    }

    Ok(())
}

async fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

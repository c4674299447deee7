use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

mod catalog;
mod client;
mod config;
mod generic;
mod report;
mod runner;
mod selector;
mod types;
mod utils;

use catalog::ImageCatalog;
use client::{ApiClient, GrantStore};
use config::Settings;
use runner::RunOptions;
use types::{GrantType, NewGrant};
use utils::{ellipsize, osc8_file_link, osc8_link};

#[derive(Parser)]
#[command(name = "grant-images")]
#[command(about = "Assign and repair stock images for grants in the grant catalog")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Settings file (CONL); defaults to ./grant-images.conl when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Grant API base URL, overrides settings and GRANTS_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace missing, placeholder, svg and blocklisted images
    Fix {
        /// Only grants of this type
        #[arg(short = 't', long = "type", value_enum)]
        grant_type: Option<GrantType>,
        /// Reassign every grant, including ones with acceptable images
        #[arg(short, long)]
        force: bool,
        /// Also reassign images already used by a grant with a lower id
        #[arg(long)]
        dedupe: bool,
        /// Show what would change without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Stop after this many grants
        #[arg(short, long)]
        limit: Option<usize>,
        /// Pause between writes in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Writes per batch before a longer pause
        #[arg(long)]
        batch_size: Option<usize>,
        /// CSV audit report path (default reports/image-fix-<timestamp>.csv)
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// Quiet mode - only errors and the summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Classify grant images without changing anything
    Scan {
        #[arg(short = 't', long = "type", value_enum)]
        grant_type: Option<GrantType>,
    },
    /// List grants with their image status
    List {
        #[arg(short = 't', long = "type", value_enum, conflicts_with = "search")]
        grant_type: Option<GrantType>,
        /// Search query passed to the API
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create grants from a JSON array, picking images for those without one
    Seed {
        /// JSON file holding an array of grant records
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short = 'n', long)]
        dry_run: bool,
        #[arg(long)]
        delay_ms: Option<u64>,
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show the built-in image catalog, or the candidates for one tag
    Catalog {
        /// Category, alias, province, grant type or brand name
        #[arg(value_name = "TAG")]
        tag: Option<String>,
    },
}

fn connect(settings: &Settings) -> Result<ApiClient> {
    ApiClient::new(&settings.base_url, &settings.user_agent)
        .with_context(|| format!("Failed to set up client for {}", settings.base_url))
}

#[allow(clippy::too_many_arguments)]
fn run_fix(
    settings: &Settings,
    grant_type: Option<GrantType>,
    force: bool,
    dedupe: bool,
    dry_run: bool,
    limit: Option<usize>,
    report_path: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let client = connect(settings)?;
    let options = RunOptions {
        grant_type,
        force,
        dedupe,
        dry_run,
        limit,
        quiet,
        pacing: settings.pacing(),
    };

    if !quiet {
        println!(
            "Fixing {} grant images via {}{}",
            grant_type.map_or("all", |t| t.as_str()),
            client.base_url(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let summary = runner::run(
        &client,
        &ImageCatalog::builtin(),
        &settings.generic,
        &options,
        None,
    )
    .context("Failed to fetch grants")?;

    if !summary.assignments.is_empty() {
        let path = report_path.unwrap_or_else(report::default_report_path);
        match report::write_report(&path, &summary.assignments) {
            Ok(()) => println!("Report: {}", osc8_file_link(&path)),
            Err(e) => eprintln!("  Error writing report: {:#}", e),
        }
    }

    report::print_summary(&summary, dry_run);
    Ok(())
}

fn run_scan(settings: &Settings, grant_type: Option<GrantType>) -> Result<()> {
    let client = connect(settings)?;
    let grants = client
        .fetch(grant_type)
        .context("Failed to fetch grants")?;
    let report = runner::scan(&grants, &settings.generic);

    for (id, label) in &report.offenders {
        if let Some(grant) = grants.iter().find(|g| g.id == *id) {
            println!(
                "  #{:<5} {:<12} {}",
                id,
                label,
                ellipsize(&grant.title, 60)
            );
        }
    }

    println!();
    println!("Scanned {} grants", report.total);
    println!("  missing:     {}", report.missing);
    println!("  placeholder: {}", report.placeholder);
    println!("  svg:         {}", report.svg);
    println!("  blocked:     {}", report.blocked);
    println!("  duplicate:   {}", report.duplicate);
    println!("  acceptable:  {}", report.acceptable);
    Ok(())
}

fn run_list(settings: &Settings, grant_type: Option<GrantType>, search: Option<String>) -> Result<()> {
    let client = connect(settings)?;
    let grants = match search {
        Some(q) => client.search(&q),
        None => client.fetch(grant_type),
    }
    .context("Failed to fetch grants")?;

    for grant in &grants {
        let status = settings.generic.classify(grant.current_image());
        let image = match grant.current_image() {
            Some(url) => osc8_link(url, status.label()),
            None => status.label().to_string(),
        };
        println!(
            "#{:<5} {:<10} {:<60} {}",
            grant.id,
            grant.grant_type.map_or("-", |t| t.as_str()),
            ellipsize(&grant.title, 60),
            image
        );
    }
    println!("{} grants", grants.len());
    Ok(())
}

fn load_seed_file(path: &Path) -> Result<Vec<NewGrant>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse grant records in {}", path.display()))
}

fn run_seed(settings: &Settings, file: &Path, dry_run: bool, quiet: bool) -> Result<()> {
    let records = load_seed_file(file)?;
    if records.is_empty() {
        bail!("No grant records in {}", file.display());
    }

    let client = connect(settings)?;
    let options = RunOptions {
        dry_run,
        quiet,
        pacing: settings.pacing(),
        ..RunOptions::default()
    };
    let summary = runner::seed(
        &client,
        &ImageCatalog::builtin(),
        &settings.generic,
        &options,
        records,
    )
    .context("Failed to fetch grants")?;

    if dry_run {
        println!("\nDry run: {} grants would be created", summary.planned);
    } else {
        println!(
            "\nCreated {} grants, {} failed",
            summary.created,
            summary.failed_titles.len()
        );
    }
    Ok(())
}

fn run_catalog(tag: Option<String>) -> Result<()> {
    let catalog = ImageCatalog::builtin();
    match tag {
        Some(tag) => {
            let images = catalog.lookup(&tag);
            if images.is_empty() {
                bail!("No images for '{}'; fallback list would be used", tag);
            }
            for url in images {
                println!("{}", osc8_link(url, url));
            }
        }
        None => {
            for entry in catalog.categories() {
                println!("{:<18} {} images", entry.tag, entry.images.len());
            }
            println!(
                "{} fallback images, {} images in total",
                catalog.fallback().len(),
                catalog.all_images().count()
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.global.config.as_deref())?;
    if let Some(url) = cli.global.base_url {
        settings.base_url = url;
    }

    match cli.command {
        Commands::Fix {
            grant_type,
            force,
            dedupe,
            dry_run,
            limit,
            delay_ms,
            batch_size,
            report,
            quiet,
        } => {
            if let Some(ms) = delay_ms {
                settings.delay_ms = ms;
            }
            if let Some(size) = batch_size {
                settings.batch_size = size;
            }
            if force && dedupe {
                warn!("--dedupe has no effect together with --force");
            }
            run_fix(&settings, grant_type, force, dedupe, dry_run, limit, report, quiet)
        }
        Commands::Scan { grant_type } => run_scan(&settings, grant_type),
        Commands::List { grant_type, search } => run_list(&settings, grant_type, search),
        Commands::Seed {
            file,
            dry_run,
            delay_ms,
            quiet,
        } => {
            if let Some(ms) = delay_ms {
                settings.delay_ms = ms;
            }
            run_seed(&settings, &file, dry_run, quiet)
        }
        Commands::Catalog { tag } => run_catalog(tag),
    }
}

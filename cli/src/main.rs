//! orderdoc CLI - PDF order document generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use orderdoc::{
    current_stage, inspect_path, timeline, GenerateOptions, JsonFormat, Order, OrderDoc,
    TimelineStage,
};

#[derive(Parser)]
#[command(name = "orderdoc")]
#[command(version)]
#[command(about = "Generate PDF order documents from order JSON", long_about = None)]
struct Cli {
    /// Input order JSON file
    #[arg(value_name = "ORDER")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the PDF document for an order
    #[command(alias = "gen")]
    Generate {
        /// Input order JSON file
        #[arg(value_name = "ORDER")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,

        /// Currency suffix for amounts
        #[arg(long, env = "ORDERDOC_CURRENCY", default_value = "EUR")]
        currency: String,

        /// Store name for the footer and document info
        #[arg(long, env = "ORDERDOC_STORE_NAME", default_value = "Storefront")]
        store_name: String,

        /// Skip re-reading the written file
        #[arg(long)]
        no_check: bool,
    },

    /// Print the lifecycle timeline of an order
    Timeline {
        /// Input order JSON file
        #[arg(value_name = "ORDER")]
        input: PathBuf,

        #[command(flatten)]
        format: FormatArgs,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Check the structure of a generated PDF
    Check {
        /// PDF file to check
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Date format (chrono syntax)
    #[arg(long, env = "ORDERDOC_DATE_FORMAT", default_value = "%d/%m/%Y")]
    date_format: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            output,
            format,
            currency,
            store_name,
            no_check,
        }) => {
            let options = GenerateOptions::new()
                .with_currency(currency)
                .with_store_name(store_name)
                .with_date_format(format.date_format)
                .with_self_check(!no_check);
            cmd_generate(&input, output.as_deref(), options)
        }
        Some(Commands::Timeline {
            input,
            format,
            json,
            compact,
        }) => cmd_timeline(&input, &format.date_format, json, compact),
        Some(Commands::Check { input, json }) => cmd_check(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: generate if input is provided
            if let Some(input) = cli.input {
                cmd_generate(&input, cli.output.as_deref(), GenerateOptions::default())
            } else {
                println!("{}", "Usage: orderdoc <ORDER.json> [DIR]".yellow());
                println!("       orderdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_order(input: &Path) -> Result<Order, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    Ok(Order::from_json(&json)?)
}

fn cmd_generate(
    input: &Path,
    output: Option<&Path>,
    options: GenerateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = read_order(input)?;
    let doc = OrderDoc::with_options(options).generate(&order)?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;
    let path = doc.save_to_dir(&output_dir)?;

    println!("{} {}", "Saved to".green(), path.display());
    println!(
        "  {} {} bytes, {} objects",
        "├─".dimmed(),
        doc.bytes.len(),
        doc.stats.object_count
    );
    println!("  {} {} item rows", "└─".dimmed(), doc.stats.item_rows);
    if doc.stats.overflow {
        println!(
            "{}",
            "Warning: items push the footer off the page bottom (single page only)".yellow()
        );
    }

    Ok(())
}

fn cmd_timeline(
    input: &Path,
    date_format: &str,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = read_order(input)?;
    let stages = OrderDoc::new().with_date_format(date_format).timeline(&order);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", timeline::to_json(&stages, format)?);
        return Ok(());
    }

    let info = order.status.info();
    let (r, g, b) = (info.color.r, info.color.g, info.color.b);
    println!(
        "{} {}",
        format!("Order #{}", order.short_id()).cyan().bold(),
        info.label.truecolor(r, g, b).bold()
    );
    println!("{}", "─".repeat(40).dimmed());

    let current = current_stage(&stages).map(|s| s.id);
    for stage in &stages {
        print_stage(stage, current == Some(stage.id));
    }

    Ok(())
}

fn print_stage(stage: &TimelineStage, is_current: bool) {
    let color = stage.id.info().color;
    let marker = if stage.active { "●" } else { "○" };
    let marker = if stage.active {
        marker.truecolor(color.r, color.g, color.b)
    } else {
        marker.dimmed()
    };
    let title = if is_current {
        stage.title.bold()
    } else if stage.active {
        stage.title.normal()
    } else {
        stage.title.dimmed()
    };
    match &stage.date {
        Some(date) => println!("{} {} {}", marker, title, date.dimmed()),
        None => println!("{} {}", marker, title),
    }
    if is_current {
        println!("  {}", stage.description);
    }
}

fn cmd_check(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = inspect_path(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Document Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), report.format);
    println!("{}: {}", "Objects".bold(), report.object_count());
    println!("{}: {}", "Xref offset".bold(), report.xref_offset);
    println!("{}: {} 0 R", "Root".bold(), report.root);
    if let Some(info) = report.info {
        println!("{}: {} 0 R", "Info".bold(), info);
    }

    println!();
    println!("{}", "Objects".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for object in &report.objects {
        println!("  {:>3} {:>10}", object.id, object.offset);
    }
    for stream in &report.streams {
        println!(
            "  {} object {}: /Length {}",
            "stream".dimmed(),
            stream.object_id,
            stream.declared_length
        );
    }

    println!("\n{}", "OK".green().bold());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "orderdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF order document generator");
    println!();
    println!("License: MIT");
}

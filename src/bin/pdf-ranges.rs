//! PDF Ranges CLI tool
//!
//! Resolves page range strings against document page counts and prints the
//! resulting page plan, one output page per line.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::process;

use pdf_ranges::inputs::parse_document_args;
use pdf_ranges::plan::{self, PageInstruction};
use pdf_ranges::range::{resolve, PageCounts};

/// PDF Ranges - Turn page range strings into page plans
#[derive(Parser)]
#[command(name = "pdf-ranges")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Pages 1-3 of A rotated clockwise, then pages 5 and 7 of B
    pdf-ranges cat A=10 B=20 -r A1-3east B5 B7

    # Every page of every document
    pdf-ranges cat 10 20

    # Rotate the first three pages of a 10 page document upside down
    pdf-ranges rotate 10 -r 1-3south

    # Interleave the fronts with the backs in reverse order
    pdf-ranges shuffle A=5 B=5 -r A Bend-1

OUTPUT:
    One line per output page: HANDLE PAGE ROTATION
    (HANDLE is '-' when the range had no handle)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved page specifications for each range
    Parse(PlanArgs),

    /// Concatenate selected pages from one or more documents
    Cat(PlanArgs),

    /// Rotate selected pages of a single document, keeping all pages
    Rotate(PlanArgs),

    /// Collate selected pages round-robin
    Shuffle(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Documents as HANDLE=COUNT (e.g. A=10) or bare page counts
    #[arg(required = true)]
    documents: Vec<String>,

    /// Page ranges (e.g. 1-5, A1-10east, Bend-1odd)
    #[arg(short, long, num_args = 1..)]
    ranges: Vec<String>,

    /// Document used by ranges without a handle
    #[arg(long = "default", value_name = "HANDLE")]
    default_handle: Option<String>,
}

impl PlanArgs {
    fn page_counts(&self) -> Result<PageCounts> {
        let counts = parse_document_args(&self.documents)?;
        for (handle, pages) in counts.iter() {
            log::debug!("document {} has {} pages", handle, pages);
        }
        Ok(counts)
    }

    fn default_handle(&self) -> Option<String> {
        self.default_handle.as_deref().map(str::to_ascii_uppercase)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse(args) => cmd_parse(args),
        Commands::Cat(args) => cmd_cat(args),
        Commands::Rotate(args) => cmd_rotate(args),
        Commands::Shuffle(args) => cmd_shuffle(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Print the resolved specs, one per atom
fn cmd_parse(args: PlanArgs) -> Result<()> {
    let counts = args.page_counts()?;
    let default_handle = args.default_handle();

    let specs = resolve(&args.ranges, &counts, default_handle.as_deref())?;
    for spec in &specs {
        let pages: Vec<String> = spec.pages.iter().map(|p| p.to_string()).collect();
        println!(
            "{} {} {}",
            spec.handle.as_deref().unwrap_or("-"),
            pages.join(","),
            spec.rotation
        );
    }

    log::info!("resolved {} page specs", specs.len());
    Ok(())
}

fn cmd_cat(args: PlanArgs) -> Result<()> {
    let counts = args.page_counts()?;
    let default_handle = args.default_handle();

    if args.ranges.is_empty() {
        eprintln!("No ranges given, taking every page of {} documents", counts.len());
    }

    let instructions = plan::cat(&args.ranges, &counts, default_handle.as_deref())?;
    print_plan(&instructions);
    Ok(())
}

fn cmd_rotate(args: PlanArgs) -> Result<()> {
    if args.ranges.is_empty() {
        bail!("rotate requires at least one page range (-r)");
    }

    let counts = args.page_counts()?;
    let default_handle = args.default_handle();

    let instructions = plan::rotate(&args.ranges, &counts, default_handle.as_deref())?;
    print_plan(&instructions);
    Ok(())
}

fn cmd_shuffle(args: PlanArgs) -> Result<()> {
    if args.ranges.is_empty() {
        bail!("shuffle requires at least one page range (-r)");
    }

    let counts = args.page_counts()?;
    let default_handle = args.default_handle();

    let instructions = plan::shuffle(&args.ranges, &counts, default_handle.as_deref())?;
    print_plan(&instructions);
    Ok(())
}

/// Write one line per output page to stdout
fn print_plan(instructions: &[PageInstruction]) {
    for instruction in instructions {
        println!(
            "{} {} {}",
            instruction.handle.as_deref().unwrap_or("-"),
            instruction.page,
            instruction.rotation
        );
    }

    log::info!("plan has {} pages", instructions.len());
}

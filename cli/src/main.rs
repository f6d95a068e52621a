//! stylefamily CLI - infer DOCX style families and reflow content into them

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use stylefamily::{
    detect_format_from_path, to_json, Audit, JsonFormat, StyleFamily, StyleFamilyModel,
};

#[derive(Parser)]
#[command(name = "stylefamily")]
#[command(version)]
#[command(about = "Infer a style family from DOCX exemplars and generate documents in it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer a style family model from 3-5 exemplar documents
    Infer {
        /// Exemplar DOCX files
        #[arg(value_name = "EXEMPLARS", num_args = 3..=5, required = true)]
        exemplars: Vec<PathBuf>,

        /// Output model file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Parse exemplars one at a time
        #[arg(long)]
        sequential: bool,

        /// Citation colour (RRGGBB)
        #[arg(long, value_name = "HEX", env = "STYLEFAMILY_CITATION_COLOR")]
        citation_color: Option<String>,
    },

    /// Generate a document from a model and a content document
    #[command(alias = "gen")]
    Generate {
        /// Style family model JSON
        #[arg(short, long, value_name = "FILE")]
        model: PathBuf,

        /// Content DOCX file
        #[arg(short, long, value_name = "FILE")]
        content: PathBuf,

        /// Output DOCX file
        #[arg(short, long, value_name = "FILE", default_value = "OUTPUT.docx")]
        output: PathBuf,

        /// Audit JSON file (stdout summary only if not specified)
        #[arg(short, long, value_name = "FILE")]
        audit: Option<PathBuf>,
    },

    /// Infer and generate in one step
    Run {
        /// Comma-separated exemplar DOCX files
        #[arg(short, long, value_name = "FILES", value_delimiter = ',', required = true)]
        exemplars: Vec<PathBuf>,

        /// Content DOCX file
        #[arg(short, long, value_name = "FILE")]
        content: PathBuf,

        /// Output DOCX file
        #[arg(short, long, value_name = "FILE", default_value = "OUTPUT.docx")]
        output: PathBuf,

        /// Audit JSON file
        #[arg(short, long, value_name = "FILE", default_value = "audit.json")]
        audit: PathBuf,
    },

    /// Show the structure and block signatures of a document
    Inspect {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print signatures as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Infer {
            exemplars,
            output,
            compact,
            sequential,
            citation_color,
        } => cmd_infer(
            &exemplars,
            output.as_deref(),
            compact,
            sequential,
            citation_color,
        ),
        Commands::Generate {
            model,
            content,
            output,
            audit,
        } => cmd_generate(&model, &content, &output, audit.as_deref()),
        Commands::Run {
            exemplars,
            content,
            output,
            audit,
        } => cmd_run(&exemplars, &content, &output, &audit),
        Commands::Inspect { input, json } => cmd_inspect(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress(steps: u64) -> ProgressBar {
    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn read_all(paths: &[PathBuf]) -> std::io::Result<Vec<Vec<u8>>> {
    paths.iter().map(fs::read).collect()
}

fn cmd_infer(
    exemplars: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    sequential: bool,
    citation_color: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut family = StyleFamily::new();
    if sequential {
        family = family.sequential();
    }
    if let Some(color) = citation_color {
        if !stylefamily::citation::is_valid_color(&color) {
            return Err(format!("Invalid citation colour: {}", color).into());
        }
        family = family.with_citation_color(color);
    }

    let data = read_all(exemplars)?;
    let model = family.infer(&data)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&model, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
        print_regions(&model);
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_generate(
    model_path: &Path,
    content: &Path,
    output: &Path,
    audit_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = progress(3);

    pb.set_message("Loading model...");
    let model = StyleFamilyModel::from_json(&fs::read_to_string(model_path)?)?;
    pb.inc(1);

    pb.set_message("Generating document...");
    let result = StyleFamily::new().generate(&model, &fs::read(content)?)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    fs::write(output, &result.output)?;
    if let Some(path) = audit_path {
        fs::write(path, to_json(&result.audit, JsonFormat::Pretty)?)?;
    }
    pb.inc(1);
    pb.finish_with_message("Done!");

    print_outputs(output, audit_path);
    print_audit_summary(&result.audit);

    Ok(())
}

fn cmd_run(
    exemplars: &[PathBuf],
    content: &Path,
    output: &Path,
    audit_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = progress(4);

    pb.set_message("Reading documents...");
    let data = read_all(exemplars)?;
    let content = fs::read(content)?;
    pb.inc(1);

    pb.set_message("Inferring style family...");
    let family = StyleFamily::new();
    let model = family.infer(&data)?;
    log::debug!("Inferred {} regions", model.regions.len());
    pb.inc(1);

    pb.set_message("Generating document...");
    let result = family.generate(&model, &content)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    fs::write(output, &result.output)?;
    fs::write(audit_path, to_json(&result.audit, JsonFormat::Pretty)?)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    print_outputs(output, Some(audit_path));
    print_audit_summary(&result.audit);

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let data = fs::read(input)?;
    let family = StyleFamily::new();
    let signatures = family.signatures(&data)?;

    if json {
        for sig in &signatures {
            println!("{}", serde_json::to_string(sig)?);
        }
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    let content = stylefamily::extract_content_model(&data)?;
    if let Some(ref title) = content.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Sections".bold(), content.section_count());

    println!();
    println!("{}", "Block Signatures".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, sig) in signatures.iter().enumerate() {
        let shape = sig
            .table_shape
            .as_deref()
            .map(|s| format!(" table {}", s))
            .unwrap_or_default();
        let shaded = if sig.has_shading { " shaded" } else { "" };
        println!(
            "{:>3} {:<10} {:.2} {}{}{}",
            i,
            sig.part,
            sig.position_percentile,
            sig.dominant_styles.join(","),
            shape,
            shaded.yellow()
        );
    }

    Ok(())
}

fn print_regions(model: &StyleFamilyModel) {
    println!("\n{}", "Regions:".green().bold());
    let last = model.regions.len().saturating_sub(1);
    for (i, region) in model.regions.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!(
            "  {} {} {} ({:.2})",
            branch.dimmed(),
            region.id,
            region.region_type,
            region.confidence
        );
    }
    for warning in &model.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
}

fn print_outputs(output: &Path, audit: Option<&Path>) {
    println!("\n{}", "Output files:".green().bold());
    match audit {
        Some(audit) => {
            println!("  {} {}", "├─".dimmed(), output.display());
            println!("  {} {}", "└─".dimmed(), audit.display());
        }
        None => println!("  {} {}", "└─".dimmed(), output.display()),
    }
}

fn print_audit_summary(audit: &Audit) {
    println!("\n{}", "Audit".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Mapped fields".bold(), audit.mapping_decisions.len());
    println!(
        "{}: {}",
        "Constraint actions".bold(),
        audit.constraint_actions.len()
    );
    println!(
        "{}: {}",
        "Citations formatted".bold(),
        audit.citations_formatted_count
    );
    for unmapped in &audit.unmapped_content {
        println!("{} {}", "unmapped:".yellow(), unmapped);
    }
    for warning in &audit.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
}

fn cmd_version() {
    println!(
        "{} {}",
        "stylefamily".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("DOCX style-family inference and content composition");
    println!();
    println!("License: MIT");
}

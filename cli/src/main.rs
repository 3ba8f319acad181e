//! resumind CLI - resume classification and export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumind::{
    classify, split_sections, ExportRegistry, ExportResult, ExtractOptions, JsonFormat, LineRole,
    PageSelection, PageSize, RenderOptions, TextExtractor,
};

#[derive(Parser)]
#[command(name = "resumind")]
#[command(author = "resumind contributors")]
#[command(version)]
#[command(about = "Classify resumes and export them as clean PDF and DOCX", long_about = None)]
struct Cli {
    /// Input resume (PDF or text)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Paper size for PDF output
    #[arg(long, value_enum, env = "RESUMIND_PAGE_SIZE", default_value = "a4")]
    page_size: PaperSize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a resume to PDF, DOCX or both
    Export {
        /// Input resume (PDF or text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "all")]
        format: ExportFormat,

        /// Paper size for PDF output
        #[arg(long, value_enum, env = "RESUMIND_PAGE_SIZE", default_value = "a4")]
        page_size: PaperSize,
    },

    /// Show the role assigned to every line
    Classify {
        /// Input resume (PDF or text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the layout plan as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Extract resume text from a PDF
    Extract {
        /// Input resume (PDF or text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-2", "1,3")
        #[arg(long)]
        pages: Option<String>,

        /// Skip text cleanup
        #[arg(long)]
        raw: bool,
    },

    /// List the named sections of a resume
    Sections {
        /// Input resume (PDF or text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print sections with their content as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// PDF only
    Pdf,
    /// DOCX only
    Docx,
    /// Every registered format
    All,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PaperSize {
    /// ISO A4
    A4,
    /// US Letter
    Letter,
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::Letter,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            format,
            page_size,
        }) => cmd_export(&input, output.as_deref(), format, page_size),
        Some(Commands::Classify {
            input,
            json,
            compact,
        }) => cmd_classify(&input, json, compact),
        Some(Commands::Extract {
            input,
            output,
            pages,
            raw,
        }) => cmd_extract(&input, output.as_deref(), pages.as_deref(), raw),
        Some(Commands::Sections { input, json }) => cmd_sections(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_export(
                    &input,
                    cli.output.as_deref(),
                    ExportFormat::All,
                    cli.page_size,
                )
            } else {
                println!("{}", "Usage: resumind <FILE> [OUTPUT]".yellow());
                println!("       resumind --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read resume text, skipping PDF pages that fail to extract.
fn read_resume(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let extractor = TextExtractor::open_with_options(input, ExtractOptions::new().lenient())?;
    log::debug!(
        "Reading {} ({} pages)",
        input.display(),
        extractor.page_count()
    );
    Ok(extractor.extract()?)
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    format: ExportFormat,
    page_size: PaperSize,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading resume...");
    let text = read_resume(input)?;
    pb.inc(1);

    let mut options = RenderOptions::new().with_page_size(page_size.into());
    if let Some(name) = classify(&text).name() {
        options = options.with_title(name);
    }

    pb.set_message("Rendering...");
    let registry = ExportRegistry::with_defaults();
    let results: Vec<ExportResult> = match format {
        ExportFormat::Pdf => vec![registry.export(&text, "pdf", &options)?],
        ExportFormat::Docx => vec![registry.export(&text, "docx", &options)?],
        ExportFormat::All => registry.export_all(&text, &options)?,
    };
    pb.inc(1);

    pb.set_message("Writing files...");
    let mut written = Vec::with_capacity(results.len());
    for result in &results {
        let path = result.write_to_dir(&output_dir)?;
        written.push((path, result));
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    let last = written.len().saturating_sub(1);
    for (i, (path, result)) in written.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!(
            "  {} {} ({} bytes, {})",
            branch.dimmed(),
            name,
            result.bytes.len(),
            result.stats
        );
    }

    Ok(())
}

fn cmd_classify(input: &Path, json: bool, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_resume(input)?;
    let plan = classify(&text);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", resumind::render::to_json(&plan, format)?);
        return Ok(());
    }

    for line in &plan {
        let label = format!("{:<9}", line.role.label());
        let label = match line.role {
            LineRole::Name => label.cyan().bold(),
            LineRole::JobTitleHeading => label.cyan(),
            LineRole::ContactInfo => label.dimmed(),
            LineRole::SectionHeader => label.green().bold(),
            LineRole::ExperienceEntryHeading => label.yellow(),
            LineRole::Bullet | LineRole::Body => label.normal(),
        };
        let prefix = if line.role == LineRole::Bullet { "- " } else { "" };
        println!("{}  {}{}", label, prefix, line.text);
    }

    let stats = resumind::LayoutStats::from_plan(&plan);
    println!("\n{}", "─".repeat(40).dimmed());
    println!(
        "{}: {} lines, {} sections, {} entries, {} bullets",
        "Summary".bold(),
        stats.line_count,
        stats.section_count,
        stats.entry_count,
        stats.bullet_count
    );

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let mut options = ExtractOptions::new().lenient().with_pages(page_selection);
    if raw {
        options = options.raw();
    }
    let text = TextExtractor::open_with_options(input, options)?.extract()?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_resume(input)?;
    let sections = split_sections(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("{}", "Resume Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &sections {
        let lines = section.content.lines().filter(|l| !l.trim().is_empty()).count();
        let words = section.content.split_whitespace().count();
        println!(
            "{}: {} lines, {} words",
            section.name.bold(),
            lines,
            words
        );
    }

    if sections.is_empty() {
        println!("{}", "No content found".yellow());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resumind".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume classification and export tool");
    println!();
    println!("License: MIT");
}

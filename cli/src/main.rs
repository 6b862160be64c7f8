//! sheetgrid CLI - XLSX worksheet to JSON matrix conversion
//!
//! A command-line tool for turning a worksheet of an XLSX workbook into a
//! JSON array of rows.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetgrid::render::JsonFormat;
use sheetgrid::xlsx::{is_worksheet_part, GRID_COLUMNS};
use sheetgrid::{ReadOptions, XlsxReader};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// XLSX worksheet to JSON matrix conversion
#[derive(Parser)]
#[command(
    name = "sheetgrid",
    author = "iyulab",
    version,
    about = "Convert an XLSX worksheet to a JSON matrix of strings",
    long_about = "sheetgrid - Convert the first worksheet of an XLSX workbook into a JSON\n\
                  array of rows, every cell rendered as a string and every row padded\n\
                  to its last used column."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a worksheet to JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print with indentation
        #[arg(long)]
        pretty: bool,

        /// Read the sheet with this name instead of the first listed one
        #[arg(long, conflicts_with = "sheet_index")]
        sheet: Option<String>,

        /// Read the sheet at this zero-based workbook position
        #[arg(long)]
        sheet_index: Option<usize>,

        /// Reject cells at or beyond this column count
        #[arg(long, default_value_t = GRID_COLUMNS, conflicts_with = "no_column_limit")]
        max_columns: usize,

        /// Accept cells at any column
        #[arg(long)]
        no_column_limit: bool,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Input file path
        input: PathBuf,

        /// Print names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show workbook information
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Json {
            input,
            output,
            pretty,
            sheet,
            sheet_index,
            max_columns,
            no_column_limit,
        } => {
            let pb = create_spinner("Reading workbook...");

            let mut options = ReadOptions::new().with_max_columns(if no_column_limit {
                None
            } else {
                Some(max_columns)
            });
            if let Some(name) = sheet {
                options = options.with_sheet_name(name);
            } else if let Some(index) = sheet_index {
                options = options.with_sheet_index(index);
            }

            let reader = XlsxReader::open(&input)?.with_options(options);
            let matrix = reader.read_matrix()?;
            pb.set_message("Rendering to JSON...");

            let format = if pretty {
                JsonFormat::Pretty
            } else {
                JsonFormat::Compact
            };
            let json = sheetgrid::render::to_json(&matrix, format)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                eprintln!(
                    "{} Converted {} rows to JSON: {}",
                    "✓".green().bold(),
                    matrix.len(),
                    path.display()
                );
            }
        }

        Commands::Sheets { input, json } => {
            let reader = XlsxReader::open(&input)?;
            let names = reader.sheet_names()?;

            if json {
                println!("{}", serde_json::to_string(&names)?);
            } else if names.is_empty() {
                println!("{} No sheets declared in workbook", "!".yellow().bold());
            } else {
                for (idx, name) in names.iter().enumerate() {
                    println!("{:>3}  {}", idx, name);
                }
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing workbook...");

            let reader = XlsxReader::open(&input)?;
            let entries = reader.container().list_files();
            let worksheets = entries.iter().filter(|n| is_worksheet_part(n)).count();
            let sheet_names = reader.sheet_names()?;
            let selected = reader.worksheet_path()?;
            let matrix = reader.read_matrix()?;

            pb.finish_and_clear();

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Entries".bold(), entries.len());
            println!("{}: {}", "Worksheet parts".bold(), worksheets);
            println!("{}: {}", "Declared sheets".bold(), sheet_names.len());
            println!(
                "{}: {}",
                "Shared strings".bold(),
                reader.shared_strings().len()
            );

            println!("\n{}", "Selected Worksheet".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Part".bold(), selected);
            println!("{}: {}", "Rows".bold(), matrix.len());
            println!("{}: {}", "Widest row".bold(), matrix.width());
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "sheetgrid".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("XLSX worksheet to JSON matrix conversion");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

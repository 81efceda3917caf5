//! tiptree - Convert extractor HTML into editor documents

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;

use tiptree::markdown::render_document;
use tiptree::{ConvertOptions, Converter};

#[derive(Parser)]
#[command(name = "tiptree")]
#[command(version, about = "Convert extractor HTML into editor documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    tiptree report.html -o report.json     Convert to editor JSON
    tiptree report.html --markdown         Print as Markdown
    tiptree - --find \"quick brown\"         Locate text read from stdin")]
struct Cli {
    /// Input HTML file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Render Markdown instead of JSON
    #[arg(long, conflicts_with = "pretty")]
    markdown: bool,

    /// Print the id of the block containing TEXT instead of the document
    #[arg(long, value_name = "TEXT")]
    find: Option<String>,

    /// Conversion options as JSON
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool) {
    use log::LevelFilter::{Error, Info};

    // RUST_LOG overrides the default filter
    let _ = env_logger::builder()
        .filter_module("tiptree", if quiet { Error } else { Info })
        .parse_default_env()
        .try_init();
}

/// Returns `Ok(false)` when `--find` found nothing.
fn run(cli: &Cli) -> tiptree::Result<bool> {
    let options = match &cli.config {
        Some(path) => ConvertOptions::from_json_file(path)?,
        None => ConvertOptions::default(),
    };
    let converter = Converter::new(options);

    let bytes = read_input(&cli.input)?;
    let conversion = converter.convert_bytes(&cli.input, &bytes)?;
    log::info!(
        "{}: {} nodes, {} issues",
        cli.input,
        conversion.document.node_count(),
        conversion.issues.len()
    );

    let document = conversion.document;

    if let Some(text) = &cli.find {
        return Ok(match document.locate(text) {
            Some(id) => {
                println!("{id}");
                true
            }
            None => {
                eprintln!("not found: {text:?}");
                false
            }
        });
    }

    let rendered = if cli.markdown {
        render_document(&document)
    } else if cli.pretty {
        document.to_json_pretty()? + "\n"
    } else {
        document.to_json()? + "\n"
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(true)
}

fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        fs::read(input)
    }
}

//! texmark - Command Line Entry Point
//!
//! Converts a Markdown + LaTeX document read from a file or stdin and
//! writes the result to stdout or a file.

use clap::{ArgGroup, Parser};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use texmark::config::{load_config, load_config_from, save_config, save_config_to, Settings};
use texmark::export::{
    convert, copy_html_to_clipboard, download_link, to_html_fragment_with, ExportFormat,
};
use texmark::markdown::{normalize, render_preview};
use texmark::stats::DocumentStats;
use texmark::{Error, Result};

/// Application name constant.
const APP_NAME: &str = "texmark";

#[derive(Parser)]
#[command(name = "texmark", version)]
#[command(about = "Convert Markdown with LaTeX math to HTML, plain text, reStructuredText or LaTeX")]
#[command(group(
    ArgGroup::new("mode").args(["preview", "fragment", "stats", "copy", "download_link"])
))]
struct Args {
    /// Input document (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output format: html, text, markdown, rst or latex
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the on-screen preview HTML
    #[arg(long)]
    preview: bool,

    /// Emit the inline-styled HTML fragment instead of a full document
    #[arg(long)]
    fragment: bool,

    /// Print document statistics as JSON
    #[arg(long)]
    stats: bool,

    /// Copy the rendered HTML to the clipboard
    #[arg(long)]
    copy: bool,

    /// Emit an HTML anchor carrying the converted document as a data URI
    #[arg(long)]
    download_link: bool,

    /// Do not normalize math delimiters
    #[arg(long)]
    no_fix: bool,

    /// Omit raw HTML from the preview
    #[arg(long)]
    no_raw_html: bool,

    /// Use this configuration file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Save the effective settings back to the configuration file
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", APP_NAME, err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    apply_overrides(&mut settings, &args);

    if args.save_config {
        match &args.config {
            Some(path) => save_config_to(path, &settings)?,
            None => save_config(&settings)?,
        }
        if args.input.is_none() {
            return Ok(());
        }
    }

    let source = read_source(args.input.as_deref())?;
    debug!("Read {} bytes of input", source.len());

    if args.copy {
        copy_html_to_clipboard(&normalized(&source, &settings), &settings.math)?;
        info!("Rendered document copied to clipboard");
        return Ok(());
    }

    let output = if args.preview {
        render_preview(&source, &settings)
    } else if args.fragment {
        to_html_fragment_with(&normalized(&source, &settings), &settings.math)
    } else if args.stats {
        let stats = DocumentStats::compute(&source, &normalized(&source, &settings));
        let mut json = serde_json::to_string_pretty(&stats)?;
        json.push('\n');
        json
    } else if args.download_link {
        let mut anchor = download_link(&convert(&source, settings.export_format, &settings));
        anchor.push('\n');
        anchor
    } else {
        convert(&source, settings.export_format, &settings).content
    };

    write_output(args.output.as_deref(), &output)
}

/// Fold command-line switches into the loaded settings.
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(format) = args.format {
        settings.export_format = format;
    } else if let Some(format) = args
        .output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<ExportFormat>().ok())
    {
        debug!("Using {} output inferred from file extension", format);
        settings.export_format = format;
    }
    if args.no_fix {
        settings.auto_fix_delimiters = false;
    }
    if args.no_raw_html {
        settings.allow_raw_html = false;
    }
}

fn normalized(source: &str, settings: &Settings) -> String {
    if settings.auto_fix_delimiters {
        normalize(source)
    } else {
        source.to_string()
    }
}

fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|source| Error::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

//! slidesvg - renders parsed slide decks to SVG pages

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;

use slidesvg::{
    available_code_themes, available_themes, preprocess_source, ConverterBuilder, Document,
};

#[derive(Parser)]
#[command(name = "slidesvg")]
#[command(version, about = "Render slide decks to SVG pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    slidesvg -i talk.json                  Write talk/page-01.svg, talk/page-02.svg, ...
    slidesvg -i talk.json -o out -t dark   Use the dark theme, write into out/
    slidesvg --preprocess talk.slide       Print the source with fenced comments escaped")]
struct Cli {
    /// Parsed document (JSON)
    #[arg(short, long, value_name = "FILE", required_unless_present_any = ["list_themes", "list_code_themes", "preprocess"])]
    input: Option<PathBuf>,

    /// Output directory [default: input file name without extension]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Built-in page theme
    #[arg(short, long, default_value = "light")]
    theme: String,

    /// Page theme from a JSON file, overrides --theme
    #[arg(long, value_name = "FILE")]
    theme_file: Option<PathBuf>,

    /// Syntax highlighting theme
    #[arg(long)]
    code_theme: Option<String>,

    /// List the built-in page themes
    #[arg(long)]
    list_themes: bool,

    /// List the syntax highlighting themes
    #[arg(long)]
    list_code_themes: bool,

    /// Escape comment lines in fenced code of a raw source file and print the result
    #[arg(long, value_name = "SOURCE")]
    preprocess: Option<PathBuf>,

    /// Do not print diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if cli.list_themes {
        for name in available_themes() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.list_code_themes {
        for name in available_code_themes() {
            println!("{name}");
        }
        return Ok(());
    }
    if let Some(source) = &cli.preprocess {
        let src = fs::read_to_string(source)
            .with_context(|| format!("failed to read {}", source.display()))?;
        print!("{}", preprocess_source(&src));
        return Ok(());
    }

    let Some(input) = &cli.input else {
        bail!("no input document given");
    };
    convert(&cli, input)
}

fn convert(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    log::info!("Loading document from {}", input.display());
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let document: Document = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    let base_dir = input
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = ConverterBuilder::new()
        .set_theme(cli.theme.as_str())
        .set_base_dir(base_dir)
        .set_quiet(cli.quiet);
    if let Some(path) = &cli.theme_file {
        builder = builder.set_theme_file(path);
    }
    if let Some(name) = &cli.code_theme {
        builder = builder.set_code_theme(name.as_str());
    }
    let converter = builder.build()?;

    let output = converter.convert_to_svg(&document)?;

    let out_dir = match &cli.output {
        Some(dir) => dir.clone(),
        None => PathBuf::from(input.file_stem().context("input has no file name")?),
    };
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    for (i, page) in output.pages.iter().enumerate() {
        let path = out_dir.join(format!("page-{:02}.svg", i + 1));
        log::debug!("Writing page {} to {}", i + 1, path.display());
        fs::write(&path, page).with_context(|| format!("failed to write {}", path.display()))?;
    }
    log::info!(
        "Wrote {} pages to {} ({} diagnostics)",
        output.pages.len(),
        out_dir.display(),
        output.diagnostics.len()
    );
    Ok(())
}

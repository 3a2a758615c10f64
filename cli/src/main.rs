use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use mango_core::ManualSource;
use mango_markup::{
    BuildConfig, ManWriter, Parser as MarkupParser, Renderer, Tokenizer, TroffRenderer, build_all,
    render,
};

#[derive(Debug, Parser)]
#[command(name = "mango")]
#[command(about = "Generate man pages from doc comment markup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build man pages from JSON or YAML manual sources.
    Build(BuildArgs),
    /// Render markup text as a man page with a single DESCRIPTION section.
    Render(RenderArgs),
    /// Print the parse tree of markup text.
    Tree(TreeArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Manual source files (`.json`, `.yaml` or `.yml`).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Directory the pages are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// YAML build configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of parallel build jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Print pages to stdout instead of writing files.
    #[arg(long)]
    stdout: bool,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Markup file (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Program name for the title line.
    #[arg(long, default_value = "untitled")]
    name: String,
}

#[derive(Debug, Args)]
struct TreeArgs {
    /// Markup file (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::Render(args) => run_render(args),
        Command::Tree(args) => run_tree(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => BuildConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => BuildConfig::default(),
    };

    let sources = args
        .inputs
        .iter()
        .map(|path| load_source(path))
        .collect::<Result<Vec<_>, _>>()?;

    let outcomes =
        build_all(&sources, &config, args.jobs.unwrap_or(0)).map_err(|err| err.to_string())?;

    if !args.stdout {
        fs::create_dir_all(&args.output_dir).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                args.output_dir.display()
            )
        })?;
    }

    for (input, outcome) in args.inputs.iter().zip(outcomes) {
        let page = match outcome.result {
            Ok(page) => page,
            Err(err) => {
                eprintln!("warning: skipping '{}': {err}", input.display());
                continue;
            }
        };

        if args.stdout {
            print!("{page}");
            continue;
        }

        let path = args
            .output_dir
            .join(format!("{}.{}", outcome.name, config.section));
        fs::write(&path, page)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
        println!("{} -> {}", input.display(), path.display());
    }

    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    let tokens = Tokenizer::new().tokenize_str(&text);
    let mut parser = MarkupParser::new();
    let root = parser.parse(&tokens).map_err(|err| err.to_string())?;

    let mut writer = ManWriter::new(&args.name, "1");
    let mut troff = TroffRenderer::new(&mut writer);
    troff.section("Description");
    render(&mut troff, parser.tree(), root);
    print!("{}", writer.finalize());
    Ok(())
}

fn run_tree(args: TreeArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    let tokens = Tokenizer::new().tokenize_str(&text);
    let mut parser = MarkupParser::new();
    let root = parser.parse(&tokens).map_err(|err| err.to_string())?;
    print!("{}", parser.tree().outline(root));
    Ok(())
}

/// Loads a manual source, choosing the format by file extension.
fn load_source(path: &Path) -> Result<ManualSource, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .map_err(|err| format!("Invalid YAML in '{}': {err}", path.display())),
        Some("json") => serde_json::from_str(&text)
            .map_err(|err| format!("Invalid JSON in '{}': {err}", path.display())),
        _ => Err(format!(
            "Unsupported input '{}': expected .json, .yaml or .yml",
            path.display()
        )),
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(text)
        }
    }
}

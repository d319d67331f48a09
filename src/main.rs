use clap::{Parser, Subcommand};
use sitepress::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitepress")]
#[command(about = "Build pipeline for a bilingual static site")]
#[command(long_about = "\
Build pipeline for a bilingual static site

Authored HTML and markdown under the source directory are rendered into the
destination with shared partials, translations and depth-correct links.

Project structure:

  .
  ├── config.toml                   # Optional, overrides stock defaults
  ├── version.json                  # { \"version\": \"1.4.0\" } for {{version}}
  ├── partials/
  │   ├── header.html               # Replaces <!-- {{header}} -->
  │   └── footer.html               # Replaces <!-- {{footer}} -->
  ├── internal/i18n/modules/*.json  # { \"en\": {...}, \"fr\": {...} }
  └── site/
      ├── index.html                # Fan-out canonical → index.html, fr/index.html
      ├── docs/quickstart.md        # → docs/quickstart.html + docs/quickstart/index.html
      ├── fr/docs/quickstart.md     # French mirror
      └── assets/                   # Copied verbatim

Set RUST_LOG=debug to trace every written target.

Run 'sitepress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source directory, overriding the config
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory, overriding the config
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that produce a build report.
#[derive(clap::Args, Clone)]
struct ReportArgs {
    /// Print the report as JSON instead of the page listing
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the output directory and build the whole site
    Build(ReportArgs),
    /// Render every page in memory and list the planned targets
    Check(ReportArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build(ref args) => {
            let inputs = load_inputs(&cli)?;
            if args.json {
                let report = pipeline::build(&inputs)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "==> Building {} \u{2192} {}",
                    inputs.paths.source.display(),
                    inputs.paths.dist.display()
                );
                let report = pipeline::build(&inputs)?;
                output::print_build_output(&report);
                println!("==> Build complete: {}", inputs.paths.dist.display());
            }
        }
        Command::Check(ref args) => {
            let inputs = load_inputs(&cli)?;
            if args.json {
                let report = pipeline::check(&inputs)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("==> Checking {}", inputs.paths.source.display());
                let report = pipeline::check(&inputs)?;
                output::print_build_output(&report);
                println!("==> Site is valid");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config, apply CLI path overrides and read every build input.
fn load_inputs(cli: &Cli) -> Result<pipeline::BuildInputs, Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(config::CONFIG_FILENAME));
    let mut site_config = config::load_config(&config_path)?;
    if let Some(source) = &cli.source {
        site_config.paths.source = source.clone();
    }
    if let Some(dist) = &cli.output {
        site_config.paths.dist = dist.clone();
    }
    Ok(pipeline::BuildInputs::load(&site_config, &cli.root)?)
}

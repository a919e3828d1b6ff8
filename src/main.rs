use clap::{Parser, Subcommand};
use gtoi_build::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gtoi-build")]
#[command(about = "Build the gtoi book and problem site")]
#[command(long_about = "\
Build the gtoi book and problem site

Run from the repository root with no arguments to build everything.

Project structure:

  ./
  ├── gtoi.toml                    # Optional config (see gen-config)
  ├── contributors.yaml            # {name, github, text, problems} entries
  ├── problems/
  │   ├── 1/
  │   │   ├── 1.yaml               # Problem 1.1: text, hint, solution, cat, source
  │   │   └── extra.yaml           # External problems: [{name, link}, ...]
  │   └── _build/                  # Generated problem pages (recreated)
  ├── text/book/
  │   ├── index.rst                # Tables of contents (skipped)
  │   └── 1/1-intro.rst            # Book parts, in path order
  └── _build/                      # Book, statistics, contributors, wiki

Run 'gtoi-build gen-config' to print a documented gtoi.toml.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run every stage (default)
    Build,
    /// Generate the problem-set pages
    Problems,
    /// Generate the combined book document
    Book,
    /// Export book parts to wiki markup
    Wiki,
    /// Generate the progress dashboard
    Statistics,
    /// Generate the contributors page
    Contributors,
    /// Load and convert everything without writing
    Check,
    /// Print a stock gtoi.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Build);

    if let Command::GenConfig = command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.root)?;
    init_thread_pool(&config.processing);
    let paths = config.paths.resolve(&cli.root);

    match command {
        Command::Build => {
            let report = generate::build_all(&cli.root, &config, output::print_stage_output)?;
            println!("==> {}", output::format_build_summary(&report));
        }
        Command::Problems => {
            let report = generate::generate_problems(&paths)?;
            output::print_problems_output(&report);
        }
        Command::Book => {
            let report = generate::generate_book(&paths, &config.site)?;
            output::print_book_output(&report);
        }
        Command::Wiki => {
            let report = generate::export_wiki(&paths, &config.site)?;
            output::print_wiki_output(&report);
        }
        Command::Statistics => {
            let report = generate::generate_statistics(&paths, &config.statistics)?;
            output::print_statistics_output(&report);
        }
        Command::Contributors => {
            let report = generate::generate_contributors(&paths)?;
            output::print_contributors_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let report = generate::check(&cli.root, &config)?;
            output::print_check_output(&report);
            println!("==> Sources are valid");
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

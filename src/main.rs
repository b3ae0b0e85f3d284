//! pressgen - static site to WordPress theme converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pressgen::theme::{convert_site, ConvertOptions};

#[derive(Parser)]
#[command(name = "pressgen")]
#[command(version, about = "Static site to WordPress theme converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    pressgen convert --site ./site --out my-theme   Generate a theme from ./site/index.html
    pressgen partials --root ./generator            Render data-driven HTML partials")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a static site into a WordPress theme
    Convert {
        /// Path to the static site folder
        #[arg(long, default_value = ".")]
        site: PathBuf,

        /// Output theme folder; a relative path is resolved inside the site folder
        #[arg(long, default_value = "theme")]
        out: PathBuf,

        /// Theme name for the style.css header (defaults to the output folder name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Render HTML partials from data.json + template.html subfolders
    Partials {
        /// Folder whose subfolders hold data.json and template.html
        #[arg(long, default_value = "generator")]
        root: PathBuf,

        /// Write <name>.html files here instead of printing to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Log to stderr so stdout stays clean for rendered partials
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> pressgen::Result<()> {
    match cli.command {
        Command::Convert { site, out, name } => {
            let out_dir = if out.is_absolute() {
                out
            } else {
                site.join(out)
            };
            let options = ConvertOptions {
                theme_name: name,
                ..ConvertOptions::default()
            };
            let report = convert_site(&site, &out_dir, &options)?;

            println!("Theme generated at: {}", report.theme_dir.display());
            println!("Assets copied: {}", report.assets_copied);
            if report.pages_copied > 0 {
                println!("Extra pages copied: {}", report.pages_copied);
            }
            Ok(())
        }
        Command::Partials { root, out } => {
            let rendered = pressgen::partials::render_partials(&root)?;
            match out {
                Some(dir) => {
                    pressgen::partials::write_partials(&rendered, &dir)?;
                    println!("Wrote {} partial(s) to {}", rendered.len(), dir.display());
                }
                None => {
                    for (name, html) in &rendered {
                        println!("Generated HTML for {name}:");
                        println!("{html}");
                        println!();
                    }
                }
            }
            Ok(())
        }
    }
}

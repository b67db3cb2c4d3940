use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use workshop_catalog::catalog::ReleaseCatalog;
use workshop_catalog::controller::{DetailPage, JsonFileSource, ReleaseSource};
use workshop_catalog::download::DownloadSelection;
use workshop_catalog::render::DetailLookup;
use workshop_catalog::{config, generate, output, scan};

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Called once per process
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "workshop-catalog")]
#[command(about = "Release catalog builder for Workshop Computer program cards")]
#[command(long_about = "\
Release catalog builder for Workshop Computer program cards

Each directory under releases/ is one program card. The directory name is the
release id and carries its number and title; metadata, README and files are
picked up from inside it.

Repository structure:

  releases/
  ├── 03_Turing_Machine/           # Release 03, \"Turing Machine\"
  │   ├── info.yaml                # Description, Language, Creator, Version, Status
  │   ├── README.md                # Shown on the detail page
  │   ├── build/Turing.uf2         # Firmware (any depth)
  │   └── docs/Turing_Manual.pdf   # Documentation (any depth)
  ├── 05_chord_blimey/
  └── .archive/                    # Hidden = skipped
  website/
  ├── releases.json                # Written by 'scan'
  └── config.toml                  # Site config (optional)

Status filtering matches the raw status text; badges use the first matching
category (released, working, wip, beta, proof of concept).

Run 'workshop-catalog gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Releases directory to scan
    #[arg(long, default_value = "releases", global = true)]
    releases: PathBuf,

    /// Release data file; config.toml is read from the same directory
    #[arg(long, default_value = "website/releases.json", global = true)]
    data: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the releases directory into the data file
    Scan,
    /// Render the data file into a static site
    Generate,
    /// Scan, then generate, then print a release summary
    Build,
    /// Print releases, optionally filtered
    List {
        /// Keep releases whose status contains this text (case-insensitive)
        #[arg(long)]
        status: Option<String>,
        /// Keep releases with exactly this language
        #[arg(long)]
        language: Option<String>,
    },
    /// Print the detail view markup for one release
    Show {
        /// Release id (directory name)
        id: Option<String>,
    },
    /// Resolve the firmware download for a release
    Download {
        /// Release id (directory name)
        id: String,
        /// 1-based file number for releases with several firmware files
        #[arg(long)]
        pick: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let site_dir = site_dir(&cli.data);

    match cli.command {
        Command::Scan => {
            let result = scan::scan(&cli.releases)?;
            scan::write_releases_json(&cli.data, &result.releases)?;
            output::print_scan_output(&result, &cli.data);
        }
        Command::Generate => {
            let site_config = config::load_config(site_dir)?;
            let report = generate::generate(&cli.data, &cli.output, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            let site_config = config::load_config(site_dir)?;

            println!("==> Stage 1: Scanning {}", cli.releases.display());
            let result = scan::scan(&cli.releases)?;
            scan::write_releases_json(&cli.data, &result.releases)?;
            output::print_scan_output(&result, &cli.data);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&cli.data, &cli.output, &site_config)?;
            output::print_generate_output(&report);
            output::print_build_summary(&report.summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::List { status, language } => {
            let mut catalog = ReleaseCatalog::new(JsonFileSource::new(&cli.data).fetch()?);
            if let Some(status) = status {
                catalog.set_status_filter(&status);
            }
            if let Some(language) = language {
                catalog.set_language_filter(&language);
            }
            output::print_release_list(&catalog);
        }
        Command::Show { id } => {
            let site_config = config::load_config(site_dir)?;
            let source = JsonFileSource::new(&cli.data);
            let page = DetailPage::open(&source, id.as_deref(), &site_config);
            if let Some(err) = page.load_error() {
                eprintln!("{err}");
            }
            println!("{}", page.content().into_string());
            if page.lookup().failure_message().is_some() {
                std::process::exit(1);
            }
        }
        Command::Download { id, pick } => {
            let site_config = config::load_config(site_dir)?;
            let source = JsonFileSource::new(&cli.data);
            let page = DetailPage::open(&source, Some(id.as_str()), &site_config);
            let lookup = page.lookup();
            let DetailLookup::Found(release) = lookup else {
                if let Some(err) = page.load_error() {
                    eprintln!("{err}");
                }
                exit_with(lookup.failure_message().unwrap_or_default());
            };
            match DownloadSelection::begin(release, &site_config.site.files_prefix) {
                Err(err) => exit_with(err),
                Ok(DownloadSelection::Direct(link)) => output::print_download_link(&link),
                Ok(DownloadSelection::Choose(choice)) => match pick {
                    None => output::print_download_choice(&choice),
                    Some(answer) => match choice.resolve(Some(answer.as_str())) {
                        Ok(Some(link)) => output::print_download_link(&link),
                        Ok(None) => println!("Download cancelled."),
                        Err(err) => exit_with(err),
                    },
                },
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Directory holding the data file and `config.toml`.
fn site_dir(data: &Path) -> &Path {
    data.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn exit_with(message: impl Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1)
}

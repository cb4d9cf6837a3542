use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use toolenv::cli::App;
use toolenv::config::{self, Layout, ToolenvConfig};
use toolenv::logging;
use toolenv::platform::PlatformTarget;
use toolenv::release::{FetchOptions, GitHubSource};

#[derive(Parser)]
#[command(name = "toolenv")]
#[command(version, about = "Install and switch between versions of a release-distributed binary")]
struct Cli {
    /// Directory holding the active-version link (add it to $PATH)
    #[arg(short, long, global = true)]
    bin_path: Option<PathBuf>,

    /// Directory holding installed versions
    #[arg(long, global = true)]
    versions_path: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download and install a version for the current OS/ARCH
    Install {
        version: String,
        /// Switch to the version after installing it
        #[arg(long = "use")]
        activate: bool,
        /// Reinstall even if the version is already installed
        #[arg(short, long)]
        force: bool,
    },
    /// Set the specified version as the active one
    Use {
        version: String,
        /// Install the version first if it is missing
        #[arg(short, long)]
        install: bool,
    },
    /// List installed versions
    List,
    /// List remote versions, sorted by semver
    ListRemote {
        /// Include pre-release versions (alpha, beta, rc)
        #[arg(long)]
        devel: bool,
        /// Limit number of versions listed
        #[arg(short, long, default_value_t = 0)]
        limit: i64,
    },
    /// Show the active version
    Current,
    /// Show the toolenv version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let root = config::root_dir();
    let _log_guard = logging::init(&config::log_path(&root), cli.verbose);

    let config_path = config::config_path(&root);
    let config = ToolenvConfig::load(&config_path)?;
    let layout = Layout::resolve(&root, &config.paths, cli.bin_path, cli.versions_path);

    let source = GitHubSource::from_env(
        &config.github.api_url,
        &config.tool.owner,
        &config.tool.repo,
    )
    .context("Failed to create GitHub client")?;
    let app = App::new(
        &config.tool.name,
        layout,
        PlatformTarget::current(),
        Arc::new(source),
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(&app, cli.command))
}

async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match command {
        Command::Install {
            version,
            activate,
            force,
        } => {
            app.install(&version, force, &mut out).await?;
            if activate {
                app.use_version(&version, false, &mut out).await?;
            }
        }
        Command::Use { version, install } => app.use_version(&version, install, &mut out).await?,
        Command::List => app.list(&mut out)?,
        Command::ListRemote { devel, limit } => {
            let options = FetchOptions {
                include_devel: devel,
                limit,
            };
            app.list_remote(options, &mut out).await?;
        }
        Command::Current => app.current(&mut out)?,
        Command::Version => writeln!(out, "toolenv version v{}", env!("CARGO_PKG_VERSION"))?,
    }
    Ok(())
}

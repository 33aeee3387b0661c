use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use locale_tool::config::{Config, ConfigStore};
use locale_tool::server::AssetServer;
use locale_tool::{headless, logging, ui};

/// Find untemplated Korean text in .tsx files and apply translation templates.
#[derive(Parser)]
#[command(name = "locale-tool", version, about)]
struct Cli {
    /// Config file (default: <config dir>/locale-tool/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the locale service
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal client (default)
    Ui,

    /// Search a file for Korean text that is not wrapped in a template
    Find {
        file: PathBuf,

        /// Template type forwarded to the service (e.g. bt, bvt)
        #[arg(long)]
        template_type: Option<String>,
    },

    /// Apply translation templates and save the processed file
    Apply {
        file: PathBuf,

        /// Template type forwarded to the service (e.g. bt, bvt)
        #[arg(long)]
        template_type: Option<String>,

        /// Where to save processed_<file> (default: download directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Serve the web assets with single-page fallback routing
    Serve {
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Ui);
    match command {
        Command::Ui => logging::init_file_tracing(),
        _ => logging::init_stderr_tracing(),
    }

    let store = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        store.update(|config| config.service.base_url = url)?;
    }

    match command {
        Command::Ui => ui::run(store)?,
        Command::Find {
            file,
            template_type,
        } => {
            let config = store.get();
            let stdout = io::stdout();
            async_runtime()?.block_on(headless::run_find(
                &config,
                &file,
                template_type.as_deref(),
                &mut stdout.lock(),
            ))?;
        }
        Command::Apply {
            file,
            template_type,
            output_dir,
        } => {
            let config = store.get();
            let output_dir = output_dir.unwrap_or_else(|| config.download.resolve_directory());
            let stdout = io::stdout();
            async_runtime()?.block_on(headless::run_apply(
                &config,
                &file,
                template_type.as_deref(),
                &output_dir,
                &mut stdout.lock(),
            ))?;
        }
        Command::Serve { port, assets_dir } => {
            store.update(|config| {
                if let Some(port) = port {
                    config.server.port = port;
                }
                if let Some(dir) = assets_dir {
                    config.server.assets_dir = dir;
                }
            })?;
            let server = AssetServer::new(&store.get().server)?;
            async_runtime()?.block_on(server.run())?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ConfigStore> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(ConfigStore::new(config, path))
}

fn async_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

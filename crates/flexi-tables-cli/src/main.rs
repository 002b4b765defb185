use anyhow::{Context, Result};
use flexi_tables_config::Config;
use flexi_tables_engine::{TablesExtension, render_markdown};
use std::{
    env,
    io::{self, Read, Write},
    path::PathBuf,
    process,
};

/// Where the markdown comes from.
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [_] => Some(Self::Stdin),
            [_, path] if path == "-" => Some(Self::Stdin),
            [_, path] => Some(Self::File(PathBuf::from(path))),
            _ => None,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read markdown from stdin")?;
                Ok(content)
            }
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Table settings from the config file, or the defaults when there is
/// none or it cannot be used.
fn load_extension() -> TablesExtension {
    let config_path = Config::config_path();
    match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config.tables
        }
        Ok(None) => {
            log::debug!("No config file at {}, using defaults", config_path.display());
            TablesExtension::default()
        }
        Err(e) => {
            log::warn!("{e}; using default table settings");
            TablesExtension::default()
        }
    }
}

fn usage(args: &[String]) -> String {
    let program = args.first().map_or("flexi-tables", String::as_str);
    format!("Usage: {program} [markdown-file]")
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(input) = Input::from_args(&args) else {
        eprintln!("{}", usage(&args));
        eprintln!("Reads stdin when no file (or '-') is given.");
        process::exit(1);
    };

    let extension = load_extension();
    let markdown = input.read()?;
    let html = render_markdown(&markdown, &extension);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(html.as_bytes())
        .context("Failed to write HTML to stdout")?;
    Ok(())
}

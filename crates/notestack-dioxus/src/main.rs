use dioxus::prelude::*;
use notestack_engine::blocks::code::environment::{self, CodeEnvironment};
use notestack_engine::io;
use std::env;
use std::path::PathBuf;
use std::process;

mod tasks;
mod ui;

use notestack_config::Config;
use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("notestack starting up!");

    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "notestack".to_string());
    if args.len() > 2 {
        eprintln!("Usage: {program_name} [notes-folder-path]");
        process::exit(1);
    }

    let config = match load_config(args.get(1).cloned()) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No notes path provided and no config file found");
            eprintln!("Usage: {program_name} <notes-folder-path>");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        Err(e) => {
            log::error!("Config::load() failed with error: {e}");
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {program_name} <notes-folder-path>");
            process::exit(1);
        }
    };

    // Validate notes directory using engine
    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        eprintln!(
            "Error: Notes path '{}' is invalid: {e}",
            config.notes_path.display()
        );
        process::exit(1);
    }

    if let Some(base) = &config.host.code_worker_base
        && environment::install(CodeEnvironment::new(base.as_str())).is_err()
    {
        log::warn!("Code environment was already installed, ignoring {base}");
    }

    log::info!("Launching desktop app for {}", config.notes_path.display());
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(config)
        .launch(app_root);
}

/// CLI argument wins over the config file; editor settings always come from the file
fn load_config(cli_arg: Option<String>) -> Result<Option<Config>, notestack_config::ConfigError> {
    let from_file = Config::load()?;
    let Some(notes_path) = Config::resolve_notes_path(cli_arg)? else {
        return Ok(None);
    };
    let mut config = from_file.unwrap_or_else(|| Config::new(PathBuf::new()));
    config.notes_path = notes_path;
    Ok(Some(config))
}

fn app_root() -> Element {
    let config = use_context::<Config>();
    log::info!(
        "app_root() creating App component with path: {}",
        config.notes_path.display()
    );

    rsx! {
        App { config }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("notestack")
        .with_always_on_top(false);

    Config::default().with_window(window)
}

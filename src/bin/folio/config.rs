use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    if let Some(exe_dir) = exe_dir {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join("folio").join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join("folio").join(CFG_FILE_NAME));
    }

    None
}

/// Explicit path first, then the usual locations, then built-in defaults
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => {
            eprintln!("No {} found. Using defaults", CFG_FILE_NAME);
            return Ok(Config::default());
        }
        Some(x) => x,
    };

    eprintln!("Reading config from {}", config_path.display());
    let config = read_config(&config_path)
        .with_context(|| format!("Could not read configuration {}", config_path.display()))?;

    if let Some(ref log) = config.log {
        match log.location {
            Some(ref location) => eprintln!("Log enabled. Files will be written in {}", location.display()),
            None => eprintln!("Log enabled. No location set, using console"),
        }
    }

    Ok(config)
}

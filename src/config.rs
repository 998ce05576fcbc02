use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::collections::BlogRevision;
use crate::reading_time::{ReadingTime, WORDS_PER_MINUTE};

#[derive(Deserialize)]
pub struct Paths {
    pub content_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths { content_dir: PathBuf::from("src/content") }
    }
}

#[derive(Deserialize, Default)]
pub struct Collections {
    #[serde(default)]
    pub blog_revision: BlogRevision,
}

#[derive(Deserialize)]
pub struct Reading {
    pub words_per_minute: u32,
}

impl Default for Reading {
    fn default() -> Self {
        Reading { words_per_minute: WORDS_PER_MINUTE }
    }
}

impl From<&Reading> for ReadingTime {
    fn from(value: &Reading) -> Self {
        ReadingTime { words_per_minute: value.words_per_minute }
    }
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub collections: Collections,
    #[serde(default)]
    pub reading: Reading,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
        match (exe_dir, path.to_str()) {
            (Some(exe_dir), Some(str_path)) => {
                PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
            }
            _ => path,
        }
    } else {
        path
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.reading.words_per_minute == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "reading.words_per_minute must be greater than zero"));
    }

    cfg.paths.content_dir = parse_path(cfg.paths.content_dir);
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use folio::collections::collections;
use folio::config::Config;
use folio::content::loader::ContentLoader;
use folio::content::parsing_utils::skip_front_matter;
use folio::content::{CollectionReport, LoadError};
use folio::logger::configure_logger;
use folio::reading_time::{ReadingTime, ARTICLE_ELEMENT_ID};
use folio::registry::RegistryError;
use folio::text_utils::format_date_time;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validates every collection of the content directory
    Check,
    /// Prints the reading time of a content file
    ReadingTime {
        file: PathBuf,

        /// The file is a rendered page, the `article` element is measured
        #[arg(long)]
        html: bool,
    },
    /// Prints the registered collections and their fields
    Schema,
}

fn print_report(report: &CollectionReport) {
    for entry in &report.entries {
        let date = entry.record.get_date("publishDate")
            .map(|d| format_date_time(&d).0)
            .unwrap_or_default();
        let hidden = if entry.is_visible() { "" } else { " (hidden)" };
        println!("{}/{}  {}  {} min{}", report.collection, entry.slug, date, entry.reading_time, hidden);
    }

    for (path, err) in &report.failures {
        println!("INVALID {}", path.display());
        match err {
            LoadError::Registry(RegistryError::Invalid(validation)) => {
                for field_error in &validation.errors {
                    println!("    {}", field_error);
                }
            }
            other => println!("    {}", other),
        }
    }
}

fn check_cmd(config: &Config) -> Result<()> {
    let registry = collections(config.collections.blog_revision);
    let loader = ContentLoader::new(config.paths.content_dir.clone(), &registry, ReadingTime::from(&config.reading));

    info!("Checking content in {}", config.paths.content_dir.display());
    let reports = loader.load_all()
        .with_context(|| format!("Could not list {}", config.paths.content_dir.display()))?;

    let mut failures = 0;
    for report in &reports {
        print_report(report);
        failures += report.failures.len();
    }

    if failures > 0 {
        bail!("{} content item(s) failed validation", failures);
    }
    Ok(())
}

fn reading_time_cmd(config: &Config, file: PathBuf, html: bool) -> Result<()> {
    let reading = ReadingTime::from(&config.reading);
    let raw = fs::read_to_string(&file)
        .with_context(|| format!("Could not read {}", file.display()))?;

    let minutes = if html {
        reading.of_element(&raw, ARTICLE_ELEMENT_ID)?
    } else {
        reading.of_markdown(skip_front_matter(&raw)?)?
    };

    println!("{} min", minutes);
    Ok(())
}

fn schema_cmd(config: &Config) {
    let registry = collections(config.collections.blog_revision);
    for (name, schema) in registry.iter() {
        println!("{}", name);
        for field in schema.fields() {
            println!("    {}", field);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path.map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Check => check_cmd(&config),
        Command::ReadingTime { file, html } => reading_time_cmd(&config, file, html),
        Command::Schema => {
            schema_cmd(&config);
            Ok(())
        }
    }
}

//! tour - run one lesson and print its output
//!
//! # Configuration
//!
//! - `--config PATH` (or `TOUR_CONFIG`): JSON file with lesson timings; missing keys use defaults
//! - `RUST_LOG`: log filter when neither `--debug` nor `--verbose` is given
//!
//! Lesson output goes to stdout, logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tour_core::catalog::{self, DEFAULT_LESSON};
use tour_core::config::TourConfig;
use tour_core::impls::StdoutOutput;
use tour_core::runtime::{LessonContext, LessonInfo, Runtime};
use tour_core::TourError;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "tour")]
#[command(version, about, long_about = None)]
struct Args {
    /// Lesson to run
    #[arg(default_value = DEFAULT_LESSON)]
    lesson: String,

    /// List lessons and exit
    #[arg(long)]
    list: bool,

    /// With --list, print JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// JSON config file
    #[arg(long, env = "TOUR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(args: &Args) {
    // --debug > --verbose > RUST_LOG > "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `--list` output: names one per line, or the full infos as JSON.
fn render_list(infos: &[LessonInfo], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(infos)?);
    }
    let names: Vec<&str> = infos.iter().map(|i| i.name).collect();
    Ok(names.join("\n"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let registry = Arc::new(catalog::default_registry()?);

    if args.list {
        println!("{}", render_list(&registry.infos(), args.json)?);
        return Ok(());
    }

    let config = TourConfig::load(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    tracing::debug!(?config, "config loaded");

    let ctx = LessonContext::new(Arc::new(StdoutOutput::new()), config);
    let runtime = Runtime::new(registry);

    match runtime.run(&args.lesson, &ctx).await {
        Ok(()) => Ok(()),
        Err(e @ TourError::Deadlock { .. }) => {
            tracing::error!(error = %e, "lesson deadlocked");
            Err(anyhow::Error::new(e).context(format!("fatal: lesson {} never completes", args.lesson)))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_list_is_one_name_per_line() {
        let infos = catalog::default_registry().unwrap().infos();
        let text = render_list(&infos, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), infos.len());
        assert!(lines.contains(&DEFAULT_LESSON));
        assert!(lines.iter().all(|l| !l.contains(' ')));
    }

    #[test]
    fn json_list_carries_summaries() {
        let infos = catalog::default_registry().unwrap().infos();
        let text = render_list(&infos, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();

        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), infos.len());
        assert!(arr.iter().all(|e| e["summary"].is_string()));
    }
}

//! trueno-lattice: render a co-occurrence view to SVG.
//!
//! Run: `trueno-lattice view.json data.json -o comut.svg --sort geneA:0`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trueno_lattice::comut::{CoMutView, Direction, SortKey, ViewResources};
use trueno_lattice::output::SvgEncoder;
use trueno_lattice::render::BasicMarks;

/// Render a co-occurrence view to SVG
#[derive(Parser, Debug)]
#[command(name = "trueno-lattice")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render a linked co-occurrence lattice to SVG", long_about = None)]
struct Cli {
    /// View configuration (JSON, or YAML by extension)
    config: PathBuf,

    /// Data document (JSON)
    data: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "comut.svg")]
    output: PathBuf,

    /// Render target id
    #[arg(long, default_value = "comut")]
    target: String,

    /// Sort keys as `search:direction` (0 ascending, 1 descending), highest priority first
    #[arg(long = "sort", value_parser = parse_sort_key)]
    sort: Vec<SortKey>,

    /// Samples to leave out
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_sort_key(s: &str) -> std::result::Result<SortKey, String> {
    let (search, direction) = s.rsplit_once(':').unwrap_or((s, "1"));
    let direction: u8 = direction.parse().map_err(|_| format!("invalid direction in {s}"))?;
    Ok(SortKey::new(search, Direction::try_from(direction)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let resources = ViewResources::load(&cli.config, &cli.data).context("loading view")?;
    let mut view = CoMutView::new(resources, cli.target.as_str()).context("building view")?;

    if !cli.sort.is_empty() {
        view.sort_by(cli.sort.clone())?;
    }
    for sample in &cli.exclude {
        if !view.exclude(sample)? {
            tracing::warn!(sample = %sample, "not a visible sample, ignored");
        }
    }

    let scene = view.render(&BasicMarks::default())?;
    SvgEncoder::new(&scene)
        .write_to_file(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    eprintln!("wrote {} ({} samples)", cli.output.display(), view.order().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(parse_sort_key("geneA:0").unwrap(), SortKey::new("geneA", Direction::Asc));
        assert_eq!(parse_sort_key("rate_").unwrap(), SortKey::new("rate_", Direction::Desc));
        assert!(parse_sort_key("geneA:3").is_err());
        assert!(parse_sort_key("geneA:x").is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from(["trueno-lattice", "v.json", "d.json", "--sort", "geneA:0", "--exclude", "S1", "-vv"]);
        assert_eq!(cli.sort.len(), 1);
        assert_eq!(cli.exclude, vec!["S1"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, PathBuf::from("comut.svg"));
    }
}

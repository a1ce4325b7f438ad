use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tascan_core::config::Config;
use tascan_scanner::host::StandaloneHost;
use tascan_scanner::scan::{ScanContext, scan};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Recognize `YYYYMMDD_VIDEOID_TITLE` archive files and print them as episodes.
#[derive(Debug, Parser)]
#[command(name = "tascan", version)]
struct Cli {
    /// Folder to scan. Its first segment below the library root names the show.
    dir: PathBuf,

    /// Library root. Defaults to the parent of DIR.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (JSON with `ta_url` / `ta_token`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the metadata service even if configured.
    #[arg(long)]
    offline: bool,

    /// Include files in subfolders.
    #[arg(short, long)]
    recursive: bool,

    /// Print records as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries results only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.clone());
    let config = if cli.offline {
        Config::default()
    } else {
        Config::load(&config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
            .with_env_overrides()
    };

    let dir = std::fs::canonicalize(&cli.dir)
        .with_context(|| format!("cannot resolve {}", cli.dir.display()))?;
    let root = match &cli.root {
        Some(root) => std::fs::canonicalize(root)
            .with_context(|| format!("cannot resolve {}", root.display()))?,
        None => dir.parent().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
    };
    let rel = library_relative(&dir, &root)?;

    let files = tascan_scanner::walk::list_files(&dir, cli.recursive)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    info!(dir = %dir.display(), files = files.len(), "listing complete");

    let ctx = ScanContext::connect(&config, Box::new(StandaloneHost)).await;
    let mut media = Vec::new();
    scan(&ctx, &rel, &files, &mut media).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&media)?);
    } else {
        for record in &media {
            println!("{record}  ({})", record.source);
            for part in &record.parts {
                println!("    {}", part.display());
            }
        }
    }
    Ok(())
}

/// `dir` relative to `root`; the scanner takes the show name from its first
/// segment.
fn library_relative(dir: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    let rel = dir
        .strip_prefix(root)
        .with_context(|| format!("{} is not inside {}", dir.display(), root.display()))?;
    Ok(rel.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["tascan", "--json", "-c", "ta.json", "/lib/Chan"]).unwrap();
        assert!(cli.json);
        assert!(!cli.offline);
        assert_eq!(cli.config, Some(PathBuf::from("ta.json")));
        assert_eq!(cli.dir, PathBuf::from("/lib/Chan"));
    }

    #[test]
    fn dir_is_required() {
        assert!(Cli::try_parse_from(["tascan"]).is_err());
    }

    #[test]
    fn relative_to_root() {
        let rel = library_relative(Path::new("/lib/Chan/2021"), Path::new("/lib")).unwrap();
        assert_eq!(rel, PathBuf::from("Chan/2021"));
        assert!(library_relative(Path::new("/other/Chan"), Path::new("/lib")).is_err());
    }
}

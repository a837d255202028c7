use anyhow::Result;
use locpatch::{config::Config, corrections, patch};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Patch pipeline: load the correction table, then apply it onto the
/// source files under the configured root folder.
fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) load configuration ───────────────────────────────────────
    let config = match env::args().nth(1) {
        Some(path) => Config::from_path(&path)?,
        None => Config::default(),
    };
    info!(
        corrections = %config.correction_file.display(),
        root = %config.source_folder.display(),
        "startup"
    );

    // ─── 3) build the correction table (fatal on failure) ────────────
    let table = corrections::load(&config.correction_file, &config.columns)?;

    // ─── 4) apply corrections file by file ───────────────────────────
    let report = patch::apply_all(&config.source_folder, &table, &config.source_columns);
    println!("{}", report);

    Ok(())
}

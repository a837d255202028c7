use anyhow::{bail, Result};
use locpatch::{config::Config, consolidate};
use std::{env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Combine every matching CSV in a folder into one file for translators.
///
/// Usage: consolidate [input-dir] [output-file]
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "arquivos_csv".to_string()));
    let output = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "resultado_unificado.csv".to_string()),
    );
    if !input.is_dir() {
        bail!("input folder {} does not exist", input.display());
    }

    let summary = consolidate::consolidate_csvs(&input, &output, &Config::default())?;
    println!(
        "done: {} row(s) from {} file(s) saved to {} ({} skipped)",
        summary.rows_written,
        summary.files_used,
        output.display(),
        summary.files_skipped
    );
    Ok(())
}

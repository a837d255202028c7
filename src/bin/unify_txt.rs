use anyhow::{bail, Result};
use locpatch::{consolidate, scan};
use std::{env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Merge raw text exports into one tab-separated file next to the first
/// input. Arguments are either individual `.txt` files or one folder to
/// scan for them.
///
/// Usage: unify_txt <file.txt>... | unify_txt <folder>
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if args.is_empty() {
        bail!("no file selected");
    }

    let paths = if args.len() == 1 && args[0].is_dir() {
        scan::files_with_extension(&args[0], "txt")?
    } else {
        args
    };

    match consolidate::unify_txt_lines(&paths)? {
        Some((out, lines)) => {
            println!("saved as: {}", out.display());
            println!("total of lines copied: {}", lines);
        }
        None => println!("no text found"),
    }
    Ok(())
}

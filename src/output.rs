//! Output placement and report rendering
//!
//! The engine returns the prime-implicant set; this module owns turning it
//! into text and deciding where that text lands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;
use crate::input::check_extension;
use crate::qm::MinimizeResult;

/// Rename attempts before giving up on finding a free output name.
const MAX_RENAME_ATTEMPTS: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
}

/// Decide the final output path. Returns `Ok(None)` when the user answered
/// `q` at the overwrite prompt; the caller exits cleanly.
///
/// When the target exists and overwrite was not requested, the user is asked
/// `(y/n/q)`: `y` overwrites, `n` searches `_1`, `_2`, ... for a free name,
/// `q` aborts.
pub fn resolve_output_path(path: &Path, overwrite: bool) -> Result<Option<PathBuf>, Error> {
    check_extension(path)?;

    if overwrite || !path.exists() {
        return Ok(Some(path.to_path_buf()));
    }

    match prompt_overwrite(path)? {
        OverwriteChoice::Yes => Ok(Some(path.to_path_buf())),
        OverwriteChoice::Quit => Ok(None),
        OverwriteChoice::No => {
            let renamed = next_free_name(path)?;
            println!("Output file: {}", renamed.display());
            Ok(Some(renamed))
        }
    }
}

enum OverwriteChoice {
    Yes,
    No,
    Quit,
}

fn prompt_overwrite(path: &Path) -> Result<OverwriteChoice, Error> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut question = format!(
        "WARNING: A file with the name `{}` already exists at that location. Overwrite? (y/n/q): ",
        name
    );

    loop {
        print!("{}", question);
        io::stdout().flush().map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => return Ok(OverwriteChoice::Yes),
            Some('n') => return Ok(OverwriteChoice::No),
            Some('q') => return Ok(OverwriteChoice::Quit),
            _ => {
                question = "Invalid input. Please enter y or n (or q to stop): ".to_string();
            }
        }
    }
}

/// Append `_1`, `_2`, ... to the file stem until a free name is found.
fn next_free_name(path: &Path) -> Result<PathBuf, Error> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = path.parent().unwrap_or_else(|| Path::new(""));

    for attempt in 1..=MAX_RENAME_ATTEMPTS {
        let candidate = directory.join(format!("{}_{}.{}", stem, attempt, extension));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::RenameCeiling {
        attempts: MAX_RENAME_ATTEMPTS,
    })
}

/// Render the result in the requested format.
pub fn render_report(result: &MinimizeResult, format: ReportFormat) -> Result<String, Error> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(&result.to_report())
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| Error::InternalInvariant {
                detail: format!("report serialization failed: {}", e),
            }),
        ReportFormat::Table => Ok(render_table(result)),
    }
}

fn render_table(result: &MinimizeResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Prime implicants of f({}) over {} minterm(s), {} don't care(s)\n",
        result.variable_names.join(","),
        result.minterms.len(),
        result.dont_cares.len()
    ));

    let patterns = result.pattern_strings();
    let terms = result.product_terms();
    let width = patterns.iter().map(String::len).max().unwrap_or(0);
    for (pattern, term) in patterns.iter().zip(&terms) {
        out.push_str(&format!("  {:width$}  {}\n", pattern, term));
    }

    out.push_str(&format!("f = {}\n", result.expression()));
    out
}

/// Write the rendered report to `path`.
pub fn write_report(path: &Path, rendered: &str) -> Result<(), Error> {
    fs::write(path, rendered).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}

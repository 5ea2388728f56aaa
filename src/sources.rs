//! Input expansion: JAR/ZIP archives, directories, and single .java files
//!
//! Everything is read into memory as `SourceUnit`s before parsing. Archive
//! entries are never extracted to disk — tree-sitter parses from strings, so
//! no temporary storage is involved. Unreadable individual entries or files
//! are logged and skipped; only a missing or unusable top-level input fails
//! the run.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, StubGenError};

/// Guard against pathological directory nesting
const MAX_SCAN_DEPTH: usize = 32;

/// One Java source file's text plus where it came from
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File path, or `archive!entry` for archive members
    pub origin: String,
    pub text: String,
}

/// Expand CLI inputs into source units.
///
/// Accepts `.jar`/`.zip` archives, directories (walked recursively), and
/// lone `.java` files.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<SourceUnit>> {
    let mut units = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(StubGenError::FileNotFound {
                path: input.display().to_string(),
            });
        }
        if input.is_dir() {
            collect_dir(input, 0, &mut units)?;
            continue;
        }
        match extension_of(input) {
            Some("jar") | Some("zip") => collect_archive(input, &mut units)?,
            Some("java") => match fs::read_to_string(input) {
                Ok(text) => units.push(SourceUnit {
                    origin: input.display().to_string(),
                    text,
                }),
                Err(e) => {
                    tracing::warn!("skipping unreadable file {}: {}", input.display(), e);
                }
            },
            _ => {
                return Err(StubGenError::InvalidInput {
                    message: format!(
                        "{} is not a jar, zip, directory, or .java file",
                        input.display()
                    ),
                })
            }
        }
    }
    Ok(units)
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Read every .java entry of a source archive into memory
fn collect_archive(path: &Path, units: &mut Vec<SourceUnit>) -> Result<()> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| StubGenError::Archive {
        message: format!("failed to read archive '{}': {}", path.display(), e),
    })?;

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping entry {} of {}: {}", i, path.display(), e);
                continue;
            }
        };
        if entry.is_dir() || !entry.name().ends_with(".java") {
            continue;
        }
        let origin = format!("{}!{}", path.display(), entry.name());
        let mut text = String::new();
        match entry.read_to_string(&mut text) {
            Ok(_) => units.push(SourceUnit { origin, text }),
            Err(e) => tracing::warn!("skipping unreadable entry {}: {}", origin, e),
        }
    }
    Ok(())
}

/// Recursively collect .java files, sorted per directory for deterministic
/// output order; hidden entries are skipped
fn collect_dir(dir: &Path, depth: usize, units: &mut Vec<SourceUnit>) -> Result<()> {
    if depth > MAX_SCAN_DEPTH {
        tracing::warn!("max depth reached at {}, not descending", dir.display());
        return Ok(());
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if name.starts_with('.') {
            continue;
        }
        if path.is_dir() {
            collect_dir(&path, depth + 1, units)?;
        } else if extension_of(&path) == Some("java") {
            match fs::read_to_string(&path) {
                Ok(text) => units.push(SourceUnit {
                    origin: path.display().to_string(),
                    text,
                }),
                Err(e) => {
                    tracing::warn!("skipping unreadable file {}: {}", path.display(), e);
                }
            }
        }
    }
    Ok(())
}

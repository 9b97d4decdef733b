use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("could not read directory '{path}': {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not delete '{path}': {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What one cleanup pass did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub renamed: usize,
    pub deleted: usize,
    pub kept: usize,
}

/// Prune downloaded pronunciation files to one variant per word.
///
/// For every `*.mp3` directly in `dir`: a file stem ending in the digit `1`
/// is renamed with that `1` stripped (`사과1.mp3` → `사과.mp3`); a stem
/// ending in any other ASCII digit is deleted; anything else is left alone.
/// Destructive and irreversible — run only after all downloads have
/// finished, never while a fetch is in flight.
pub fn prune_variants(dir: &Path) -> Result<CleanupStats, CleanupError> {
    let read_dir = fs::read_dir(dir).map_err(|source| CleanupError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;

    // Snapshot the listing first so renames can't be re-visited mid-walk.
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| CleanupError::ReadDir {
            path: dir.display().to_string(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    let mut stats = CleanupStats::default();
    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(last) = stem.chars().last() else {
            continue;
        };

        if last == '1' {
            // '1' is a single byte, so the slice boundary is safe.
            let target = dir.join(format!("{}.mp3", &stem[..stem.len() - 1]));
            fs::rename(&path, &target).map_err(|source| CleanupError::Rename {
                from: path.display().to_string(),
                to: target.display().to_string(),
                source,
            })?;
            tracing::info!(from = %path.display(), to = %target.display(), "Kept first variant");
            stats.renamed += 1;
        } else if last.is_ascii_digit() {
            fs::remove_file(&path).map_err(|source| CleanupError::Delete {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Deleted extra variant");
            stats.deleted += 1;
        } else {
            stats.kept += 1;
        }
    }

    Ok(stats)
}

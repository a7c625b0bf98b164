//! Candidate ranking.
//!
//! The largest PNG is assumed to be the least compressible frame and so the
//! one most likely to show something worth looking at.

use crate::error::{CoreError, CoreResult};

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the images produced by candidate extraction.
pub const CANDIDATE_EXTENSION: &str = "png";

/// One extracted frame and its encoded size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub size: u64,
    pub path: PathBuf,
}

/// Recursively lists every `.png` regular file under `workspace`.
///
/// The result is in extraction order: numbered names (`1.png`, `2.png`,
/// `10.png`) sort numerically, anything else sorts after them by path.
pub fn collect_candidates(workspace: &Path) -> CoreResult<Vec<Candidate>> {
    let mut candidates = Vec::new();
    scan_dir(workspace, &mut candidates)?;
    candidates.sort_by(|a, b| extraction_order(&a.path, &b.path));
    Ok(candidates)
}

fn scan_dir(dir: &Path, out: &mut Vec<Candidate>) -> CoreResult<()> {
    let scan_err = |source| CoreError::CandidateScan {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let file_type = entry.file_type().map_err(scan_err)?;
        let path = entry.path();

        if file_type.is_dir() {
            scan_dir(&path, out)?;
            continue;
        }
        if !file_type.is_file() || !has_candidate_extension(&path) {
            continue;
        }

        let size = entry.metadata().map_err(scan_err)?.len();
        out.push(Candidate { size, path });
    }
    Ok(())
}

fn has_candidate_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CANDIDATE_EXTENSION)
}

fn frame_number(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

fn extraction_order(a: &Path, b: &Path) -> Ordering {
    match (frame_number(a), frame_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Returns the first candidate with the strictly greatest size.
pub fn largest(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best: Option<&Candidate>, c| match best {
        Some(b) if c.size <= b.size => Some(b),
        _ => Some(c),
    })
}

/// Picks the largest candidate in `workspace`.
///
/// Fails with `CoreError::NoCandidateSelected` if extraction left nothing
/// usable behind.
pub fn select_largest(workspace: &Path) -> CoreResult<PathBuf> {
    let candidates = collect_candidates(workspace)?;
    log::debug!(
        "Found {} candidate(s) in {}",
        candidates.len(),
        workspace.display()
    );

    match largest(&candidates) {
        Some(winner) => {
            log::debug!("Selected {} ({} bytes)", winner.path.display(), winner.size);
            Ok(winner.path.clone())
        }
        None => Err(CoreError::NoCandidateSelected(workspace.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(size: u64, name: &str) -> Candidate {
        Candidate {
            size,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_largest_picks_strict_maximum() {
        let set = [candidate(10, "1.png"), candidate(50, "2.png"), candidate(30, "3.png")];
        assert_eq!(largest(&set).unwrap().path, PathBuf::from("2.png"));
    }

    #[test]
    fn test_largest_tie_goes_to_first_seen() {
        let set = [candidate(50, "1.png"), candidate(50, "2.png"), candidate(30, "3.png")];
        assert_eq!(largest(&set).unwrap().path, PathBuf::from("1.png"));
    }

    #[test]
    fn test_largest_of_nothing() {
        assert!(largest(&[]).is_none());
    }

    #[test]
    fn test_largest_accepts_zero_byte_candidates() {
        let set = [candidate(0, "1.png")];
        assert_eq!(largest(&set).unwrap().path, PathBuf::from("1.png"));
    }

    #[test]
    fn test_extraction_order_is_numeric() {
        let mut paths = vec![
            PathBuf::from("/w/10.png"),
            PathBuf::from("/w/extra.png"),
            PathBuf::from("/w/2.png"),
            PathBuf::from("/w/1.png"),
        ];
        paths.sort_by(|a, b| extraction_order(a, b));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/w/1.png"),
                PathBuf::from("/w/2.png"),
                PathBuf::from("/w/10.png"),
                PathBuf::from("/w/extra.png"),
            ]
        );
    }

    #[test]
    fn test_extension_match_is_exact() {
        assert!(has_candidate_extension(Path::new("1.png")));
        assert!(!has_candidate_extension(Path::new("1.PNG")));
        assert!(!has_candidate_extension(Path::new("1.png.tmp")));
        assert!(!has_candidate_extension(Path::new("png")));
    }
}

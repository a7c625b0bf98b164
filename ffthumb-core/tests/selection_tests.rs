// ffthumb-core/tests/selection_tests.rs

use ffthumb_core::error::CoreError;
use ffthumb_core::processing::{collect_candidates, select_largest};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_sized(dir: &Path, name: &str, size: usize) -> std::io::Result<()> {
    fs::write(dir.join(name), vec![0x89u8; size])
}

#[test]
fn test_select_largest_of_three() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_sized(dir.path(), "1.png", 10)?;
    write_sized(dir.path(), "2.png", 50)?;
    write_sized(dir.path(), "3.png", 30)?;

    let selected = select_largest(dir.path())?;
    assert_eq!(selected.file_name().unwrap(), "2.png");
    Ok(())
}

#[test]
fn test_select_largest_tie_goes_to_first_extracted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    // Created out of order so directory order cannot decide the tie.
    write_sized(dir.path(), "3.png", 30)?;
    write_sized(dir.path(), "2.png", 50)?;
    write_sized(dir.path(), "1.png", 50)?;

    let selected = select_largest(dir.path())?;
    assert_eq!(selected.file_name().unwrap(), "1.png");
    Ok(())
}

#[test]
fn test_numeric_order_beyond_nine() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_sized(dir.path(), "10.png", 70)?;
    write_sized(dir.path(), "9.png", 70)?;

    let selected = select_largest(dir.path())?;
    assert_eq!(selected.file_name().unwrap(), "9.png");
    Ok(())
}

#[test]
fn test_empty_workspace_is_no_candidate_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    match select_largest(dir.path()) {
        Err(CoreError::NoCandidateSelected(path)) => assert_eq!(path, dir.path()),
        other => panic!("expected NoCandidateSelected, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_non_png_files_and_directories_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_sized(dir.path(), "1.png", 20)?;
    write_sized(dir.path(), "huge.jpg", 5000)?;
    write_sized(dir.path(), "ffmpeg.log", 9000)?;
    fs::create_dir(dir.path().join("big.png"))?;

    let candidates = collect_candidates(dir.path())?;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].size, 20);
    assert_eq!(select_largest(dir.path())?.file_name().unwrap(), "1.png");
    Ok(())
}

#[test]
fn test_only_non_png_files_is_no_candidate_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_sized(dir.path(), "1.jpg", 20)?;
    assert!(matches!(
        select_largest(dir.path()),
        Err(CoreError::NoCandidateSelected(_))
    ));
    Ok(())
}

#[test]
fn test_nested_candidates_are_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let nested = dir.path().join("sub");
    fs::create_dir(&nested)?;
    write_sized(dir.path(), "1.png", 10)?;
    write_sized(&nested, "2.png", 99)?;

    let selected = select_largest(dir.path())?;
    assert_eq!(selected, nested.join("2.png"));
    Ok(())
}

#[test]
fn test_missing_workspace_is_scan_error() {
    let result = collect_candidates(Path::new("surely_this_workspace_does_not_exist_42"));
    assert!(matches!(result, Err(CoreError::CandidateScan { .. })));
}

use crate::constants::CSV_EXTENSION;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect every `.csv` file directly under `dir`.
///
/// A missing directory is treated like an empty one: the merge run reports
/// "no files found" and ends cleanly. Directory order is filesystem
/// dependent, so the result is sorted to make runs reproducible.
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
            .unwrap_or(false);
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_only_csv_files_discovered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join("a.CSV"), "x\n2\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = find_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(find_csv_files(&gone).unwrap().is_empty());
    }
}

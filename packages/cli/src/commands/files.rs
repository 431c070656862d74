use anyhow::Result;
use nlogo_common::Location;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parse a path or `file://` URI given on the command line, relative to `cwd`
pub fn resolve_location(cwd: &str, descriptor: &str) -> Result<Location> {
    let location = Location::parse(descriptor)?;
    Ok(Location::new(Path::new(cwd).join(location.path())))
}

/// Model files at `input`: the file itself, or every file under a directory
/// carrying `extension`, in path order.
pub fn find_model_files(input: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map(|e| e == extension).unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_models_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("biology")).unwrap();
        fs::write(dir.path().join("fire.nlogo"), "").unwrap();
        fs::write(dir.path().join("biology/wolf sheep.nlogo"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = find_model_files(dir.path(), "nlogo").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["wolf sheep.nlogo", "fire.nlogo"]);
    }

    #[test]
    fn test_single_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("fire.txt");
        fs::write(&file, "").unwrap();

        assert_eq!(find_model_files(&file, "nlogo").unwrap(), vec![file]);
    }

    #[test]
    fn test_resolve_location() {
        let location = resolve_location("/work", "models/fire.nlogo").unwrap();
        assert_eq!(location.path(), Path::new("/work/models/fire.nlogo"));

        let location = resolve_location("/work", "file:///tmp/fire.nlogo").unwrap();
        assert_eq!(location.path(), Path::new("/tmp/fire.nlogo"));

        assert!(resolve_location("/work", "https://example.org/fire.nlogo").is_err());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_model_files(&dir.path().join("missing"), "nlogo").is_err());
    }
}

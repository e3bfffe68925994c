use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

pub fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Every `.json` file below `folder`, sorted by name at each level.
///
/// A missing folder yields nothing. Unreadable entries are skipped.
pub fn json_files(folder: &Path) -> Vec<PathBuf> {
    if !folder.exists() {
        warn!("Folder not found: {}", folder.display());
        return Vec::new();
    }

    let files = WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {err}", folder.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_json(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect::<Vec<_>>();

    debug!("Found {} json files in {}", files.len(), folder.display());

    files
}

/// File name without its extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_json_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("b/nested")).unwrap();
        std::fs::write(root.join("b/nested/Z.JSON"), "{}").unwrap();
        std::fs::write(root.join("a.json"), "{}").unwrap();
        std::fs::write(root.join("a.png"), "").unwrap();
        std::fs::create_dir(root.join("dir.json")).unwrap();

        let files = json_files(root);
        let names = files
            .iter()
            .map(|path| path.strip_prefix(root).unwrap().to_path_buf())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            [PathBuf::from("a.json"), PathBuf::from("b/nested/Z.JSON")]
        );
    }

    #[test]
    fn missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert!(json_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn stem_drops_extension() {
        assert_eq!(file_stem(Path::new("Items/Rock_Stone.json")), "Rock_Stone");
    }
}

//! Locating save files
//!
//! The game keeps its saves under
//! `~/AppData/LocalLow/MyronSoftware/UnderworldOverseer/Saves`, one JSON file
//! per slot. These helpers back the interactive picker in the binary.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SAVES_SUBDIR: [&str; 5] = ["AppData", "LocalLow", "MyronSoftware", "UnderworldOverseer", "Saves"];

/// The game's saves folder under the user's home directory.
pub fn default_saves_dir() -> Option<PathBuf> {
    let base = directories::BaseDirs::new()?;
    Some(saves_dir_under(base.home_dir()))
}

fn saves_dir_under(home: &Path) -> PathBuf {
    SAVES_SUBDIR.iter().fold(home.to_path_buf(), |p, part| p.join(part))
}

/// `*.json` files directly inside `dir`, sorted by path. A missing or
/// unreadable directory gives an empty list.
pub fn list_saves<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut saves: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_json_extension(p))
        .collect();
    saves.sort();
    saves
}

/// True for an existing file with a `.json` extension (any case).
pub fn is_json_file(path: &Path) -> bool {
    path.is_file() && has_json_extension(path)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// `<save dir>/<save stem>.html`
pub fn default_output_path(save: &Path) -> PathBuf {
    let stem = save
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    save.with_file_name(format!("{}.html", stem))
}

/// Parse a 1-based menu choice in `1..=options`.
pub fn parse_choice(input: &str, options: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=options).contains(&choice).then_some(choice)
}

/// Strip whitespace and surrounding quotes from a pasted path.
pub fn clean_path_input(input: &str) -> PathBuf {
    PathBuf::from(input.trim().trim_matches(|c: char| c == '"' || c == '\''))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_saves_dir_layout() {
        let dir = saves_dir_under(Path::new("/home/player"));
        assert_eq!(
            dir,
            PathBuf::from("/home/player/AppData/LocalLow/MyronSoftware/UnderworldOverseer/Saves")
        );
    }

    #[test]
    fn test_list_saves_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("slot2.json"), "{}").unwrap();
        fs::write(dir.path().join("slot1.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("backup.json")).unwrap();
        fs::create_dir(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old").join("slot0.json"), "{}").unwrap();

        let names: Vec<String> = list_saves(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["slot1.JSON", "slot2.json"]);
    }

    #[test]
    fn test_list_saves_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_saves(dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_is_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("slot1.json");
        fs::write(&save, "{}").unwrap();

        assert!(is_json_file(&save));
        assert!(!is_json_file(&dir.path().join("slot9.json")));
        assert!(!is_json_file(dir.path()));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/saves/slot1.json")),
            PathBuf::from("/saves/slot1.html")
        );
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("2\n", 3), Some(2));
        assert_eq!(parse_choice(" 3 ", 3), Some(3));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
    }

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  \"C:\\Saves\\slot1.json\"\n"), PathBuf::from("C:\\Saves\\slot1.json"));
        assert_eq!(clean_path_input("'/tmp/a b.json'"), PathBuf::from("/tmp/a b.json"));
    }
}

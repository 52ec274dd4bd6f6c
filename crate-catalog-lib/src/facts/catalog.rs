//! Reading the curated crate list and writing the generated one.

use crate::Result;
use crate::facts::CrateEntry;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

const LOG_TARGET: &str = "   catalog";

/// Load the curated list: a YAML sequence of mappings.
pub fn load_entries(path: &Utf8Path) -> Result<Vec<CrateEntry>> {
    let file = File::open(path).into_app_err_with(|| format!("opening crate list '{path}'"))?;
    let entries: Vec<CrateEntry> =
        serde_yaml::from_reader(BufReader::new(file)).into_app_err_with(|| format!("parsing crate list '{path}'"))?;

    log::debug!(target: LOG_TARGET, "Loaded {} entries from {path}", entries.len());
    Ok(entries)
}

/// Write the generated list as YAML, replacing any previous file.
pub fn save_entries(path: &Utf8Path, entries: &[CrateEntry]) -> Result<()> {
    log::info!(target: LOG_TARGET, "Saving crate list...");

    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{parent}'"))?;
    }

    let file = File::create(path).into_app_err_with(|| format!("creating '{path}'"))?;
    let mut writer = BufWriter::new(file);

    serde_yaml::to_writer(&mut writer, entries).into_app_err_with(|| format!("writing crate list '{path}'"))?;
    writer.flush().into_app_err_with(|| format!("flushing '{path}'"))?;

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_entries_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "crates.yaml");
        fs::write(
            &path,
            "- name: serde\n  tags: [serialization]\n- repository: https://github.com/foo/bar\n  featured: true\n",
        )
        .unwrap();

        let entries = load_entries(&path).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), Some("serde"));
        assert!(entries[0].contains_key("tags"));
        assert_eq!(entries[1].repository(), Some("https://github.com/foo/bar"));
        assert_eq!(entries[1].get("featured").and_then(serde_yaml::Value::as_bool), Some(true));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_entries_rejects_non_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "crates.yaml");
        fs::write(&path, "name: serde\n").unwrap();

        let err = load_entries(&path).unwrap_err();
        assert!(err.to_string().contains("parsing crate list"));
    }

    #[test]
    fn test_load_entries_missing_file() {
        let err = load_entries(Utf8Path::new("/nonexistent/crates.yaml")).unwrap_err();
        assert!(err.to_string().contains("opening crate list"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "out/crates_generated.yaml");

        let mut first = CrateEntry::new();
        first.insert("name", "serde");
        first.insert("downloads", 100_u64);
        let mut second = CrateEntry::new();
        second.insert("repository", "https://github.com/foo/bar");
        second.insert("github", "foo/bar");

        save_entries(&path, &[first.clone(), second.clone()]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("name: serde"));
        assert!(text.contains("github: foo/bar"));
        assert_eq!(load_entries(&path).unwrap(), vec![first, second]);
    }
}

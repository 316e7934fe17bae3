use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::Podcast;

// Numbers output files in the order they are written during this run
static GLOBAL_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `<counter>_<source_stem>.json` into `out_dir`, creating it if needed.
pub fn write_podcast(out_dir: &Path, source_stem: &str, podcast: &Podcast) -> io::Result<PathBuf> {
    fs::create_dir_all(out_dir)?;

    // 1-based
    let counter_val = GLOBAL_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    let file_name = format!("{}_{}.json", counter_val, source_stem);
    let file_path = out_dir.join(file_name);

    let serialized = serde_json::to_string_pretty(podcast)?;
    fs::write(&file_path, serialized)?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_json_named_after_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out_dir = dir.path().join("nested");
        let podcast = Podcast {
            title: Some("Written".to_string()),
            ..Default::default()
        };

        let path = write_podcast(&out_dir, "show", &podcast).expect("write");
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.ends_with("_show.json"), "unexpected file name {name}");

        let contents = fs::read_to_string(&path).expect("read back");
        let v: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
        assert_eq!(v["title"], "Written");
        assert_eq!(v["owner"], serde_json::json!({}));
        assert!(v["updated"].is_null());
    }
}

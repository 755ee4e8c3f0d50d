use mdpane::store::{CONTENT_KEY, FileStore, PANEL_DISMISSED_KEY, StoragePort};

#[test]
fn test_content_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = FileStore::new(&path);
        store.save(CONTENT_KEY, "# Session\n\ndraft in progress");
    }

    // A fresh store over the same file sees the previous session.
    let store = FileStore::new(&path);
    assert_eq!(
        store.load(CONTENT_KEY).as_deref(),
        Some("# Session\n\ndraft in progress")
    );
}

#[test]
fn test_keys_are_stored_independently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = FileStore::new(&path);
    store.save(CONTENT_KEY, "content");
    store.save(PANEL_DISMISSED_KEY, "true");

    assert_eq!(store.load(CONTENT_KEY).as_deref(), Some("content"));
    assert_eq!(store.load(PANEL_DISMISSED_KEY).as_deref(), Some("true"));

    // Updating one key leaves the other alone.
    store.save(CONTENT_KEY, "updated");
    assert_eq!(store.load(CONTENT_KEY).as_deref(), Some("updated"));
    assert_eq!(store.load(PANEL_DISMISSED_KEY).as_deref(), Some("true"));
}

#[test]
fn test_missing_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load(CONTENT_KEY), None);
}

#[test]
fn test_corrupt_file_is_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.load(CONTENT_KEY), None);

    // Saving over a corrupt file recovers it.
    store.save(CONTENT_KEY, "fresh start");
    assert_eq!(store.load(CONTENT_KEY).as_deref(), Some("fresh start"));
}

#[test]
fn test_multiline_unicode_content_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));
    let content = "# Títle\n\nnaïve café \u{1f980}\n\n```rust\nfn main() {}\n```\n";
    store.save(CONTENT_KEY, content);
    assert_eq!(store.load(CONTENT_KEY).as_deref(), Some(content));
}

mod common;

use tempfile::tempdir;

use framecrop_core::config::ToolConfig;
use framecrop_core::error::FrameCropError;
use framecrop_core::session::{
    FileSessionStore, MemorySessionStore, SessionSnapshot, SessionStore,
};
use framecrop_core::source::{ImageMime, SourceFile};
use framecrop_core::tool::{CropTool, MountReason};

use common::{gradient_image, png_file};

// ---------------------------------------------------------------------------
// Snapshot encoding
// ---------------------------------------------------------------------------

#[test]
fn test_snapshot_round_trip() {
    let file = png_file("cat.png", &gradient_image(10, 10));
    let snapshot = SessionSnapshot::from_source(&file);

    assert!(snapshot.data_url.starts_with("data:image/png;base64,"));
    assert_eq!(snapshot.file_name, "cat.png");
    assert_eq!(snapshot.mime_type, "image/png");
    assert_eq!(snapshot.to_source_file().unwrap(), file);
}

#[test]
fn test_snapshot_rejects_malformed_data_url() {
    let base = SessionSnapshot {
        data_url: "data:image/png;base64,AAAA".to_string(),
        file_name: "a.png".to_string(),
        mime_type: "image/png".to_string(),
    };
    assert!(base.to_source_file().is_ok());

    for data_url in ["image/png;base64,AAAA", "data:image/png;base64", "data:image/png,AAAA"] {
        let snapshot = SessionSnapshot {
            data_url: data_url.to_string(),
            ..base.clone()
        };
        assert!(matches!(
            snapshot.to_source_file(),
            Err(FrameCropError::InvalidSnapshot(_))
        ));
    }

    let bad_payload = SessionSnapshot {
        data_url: "data:image/png;base64,!!!".to_string(),
        ..base.clone()
    };
    assert!(bad_payload.to_source_file().is_err());

    let bad_type = SessionSnapshot {
        mime_type: "text/html".to_string(),
        ..base
    };
    assert!(bad_type.to_source_file().is_err());
}

#[test]
fn test_snapshot_falls_back_to_data_url_type() {
    let snapshot = SessionSnapshot {
        data_url: "data:image/webp;base64,AAAA".to_string(),
        file_name: "a.webp".to_string(),
        mime_type: String::new(),
    };
    assert_eq!(snapshot.to_source_file().unwrap().mime, ImageMime::Webp);
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

#[test]
fn test_file_store_save_load_clear() {
    let dir = tempdir().unwrap();
    let mut store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
    assert_eq!(store.load().unwrap(), None);

    let snapshot = SessionSnapshot::from_source(&png_file("a.png", &gradient_image(4, 4)));
    store.save(&snapshot).unwrap();
    assert_eq!(store.load().unwrap(), Some(snapshot));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    // clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_file_store_rejects_garbage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileSessionStore::new(&path);
    assert!(matches!(store.load(), Err(FrameCropError::Serialization(_))));
}

// ---------------------------------------------------------------------------
// Mount semantics
// ---------------------------------------------------------------------------

fn store_with_image() -> MemorySessionStore {
    let mut store = MemorySessionStore::new();
    let snapshot = SessionSnapshot::from_source(&png_file("kept.png", &gradient_image(64, 48)));
    store.save(&snapshot).unwrap();
    store
}

#[test]
fn test_language_switch_restores_image() {
    let tool = CropTool::mount(
        &ToolConfig::circle(),
        store_with_image(),
        MountReason::LanguageSwitch,
    )
    .unwrap();

    let image = tool.image().expect("restored image");
    assert_eq!(image.dimensions(), (64, 48));
    assert_eq!(image.source().name, "kept.png");
    assert_eq!(tool.view().unwrap().scale, 1.0);
    assert_eq!(tool.render_count(), 1);
    assert!(tool.store().load().unwrap().is_some());
}

#[test]
fn test_fresh_load_and_refresh_clear_store() {
    for reason in [MountReason::FreshLoad, MountReason::HardRefresh] {
        let tool = CropTool::mount(&ToolConfig::circle(), store_with_image(), reason).unwrap();
        assert!(tool.image().is_none());
        assert_eq!(tool.store().load().unwrap(), None);
    }
}

#[test]
fn test_language_switch_with_empty_store() {
    let tool = CropTool::mount(
        &ToolConfig::rounded(),
        MemorySessionStore::new(),
        MountReason::LanguageSwitch,
    )
    .unwrap();
    assert!(tool.image().is_none());
    assert_eq!(tool.render_count(), 0);
}

#[test]
fn test_unreadable_snapshot_is_discarded() {
    let mut store = MemorySessionStore::new();
    store
        .save(&SessionSnapshot {
            data_url: "data:image/png;base64,AAAA".to_string(),
            file_name: "broken.png".to_string(),
            mime_type: "image/png".to_string(),
        })
        .unwrap();

    let tool = CropTool::mount(&ToolConfig::circle(), store, MountReason::LanguageSwitch).unwrap();
    assert!(tool.image().is_none());
    assert_eq!(tool.store().load().unwrap(), None);
}

#[test]
fn test_corrupt_session_file_mounts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let tool = CropTool::mount(
        &ToolConfig::circle(),
        FileSessionStore::new(&path),
        MountReason::LanguageSwitch,
    )
    .unwrap();
    assert!(tool.image().is_none());
    assert_eq!(tool.render_count(), 0);
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// File replacement
// ---------------------------------------------------------------------------

#[test]
fn test_open_file_saves_snapshot_and_resets_view() {
    let mut tool = CropTool::new(&ToolConfig::rounded(), MemorySessionStore::new());
    tool.open_file(png_file("first.png", &gradient_image(300, 200)))
        .unwrap();
    tool.place(1.8, 50.0, 0.0, Some(300.0)).unwrap();

    let second = png_file("second.png", &gradient_image(120, 160));
    tool.open_file(second.clone()).unwrap();

    let view = tool.view().unwrap();
    assert_eq!(view.scale, 1.0);
    assert_eq!(view.offset(), framecrop_core::geometry::Point::default());
    assert_eq!(view.frame_radius, Some(96.0));
    assert_eq!(tool.image().unwrap().dimensions(), (120, 160));

    let stored = tool.store().load().unwrap().unwrap();
    assert_eq!(stored.to_source_file().unwrap(), second);
}

#[test]
fn test_failed_open_keeps_previous_state() {
    let mut tool = CropTool::new(&ToolConfig::circle(), MemorySessionStore::new());
    tool.open_file(png_file("good.png", &gradient_image(50, 50)))
        .unwrap();
    let renders = tool.render_count();

    let broken = SourceFile::from_bytes("bad.png", Some("image/png"), vec![0; 32]).unwrap();
    assert!(tool.open_file(broken).is_err());

    assert_eq!(tool.image().unwrap().source().name, "good.png");
    assert_eq!(tool.render_count(), renders);
    let stored = tool.store().load().unwrap().unwrap();
    assert_eq!(stored.file_name, "good.png");
}

#[test]
fn test_close_drops_session_but_keeps_snapshot() {
    let mut tool = CropTool::new(&ToolConfig::circle(), MemorySessionStore::new());
    tool.open_file(png_file("a.png", &gradient_image(20, 20)))
        .unwrap();
    tool.close();

    assert!(tool.image().is_none());
    assert!(tool.preview().is_none());
    assert!(matches!(
        tool.export(chrono::Local::now().naive_local()),
        Err(FrameCropError::NoImageLoaded)
    ));
    assert!(tool.store().load().unwrap().is_some());
}

use super::*;

#[test]
fn empty_json_gives_reference_defaults() {
    let cfg = BoothConfig::from_json("{}").unwrap();
    assert_eq!(cfg, BoothConfig::default());
    assert_eq!(cfg.geometry, SlotGeometry::REFERENCE);
    assert_eq!(cfg.countdown_from, 3);
    assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
    assert_eq!(cfg.download_filename, "photobooth-strip.png");
    assert_eq!(cfg.catalog().unwrap().len(), 3);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = BoothConfig::from_json(
        r#"{
            "countdown_from": 5,
            "geometry": { "slot_gap": 20 },
            "frames": [ { "id": "x", "name": "X", "asset": "/frames/x.svg" } ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.countdown_from, 5);
    assert_eq!(cfg.geometry.slot_gap, 20);
    assert_eq!(cfg.geometry.slot_width, 572);
    assert_eq!(cfg.frames.len(), 1);
    assert_eq!(cfg.frames[0].asset.as_str(), "frames/x.svg");
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{"countdown_from": 0}"#,
        r#"{"tick_interval_ms": 0}"#,
        r#"{"download_filename": "  "}"#,
        r#"{"geometry": {"slot_height": 0}}"#,
        r#"{"frames": []}"#,
    ] {
        let err = BoothConfig::from_json(json).unwrap_err();
        assert!(matches!(err, PhotostripError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    for json in [
        "{",
        r#"{"unknown_key": 1}"#,
        r#"{"frames": [{"id": "1", "name": "a", "asset": "../x.png"}]}"#,
    ] {
        let err = BoothConfig::from_json(json).unwrap_err();
        assert!(matches!(err, PhotostripError::Serde(_)), "{json}: {err}");
    }
}

#[test]
fn from_path_reads_files() {
    let dir = std::path::PathBuf::from("target").join("unit_booth_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("booth.json");
    std::fs::write(&path, r#"{"mirror_captures": false}"#).unwrap();

    let cfg = BoothConfig::from_path(&path).unwrap();
    assert!(!cfg.mirror_captures);
    assert!(BoothConfig::from_path(&dir.join("missing.json")).is_err());
}

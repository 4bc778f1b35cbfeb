use super::*;

fn frame(id: &str) -> Frame {
    Frame {
        id: FrameId::from(id),
        name: format!("Frame {id}"),
        asset: AssetRef::new(&format!("frame/{id}.png")).unwrap(),
    }
}

#[test]
fn builtin_catalog_has_three_frames_in_order() {
    let catalog = FrameCatalog::builtin();
    let ids: Vec<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let two = catalog.get(&FrameId::from("2")).unwrap();
    assert_eq!(two.name, "Frame 2");
    assert_eq!(two.asset.as_str(), "frame/2.png");
    assert!(catalog.get(&FrameId::from("4")).is_none());
}

#[test]
fn builtin_entries_are_valid_asset_refs() {
    for f in builtin_frames() {
        assert_eq!(AssetRef::new(f.asset.as_str()).unwrap(), f.asset);
    }
}

#[test]
fn new_rejects_empty_and_duplicates() {
    assert!(FrameCatalog::new(vec![]).is_err());
    assert!(FrameCatalog::new(vec![frame("a"), frame("a")]).is_err());
    assert!(FrameCatalog::new(vec![frame("")]).is_err());
    assert_eq!(FrameCatalog::new(vec![frame("a"), frame("b")]).unwrap().len(), 2);
}

#[test]
fn frame_json_uses_web_style_asset_paths() {
    let f: Frame =
        serde_json::from_str(r#"{"id":"1","name":"Frame 1","asset":"/frame/1.png"}"#).unwrap();
    assert_eq!(f, frame("1"));
}

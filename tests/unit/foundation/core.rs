use super::*;

#[test]
fn shot_index_rejects_out_of_range() {
    assert!(ShotIndex::new(3).is_ok());
    assert!(ShotIndex::new(4).is_err());
    assert!(ShotIndex::try_from(9u8).is_err());
}

#[test]
fn shot_index_next_stops_at_last() {
    let order: Vec<usize> = std::iter::successors(Some(ShotIndex::FIRST), |i| i.next())
        .map(ShotIndex::get)
        .collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert!(ShotIndex::LAST.is_last());
    assert_eq!(ShotIndex::LAST.next(), None);
}

#[test]
fn shot_index_all_is_ascending() {
    let all: Vec<u8> = ShotIndex::all().map(u8::from).collect();
    assert_eq!(all, vec![0, 1, 2, 3]);
}

#[test]
fn shot_index_display_is_one_based() {
    assert_eq!(ShotIndex::FIRST.to_string(), "1 of 4");
    assert_eq!(ShotIndex::LAST.to_string(), "4 of 4");
}

#[test]
fn shot_index_serde_is_validated() {
    let ok: ShotIndex = serde_json::from_str("2").unwrap();
    assert_eq!(ok.get(), 2);
    assert!(serde_json::from_str::<ShotIndex>("4").is_err());
    assert_eq!(serde_json::to_string(&ok).unwrap(), "2");
}

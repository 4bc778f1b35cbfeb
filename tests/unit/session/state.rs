use super::*;

#[test]
fn countdown_runs_three_two_one_then_captures() {
    let mut seen = vec![Countdown(3)];
    let mut c = Countdown(3);
    while let Some(next) = c.tick() {
        seen.push(next);
        c = next;
    }
    assert_eq!(seen, vec![Countdown(3), Countdown(2), Countdown(1)]);
    let shown: Vec<u8> = seen.iter().map(|c| c.remaining()).collect();
    assert_eq!(shown, vec![3, 2, 1]);
    assert_eq!(Countdown(1).tick(), None);
}

#[test]
fn state_kind_and_shot() {
    let live = SessionState::Live {
        shot: ShotIndex::LAST,
        countdown: None,
    };
    assert_eq!(live.kind(), StateKind::Live);
    assert_eq!(live.shot(), Some(ShotIndex::LAST));
    assert_eq!(SessionState::Reviewing.shot(), None);
    assert_eq!(StateKind::FrameSelection.to_string(), "frame-selection");
}

#[test]
fn only_applied_is_applied() {
    assert!(Transition::Applied.is_applied());
    assert!(!Transition::Ignored.is_applied());
    assert!(!Transition::Failed.is_applied());
}

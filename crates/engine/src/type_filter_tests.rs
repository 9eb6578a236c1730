use super::*;

fn state(types: &[EntryType]) -> TypeFilterState {
    TypeFilterState::from_types(types.iter().copied())
}

fn active(state: &TypeFilterState) -> Vec<EntryType> {
    state.iter().filter(|(_, on)| *on).map(|(t, _)| t).collect()
}

const THREE: [EntryType; 3] = [EntryType::Folder, EntryType::Procedure, EntryType::Include];

#[test]
fn from_types_keeps_first_appearance_order() {
    let s = TypeFilterState::from_types([
        EntryType::Include,
        EntryType::Folder,
        EntryType::Include,
        EntryType::Procedure,
        EntryType::Folder,
    ]);

    let order: Vec<_> = s.iter().map(|(t, _)| t).collect();
    assert_eq!(
        order,
        vec![EntryType::Include, EntryType::Folder, EntryType::Procedure]
    );
    assert_eq!(s.active_count(), 3);
}

#[test]
fn unknown_types_are_visible() {
    let s = state(&[EntryType::Procedure]);
    assert!(s.is_active(EntryType::Xml));
    assert!(!s.contains(EntryType::Xml));
}

#[test]
fn left_click_toggles_one_type() {
    let mut s = state(&THREE);

    s.click(EntryType::Procedure, ClickButton::Left);
    assert!(!s.is_active(EntryType::Procedure));
    assert_eq!(s.active_count(), 2);

    s.click(EntryType::Procedure, ClickButton::Left);
    assert!(s.is_active(EntryType::Procedure));
}

#[test]
fn right_click_solos_then_restores() {
    let mut s = state(&THREE);

    s.click(EntryType::Include, ClickButton::Right);
    assert_eq!(active(&s), vec![EntryType::Include]);

    s.click(EntryType::Include, ClickButton::Right);
    assert_eq!(active(&s), THREE.to_vec());
}

#[test]
fn right_click_on_inactive_type_solos_it() {
    let mut s = state(&THREE);
    s.set_active(Some(&[EntryType::Folder]));

    s.click(EntryType::Procedure, ClickButton::Right);
    assert_eq!(active(&s), vec![EntryType::Procedure]);
}

#[test]
fn clicks_on_unknown_types_do_nothing() {
    let mut s = state(&THREE);
    s.toggle(EntryType::Folder);

    assert_eq!(s.toggle(EntryType::Html), None);
    s.click(EntryType::Html, ClickButton::Right);

    assert_eq!(active(&s), vec![EntryType::Procedure, EntryType::Include]);
}

#[test]
fn set_active_lists() {
    let mut s = state(&THREE);

    s.set_active(Some(&[EntryType::Folder, EntryType::Include]));
    assert_eq!(active(&s), vec![EntryType::Folder, EntryType::Include]);

    s.set_active(Some(&[]));
    assert_eq!(s.active_count(), 0);

    s.reset();
    s.set_active(None);
    assert_eq!(s.active_count(), 0);
}

#[test]
fn set_inactive_lists() {
    let mut s = state(&THREE);

    s.set_inactive(Some(&[EntryType::Procedure]));
    assert_eq!(active(&s), vec![EntryType::Folder, EntryType::Include]);

    s.set_inactive(None);
    assert_eq!(s.active_count(), 3);

    s.set_active(None);
    s.set_inactive(Some(&[]));
    assert_eq!(s.active_count(), 3);
}

#[test]
fn rebuild_keeps_toggles_when_types_unchanged() {
    let mut s = state(&THREE);
    s.toggle(EntryType::Include);

    let replaced = s.rebuild([EntryType::Include, EntryType::Procedure, EntryType::Folder]);

    assert!(!replaced);
    assert!(!s.is_active(EntryType::Include));
}

#[test]
fn rebuild_resets_when_types_change() {
    let mut s = state(&THREE);
    s.toggle(EntryType::Include);

    let replaced = s.rebuild([EntryType::Include, EntryType::Xml]);

    assert!(replaced);
    assert_eq!(active(&s), vec![EntryType::Include, EntryType::Xml]);
    assert!(!s.contains(EntryType::Folder));
}

#[test]
fn cycle_moves_the_single_active_type_and_wraps() {
    let mut s = state(&THREE);
    s.set_active(Some(&[EntryType::Include]));

    assert_eq!(s.cycle(CycleDirection::Next), Some(EntryType::Folder));
    assert_eq!(active(&s), vec![EntryType::Folder]);

    assert_eq!(s.cycle(CycleDirection::Previous), Some(EntryType::Include));
    assert_eq!(s.cycle(CycleDirection::Previous), Some(EntryType::Procedure));
}

#[test]
fn cycle_with_many_active_reuses_cursor() {
    let mut s = state(&THREE);
    s.set_active(Some(&[EntryType::Folder]));
    s.cycle(CycleDirection::Next);
    s.reset();

    assert_eq!(s.cycle(CycleDirection::Next), Some(EntryType::Procedure));
    assert_eq!(active(&s), vec![EntryType::Procedure]);
}

#[test]
fn cycle_on_empty_state() {
    let mut s = TypeFilterState::default();
    assert_eq!(s.cycle(CycleDirection::Next), None);
    assert!(s.is_empty());
}

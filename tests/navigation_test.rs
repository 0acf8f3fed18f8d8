//! Tests for cursor navigation and parent lookups

use rstest::{fixture, rstest};

use mindsheet::util::testing;
use mindsheet::{new_sheet_with, SequentialIdSource, SheetOptions, Topic, TopicId, TopicKey};

#[fixture]
fn center() -> Topic {
    testing::init_test_setup();
    new_sheet_with(
        "S",
        "C",
        SheetOptions::default().with_id_source(SequentialIdSource::new()),
    )
}

fn unknown_key() -> TopicKey {
    TopicKey::Content(TopicId::parse("ffffffffffffffffffffffffff").unwrap())
}

// ============================================================
// Sheet creation
// ============================================================

#[rstest]
fn given_new_sheet_when_inspecting_center_then_links_to_sheet_root(center: Topic) {
    assert_eq!(center.title().as_deref(), Some("C"));
    assert_eq!(center.on(TopicKey::Center), center);
    assert_eq!(center.on(TopicKey::default()), center);

    let root = center.parent().expect("center has the sheet root as parent");
    assert!(root.is_root());
    assert_eq!(root.title().as_deref(), Some("S"));
    assert_eq!(root.parent(), None);
    assert_eq!(center.cid("C"), TopicKey::Center);
}

#[rstest]
fn given_any_sheet_when_resolving_empty_title_then_center(center: Topic) {
    center.add("a").add("b");
    assert_eq!(center.cid(""), TopicKey::Center);
    assert_eq!(center.on_title(""), center);
    assert_eq!(center.on(center.cid("")), center);
}

#[rstest]
fn given_handles_when_navigating_then_all_share_one_index(center: Topic) {
    center.add("a");
    let a = center.on_title("a");
    let root = center.sheet_root();
    assert!(a.shares_index_with(&center));
    assert!(root.shares_index_with(&a));
    assert!(!center.shares_index_with(&mindsheet::new_sheet("S", "C")));
}

// ============================================================
// On / OnTitle
// ============================================================

#[rstest]
fn given_known_key_when_on_then_focus_moves(center: Topic) {
    center.add("a");
    let a = center.children()[0].clone();

    let focused = center.on(a.key().unwrap());

    assert_eq!(focused, a);
    assert_eq!(center.last_focused(), a);
}

#[rstest]
fn given_unknown_key_when_on_then_returns_last_focused(center: Topic) {
    center.add("a");
    let a = center.on_title("a");

    assert_eq!(center.on(unknown_key()), a);
    assert_eq!(center.on_title("missing"), a);
}

#[rstest]
fn given_last_key_when_on_then_stays(center: Topic) {
    center.add("a");
    let a = center.on_title("a");
    assert_eq!(center.on(TopicKey::Last), a);
}

#[rstest]
fn given_root_key_when_on_then_returns_sheet_root(center: Topic) {
    let root = center.on(TopicKey::Root);
    assert!(root.is_root());
    assert_eq!(root.add("x"), root, "document root cannot add");
    assert!(root.children().len() == 1 && root.children()[0] == center);
}

// ============================================================
// Parent
// ============================================================

#[rstest]
fn given_key_when_parent_of_then_returns_its_parent(center: Topic) {
    center.add("a");
    let a = center.on_title("a");
    a.add("b");
    let b = a.children()[0].clone();

    assert_eq!(center.parent_of(b.key().unwrap()), Some(a.clone()));
    assert_eq!(b.parent(), Some(a));
    assert_eq!(center.parent_of(unknown_key()), None);
    assert_eq!(center.parent_of(TopicKey::Root), None);
}

#[rstest]
fn given_removed_topic_when_navigating_from_it_then_degrades(center: Topic) {
    center.add("a");
    let a = center.on_title("a");
    center.remove("a");

    assert!(!a.is_alive());
    assert_eq!(a.parent(), None);
    assert_eq!(a.title(), None);
    assert_eq!(a.add("x"), a);
    assert!(a.children().is_empty());
    assert_eq!(a.on(TopicKey::Last), center);
}

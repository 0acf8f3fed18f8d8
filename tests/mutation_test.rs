//! Tests for the insertion modes and cascading removal

use rstest::{fixture, rstest};

use mindsheet::util::testing;
use mindsheet::{
    new_sheet_with, AddMode, SequentialIdSource, SheetOptions, StructureClass, Topic,
    TopicDraft, TopicKey,
};

#[fixture]
fn center() -> Topic {
    testing::init_test_setup();
    new_sheet_with(
        "S",
        "Center",
        SheetOptions::default().with_id_source(SequentialIdSource::new()),
    )
}

/// Central topic with children A, B, C in order.
#[fixture]
fn abc(center: Topic) -> Topic {
    center.add("A").add("B").add("C");
    center
}

fn child_titles(topic: &Topic) -> Vec<String> {
    topic.children().iter().filter_map(Topic::title).collect()
}

// ============================================================
// Sub
// ============================================================

#[rstest]
fn given_center_when_adding_child_then_child_links_back(center: Topic) {
    let returned = center.add("child");

    assert_eq!(returned, center, "focus does not move");
    let children = center.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].title().as_deref(), Some("child"));
    assert_eq!(children[0].parent(), Some(center.clone()));
}

#[rstest]
fn given_new_topic_when_added_then_id_is_indexed(abc: Topic) {
    for child in abc.children() {
        let key = child.key().unwrap();
        assert_eq!(abc.on(key), child);
    }
}

#[rstest]
fn given_empty_titles_when_adding_then_numbered_across_sheet(center: Topic) {
    center.add("").add("");
    let first = center.children()[0].clone();
    first.add("");
    first.add_with("", AddMode::After);

    let mut titles: Vec<String> = center.iter_pre_order().filter_map(|t| t.title()).collect();
    titles.sort();
    assert_eq!(titles, ["Center", "Topic 1", "Topic 2", "Topic 3", "Topic 4"]);
}

#[rstest]
fn given_custom_prefix_when_adding_untitled_then_prefix_is_used() {
    let options = SheetOptions {
        auto_title_prefix: "Idea #".to_string(),
        ..SheetOptions::default()
    };
    let center = new_sheet_with("S", "C", options);
    center.add("");
    assert_eq!(child_titles(&center), ["Idea #1"]);
}

// ============================================================
// Before / After
// ============================================================

#[rstest]
fn given_abc_when_inserting_before_b_then_x_precedes_b(abc: Topic) {
    let b = abc.on_title("B");
    let returned = b.add_with("X", AddMode::Before);

    assert_eq!(returned, b);
    assert_eq!(child_titles(&abc), ["A", "X", "B", "C"]);
    let x = abc.on_title("X");
    assert_eq!(x.parent(), Some(abc.clone()));
}

#[rstest]
fn given_abc_when_inserting_after_b_then_y_follows_b(abc: Topic) {
    let b = abc.on_title("B");
    let returned = b.add_with("Y", AddMode::After);

    assert_eq!(returned, b);
    assert_eq!(child_titles(&abc), ["A", "B", "Y", "C"]);
}

#[rstest]
#[case("A", AddMode::Before, &["N", "A", "B", "C"])]
#[case("A", AddMode::After, &["A", "N", "B", "C"])]
#[case("C", AddMode::Before, &["A", "B", "N", "C"])]
#[case("C", AddMode::After, &["A", "B", "C", "N"])]
fn given_abc_when_inserting_sibling_then_others_keep_order(
    abc: Topic,
    #[case] anchor: &str,
    #[case] mode: AddMode,
    #[case] expected: &[&str],
) {
    abc.on_title(anchor).add_with("N", mode);
    assert_eq!(child_titles(&abc), expected);
}

#[rstest]
#[case(AddMode::Before)]
#[case(AddMode::After)]
#[case(AddMode::Parent)]
fn given_center_when_adding_with_any_mode_then_appends_child(center: Topic, #[case] mode: AddMode) {
    center.add("A");
    let returned = center.add_with("N", mode);

    assert_eq!(returned, center);
    assert_eq!(child_titles(&center), ["A", "N"]);
    assert_eq!(center.parent().unwrap().children(), vec![center.clone()]);
}

// ============================================================
// Parent
// ============================================================

#[rstest]
fn given_leaf_when_wrapping_then_title_moves_up(center: Topic) {
    center.add("Old");
    let old = center.on_title("Old");

    let returned = old.add_with("New", AddMode::Parent);

    assert_eq!(returned.title().as_deref(), Some("Old"));
    assert_eq!(old.title().as_deref(), Some("New"));
    let children = old.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0], returned);
    assert_eq!(returned.parent(), Some(old.clone()));
    assert!(returned.children().is_empty());
}

#[rstest]
fn given_topic_with_children_when_wrapping_then_grandchildren_follow(abc: Topic) {
    let b = abc.on_title("B");
    b.add("b1").add("b2");

    let returned = b.add_with("W", AddMode::Parent);

    assert_eq!(child_titles(&abc), ["A", "W", "C"]);
    assert_eq!(child_titles(&b), ["B"]);
    assert_eq!(child_titles(&returned), ["b1", "b2"]);
    for grandchild in returned.children() {
        assert_eq!(grandchild.parent(), Some(returned.clone()));
    }
}

// ============================================================
// Remove
// ============================================================

#[rstest]
fn given_nested_topics_when_removing_parent_then_subtree_is_purged(center: Topic) {
    center.add("A");
    let a = center.on_title("A");
    a.add("B");
    let b = a.children()[0].clone();
    let (a_key, b_key) = (a.key().unwrap(), b.key().unwrap());
    center.on(b_key.clone());

    let returned = center.remove_by_id(a_key.clone());

    assert_eq!(returned, center);
    assert!(center.children().is_empty());
    assert_eq!(center.parent_of(a_key.clone()), None);
    assert_eq!(center.parent_of(b_key.clone()), None);
    assert_eq!(center.on(a_key), center, "unknown key falls back to the cursor");
    assert_eq!(center.last_focused(), center);
    assert!(!a.is_alive() && !b.is_alive());
}

#[rstest]
fn given_title_when_removing_then_only_that_sibling_goes(abc: Topic) {
    let b = abc.on_title("B");
    let returned = b.remove("B");

    assert_eq!(returned, abc);
    assert_eq!(child_titles(&abc), ["A", "C"]);
    assert_eq!(abc.last_focused(), abc);
}

#[rstest]
fn given_center_key_when_removing_then_noop(abc: Topic) {
    let a = abc.on_title("A");
    assert_eq!(a.remove_by_id(TopicKey::Center), a);
    assert_eq!(a.remove(""), a);
    assert_eq!(a.remove("C"), abc);
    assert!(abc.is_alive());
    assert_eq!(child_titles(&abc), ["A", "B"]);
    assert_eq!(abc.sheet_root().children(), vec![abc.clone()]);
}

#[rstest]
fn given_center_content_id_when_removing_then_noop(abc: Topic) {
    let key = abc.key().unwrap();
    assert_eq!(abc.remove_by_id(key), abc);
    assert!(abc.is_alive());
    assert_eq!(abc.children().len(), 3);
}

#[rstest]
fn given_unknown_title_when_removing_then_last_focused_survives(abc: Topic) {
    let b = abc.on_title("B");
    let returned = abc.remove("NoSuchTitle");

    assert_eq!(returned, abc);
    assert!(b.is_alive());
    assert_eq!(abc.last_focused(), b);
    assert_eq!(child_titles(&abc), ["A", "B", "C"]);
}

#[rstest]
fn given_topic_when_removing_children_then_topic_stays(abc: Topic) {
    let a = abc.on_title("A");
    a.add("a1").add("a2");
    let a1 = a.children()[0].clone();

    a.remove_children();

    assert!(a.is_alive());
    assert!(a.children().is_empty());
    assert!(!a1.is_alive());
    assert_eq!(abc.cid("a1"), TopicKey::Last);
}

// ============================================================
// Document root
// ============================================================

fn assert_center_attached(center: &Topic) {
    assert!(center.is_alive());
    assert_eq!(center.sheet_root().children(), vec![center.clone()]);
    assert_eq!(center.parent(), Some(center.sheet_root()));
    assert_eq!(center.on(TopicKey::Center), *center);
}

#[rstest]
fn given_sheet_root_when_removing_children_then_center_survives(abc: Topic) {
    abc.sheet_root().remove_children();

    assert_center_attached(&abc);
    assert_eq!(child_titles(&abc), ["A", "B", "C"]);
    abc.add("D");
    assert_eq!(child_titles(&abc), ["A", "B", "C", "D"]);
}

#[rstest]
#[case::sub(AddMode::Sub)]
#[case::before(AddMode::Before)]
#[case::after(AddMode::After)]
#[case::parent(AddMode::Parent)]
fn given_sheet_root_when_adding_then_noop(abc: Topic, #[case] mode: AddMode) {
    let root = abc.sheet_root();
    assert_eq!(root.add_with("X", mode), root);
    assert_center_attached(&abc);
    assert_eq!(abc.cid("X"), TopicKey::Last);
}

#[rstest]
fn given_sheet_root_when_removing_permanent_topics_then_noop(abc: Topic) {
    let root = abc.sheet_root();
    assert_eq!(root.remove("Center"), root);
    assert_eq!(root.remove(""), root);
    assert_eq!(root.remove_by_id(TopicKey::Root), root);
    assert_eq!(root.remove_by_id(TopicKey::Center), root);
    assert_eq!(root.remove_by_id(abc.key().unwrap()), root);
    assert_eq!(root.remove_by_id(root.key().unwrap()), root);
    assert!(root.is_alive());
    assert_center_attached(&abc);
    assert_eq!(abc.children().len(), 3);
}

#[rstest]
fn given_sheet_root_when_grafting_then_noop(abc: Topic) {
    assert_eq!(abc.sheet_root().graft(TopicDraft::new("X")), None);
    assert_center_attached(&abc);
}

// ============================================================
// Stale handles
// ============================================================

#[rstest]
fn given_stale_handle_when_removing_then_nothing_changes(abc: Topic) {
    let a = abc.on_title("A");
    let b_key = abc.on_title("B").key().unwrap();
    abc.remove("A");
    let b = abc.on(b_key.clone());

    assert_eq!(a.remove("B"), a);
    assert_eq!(a.remove_by_id(b_key), a);

    assert!(b.is_alive());
    assert_eq!(child_titles(&abc), ["B", "C"]);
    assert_eq!(abc.last_focused(), b);
}

#[rstest]
fn given_stale_handle_when_editing_then_sheet_is_untouched(abc: Topic) {
    let a = abc.on_title("A");
    abc.remove("A");

    assert_eq!(a.add("X"), a);
    assert_eq!(a.add_with("Y", AddMode::Parent), a);
    a.remove_children();
    assert_eq!(a.graft(TopicDraft::new("Z")), None);
    a.up_sheet("Renamed", "Renamed", Some(StructureClass::default()));

    assert!(!a.is_alive());
    assert_eq!(child_titles(&abc), ["B", "C"]);
    assert_eq!(abc.sheet_title(), "S");
    assert_eq!(abc.title().as_deref(), Some("Center"));
}

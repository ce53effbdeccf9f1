use super::*;
use crate::score::event::{ActionData, ClipData, LayoutAction};

fn clip(start: f64, end: f64, name: &str) -> ScoreEvent {
    ScoreEvent::Clip(ClipData {
        start,
        end,
        index: None,
        z_index: 0,
        resource_ref: name.to_string(),
    })
}

fn name_of(ev: &ScoreEvent) -> &str {
    match ev {
        ScoreEvent::Clip(c) => &c.resource_ref,
        ScoreEvent::Action(_) => "action",
    }
}

#[test]
fn events_sort_stably_by_trigger_time() {
    let score = Score::from_events(vec![
        clip(2.0, 3.0, "late"),
        clip(0.0, 1.0, "first"),
        clip(0.0, 1.0, "second"),
    ]);
    let names: Vec<&str> = score.events().iter().map(name_of).collect();
    assert_eq!(names, vec!["first", "second", "late"]);
}

#[test]
fn take_due_consumes_each_event_once() {
    let mut cur = Score::from_events(vec![
        clip(0.0, 1.0, "a"),
        clip(0.5, 1.0, "b"),
        clip(2.0, 3.0, "c"),
    ])
    .cursor();

    assert_eq!(cur.take_due(0.5).len(), 2);
    assert!(cur.take_due(0.5).is_empty());
    assert!(cur.take_due(1.9).is_empty());
    let due = cur.take_due(2.0);
    assert_eq!(due.len(), 1);
    assert_eq!(name_of(&due[0]), "c");
    assert!(cur.is_finished());
}

#[test]
fn seek_skips_past_events() {
    let mut cur = Score::from_events(vec![
        clip(0.0, 1.0, "a"),
        clip(1.0, 2.0, "b"),
        clip(3.0, 4.0, "c"),
    ])
    .cursor();
    assert_eq!(cur.seek(1.0), 1);
    assert_eq!(cur.remaining(), 2);
    let due = cur.take_due(1.0);
    assert_eq!(name_of(&due[0]), "b");
}

#[test]
fn invalid_events_are_skipped_individually() {
    let score = Score::from_events(vec![
        clip(0.0, 1.0, "ok"),
        clip(3.0, 1.0, "backwards"),
        clip(f64::NAN, 1.0, "nan"),
    ]);
    assert_eq!(score.len(), 1);
    assert_eq!(score.skipped(), 2);
}

#[test]
fn json_loading_skips_malformed_elements() {
    let json = r#"[
        {"type":"clip","start":0,"end":2,"resourceRef":"a"},
        {"type":"clip","start":1},
        {"type":"action","action":"rows","at":1.5},
        {"type":"mystery"}
    ]"#;
    let score = Score::from_json_str(json).unwrap();
    assert_eq!(score.len(), 2);
    assert_eq!(score.skipped(), 2);
    assert_eq!(
        score.events()[1],
        ScoreEvent::Action(ActionData {
            action: LayoutAction::Rows,
            at: 1.5
        })
    );
    assert_eq!(score.end_time(), 2.0);
}

#[test]
fn non_array_document_fails_the_load() {
    assert!(Score::from_json_str(r#"{"type":"clip"}"#).is_err());
    assert!(Score::from_json_str("not json").is_err());
}

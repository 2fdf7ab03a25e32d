// End-to-end tests for the feature lifecycle: configuration events against
// a full Extension, observed through a counting feature host.

mod common;

use common::{fake_engines, CountingFeatureHost, FakeEditor};
use serde_json::json;
use sprout::{Error, Extension, Feature};

fn setup() -> (Extension, CountingFeatureHost, FakeEditor) {
    common::tracing::init_from_env();
    let extension = Extension::new(fake_engines());
    let host = CountingFeatureHost::default();
    let editor = FakeEditor::new(1, "<div></div>", 5, "html");
    (extension, host, editor)
}

/// The tracker starts once, survives a repeated identical config event
/// without a restart, and is disposed exactly once when turned off.
#[test]
fn test_tracker_start_noop_stop_cycle() {
    let (mut extension, mut host, editor) = setup();

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": false }))
        .unwrap();
    assert_eq!(host.tracker_starts, 1, "first enable should start the tracker");
    assert!(extension.is_running(editor.id, Feature::Tracker));

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": false }))
        .unwrap();
    assert_eq!(host.tracker_starts, 1, "repeated config must not create a second tracker");
    assert_eq!(host.tracker_stops.get(), 0);

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": false, "markTagPairs": false }))
        .unwrap();
    assert_eq!(host.tracker_stops.get(), 1, "disable must invoke the disposer exactly once");
    assert!(!extension.is_running(editor.id, Feature::Tracker));
}

/// Both features follow their own flag on the same config event.
#[test]
fn test_both_features_reconcile_from_one_event() {
    let (mut extension, mut host, editor) = setup();

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": true }))
        .unwrap();
    assert_eq!(host.tracker_starts, 1);
    assert_eq!(host.tag_match_starts, 1);

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": false, "markTagPairs": true }))
        .unwrap();
    assert_eq!(host.tracker_stops.get(), 1);
    assert_eq!(host.tag_match_starts, 1, "tag matcher must be untouched by a tracker-only change");
    assert_eq!(host.tag_match_stops.get(), 0);
}

/// Instances do not share lifecycle state.
#[test]
fn test_instances_are_isolated() {
    let (mut extension, mut host, first) = setup();
    let second = FakeEditor::new(2, "", 0, "html");

    extension
        .on_config_change(&mut host, &first, &json!({ "mark": true, "markTagPairs": false }))
        .unwrap();
    extension
        .on_config_change(&mut host, &second, &json!({ "mark": false, "markTagPairs": false }))
        .unwrap();

    assert!(extension.is_running(first.id, Feature::Tracker));
    assert!(!extension.is_running(second.id, Feature::Tracker));

    extension.on_editor_closed(first.id);
    assert_eq!(host.tracker_stops.get(), 1, "closing the instance releases its tracker");
    assert!(!extension.is_running(first.id, Feature::Tracker));
}

/// A malformed config value is rejected and the running state is kept.
#[test]
fn test_malformed_config_keeps_prior_state() {
    let (mut extension, mut host, editor) = setup();

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": false }))
        .unwrap();

    let err = extension
        .on_config_change(&mut host, &editor, &json!({ "mark": "definitely" }))
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
    assert!(
        extension.is_running(editor.id, Feature::Tracker),
        "bad config must not tear down the running tracker"
    );
    assert_eq!(host.tracker_stops.get(), 0);

    // The prior overrides still apply: a later valid event that matches them
    // is a no-op.
    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": false }))
        .unwrap();
    assert_eq!(host.tracker_starts, 1);
}

/// A failed feature start surfaces the error, records no handle and still
/// reconciles the other feature.
#[test]
fn test_failed_tracker_start_is_consistent() {
    common::tracing::init_from_env();
    let mut extension = Extension::new(fake_engines());
    let mut host = CountingFeatureHost {
        fail_tracker: true,
        ..CountingFeatureHost::default()
    };
    let editor = FakeEditor::new(3, "", 0, "html");

    let err = extension
        .on_config_change(&mut host, &editor, &json!({ "mark": true, "markTagPairs": true }))
        .unwrap_err();
    assert!(
        matches!(err, Error::LifecycleStart { feature: Feature::Tracker, .. }),
        "got {err:?}"
    );
    assert!(!extension.is_running(editor.id, Feature::Tracker));
    assert!(extension.is_running(editor.id, Feature::TagMatch));
}

/// enter-abbreviation-mode forces the tracker on even when `mark` is off;
/// reset restarts a running tracker with fresh state.
#[test]
fn test_enter_and_reset_abbreviation_commands() {
    let (mut extension, mut host, editor) = setup();

    extension
        .on_config_change(&mut host, &editor, &json!({ "mark": false, "markTagPairs": false }))
        .unwrap();
    extension.enter_abbreviation_mode(&mut host, &editor).unwrap();
    assert_eq!(host.tracker_starts, 1);
    extension.enter_abbreviation_mode(&mut host, &editor).unwrap();
    assert_eq!(host.tracker_starts, 1, "entering twice must not stack trackers");

    extension.reset_abbreviation(&mut host, &editor).unwrap();
    assert_eq!(host.tracker_stops.get(), 1);
    assert_eq!(host.tracker_starts, 2);
    assert!(extension.is_running(editor.id, Feature::Tracker));
}

//! Output projection over realistic response payloads

use serde_json::{json, Value};
use suitegate_core::OutputProjector;
use suitegate_domain::{FieldPath, ProjectionSpec};

fn drive_listing() -> Value {
    json!({
        "result": {
            "files": [{"id": "f1"}],
            "owner": {"email": "a@b.com", "name": "Ada", "quota": {"used": 10, "limit": null}},
            "kind": "drive#fileList"
        },
        "nextPageToken": "abc"
    })
}

#[test]
fn unwrap_only() {
    let spec = ProjectionSpec::new(true, Vec::new());
    let projected = OutputProjector::new().project(
        json!({"result": {"id": "1", "title": "hello"}, "nextPageToken": "abc"}),
        &spec,
    );
    assert_eq!(projected, json!({"id": "1", "title": "hello"}));
}

#[test]
fn select_only() {
    let spec = ProjectionSpec::new(
        false,
        vec![FieldPath::parse("id").unwrap(), FieldPath::parse("nested.name").unwrap()],
    );
    let projected = OutputProjector::new()
        .project(json!({"id": "1", "title": "hello", "nested": {"name": "n"}, "other": 5}), &spec);
    assert_eq!(projected, json!({"id": "1", "nested": {"name": "n"}}));
}

#[test]
fn identity_spec_is_a_no_op() {
    let spec = ProjectionSpec::default();
    assert!(spec.is_identity());
    assert_eq!(OutputProjector::new().project(drive_listing(), &spec), drive_listing());
}

#[test]
fn projecting_twice_changes_nothing() {
    let projector = OutputProjector::new();
    let specs = [
        ProjectionSpec::from_select_list(false, "result.owner.name, nextPageToken, missing").unwrap(),
        ProjectionSpec::from_select_list(true, "owner.quota, kind").unwrap(),
        ProjectionSpec::from_select_list(true, "owner.quota.limit, owner, files").unwrap(),
    ];

    for spec in &specs {
        let once = projector.project(drive_listing(), spec);
        let twice = projector.project(once.clone(), spec);
        assert_eq!(once, twice, "spec {spec:?} is not idempotent");
    }
}

#[test]
fn overlapping_paths_merge() {
    let spec = ProjectionSpec::from_select_list(true, "owner.name, owner.quota.used").unwrap();
    let projected = OutputProjector::new().project(drive_listing(), &spec);
    assert_eq!(projected, json!({"owner": {"name": "Ada", "quota": {"used": 10}}}));
}

#[test]
fn scalars_pass_through_unwrap() {
    let spec = ProjectionSpec::new(true, Vec::new());
    assert_eq!(OutputProjector::new().project(json!("plain"), &spec), json!("plain"));
}

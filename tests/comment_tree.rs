//! Flattening of the nested comment forest Reddit's comments endpoint returns.

use serde_json::{json, Value};
use supplemeter::flatten_comment_forest;

fn forest() -> Vec<Value> {
    vec![
        json!({
            "kind": "t1",
            "data": {
                "id": "c1", "author": "alice", "body": "works for me", "depth": 0,
                "score": 4, "created_utc": 1136074600.0,
                "replies": {
                    "kind": "Listing",
                    "data": { "children": [
                        {
                            "kind": "t1",
                            "data": {
                                "id": "c2", "author": "bob", "body": "same here", "depth": 1,
                                "score": 1, "created_utc": 1136074700.0,
                                "replies": ""
                            }
                        },
                        // Unresolved placeholder for collapsed children.
                        { "kind": "more", "data": { "count": 12, "children": ["c9", "c10"] } }
                    ] }
                }
            }
        }),
        json!({
            "kind": "t1",
            "data": {
                "id": "c3", "author": "carol", "body": "top-level sibling", "depth": 0,
                "score": 2, "created_utc": 1136074800.0,
                "replies": ""
            }
        }),
    ]
}

#[test]
fn flatten_is_depth_first_and_drops_more_placeholders() {
    let out = flatten_comment_forest(&forest());
    let ids: Vec<&str> = out.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["c1", "c2", "c3"], "depth-first order, no 'more' nodes");

    let depths: Vec<i64> = out.iter().map(|c| c["depth"].as_i64().unwrap()).collect();
    assert_eq!(depths, [0, 1, 0]);
}

#[test]
fn flatten_of_empty_forest_is_empty() {
    assert!(flatten_comment_forest(&[]).is_empty());
}

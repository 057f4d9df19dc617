use super::*;
use serde_json::{Value, json};

fn section(v: Value) -> SectionTable {
    serde_json::from_value(v).unwrap()
}

fn keys(chain: &Chain<'_>) -> Vec<String> {
    chain.keys().map(str::to_owned).collect()
}

#[test]
fn chain_is_ancestor_first() {
    let s = section(json!({
        "c": { "group": "b" },
        "a": { "baseY": 1 },
        "b": { "group": "a" }
    }));
    assert_eq!(keys(&collect_chain(&s, "c")), ["a", "b", "c"]);
    assert_eq!(keys(&collect_chain(&s, "a")), ["a"]);
}

#[test]
fn parent_is_followed_when_group_is_absent() {
    let s = section(json!({
        "root": {},
        "leaf": { "parent": "root" }
    }));
    assert_eq!(keys(&collect_chain(&s, "leaf")), ["root", "leaf"]);
}

#[test]
fn group_takes_precedence_over_parent() {
    let s = section(json!({
        "g": {},
        "p": {},
        "leaf": { "group": "g", "parent": "p" }
    }));
    assert_eq!(keys(&collect_chain(&s, "leaf")), ["g", "leaf"]);
}

#[test]
fn two_cycle_terminates_with_each_key_once() {
    let s = section(json!({
        "a": { "group": "b" },
        "b": { "group": "a" }
    }));
    assert_eq!(keys(&collect_chain(&s, "a")), ["b", "a"]);
    assert_eq!(keys(&collect_chain(&s, "b")), ["a", "b"]);
}

#[test]
fn self_reference_yields_single_link() {
    let s = section(json!({ "a": { "group": "a", "baseX": 3 } }));
    assert_eq!(keys(&collect_chain(&s, "a")), ["a"]);
}

#[test]
fn longer_cycle_with_tail() {
    let s = section(json!({
        "tail": { "group": "x" },
        "x": { "group": "y" },
        "y": { "group": "z" },
        "z": { "group": "x" }
    }));
    assert_eq!(keys(&collect_chain(&s, "tail")), ["z", "y", "x", "tail"]);
}

#[test]
fn dangling_reference_ends_walk() {
    let s = section(json!({ "a": { "group": "missing", "offsetY": 5 } }));
    let chain = collect_chain(&s, "a");
    assert_eq!(keys(&chain), ["a"]);
    assert_eq!(chain.links()[0].entry.offset_y, Some(5.0));
}

#[test]
fn missing_or_empty_key_is_empty_chain() {
    let s = section(json!({ "": { "baseX": 1 }, "a": {} }));
    assert!(collect_chain(&s, "nope").is_empty());
    assert!(collect_chain(&s, "").is_empty());
}

use crate::*;
use chrono::{NaiveDate, TimeDelta};

fn dated() -> Graph {
    let joined = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
    let mut g = Graph::new();
    g.set_node(
        "a",
        attrs([
            ("joined", AttrValue::from(joined)),
            ("tenure", AttrValue::from(TimeDelta::days(2))),
        ]),
    );
    g.set_node("b", attrs([("joined", AttrValue::Null), ("team", "uno".into())]));
    g.set_node(
        "c",
        attrs([(
            "joined",
            AttrValue::from(joined.and_hms_opt(9, 30, 0).unwrap()),
        )]),
    );
    g
}

#[test]
fn temporal_attrs_are_listed_in_first_seen_order() {
    assert_eq!(temporal_node_attrs(&dated()), vec!["joined", "tenure"]);
    assert!(temporal_node_attrs(&Graph::new()).is_empty());
}

#[test]
fn temporal_values_need_a_format() {
    let err = sanitize_temporal(&dated(), None).unwrap_err();
    assert!(
        matches!(err, Error::NonSerializableTemporal { ref attrs } if attrs == &["joined", "tenure"])
    );
}

#[test]
fn temporal_values_are_formatted_and_nulls_kept() {
    let g = dated();
    let out = sanitize_temporal(&g, Some(DEFAULT_DATETIME_FORMAT)).unwrap();
    assert_eq!(out.node_attr("a", "joined"), Some(&AttrValue::from("07 Mar 2021")));
    assert_eq!(out.node_attr("c", "joined"), Some(&AttrValue::from("07 Mar 2021")));
    assert_eq!(
        out.node_attr("a", "tenure"),
        Some(&AttrValue::from(TimeDelta::days(2).to_string()))
    );
    assert_eq!(out.node_attr("b", "joined"), Some(&AttrValue::Null));
    assert_eq!(out.node_attr("b", "team"), Some(&AttrValue::from("uno")));
    // the input keeps its dates
    assert!(g.node_attr("a", "joined").unwrap().is_temporal());
}

#[test]
fn graphs_without_temporal_values_pass_through() {
    let mut g = Graph::new();
    g.set_node("a", attrs([("team", "uno")]));
    let out = sanitize_temporal(&g, None).unwrap();
    assert_eq!(out.node("a"), g.node("a"));
}

#[test]
fn formats_that_do_not_fit_the_value_are_errors() {
    let err = sanitize_temporal(&dated(), Some("%H:%M")).unwrap_err();
    assert!(matches!(err, Error::InvalidDatetimeFormat { .. }));
}

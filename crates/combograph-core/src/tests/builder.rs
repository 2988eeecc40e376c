use crate::*;
use indexmap::IndexMap;

fn table(rows: &[(&str, &str, f64)]) -> EdgeTable {
    let mut t = EdgeTable::new(["source", "target", "weight"]);
    for (s, d, w) in rows {
        t.push_row([AttrValue::from(*s), AttrValue::from(*d), AttrValue::from(*w)]);
    }
    t
}

fn node_attrs(entries: &[(&str, Attrs)]) -> IndexMap<String, Attrs> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn builder_requires_endpoint_columns() {
    let err = build_graph(&EdgeTable::default(), &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column } if column == "source"));

    let t = EdgeTable::new(["a", "b"]);
    let opts = BuildOptions {
        source: "a".into(),
        target: "b".into(),
        ..Default::default()
    };
    let g = build_graph(&t, &opts).unwrap();
    assert!(g.is_empty());
}

#[test]
fn builder_unweighted_edges() {
    let mut t = EdgeTable::new(["source", "target"]);
    t.push_row(["a", "b"]).push_row(["b", "c"]);
    let g = build_graph(&t, &BuildOptions::default()).unwrap();
    assert_eq!(g.node_count(), 3);
    assert!(g.has_edge("c", "b"));
}

#[test]
fn builder_attaches_node_attrs_to_known_nodes_only() {
    let t = table(&[("a", "b", 1.0)]);
    let opts = BuildOptions {
        node_attrs: node_attrs(&[
            ("a", attrs([("greeting", "hello")])),
            ("c", attrs([("greeting", "hi")])),
        ]),
        ..Default::default()
    };
    let g = build_graph(&t, &opts).unwrap();
    assert_eq!(g.node_attr("a", "greeting"), Some(&AttrValue::from("hello")));
    assert_eq!(g.node_attr("b", "greeting"), None);
    assert!(!g.has_node("c"));
}

#[test]
fn builder_can_add_nodes_only_named_in_node_attrs() {
    let t = EdgeTable::new(["source", "target"]);
    let opts = BuildOptions {
        node_attrs: node_attrs(&[("c", attrs([("attr", "val")]))]),
        include_missing_attr_nodes: true,
        ..Default::default()
    };
    let g = build_graph(&t, &opts).unwrap();
    assert_eq!(g.node_ids(), vec!["c".to_string()]);
    assert_eq!(g.node("c"), Some(&attrs([("attr", "val")])));
}

#[test]
fn builder_edge_attr_selection() {
    let t = table(&[("a", "b", 0.1), ("b", "c", 0.2)]);

    let all = build_graph(&t, &BuildOptions::default()).unwrap();
    assert_eq!(all.edge_attr("a", "b", "weight"), Some(&AttrValue::Float(0.1)));

    let none = build_graph(
        &t,
        &BuildOptions {
            edge_attrs: EdgeAttrSelection::none(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(none.edge("a", "b").unwrap().is_empty());

    let err = build_graph(
        &t,
        &BuildOptions {
            edge_attrs: EdgeAttrSelection::Columns(vec!["wt".into()]),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column } if column == "wt"));
}

#[test]
fn builder_threshold_prunes_strictly_lighter_edges() {
    let t = table(&[("a", "b", 0.1), ("b", "c", 0.2)]);
    let opts = BuildOptions {
        weight_attr: Some("weight".into()),
        weight_threshold: Some(0.2),
        ..Default::default()
    };
    let g = build_graph(&t, &opts).unwrap();
    assert_eq!(g.node_count(), 3);
    assert!(!g.has_edge("a", "b"));
    assert!(g.has_edge("b", "c"));
}

#[test]
fn builder_threshold_needs_a_weight() {
    let t = table(&[("a", "b", 0.1)]);
    let opts = BuildOptions {
        weight_threshold: Some(0.2),
        ..Default::default()
    };
    assert!(matches!(
        build_graph(&t, &opts),
        Err(Error::ThresholdWithoutWeight)
    ));
}

#[test]
fn builder_drops_isolated_nodes_after_pruning() {
    let t = table(&[("a", "b", 0.1), ("b", "c", 0.2)]);
    let opts = BuildOptions {
        node_attrs: node_attrs(&[("d", attrs([("extra", true)]))]),
        include_missing_attr_nodes: true,
        weight_attr: Some("weight".into()),
        weight_threshold: Some(0.15),
        drop_isolated: true,
        ..Default::default()
    };
    let g = build_graph(&t, &opts).unwrap();
    assert_eq!(g.node_ids(), vec!["b".to_string(), "c".to_string()]);
}

#[test]
fn builder_skips_self_loop_rows_and_merges_duplicates() {
    let t = table(&[("a", "a", 1.0), ("a", "b", 0.1), ("b", "a", 0.7)]);
    let g = build_graph(&t, &BuildOptions::default()).unwrap();
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge_attr("a", "b", "weight"), Some(&AttrValue::Float(0.7)));
}

#[test]
fn builder_rejects_null_endpoints() {
    let mut t = EdgeTable::new(["source", "target"]);
    t.push_row([AttrValue::from("a"), AttrValue::Null]);
    let err = build_graph(&t, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidEndpoint { row: 0, ref column } if column == "target"));
}

#[test]
fn builder_stringifies_numeric_endpoints() {
    let mut t = EdgeTable::new(["source", "target"]);
    t.push_row([1, 2]);
    let g = build_graph(&t, &BuildOptions::default()).unwrap();
    assert!(g.has_edge("1", "2"));
}

use combograph_core::{ComboOptions, EmptyAttrAction, Graph, attrs, partition};
use combograph_layout::{Point, PositionMap};
use combograph_render::scale::size_to_r;
use combograph_render::{ComboLayers, ComposeOptions, Drawing, Error, generate_combo_layers};
use indexmap::IndexMap;

fn teams() -> Graph {
    let mut g = Graph::new();
    g.set_node("a", attrs([("team", "uno")]));
    g.set_node("b", attrs([("team", "uno")]));
    g.set_node("c", attrs([("team", "dos")]));
    g.set_node("d", attrs([("team", "uno")]));
    g.set_edge("a", "b", attrs([("weight", 1.0)]));
    g.set_edge("b", "d", attrs([("weight", 2.0)]));
    g.set_edge("a", "c", attrs([("weight", 3.0)]));
    g
}

fn at(entries: &[(&str, (f64, f64))]) -> PositionMap {
    entries
        .iter()
        .map(|(k, p)| (k.to_string(), Point::from(*p)))
        .collect()
}

// spreads nodes along a diagonal so interiors have a known extent
fn diagonal(g: &Graph) -> PositionMap {
    g.nodes()
        .enumerate()
        .map(|(i, id)| (id.to_string(), Point::new(i as f64, -(i as f64))))
        .collect()
}

fn names(drawings: &[Drawing]) -> Vec<&str> {
    drawings.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn drawings_follow_group_order() {
    let p = partition(&teams(), &ComboOptions::new("team").with_weight_attr("weight")).unwrap();
    let pos = at(&[("uno", (100.0, 100.0)), ("dos", (400.0, 300.0))]);
    let layers = ComboLayers::with_defaults(Some("weight"));

    let out = generate_combo_layers(
        &p.inter,
        &p.intra,
        &pos,
        &diagonal,
        &layers,
        &ComposeOptions::default(),
    )
    .unwrap();

    assert_eq!(
        names(&out),
        [
            "combo_edges",
            "combo_nodes",
            "edges",
            "nodes",
            "combo_nodes",
            "nodes"
        ]
    );
    let combo_edge: Vec<_> = out[0].segments().collect();
    assert_eq!(combo_edge.len(), 1);
    assert_eq!(combo_edge[0].source, "dos");
    assert_eq!((combo_edge[0].x1, combo_edge[0].y1), (400.0, 300.0));
    assert_eq!((combo_edge[0].x2, combo_edge[0].y2), (100.0, 100.0));
}

#[test]
fn interiors_stay_inside_their_super_node() {
    let p = partition(&teams(), &ComboOptions::new("team")).unwrap();
    let pos = at(&[("uno", (100.0, 100.0)), ("dos", (400.0, 300.0))]);
    let opts = ComposeOptions::default();
    let out = generate_combo_layers(
        &p.inter,
        &p.intra,
        &pos,
        &diagonal,
        &ComboLayers::with_defaults(None),
        &opts,
    )
    .unwrap();

    let uno = out[1].circles().next().unwrap();
    let expected_r = size_to_r(opts.combo_size(3));
    assert!((uno.r - expected_r).abs() < 1e-9);
    assert_eq!((uno.x, uno.y), (100.0, 100.0));

    let members: Vec<_> = out[3].circles().collect();
    assert_eq!(members.len(), 3);
    for m in &members {
        let dist = ((m.x - uno.x).powi(2) + (m.y - uno.y).powi(2)).sqrt();
        assert!(dist <= uno.r, "{} at {dist} escapes radius {}", m.id, uno.r);
    }
    // the farthest member reaches the scaled rim along each axis
    let reach = uno.r * opts.inner_graph_scale_factor;
    assert!((members[2].x - (100.0 + reach)).abs() < 1e-9);
    assert!((members[2].y - (100.0 - reach)).abs() < 1e-9);
}

#[test]
fn promoted_singletons_are_drawn_as_plain_nodes() {
    let mut g = teams();
    g.set_edge("c", "e", attrs([("weight", 1.0)]));
    let opts = ComboOptions::new("team").with_empty_attr_action(EmptyAttrAction::Promote);
    let p = partition(&g, &opts).unwrap();
    let promoted = combograph_core::promoted_group_value("e");
    let pos = at(&[
        ("uno", (0.0, 0.0)),
        ("dos", (50.0, 0.0)),
        (promoted.as_str(), (25.0, 40.0)),
    ]);

    let out = generate_combo_layers(
        &p.inter,
        &p.intra,
        &pos,
        &diagonal,
        &ComboLayers::with_defaults(None),
        &ComposeOptions::default(),
    )
    .unwrap();

    let last = out.last().unwrap();
    assert_eq!(last.name, "nodes");
    let circle = last.circles().next().unwrap();
    assert_eq!(circle.id, "e");
    assert_eq!((circle.x, circle.y), (25.0, 40.0));
    assert_eq!(circle.r, size_to_r(50.0));
    assert_eq!(circle.fill.as_deref(), Some("black"));
    assert_eq!(out.iter().filter(|d| d.name == "combo_nodes").count(), 2);
}

#[test]
fn empty_groups_are_skipped() {
    let mut intra: IndexMap<String, Graph> = IndexMap::new();
    intra.insert("ghost".to_string(), Graph::new());
    let mut solo = Graph::new();
    solo.ensure_node("x");
    intra.insert("solo".to_string(), solo);
    let mut inter = Graph::new();
    inter.ensure_node("ghost");
    inter.ensure_node("solo");

    let out = generate_combo_layers(
        &inter,
        &intra,
        &at(&[("solo", (1.0, 1.0))]),
        &diagonal,
        &ComboLayers::with_defaults(None),
        &ComposeOptions::default(),
    )
    .unwrap();
    assert_eq!(names(&out), ["combo_nodes", "nodes"]);
}

#[test]
fn a_lone_member_sits_at_its_super_node_centre() {
    let p = partition(&teams(), &ComboOptions::new("team")).unwrap();
    assert_eq!(p.intra["dos"].node_count(), 1);
    let pos = at(&[("uno", (100.0, 100.0)), ("dos", (400.0, 300.0))]);

    let out = generate_combo_layers(
        &p.inter,
        &p.intra,
        &pos,
        &diagonal,
        &ComboLayers::with_defaults(None),
        &ComposeOptions::default(),
    )
    .unwrap();

    let c = out
        .iter()
        .filter(|d| d.name == "nodes")
        .flat_map(|d| d.circles())
        .find(|c| c.id == "c")
        .unwrap();
    assert_eq!((c.x, c.y), (400.0, 300.0));
}

#[test]
fn groups_need_a_position() {
    let p = partition(&teams(), &ComboOptions::new("team")).unwrap();
    assert_eq!(p.inter.edge_count(), 1);
    let err = generate_combo_layers(
        &p.inter,
        &p.intra,
        &at(&[("uno", (0.0, 0.0))]),
        &diagonal,
        &ComboLayers::with_defaults(None),
        &ComposeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingComboPosition { ref group } if group == "dos"));
}

#[test]
fn empty_groups_need_no_position() {
    let mut intra = IndexMap::new();
    intra.insert("ghost".to_string(), Graph::new());
    let mut inter = Graph::new();
    inter.ensure_node("ghost");

    let out = generate_combo_layers(
        &inter,
        &intra,
        &PositionMap::new(),
        &diagonal,
        &ComboLayers::with_defaults(None),
        &ComposeOptions::default(),
    )
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn larger_groups_get_larger_super_nodes() {
    let opts = ComposeOptions::default();
    let sizes: Vec<f64> = (0..=30).map(|n| opts.combo_size(n)).collect();
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(sizes[0], 36.0);
    assert_eq!(sizes[25], 32400.0);
    assert_eq!(sizes[30], 32400.0);
}

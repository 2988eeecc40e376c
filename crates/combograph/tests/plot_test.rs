use combograph::Layout as _;
use combograph::layout::{FruchtermanReingold, Precomputed, WithFallback};
use combograph::{AttrValue, EmptyAttrAction, Graph, PlotOptions, Plotter, Point, attrs};

fn teams() -> Graph {
    let mut g = Graph::new();
    for (id, team) in [("a", "uno"), ("b", "uno"), ("c", "dos"), ("d", "dos"), ("e", "tres")] {
        g.set_node(id, attrs([("team", team)]));
    }
    g.set_edge("a", "b", attrs([("weight", 0.5)]));
    g.set_edge("b", "c", attrs([("weight", 1.0)]));
    g.set_edge("c", "d", attrs([("weight", 2.0)]));
    g.set_edge("d", "e", attrs([("weight", 1.5)]));
    g
}

fn fast(options: PlotOptions) -> Plotter {
    let seed = options.layout_seed;
    Plotter::new(options).with_layout(move |g: &Graph| {
        FruchtermanReingold::default()
            .with_seed(seed)
            .layout(g)
    })
}

#[test]
fn flat_chart_draws_edges_under_nodes_inside_the_canvas() {
    let chart = fast(PlotOptions::default().with_weight_attr("weight"))
        .plot(&teams())
        .unwrap();
    let names: Vec<&str> = chart.drawings.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["edges", "nodes"]);

    let circles: Vec<_> = chart.drawings[1].circles().collect();
    assert_eq!(circles.len(), 5);
    for c in circles {
        assert!((0.0..=800.0).contains(&c.x), "{} x={}", c.id, c.x);
        assert!((0.0..=600.0).contains(&c.y), "{} y={}", c.id, c.y);
    }
}

fn partial_positions() -> (Graph, Precomputed) {
    let pos = [("a", Point::new(0.0, 0.0)), ("b", Point::new(1.0, 1.0))]
        .into_iter()
        .map(|(k, p)| (k.to_string(), p))
        .collect();
    let mut g = Graph::new();
    g.set_edge("a", "b", Default::default());
    g.set_edge("b", "c", Default::default());
    (g, Precomputed(pos))
}

#[test]
fn gaps_in_a_custom_layout_pass_through() {
    let (g, layout) = partial_positions();
    let chart = Plotter::new(PlotOptions::default())
        .with_layout(layout)
        .plot(&g)
        .unwrap();

    let circles: Vec<_> = chart.drawings[1].circles().collect();
    assert!(circles.iter().any(|c| c.id == "c"));
    for c in circles {
        assert_eq!(c.x.is_finite(), c.id != "c", "{} x={}", c.id, c.x);
    }
}

#[test]
fn gaps_in_a_custom_layout_can_fall_back() {
    let (g, layout) = partial_positions();
    let chart = Plotter::new(PlotOptions::default())
        .with_layout(WithFallback::new(layout, FruchtermanReingold::default()))
        .plot(&g)
        .unwrap();

    let circles: Vec<_> = chart.drawings[1].circles().collect();
    assert!(!circles.is_empty());
    assert!(circles.iter().all(|c| c.x.is_finite() && c.y.is_finite()));
}

#[test]
fn precomputed_positions_map_onto_the_canvas() {
    let pos = [("a", Point::new(0.0, 0.0)), ("b", Point::new(1.0, 1.0))]
        .into_iter()
        .map(|(k, p)| (k.to_string(), p))
        .collect();
    let mut g = Graph::new();
    g.set_edge("a", "b", Default::default());

    let chart = Plotter::new(PlotOptions::default())
        .with_layout(Precomputed(pos))
        .plot(&g)
        .unwrap();
    let circles: Vec<_> = chart.drawings[1].circles().collect();
    assert_eq!((circles[0].x, circles[0].y), (0.0, 0.0));
    assert!((circles[1].x - 800.0).abs() < 1e-9);
    assert!((circles[1].y - 600.0).abs() < 1e-9);
}

#[test]
fn padding_keeps_nodes_off_the_edge() {
    let pos = [("a", Point::new(0.0, 0.0)), ("b", Point::new(1.0, 1.0))]
        .into_iter()
        .map(|(k, p)| (k.to_string(), p))
        .collect();
    let mut g = Graph::new();
    g.set_edge("a", "b", Default::default());

    let opts = PlotOptions::default().with_size(400.0, 400.0).with_padding(20.0);
    let chart = Plotter::new(opts)
        .with_layout(Precomputed(pos))
        .plot(&g)
        .unwrap();
    let circles: Vec<_> = chart.drawings[1].circles().collect();
    assert_eq!((circles[0].x, circles[0].y), (20.0, 20.0));
    assert_eq!((circles[1].x, circles[1].y), (380.0, 380.0));
}

#[test]
fn combo_chart_starts_with_inter_group_edges() {
    let opts = PlotOptions::default()
        .with_weight_attr("weight")
        .with_combo_group_by("team");
    let chart = fast(opts).plot(&teams()).unwrap();

    assert_eq!(chart.drawings[0].name, "combo_edges");
    let supers: Vec<String> = chart
        .drawings
        .iter()
        .filter(|d| d.name == "combo_nodes")
        .flat_map(|d| d.circles().map(|c| c.id.clone()))
        .collect();
    assert_eq!(supers, ["uno", "dos", "tres"]);
    // uno-dos and dos-tres
    assert_eq!(chart.drawings[0].segments().count(), 2);
}

#[test]
fn promoted_nodes_render_without_a_super_node() {
    let mut g = teams();
    g.set_edge("e", "loner", attrs([("weight", 1.0)]));
    let opts = PlotOptions::default()
        .with_weight_attr("weight")
        .with_combo_group_by("team")
        .with_empty_combo_attr_action(EmptyAttrAction::Promote);
    let chart = fast(opts).plot(&g).unwrap();

    let supers = chart
        .drawings
        .iter()
        .filter(|d| d.name == "combo_nodes")
        .count();
    assert_eq!(supers, 3);
    let last = chart.drawings.last().unwrap();
    assert_eq!(last.circles().next().unwrap().id, "loner");
}

#[test]
fn temporal_attributes_need_a_format() {
    let mut g = teams();
    let born = chrono::NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
    g.node_mut("a").unwrap().insert("born".into(), AttrValue::from(born));

    let mut opts = PlotOptions::default();
    opts.non_serializable_datetime_format = None;
    let err = fast(opts).plot(&g).unwrap_err();
    assert!(matches!(
        err,
        combograph::Error::Core(combograph::core::Error::NonSerializableTemporal { ref attrs })
            if attrs == &["born".to_string()]
    ));

    let mut opts = PlotOptions::default();
    opts.node_args
        .insert("tooltip_attrs".into(), serde_json::json!(["born"]));
    let chart = fast(opts).plot(&g).unwrap();
    let a = chart.drawings[1].circles().find(|c| c.id == "a").unwrap();
    assert!(a.tooltip.contains(&("born".to_string(), "01 Feb 2020".to_string())));

    // the caller's graph keeps its date
    assert_eq!(g.node_attr("a", "born"), Some(&AttrValue::Date(born)));
}

#[test]
fn chart_serializes_to_json_and_svg() {
    let chart = fast(PlotOptions::default().with_title("Teams"))
        .plot(&teams())
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
    assert_eq!(json["width"], 800.0);
    assert_eq!(json["title"], "Teams");
    assert_eq!(json["drawings"][1]["name"], "nodes");
    assert_eq!(json["drawings"][1]["marks"][0]["type"], "circles");

    let svg = chart.to_svg();
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let circles = doc
        .descendants()
        .filter(|n| n.has_tag_name("circle"))
        .count();
    assert_eq!(circles, 5);
}

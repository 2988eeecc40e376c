use combograph::raster::{RasterError, RasterOptions};
use combograph::{PlotOptions, Plotter};
use combograph_core::{
    Attrs, BuildOptions, EdgeAggregation, EdgeTable, EmptyAttrAction, build_graph, partition,
};
use combograph_layout::{Precomputed, WithFallback, defaults, positions_from_json};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Core(combograph_core::Error),
    Layout(combograph_layout::Error),
    Plot(combograph::Error),
    Raster(RasterError),
    MissingGroupBy,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Plot(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::MissingGroupBy => write!(f, "partition needs --group-by (or combo_group_by)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<combograph_core::Error> for CliError {
    fn from(value: combograph_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<combograph_layout::Error> for CliError {
    fn from(value: combograph_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<combograph::Error> for CliError {
    fn from(value: combograph::Error) -> Self {
        Self::Plot(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Partition,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    out: Option<String>,
    config: Option<String>,

    source: Option<String>,
    target: Option<String>,
    weight: Option<String>,
    threshold: Option<f64>,
    drop_isolated: bool,
    include_missing_nodes: bool,

    group_by: Option<String>,
    empty_action: Option<EmptyAttrAction>,
    combo_threshold: Option<f64>,
    aggregations: Vec<EdgeAggregation>,

    width: Option<f64>,
    height: Option<f64>,
    padding: Option<f64>,
    title: Option<String>,
    seed: Option<u64>,
}

/// The JSON document read from the input.
#[derive(Debug, Deserialize)]
struct InputDoc {
    edges: EdgeTable,
    #[serde(default)]
    nodes: IndexMap<String, Attrs>,
    /// Node positions in flat mode, group positions in combo mode.
    #[serde(default)]
    positions: Option<serde_json::Value>,
}

fn usage() -> &'static str {
    "combograph-cli\n\
\n\
USAGE:\n\
  combograph-cli partition [--pretty] [<graph opts>] [--group-by <attr>] [--empty-action drop|group|promote] [--combo-threshold <w>] [--aggregate <name>=<fn>(<attr>)]... [<path>|-]\n\
  combograph-cli [render] [--format svg|png] [--scale <n>] [--background <css-color>] [--out <path>] [<graph opts>] [<chart opts>] [<path>|-]\n\
\n\
GRAPH OPTS:\n\
  --source <col> --target <col> --weight <col> --threshold <w> --drop-isolated --include-missing-nodes\n\
\n\
CHART OPTS:\n\
  --group-by <attr> --empty-action drop|group|promote --combo-threshold <w>\n\
  --aggregate <name>=sum|count|mean|min|max(<attr>)  (repeatable)\n\
  --width <px> --height <px> --padding <px> --title <text> --seed <n> --config <plot-options.json>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is JSON: {\"edges\": [{\"source\": .., \"target\": .., ..}], \"nodes\": {\"<id>\": {..}}, \"positions\": {\"<id>\": [x, y]}}.\n\
  - partition prints {\"inter\": .., \"intra\": ..} as node-link JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    fn value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
        it.next().ok_or(CliError::Usage(usage()))
    }
    fn number<'a, T: FromStr>(it: &mut impl Iterator<Item = &'a String>) -> Result<T, CliError> {
        value(it)?.parse::<T>().map_err(|_| CliError::Usage(usage()))
    }

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "partition" => args.command = Command::Partition,
            "--pretty" => args.pretty = true,
            "--drop-isolated" => args.drop_isolated = true,
            "--include-missing-nodes" => args.include_missing_nodes = true,
            "--format" => {
                args.render_format = value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = number(&mut it)?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => args.out = Some(value(&mut it)?.clone()),
            "--config" => args.config = Some(value(&mut it)?.clone()),
            "--source" => args.source = Some(value(&mut it)?.clone()),
            "--target" => args.target = Some(value(&mut it)?.clone()),
            "--weight" => args.weight = Some(value(&mut it)?.clone()),
            "--threshold" => args.threshold = Some(number(&mut it)?),
            "--group-by" => args.group_by = Some(value(&mut it)?.clone()),
            "--empty-action" => {
                let action = value(&mut it)?
                    .parse::<EmptyAttrAction>()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.empty_action = Some(action);
            }
            "--combo-threshold" => args.combo_threshold = Some(number(&mut it)?),
            "--aggregate" => {
                let agg = EdgeAggregation::parse(value(&mut it)?)
                    .map_err(|_| CliError::Usage(usage()))?;
                args.aggregations.push(agg);
            }
            "--width" => args.width = Some(number(&mut it)?),
            "--height" => args.height = Some(number(&mut it)?),
            "--padding" => args.padding = Some(number(&mut it)?),
            "--title" => args.title = Some(value(&mut it)?.clone()),
            "--seed" => args.seed = Some(number(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// `--config` first, then individual flags on top.
fn plot_options(args: &Args) -> Result<PlotOptions, CliError> {
    let mut opts = match &args.config {
        Some(path) => serde_json::from_str::<PlotOptions>(&std::fs::read_to_string(path)?)?,
        None => PlotOptions::default(),
    };
    if let Some(w) = &args.weight {
        opts.weight_attr = Some(w.clone());
    }
    if let Some(g) = &args.group_by {
        opts.combo_group_by = Some(g.as_str().into());
    }
    if let Some(action) = args.empty_action {
        opts.empty_combo_attr_action = action;
    }
    if let Some(t) = args.combo_threshold {
        opts.combo_edge_weight_threshold = Some(t);
    }
    opts.combo_edge_aggregations.extend(args.aggregations.iter().cloned());
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    if let Some(p) = args.padding {
        opts.padding = Some(p);
    }
    if let Some(t) = &args.title {
        opts.title = Some(t.clone());
    }
    if let Some(s) = args.seed {
        opts.layout_seed = s;
    }
    Ok(opts)
}

fn build_options(args: &Args, opts: &PlotOptions, nodes: IndexMap<String, Attrs>) -> BuildOptions {
    let defaults = BuildOptions::default();
    BuildOptions {
        source: args.source.clone().unwrap_or(defaults.source),
        target: args.target.clone().unwrap_or(defaults.target),
        node_attrs: nodes,
        weight_attr: opts.weight_attr.clone(),
        weight_threshold: args.threshold,
        include_missing_attr_nodes: args.include_missing_nodes,
        drop_isolated: args.drop_isolated,
        ..defaults
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc: InputDoc = serde_json::from_str(&text)?;
    let opts = plot_options(&args)?;
    let graph = build_graph(&doc.edges, &build_options(&args, &opts, doc.nodes))?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built graph"
    );

    match args.command {
        Command::Partition => {
            let Some(combo) = opts.combo_options().filter(|_| opts.is_combo()) else {
                return Err(CliError::MissingGroupBy);
            };
            let parts = partition(&graph, &combo)?;
            write_json(&parts, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let seed = opts.layout_seed;
            let weight_attr = opts.weight_attr.clone();
            let combo = opts.is_combo();
            let mut plotter = Plotter::new(opts);
            if let Some(v) = &doc.positions {
                let fixed = Precomputed(positions_from_json(v)?);
                plotter = if combo {
                    plotter.with_combo_layout(WithFallback::new(
                        fixed,
                        defaults::inter_combo_layout(weight_attr.as_deref(), seed),
                    ))
                } else {
                    plotter.with_layout(WithFallback::new(
                        fixed,
                        defaults::network_layout(weight_attr.as_deref(), seed),
                    ))
                };
            }
            let chart = plotter.plot(&graph)?;

            match args.render_format {
                RenderFormat::Svg => write_text(&chart.to_svg(), args.out.as_deref())?,
                RenderFormat::Png => {
                    let raster = RasterOptions {
                        scale: args.render_scale,
                        background: args.background.clone(),
                    };
                    let bytes = chart.to_png(&raster)?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    if out == "-" {
                        use std::io::Write;
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

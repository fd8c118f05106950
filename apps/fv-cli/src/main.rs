use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use fv_core::{CanvasSize, format_coord};
use fv_graph::{Graph, HighlightSet, LoadError, NodeRole, PayloadFormat, ResultKind};
use fv_layout::{FrameClock, SimConfig};
use fv_render::{NetworkView, RenderError, RenderStyle, Scene, SvgSurface, edge_paths, label_for};

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(about = "FlowViz CLI - water network layout and rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network file
    Validate {
        /// Path to the network JSON or YAML file
        graph_path: PathBuf,
    },
    /// Summarize a network file
    Info {
        /// Path to the network JSON or YAML file
        graph_path: PathBuf,
    },
    /// Lay out a network and write it as SVG or JSON
    Layout(LayoutArgs),
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Path to the network JSON or YAML file
    graph_path: PathBuf,
    /// Optimization result whose edges are highlighted
    #[arg(long)]
    highlight: Option<PathBuf>,
    /// Kind of the highlight result file
    #[arg(long, value_enum, default_value_t = HighlightKind::MaxFlow)]
    highlight_kind: HighlightKind,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,
    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Simulation and style config (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of ticks (defaults to running until converged)
    #[arg(long)]
    ticks: Option<usize>,
    /// Canvas width
    #[arg(long)]
    width: Option<f64>,
    /// Canvas height
    #[arg(long)]
    height: Option<f64>,
    /// Title drawn above the canvas
    #[arg(long)]
    title: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum HighlightKind {
    MaxFlow,
    Mst,
    ShortestPath,
}

impl From<HighlightKind> for ResultKind {
    fn from(kind: HighlightKind) -> Self {
        match kind {
            HighlightKind::MaxFlow => ResultKind::MaxFlow,
            HighlightKind::Mst => ResultKind::Mst,
            HighlightKind::ShortestPath => ResultKind::ShortestPath,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

/// Optional config file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CliConfig {
    simulation: SimConfig,
    style: RenderStyle,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { graph_path } => cmd_validate(&graph_path),
        Commands::Info { graph_path } => cmd_info(&graph_path),
        Commands::Layout(args) => cmd_layout(&args),
    }
}

fn cmd_validate(graph_path: &Path) -> CliResult<()> {
    println!("Validating network: {}", graph_path.display());
    let graph = fv_graph::load_graph(graph_path)?;
    println!(
        "✓ Network is valid ({} nodes, {} edges)",
        graph.nodes().len(),
        graph.edges().len()
    );
    Ok(())
}

fn cmd_info(graph_path: &Path) -> CliResult<()> {
    let graph = fv_graph::load_graph(graph_path)?;
    if graph.is_empty() {
        println!("Network is empty");
        return Ok(());
    }

    println!("Nodes: {}", graph.nodes().len());
    for role in NodeRole::ALL {
        let count = graph.nodes().iter().filter(|n| n.role == role).count();
        if count > 0 {
            println!("  {}: {}", role.display_name(), count);
        }
    }
    println!("Edges: {}", graph.edges().len());
    let parallel = graph.edges().iter().filter(|e| e.parallel_index > 0).count();
    if parallel > 0 {
        println!("  repeated connections: {}", parallel);
    }

    let names = |nodes: Vec<&str>| if nodes.is_empty() { "-".to_string() } else { nodes.join(", ") };
    println!("Sources: {}", names(graph.sources().map(|n| n.name.as_str()).collect()));
    println!("Sinks: {}", names(graph.sinks().map(|n| n.name.as_str()).collect()));
    Ok(())
}

fn load_config(path: Option<&Path>) -> CliResult<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let config = match PayloadFormat::from_path(path) {
        PayloadFormat::Yaml => {
            serde_yaml::from_str(&text).map_err(|e| CliError::Config(e.to_string()))?
        }
        PayloadFormat::Json => {
            serde_json::from_str(&text).map_err(|e| CliError::Config(e.to_string()))?
        }
    };
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn cmd_layout(args: &LayoutArgs) -> CliResult<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.simulation.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.simulation.canvas.height = height;
    }
    if let Some(title) = &args.title {
        config.style.title = title.clone();
    }
    let canvas = config.simulation.canvas;
    let max_ticks = args
        .ticks
        .unwrap_or_else(|| config.simulation.ticks_to_converge());

    let graph = fv_graph::load_graph(&args.graph_path)?;
    let highlights = match &args.highlight {
        Some(path) => fv_graph::load_highlights(path, args.highlight_kind.into())?,
        None => HighlightSet::new(),
    };

    let clock = FrameClock::new();
    let mut view = NetworkView::new(&clock, config.simulation, config.style);
    view.set_highlights(highlights);
    view.load(graph)?;

    // Headless: drive the clock ourselves and draw once at the end.
    let mut ticks = 0;
    while ticks < max_ticks && view.simulation().is_some_and(|s| !s.is_converged()) {
        clock.fire();
        ticks += view.advance();
    }
    tracing::info!(ticks, "layout finished");

    let rendered = match args.format {
        OutputFormat::Svg => {
            let mut svg = SvgSurface::new(canvas);
            view.draw(&mut svg)?;
            svg.finish()
        }
        OutputFormat::Json => serde_json::to_string_pretty(&layout_dump(&view, canvas)?)?,
    };
    view.teardown();

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct LayoutDump {
    width: f64,
    height: f64,
    alpha: f64,
    ticks: u64,
    nodes: Vec<NodeDump>,
    edges: Vec<EdgeDump>,
}

#[derive(Serialize)]
struct NodeDump {
    id: String,
    role: NodeRole,
    x: f64,
    y: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    source: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    sink: bool,
}

#[derive(Serialize)]
struct EdgeDump {
    source: String,
    target: String,
    label: String,
    highlighted: bool,
    path: String,
}

fn layout_dump(view: &NetworkView, canvas: CanvasSize) -> CliResult<LayoutDump> {
    let empty = Graph::default();
    let graph = view.graph().unwrap_or(&empty);
    let positions = view.simulation().map(|s| s.positions()).unwrap_or(&[]);
    let scene = Scene {
        graph,
        positions,
        highlights: view.highlights(),
    };
    let paths = edge_paths(&scene, view.style())?;

    let round = |v: f64| format_coord(v).parse::<f64>().unwrap_or(v);
    let nodes = graph
        .nodes()
        .iter()
        .map(|n| NodeDump {
            id: n.name.clone(),
            role: n.role,
            x: round(positions[n.id.index()].x),
            y: round(positions[n.id.index()].y),
            source: n.is_source,
            sink: n.is_sink,
        })
        .collect();
    let edges = graph
        .edges()
        .iter()
        .zip(&paths)
        .map(|(e, path)| {
            let (source, target) = graph.endpoint_names(e);
            EdgeDump {
                source: source.to_string(),
                target: target.to_string(),
                label: label_for(&e.attrs),
                highlighted: view.highlights().contains_edge(graph, e),
                path: path.svg_d(),
            }
        })
        .collect();

    Ok(LayoutDump {
        width: canvas.width,
        height: canvas.height,
        alpha: view.simulation().map(|s| s.alpha()).unwrap_or(0.0),
        ticks: view.simulation().map(|s| s.tick_count()).unwrap_or(0),
        nodes,
        edges,
    })
}

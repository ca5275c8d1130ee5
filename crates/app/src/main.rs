use std::path::PathBuf;

use clap::{Parser, Subcommand};
use helto_video_params_core::{
    frame_count, AppConfig, AspectRatio, ControllingSide, DimensionCalculator, NodeRegistry,
    Orientation, ParamsError, RoundingPolicy,
};
use tracing_subscriber::EnvFilter;

fn main() -> helto_video_params_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Nodes => run_nodes(&config),
        Commands::Schema { node } => run_schema(&config, node.as_deref()),
        Commands::Dimensions {
            ratio,
            side,
            long,
            orientation,
            rounding,
        } => {
            let rounding = rounding.unwrap_or(config.dimensions.rounding);
            run_dimensions(ratio, side, long, orientation, rounding)
        }
        Commands::Frames { fps, duration } => {
            println!("{}", frame_count(fps, duration));
            Ok(())
        }
        Commands::Evaluate { node, set } => run_evaluate(&config, &node, &set),
    }
}

fn run_nodes(config: &AppConfig) -> helto_video_params_core::Result<()> {
    let registry = NodeRegistry::builtin(config)?;
    for entry in registry.entries() {
        println!(
            "{:<24} {:<30} {}",
            entry.name(),
            entry.display_name(),
            entry.schema().category
        );
    }
    Ok(())
}

fn run_schema(config: &AppConfig, node: Option<&str>) -> helto_video_params_core::Result<()> {
    let registry = NodeRegistry::builtin(config)?;
    let json = match node {
        Some(name) => {
            let entry = registry
                .get(name)
                .ok_or_else(|| ParamsError::UnknownNode(name.to_string()))?;
            serde_json::to_string_pretty(entry.schema())?
        }
        None => {
            let schemas: Vec<_> = registry.entries().map(|entry| entry.schema()).collect();
            serde_json::to_string_pretty(&schemas)?
        }
    };
    println!("{json}");
    Ok(())
}

fn run_dimensions(
    ratio: AspectRatio,
    side: u32,
    long: bool,
    orientation: Option<Orientation>,
    rounding: RoundingPolicy,
) -> helto_video_params_core::Result<()> {
    let orientation = orientation
        .or_else(|| ratio.orientation())
        .unwrap_or_default();
    tracing::info!(%ratio, side, long, %orientation, ?rounding, "computing dimensions");

    let dims = DimensionCalculator::new(rounding).compute(
        side,
        ratio,
        orientation,
        ControllingSide::from_is_long(long),
    );
    println!("{}x{}", dims.width, dims.height);
    Ok(())
}

fn run_evaluate(
    config: &AppConfig,
    node: &str,
    assignments: &[String],
) -> helto_video_params_core::Result<()> {
    let registry = NodeRegistry::builtin(config)?;
    let entry = registry
        .get(node)
        .ok_or_else(|| ParamsError::UnknownNode(node.to_string()))?;

    let mut inputs = entry.schema().default_inputs();
    for assignment in assignments {
        let (name, value) = entry.schema().parse_assignment(assignment)?;
        inputs.set(name, value);
    }

    let outputs = registry.evaluate(node, &inputs)?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Video parameter calculator nodes", long_about = None)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered node.
    Nodes,
    /// Print the input/output schema of one node, or of all nodes.
    Schema {
        /// Node name, for example `HeltoVideoParams`.
        node: Option<String>,
    },
    /// Compute pixel dimensions for an aspect ratio.
    Dimensions {
        /// Aspect ratio as `W:H`.
        #[arg(short, long, default_value = "16:9")]
        ratio: AspectRatio,
        /// Length of the controlling side in pixels.
        #[arg(short, long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(64..=8192))]
        side: u32,
        /// Treat `--side` as the long side instead of the short side.
        #[arg(short, long)]
        long: bool,
        /// `landscape` or `portrait`. Defaults to the ratio's own orientation.
        #[arg(short, long)]
        orientation: Option<Orientation>,
        /// `nearest` or `floor`. Overrides the configured policy.
        #[arg(long)]
        rounding: Option<RoundingPolicy>,
    },
    /// Compute the frame count for a clip.
    Frames {
        #[arg(short, long, default_value_t = 24.0)]
        fps: f64,
        /// Clip length in seconds.
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        duration: u32,
    },
    /// Run a node with its widget defaults, overridden by `--set name=value`.
    Evaluate {
        node: String,
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
}

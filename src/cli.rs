use clap::Parser;
use std::path::PathBuf;

/// Deployment environments processed when no --cluster override is given.
pub const DEFAULT_CLUSTERS: [&str; 3] = ["orc", "hdl", "hana"];

#[derive(Parser)]
#[command(name = "flowmap")]
#[command(about = "Render per-cluster service dependency graphs from network flow exports")]
pub struct Cli {
    /// Directory containing the {cluster}-outgoing.csv exports
    #[arg(short = 'd', long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory for rendered graph files (defaults to the data directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Cluster to process (repeatable, overrides the built-in list)
    #[arg(long = "cluster")]
    pub clusters: Vec<String>,

    /// Also render an SVG per cluster via the external sfdp layout engine
    #[arg(long)]
    pub svg: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Clusters in the order they are loaded and rendered.
    pub fn cluster_list(&self) -> Vec<String> {
        if self.clusters.is_empty() {
            DEFAULT_CLUSTERS.iter().map(|c| c.to_string()).collect()
        } else {
            self.clusters.clone()
        }
    }
}

mod cli;
mod codenames;
mod flow;
mod graph;
mod types;
mod utils;

use clap::Parser;
use tracing::{debug, info};

use cli::Cli;
use codenames::CodenameTable;
use flow::load_cluster_file;
use graph::{RenderOptions, render_cluster};
use types::{EdgeSet, IpNodeMap};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber - logs go to stderr so they never mix
    // with anything a downstream tool reads from stdout
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let table = CodenameTable::builtin()?;
    let clusters = cli.cluster_list();
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| cli.data_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| anyhow::anyhow!("cannot create output directory: {}", e))?;

    // Load phase. Every cluster's export is scanned before anything is
    // rendered: a destination recorded only by address in one cluster may
    // be named by a record in another, so the address map has to be
    // complete first.
    let mut ip_nodes = IpNodeMap::new();
    let mut cluster_edges: Vec<(String, EdgeSet)> = Vec::new();
    for cluster in &clusters {
        let edges = load_cluster_file(cluster, &cli.data_dir, &table, &mut ip_nodes)?;
        cluster_edges.push((cluster.clone(), edges));
    }
    debug!("address map holds {} resolved endpoints", ip_nodes.len());

    // Render phase.
    let options = RenderOptions {
        output_dir,
        svg: cli.svg,
    };
    for (cluster, edges) in &cluster_edges {
        render_cluster(cluster, edges, &ip_nodes, &options)?;
    }

    info!("done, {} clusters rendered", cluster_edges.len());
    Ok(())
}

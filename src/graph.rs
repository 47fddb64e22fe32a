use crate::types::{EdgeSet, IpNodeMap};
use anyhow::{Context, bail};
use chrono::Utc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub svg: bool,
}

/// Build the directed dependency graph for one cluster.
///
/// A destination that was recorded only by address gets substituted with
/// the name the completed map resolved for it, so flows whose peer was
/// unnamed at load time still point at the right node.
pub fn build_graph(edges: &EdgeSet, ip_nodes: &IpNodeMap) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let mut nodes: BTreeMap<String, NodeIndex> = BTreeMap::new();

    for (source, dest) in edges {
        let source_ix = intern(&mut graph, &mut nodes, source);
        let dest = ip_nodes.get(dest.as_str()).map(String::as_str).unwrap_or(dest);
        let dest_ix = intern(&mut graph, &mut nodes, dest);
        graph.add_edge(source_ix, dest_ix, ());
    }

    graph
}

fn intern(
    graph: &mut DiGraph<String, ()>,
    nodes: &mut BTreeMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(ix) = nodes.get(name) {
        *ix
    } else {
        let ix = graph.add_node(name.to_string());
        nodes.insert(name.to_string(), ix);
        ix
    }
}

/// Emit the graph as DOT source with the sfdp force-directed layout selected.
pub fn write_dot<W: Write>(graph: &DiGraph<String, ()>, mut out: W) -> anyhow::Result<()> {
    writeln!(out, "// generated {}", Utc::now().to_rfc3339())?;
    writeln!(out, "digraph {{")?;
    writeln!(out, "    layout=sfdp;")?;
    for ix in graph.node_indices() {
        // Debug formatting doubles as DOT quoting for the label
        writeln!(out, "    {} [ label = {:?} ]", ix.index(), graph[ix])?;
    }
    for edge in graph.edge_references() {
        writeln!(
            out,
            "    {} -> {}",
            edge.source().index(),
            edge.target().index()
        )?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Write `{cluster}-outgoing.gv`, and an SVG next to it when requested.
pub fn render_cluster(
    cluster: &str,
    edges: &EdgeSet,
    ip_nodes: &IpNodeMap,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    let graph = build_graph(edges, ip_nodes);
    info!(
        "[{}] rendering {} nodes / {} edges",
        cluster,
        graph.node_count(),
        graph.edge_count()
    );

    let mut dot_text = Vec::new();
    write_dot(&graph, &mut dot_text)?;

    let dot_path = options.output_dir.join(format!("{cluster}-outgoing.gv"));
    std::fs::write(&dot_path, &dot_text)
        .with_context(|| format!("failed to write {}", dot_path.display()))?;

    if options.svg {
        let svg_path = options.output_dir.join(format!("{cluster}-outgoing.svg"));
        render_svg(&dot_text, &svg_path)?;
    }

    Ok(())
}

/// Run the DOT source through the external sfdp engine.
fn render_svg(dot_text: &[u8], svg_path: &Path) -> anyhow::Result<()> {
    let mut child = Command::new("sfdp")
        .arg("-Tsvg")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to start the sfdp layout engine (is graphviz installed?)")?;

    child
        .stdin
        .as_mut()
        .context("failed to open stdin of the sfdp process")?
        .write_all(dot_text)?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "sfdp exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    std::fs::write(svg_path, &output.stdout)
        .with_context(|| format!("failed to write {}", svg_path.display()))?;
    Ok(())
}

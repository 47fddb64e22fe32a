use crate::codenames::CodenameTable;
use crate::types::{EdgeSet, FlowRecord, IpNodeMap};
use crate::utils::normalize_pod_name;
use anyhow::Context;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Namespaces carrying operational noise rather than product traffic.
const FILTERED_NAMESPACES: [&str; 2] = ["monitoring", "kube-system"];

/// Read one cluster's flow export and produce its deduplicated edge set,
/// recording resolved addresses into the shared map as a side effect.
///
/// The first row is the exporter's header and is skipped. Rows from
/// infrastructure namespaces are dropped. Anything else that fails to parse
/// is fatal for the whole run.
pub fn load_cluster<R: Read>(
    input: R,
    table: &CodenameTable,
    ip_nodes: &mut IpNodeMap,
) -> anyhow::Result<EdgeSet> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(input);
    let mut edges = EdgeSet::new();
    let mut filtered = 0usize;

    for (i, result) in reader.deserialize::<FlowRecord>().enumerate() {
        if i == 0 {
            // header row
            continue;
        }
        let record =
            result.with_context(|| format!("malformed flow record on line {}", i + 1))?;

        if FILTERED_NAMESPACES.contains(&record.namespace.as_str()) {
            filtered += 1;
            continue;
        }

        let name = normalize_pod_name(&record.source_pod);

        let dest_name = if record.dest_name.is_empty() {
            // No name was exported for this destination; carry the address
            // and let the render phase resolve it once every cluster has
            // been scanned.
            record.source_ip.clone()
        } else {
            ip_nodes.insert(record.source_ip.clone(), record.dest_name.clone());
            record.dest_name.clone()
        };

        let name = table.resolve(&name).to_string();
        let dest_name = table.resolve(&dest_name).to_string();

        // The destination address is recorded against the source-derived
        // name; the export's column layout pairs them this way.
        ip_nodes.insert(record.dest_ip.clone(), name.clone());

        edges.insert((name, dest_name));
    }

    if filtered > 0 {
        debug!("{} records filtered as operational noise", filtered);
    }

    Ok(edges)
}

/// Load `{data_dir}/{cluster}-outgoing.csv`.
pub fn load_cluster_file(
    cluster: &str,
    data_dir: &Path,
    table: &CodenameTable,
    ip_nodes: &mut IpNodeMap,
) -> anyhow::Result<EdgeSet> {
    let path = data_dir.join(format!("{cluster}-outgoing.csv"));
    debug!("[{}] reading {}", cluster, path.display());

    let file = File::open(&path)
        .with_context(|| format!("failed to open flow export {}", path.display()))?;
    let edges = load_cluster(file, table, ip_nodes)?;

    info!("[{}] {} unique flows", cluster, edges.len());
    Ok(edges)
}

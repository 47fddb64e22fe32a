use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of a flow export.
///
/// The exporter's column order is a fixed contract; deserializing into named
/// fields keeps the positional coupling in one place.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowRecord {
    /// Leading export column, not consumed.
    pub _unused: String,
    pub source_ip: String,
    pub namespace: String,
    pub source_pod: String,
    pub dest_ip: String,
    /// May be empty when the exporter could not resolve the destination.
    pub dest_name: String,
}

/// IP address to resolved display name, accumulated across all clusters
/// during the load phase. The last write for a key wins.
pub type IpNodeMap = BTreeMap<String, String>;

/// Deduplicated (source, destination) name pairs for one cluster.
pub type EdgeSet = BTreeSet<(String, String)>;

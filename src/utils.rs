/// Derive a stable workload name from a generated pod name.
///
/// Kubernetes pod names carry a 5-character pod suffix and one or more
/// hex hash segments after the workload name; stripping them collapses
/// replicas of the same workload into a single node.
pub fn normalize_pod_name(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split('-').collect();

    if tokens.last().is_some_and(|t| t.chars().count() == 5) {
        tokens.pop();
    }

    // A token that fails to parse as hex ends the stripping; everything
    // still left is the workload name.
    while let Some(last) = tokens.last() {
        if u128::from_str_radix(last, 16).is_ok() {
            tokens.pop();
        } else {
            break;
        }
    }

    let name = tokens.join("-");
    if name.is_empty() {
        // Everything looked generated; keep the raw name rather than
        // producing an unnamed node.
        raw.to_string()
    } else {
        name
    }
}

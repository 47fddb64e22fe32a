use anyhow::Context;
use regex::Regex;

/// Display names substituted for structured infrastructure hostnames.
///
/// Storage buckets, managed database instances and API servers have
/// high-cardinality generated hostnames that are noise in a dependency
/// graph; this manually curated list compresses them into a handful of
/// semantic categories. The list is ordered: when several patterns match
/// the same input, the one appearing last wins.
const CODENAME_PATTERNS: [(&str, &str); 10] = [
    (r"^hc-.*\.s3\..*\.amazonaws\.com$", "S3 Datalake Storage"),
    (r"^s3\.(.*\.)?amazonaws\.com$", "S3 Storage"),
    (
        r"^([0-9a-f]+-)+[0-9a-f]+\.(.*)hana\..*\.hanacloud\.ondemand\.com$",
        "HANA Cloud Instance",
    ),
    (r"^([0-9a-f]+-)+[0-9a-z]+$", "HANA Cloud Instance"),
    (
        r"^([0-9a-f]+-)+[0-9a-f]+\.files\.hdl\..*\.hanacloud\.ondemand\.com$",
        "HDL Files Instance",
    ),
    (
        r"^([0-9a-f]+-)+[0-9a-f]+\.iq\.hdl\..*\.hanacloud\.ondemand\.com$",
        "HDLRE Writer Instance",
    ),
    (
        r"^([0-9a-f]+-)+[0-9a-f]+-coord\.iq\.hdl\..*\.hanacloud\.ondemand\.com$",
        "HDLRE Coord Instance",
    ),
    (r"^api\..*\.k8s.ondemand.com$", "K8S API Server"),
    (r"^kubernetes\.default\.svc$", "K8S API Server"),
    (
        r"^api(\.gateway)?\.orchestration\..*\.hanacloud.ondemand.com$",
        "Orc K8S API Server",
    ),
];

/// Compiled, ordered codename lookup table.
pub struct CodenameTable {
    patterns: Vec<(Regex, &'static str)>,
}

impl CodenameTable {
    /// Compile the built-in pattern list.
    pub fn builtin() -> anyhow::Result<Self> {
        let mut patterns = Vec::with_capacity(CODENAME_PATTERNS.len());
        for (pattern, label) in CODENAME_PATTERNS {
            let re = Regex::new(pattern)
                .with_context(|| format!("invalid codename pattern '{}'", pattern))?;
            patterns.push((re, label));
        }
        Ok(CodenameTable { patterns })
    }

    /// Map a raw endpoint name to its codename.
    ///
    /// Every pattern is tested in table order and each hit overwrites the
    /// running result, so the last matching entry wins. An input matched by
    /// no pattern passes through unchanged.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.patterns.iter().fold(raw, |current, (re, label)| {
            if matches_prefix(re, raw) { *label } else { current }
        })
    }
}

/// Match-from-start semantics: the expression has to match a prefix of the
/// input, not necessarily all of it.
fn matches_prefix(re: &Regex, input: &str) -> bool {
    re.find(input).is_some_and(|m| m.start() == 0)
}

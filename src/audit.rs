//! Vulnerability triage over raw npm install output.
//!
//! This is a text heuristic, not a structured audit query: it keys off the
//! advisory summary line npm prints after an install. Keeping the detection
//! behind this module means the strategy can move to `npm audit --json`
//! without touching the orchestrator. False negatives are possible if npm
//! changes its output format.

use regex::Regex;
use std::sync::LazyLock;

/// Marker npm prints when the install found no advisories.
const CLEAN_MARKER: &str = "found 0 vulnerabilities";

/// Marker for a client-side failure: the install itself broke, so there is
/// no advisory summary to read. The not-found check downstream owns this case.
const CLIENT_ERROR_MARKER: &str = "npm ERR";

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)found (\d+) vulnerabilit(?:y|ies)")
        .unwrap_or_else(|e| panic!("invalid audit regex: {e}"))
});

/// Result of scanning install output for security advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReport {
    /// Whether the pipeline may proceed to bundling
    pub clean: bool,
    /// Number of advisories found, 0 when clean or unparseable
    pub count: u64,
}

/// Scans combined npm output for an advisory count.
///
/// Clean when the zero-advisory marker is present, or when the output shows a
/// client error (no summary to read). Otherwise the output is treated as
/// carrying one or more advisories and the count is extracted by pattern
/// match, falling back to 0 when the summary line is absent entirely.
pub fn scan(raw: &str) -> AuditReport {
    if raw.contains(CLEAN_MARKER) || raw.contains(CLIENT_ERROR_MARKER) {
        return AuditReport { clean: true, count: 0 };
    }

    let count = COUNT_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    AuditReport { clean: false, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_advisories_is_clean() {
        let report = scan("added 1 package, and audited 2 packages in 1s\n\nfound 0 vulnerabilities\n");
        assert_eq!(report, AuditReport { clean: true, count: 0 });
    }

    #[test]
    fn advisory_count_is_extracted() {
        let report = scan("added 12 packages in 2s\n\nfound 7 vulnerabilities (2 moderate, 5 high)\n");
        assert_eq!(report, AuditReport { clean: false, count: 7 });
    }

    #[test]
    fn singular_advisory_is_extracted() {
        let report = scan("found 1 vulnerability (1 low)\n");
        assert_eq!(report, AuditReport { clean: false, count: 1 });
    }

    #[test]
    fn client_error_defers_to_not_found_handling() {
        let report = scan("npm ERR! code E404\nnpm ERR! 404 Not Found\n");
        assert_eq!(report, AuditReport { clean: true, count: 0 });
    }

    #[test]
    fn missing_summary_is_treated_as_dirty() {
        let report = scan("some unrecognized output");
        assert_eq!(report, AuditReport { clean: false, count: 0 });
    }
}

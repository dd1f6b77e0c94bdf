//! Aggregate statistics over a completed run

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::types::{ProcessResult, Reason};

/// How many valid addresses share a domain
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
    /// Percentage of all valid addresses
    pub share: f64,
}

/// How many invalid addresses were rejected for one reason
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ReasonCount {
    pub reason: Reason,
    pub count: usize,
}

/// Read-only view derived from a [`ProcessResult`]
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,

    /// Valid percentage, `None` for an empty run
    pub success_rate: Option<f64>,

    /// Valid addresses per domain, most frequent first. Ties keep the
    /// order in which the domains were first seen.
    pub domains: Vec<DomainCount>,

    /// Invalid addresses per reason, in first-seen order
    pub reasons: Vec<ReasonCount>,

    /// Throughput, `None` when nothing measurable elapsed
    pub addresses_per_second: Option<f64>,
}

impl Summary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_result(result: &ProcessResult) -> Self {
        let valid_count = result.valid.len();
        let invalid_count = result.invalid.len();

        let success_rate =
            (result.total > 0).then(|| valid_count as f64 / result.total as f64 * 100.0);

        let mut domains: Vec<DomainCount> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for address in &result.valid {
            let slot = *index.entry(address.domain()).or_insert_with(|| {
                domains.push(DomainCount {
                    domain: address.domain().to_string(),
                    count: 0,
                    share: 0.0,
                });
                domains.len() - 1
            });
            domains[slot].count += 1;
        }
        for entry in &mut domains {
            entry.share = entry.count as f64 / valid_count as f64 * 100.0;
        }
        // stable sort keeps first-seen order among equal counts
        domains.sort_by(|a, b| b.count.cmp(&a.count));

        let mut reasons: Vec<ReasonCount> = Vec::new();
        for rejected in &result.invalid {
            match reasons.iter_mut().find(|r| r.reason == rejected.reason) {
                Some(entry) => entry.count += 1,
                None => reasons.push(ReasonCount {
                    reason: rejected.reason,
                    count: 1,
                }),
            }
        }

        let seconds = result.stats.elapsed.as_secs_f64();
        let addresses_per_second = (seconds > 0.0).then(|| result.total as f64 / seconds);

        Self {
            total: result.total,
            valid_count,
            invalid_count,
            success_rate,
            domains,
            reasons,
            addresses_per_second,
        }
    }

    /// The `n` most frequent valid domains
    #[must_use]
    pub fn top_domains(&self, n: usize) -> &[DomainCount] {
        &self.domains[..n.min(self.domains.len())]
    }

    #[must_use]
    pub fn unique_domains(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn reason_count(&self, reason: Reason) -> usize {
        self.reasons
            .iter()
            .find(|r| r.reason == reason)
            .map_or(0, |r| r.count)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} valid, {} invalid",
            self.total, self.valid_count, self.invalid_count
        )?;
        if let Some(rate) = self.success_rate {
            write!(f, " ({rate:.1}% valid)")?;
        }
        Ok(())
    }
}

/// `850ms` below one second, `1.2s` above
#[must_use]
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// Human-readable byte count: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[unit])
}

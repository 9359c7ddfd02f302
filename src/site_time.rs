/// Per-hostname accumulated focus time, as stored in chrome.storage.local

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage key holding the accumulator map
pub const SITE_TIME_KEY: &str = "siteTime";

/// Hostname → cumulative seconds
///
/// Serialized as a bare JSON object so the stored shape is
/// `{"siteTime": {"example.com": 12.5}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteTime {
    seconds: BTreeMap<String, f64>,
}

impl SiteTime {
    pub fn new() -> Self {
        SiteTime {
            seconds: BTreeMap::new(),
        }
    }

    /// Add `seconds` to the total for `hostname`, creating the entry if absent.
    ///
    /// Values never decrease: a negative interval (wall clock stepped back)
    /// counts as zero and a non-finite one is dropped.
    pub fn accumulate(&mut self, hostname: &str, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let seconds = seconds.max(0.0);

        *self.seconds.entry(hostname.to_string()).or_insert(0.0) += seconds;
    }

    pub fn get(&self, hostname: &str) -> Option<f64> {
        self.seconds.get(hostname).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    /// Entries in hostname order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.seconds.iter().map(|(host, secs)| (host.as_str(), *secs))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SiteTime {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        SiteTime {
            seconds: iter.into_iter().map(|(host, secs)| (host.into(), secs)).collect(),
        }
    }
}

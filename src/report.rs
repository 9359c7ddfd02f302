/// Popup text rendering of the accumulated site times

use crate::error::TrackerError;
use crate::site_time::SiteTime;
use crate::storage::{SiteStore, reset_site_time};

pub const NO_DATA_MESSAGE: &str = "No data available.";
pub const RESET_MESSAGE: &str = "Time tracker reset.";

/// Two decimals, with exact ties rounded away from zero as JavaScript's
/// `toFixed(2)` does. `{:.2}` alone rounds ties to even.
///
/// A double sits exactly halfway between two hundredths only when it is an
/// odd multiple of 1/8 (x.125, x.375, x.625, x.875); everything else is
/// already rounded correctly by the formatter.
pub fn format_seconds(seconds: f64) -> String {
    let eighths = seconds.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 && eighths < (1u64 << 50) as f64 {
        let hundredths = (eighths as u64 * 25 + 1) / 2;
        let sign = if seconds < 0.0 { "-" } else { "" };
        return format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100);
    }
    format!("{:.2}", seconds)
}

/// One line per site, e.g. "example.com: 12.50 seconds"
pub fn format_site_line(hostname: &str, seconds: f64) -> String {
    format!("{}: {} seconds", hostname, format_seconds(seconds))
}

/// Lines for the site list, or the single placeholder line when empty
pub fn site_lines(site_time: &SiteTime) -> Vec<String> {
    if site_time.is_empty() {
        return vec![NO_DATA_MESSAGE.to_string()];
    }

    site_time
        .iter()
        .map(|(hostname, seconds)| format_site_line(hostname, seconds))
        .collect()
}

/// Read the persisted totals for display
pub async fn load_site_lines<S: SiteStore>(store: &S) -> Result<Vec<String>, TrackerError> {
    let site_time = store.load().await?;
    log::debug!("Loaded site time for {} sites", site_time.len());
    Ok(site_lines(&site_time))
}

/// What the popup shows. Loading → Loaded → Reset only moves forward;
/// reopening the popup starts over from storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupView {
    Loading,
    Loaded(Vec<String>),
    Reset,
    Error(String),
}

impl PopupView {
    pub fn is_loading(&self) -> bool {
        matches!(self, PopupView::Loading)
    }

    /// Text lines of the site list container
    pub fn site_list(&self) -> Vec<String> {
        match self {
            PopupView::Loaded(lines) => lines.clone(),
            PopupView::Reset => vec![RESET_MESSAGE.to_string()],
            PopupView::Loading | PopupView::Error(_) => Vec::new(),
        }
    }
}

/// Popup opened: read the totals
pub async fn open_view<S: SiteStore>(store: &S) -> PopupView {
    match load_site_lines(store).await {
        Ok(lines) => PopupView::Loaded(lines),
        Err(e) => {
            log::error!("Failed to load site time: {}", e);
            PopupView::Error(format!("Failed to load: {}", e))
        }
    }
}

/// Reset clicked: clear the totals and replace the list with a confirmation
pub async fn reset_view<S: SiteStore>(store: &S) -> PopupView {
    match reset_site_time(store).await {
        Ok(()) => PopupView::Reset,
        Err(e) => PopupView::Error(format!("Reset failed: {}", e)),
    }
}

/// Persistence of the accumulator map

use crate::error::TrackerError;
use crate::site_time::SiteTime;

/// Whole-map access to the persisted accumulator
///
/// Implementations read and write the full map; there is no partial update.
#[allow(async_fn_in_trait)]
pub trait SiteStore {
    /// Missing data reads as an empty map
    async fn load(&self) -> Result<SiteTime, TrackerError>;

    async fn save(&self, site_time: &SiteTime) -> Result<(), TrackerError>;
}

/// Read the map, add `seconds` to `hostname`, write the map back.
///
/// Not atomic: two of these running interleaved would lose an update.
/// The dispatcher never runs two at once; the popup's reset is not
/// coordinated with it and the last write wins.
pub async fn accumulate_site_time<S: SiteStore>(
    store: &S,
    hostname: &str,
    seconds: f64,
) -> Result<SiteTime, TrackerError> {
    let mut site_time = store.load().await?;
    site_time.accumulate(hostname, seconds);
    store.save(&site_time).await?;

    log::debug!("Site time updated: {} +{:.2}s", hostname, seconds);
    Ok(site_time)
}

/// Replace the persisted map with an empty one
pub async fn reset_site_time<S: SiteStore>(store: &S) -> Result<(), TrackerError> {
    store.save(&SiteTime::new()).await?;

    log::info!("Time tracker reset");
    Ok(())
}

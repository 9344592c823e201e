use crate::cache::DatasetCache;
use crate::config::Settings;
use crate::error::{LocatorError, Result};
use crate::models::{MapView, StationGroup};
use crate::processors::StationAggregator;
use crate::readers::{CsvSource, Dataset, StationLoader};
use crate::session::{RegionSelector, SelectionMode, SessionStore};
use crate::utils::constants::GROUPING_COLUMNS;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// The result of one render: what to draw plus any message for the user
#[derive(Debug)]
pub struct Render {
    pub groups: Vec<StationGroup>,
    pub view: MapView,
    pub message: Option<LocatorError>,
}

/// Ties loading, caching, selection and aggregation together
pub struct Locator<S: CsvSource> {
    settings: Settings,
    loader: StationLoader<S>,
    cache: DatasetCache,
    selector: RegionSelector,
    aggregator: StationAggregator,
}

impl<S: CsvSource> Locator<S> {
    pub fn new(settings: Settings, source: S) -> Self {
        let cache = DatasetCache::new(settings.cache_ttl_secs);
        Self {
            settings,
            loader: StationLoader::new(source),
            cache,
            selector: RegionSelector::new(),
            aggregator: StationAggregator::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn default_mode(&self, radius: bool) -> SelectionMode {
        if radius {
            SelectionMode::Radius {
                radius_km: self.settings.radius_km,
            }
        } else {
            SelectionMode::District
        }
    }

    /// Cached dataset, or an empty one plus the error that prevented loading
    pub fn dataset_at(&mut self, now: DateTime<Utc>) -> (Arc<Dataset>, Option<LocatorError>) {
        let url1 = self.settings.url1.clone();
        let url2 = self.settings.url2.clone();
        let loader = &self.loader;

        match self
            .cache
            .get_or_load(&url1, &url2, now, |a, b| loader.load_combined_data(a, b))
        {
            Ok(dataset) => (dataset, None),
            Err(e) => {
                warn!("Charger data unavailable: {}", e);
                (Arc::new(Dataset::empty()), Some(e))
            }
        }
    }

    pub fn dataset(&mut self) -> (Arc<Dataset>, Option<LocatorError>) {
        self.dataset_at(Utc::now())
    }

    /// Drop the cached dataset so the next access fetches again
    pub fn reload(&mut self) {
        self.cache.invalidate();
    }

    /// When the cached dataset for the configured sources goes stale
    pub fn cache_expires_at(&self) -> Option<DateTime<Utc>> {
        self.cache
            .expires_at(&self.settings.url1, &self.settings.url2)
    }

    /// Group the selected rows and build the map payload.
    ///
    /// `EmptySelection` is returned as an error; callers treat it as "nothing to
    /// draw yet". Missing grouping columns degrade to an empty map with a message.
    pub fn render(
        &self,
        dataset: &Dataset,
        session: &SessionStore,
        mode: SelectionMode,
    ) -> Result<Render> {
        let records = self.selector.selected_records(dataset, session, mode)?;
        debug!("{} charger rows selected", records.len());

        let (groups, message) = match dataset.require_columns(&GROUPING_COLUMNS) {
            Ok(()) => (self.aggregator.aggregate(records), None),
            Err(e) => {
                warn!("Cannot group stations: {}", e);
                (Vec::new(), Some(e))
            }
        };

        let view = MapView::from_groups(&groups, self.settings.fallback_center(), self.settings.zoom);

        Ok(Render {
            groups,
            view,
            message,
        })
    }
}

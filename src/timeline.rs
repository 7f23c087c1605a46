//! Timeline aggregation: the single source of truth for the progress view.
//!
//! The aggregator owns one merged snapshot of `/timeline/full` and
//! `/timeline/by-category`. The two fetches are issued together and merged
//! all-or-nothing: if either fails, the previous snapshot stays in place.
//! Mutations go to the backend first and are followed by a full reload, so
//! counts and percentages are always backend-derived.

use crate::api::{ApiClient, ApiError};
use crate::model::{CategoryBreakdown, TimelineOverview, TimelineStep};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(name) => name,
        }
    }
}

/// One merged snapshot of the timeline endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub overview: TimelineOverview,
    pub by_category: CategoryBreakdown,
}

impl TimelineView {
    /// Fetch both timeline endpoints concurrently and merge them.
    /// Partial failure is total failure: the first error wins and nothing
    /// half-merged is ever produced.
    pub async fn fetch(api: &ApiClient) -> Result<Self, ApiError> {
        let (overview, by_category) =
            tokio::try_join!(api.full_timeline(), api.timeline_by_category())?;
        Ok(Self {
            overview,
            by_category,
        })
    }

    /// Category names in the order the backend returned them for this
    /// snapshot. Order across snapshots is not guaranteed.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys()
    }

    /// Steps visible under `filter`. Filtering never copies or mutates the
    /// underlying data; an unknown category resolves to an empty slice.
    pub fn steps_for(&self, filter: &CategoryFilter) -> &[TimelineStep] {
        match filter {
            CategoryFilter::All => &self.overview.timeline,
            CategoryFilter::Category(name) => self
                .by_category
                .get(name)
                .map(|group| group.steps.as_slice())
                .unwrap_or(&[]),
        }
    }
}

#[derive(Default)]
pub struct TimelineAggregator {
    view: Option<TimelineView>,
    filter: CategoryFilter,
}

impl TimelineAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&TimelineView> {
        self.view.as_ref()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Pure view-state change; no network call.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Advance the filter through `all -> <each category in backend order>
    /// -> all`. Used by the progress page's filter key.
    pub fn cycle_filter(&mut self) {
        let Some(view) = &self.view else {
            self.filter = CategoryFilter::All;
            return;
        };

        let categories: Vec<&str> = view.categories().collect();
        let next = match &self.filter {
            CategoryFilter::All => match categories.first() {
                Some(first) => CategoryFilter::Category((*first).to_string()),
                None => CategoryFilter::All,
            },
            CategoryFilter::Category(current) => {
                match categories.iter().position(|c| *c == current.as_str()) {
                    Some(idx) if idx + 1 < categories.len() => {
                        CategoryFilter::Category(categories[idx + 1].to_string())
                    }
                    _ => CategoryFilter::All,
                }
            }
        };
        self.filter = next;
    }

    /// Steps currently visible under the active filter; empty before the
    /// first successful load.
    pub fn visible_steps(&self) -> &[TimelineStep] {
        match &self.view {
            Some(view) => view.steps_for(&self.filter),
            None => &[],
        }
    }

    /// Replace the snapshot with a freshly fetched one.
    pub fn install(&mut self, view: TimelineView) {
        self.view = Some(view);
    }

    /// Fetch and install a new snapshot. On error the previous snapshot is
    /// left untouched.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let view = TimelineView::fetch(api).await?;
        self.install(view);
        Ok(())
    }

    /// Send a completion toggle, then reload the whole snapshot rather than
    /// patching locally. A failed mutation leaves the view unchanged and is
    /// returned to the caller; the checkbox only moves once the reload
    /// confirms it.
    pub async fn toggle_step(
        &mut self,
        api: &ApiClient,
        step_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        api.update_step_progress(step_id, completed).await?;
        self.load(api).await
    }
}

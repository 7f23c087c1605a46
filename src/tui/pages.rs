//! Per-page fetch state and the fetch routines behind each route.
//!
//! Every page re-fetches on entry; there is no cross-page cache. Pages that
//! need several endpoints join them concurrently and all-or-nothing: one
//! failed member fails the whole page load.

use super::route::Route;
use crate::api::{ApiClient, ApiError, Location};
use crate::model::{
    CategoryBreakdown, CategoryGroup, ChromeExtension, DashboardOverview, HousingStats,
    JobOpportunities, LocationComparison, ResourceCatalog, ResourceLink,
};
use crate::timeline::TimelineView;

/// Lifecycle of one page's data for the current visit.
#[derive(Debug, Clone)]
pub enum Fetch<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

// Not derived: the payload type has no Default and does not need one
impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Idle
    }
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetch::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardBundle {
    pub overview: DashboardOverview,
    pub comparison: LocationComparison,
    pub extensions: Vec<ChromeExtension>,
}

#[derive(Debug, Clone)]
pub struct HousingBundle {
    pub phoenix: HousingStats,
    pub peak_district: HousingStats,
}

/// The visa page renders the visa slices of the timeline breakdown and the
/// resource catalog; the contract has no dedicated visa endpoint.
#[derive(Debug, Clone)]
pub struct VisaBundle {
    pub breakdown: CategoryBreakdown,
    pub resources: ResourceCatalog,
}

impl VisaBundle {
    pub fn visa_group(&self) -> Option<&CategoryGroup> {
        self.breakdown.get("visa")
    }

    pub fn visa_resources(&self) -> &[ResourceLink] {
        self.resources
            .get("visa")
            .map(|links| links.as_slice())
            .unwrap_or(&[])
    }
}

/// Data produced by one route's load, tagged by page.
#[derive(Debug, Clone)]
pub enum PageData {
    Dashboard(DashboardBundle),
    Timeline(TimelineView),
    Housing(HousingBundle),
    Employment(JobOpportunities),
    Visa(VisaBundle),
    Resources(ResourceCatalog),
    Comparison(LocationComparison),
    Extensions(Vec<ChromeExtension>),
}

/// Run the fetches behind `route`. Multi-endpoint pages join concurrently;
/// the first error aborts the whole load.
pub async fn fetch_route(api: &ApiClient, route: Route) -> Result<PageData, ApiError> {
    match route {
        Route::Dashboard => {
            let (overview, comparison, extensions) = tokio::try_join!(
                api.dashboard_overview(),
                api.comparison(),
                api.chrome_extensions()
            )?;
            Ok(PageData::Dashboard(DashboardBundle {
                overview,
                comparison,
                extensions,
            }))
        }
        Route::Progress => Ok(PageData::Timeline(TimelineView::fetch(api).await?)),
        Route::Housing => {
            let (phoenix, peak_district) = tokio::try_join!(
                api.housing(Location::Phoenix),
                api.housing(Location::PeakDistrict)
            )?;
            Ok(PageData::Housing(HousingBundle {
                phoenix,
                peak_district,
            }))
        }
        Route::Employment => Ok(PageData::Employment(api.jobs().await?)),
        Route::Visa => {
            let (breakdown, resources) =
                tokio::try_join!(api.timeline_by_category(), api.resources())?;
            Ok(PageData::Visa(VisaBundle {
                breakdown,
                resources,
            }))
        }
        Route::Resources => Ok(PageData::Resources(api.resources().await?)),
        Route::Comparison => Ok(PageData::Comparison(api.comparison().await?)),
        Route::Extensions => Ok(PageData::Extensions(api.chrome_extensions().await?)),
    }
}

/// Fetch state for every page except Progress, which the timeline
/// aggregator owns.
#[derive(Default)]
pub struct Pages {
    pub dashboard: Fetch<DashboardBundle>,
    pub housing: Fetch<HousingBundle>,
    pub employment: Fetch<JobOpportunities>,
    pub visa: Fetch<VisaBundle>,
    pub resources: Fetch<ResourceCatalog>,
    pub comparison: Fetch<LocationComparison>,
    pub extensions: Fetch<Vec<ChromeExtension>>,
}

impl Pages {
    pub fn set_loading(&mut self, route: Route) {
        match route {
            Route::Dashboard => self.dashboard = Fetch::Loading,
            Route::Housing => self.housing = Fetch::Loading,
            Route::Employment => self.employment = Fetch::Loading,
            Route::Visa => self.visa = Fetch::Loading,
            Route::Resources => self.resources = Fetch::Loading,
            Route::Comparison => self.comparison = Fetch::Loading,
            Route::Extensions => self.extensions = Fetch::Loading,
            Route::Progress => {}
        }
    }

    pub fn set_failed(&mut self, route: Route, message: String) {
        match route {
            Route::Dashboard => self.dashboard = Fetch::Failed(message),
            Route::Housing => self.housing = Fetch::Failed(message),
            Route::Employment => self.employment = Fetch::Failed(message),
            Route::Visa => self.visa = Fetch::Failed(message),
            Route::Resources => self.resources = Fetch::Failed(message),
            Route::Comparison => self.comparison = Fetch::Failed(message),
            Route::Extensions => self.extensions = Fetch::Failed(message),
            Route::Progress => {}
        }
    }

    /// Install a completed load into the matching page slot.
    pub fn install(&mut self, data: PageData) {
        match data {
            PageData::Dashboard(bundle) => self.dashboard = Fetch::Ready(bundle),
            PageData::Housing(bundle) => self.housing = Fetch::Ready(bundle),
            PageData::Employment(jobs) => self.employment = Fetch::Ready(jobs),
            PageData::Visa(bundle) => self.visa = Fetch::Ready(bundle),
            PageData::Resources(catalog) => self.resources = Fetch::Ready(catalog),
            PageData::Comparison(comparison) => self.comparison = Fetch::Ready(comparison),
            PageData::Extensions(extensions) => self.extensions = Fetch::Ready(extensions),
            // Timeline snapshots belong to the aggregator, not here
            PageData::Timeline(_) => {}
        }
    }
}

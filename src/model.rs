//! Wire types for the Relocate Me backend contract.
//!
//! Everything here mirrors a response body the backend produces. The client
//! treats aggregate fields (counts, percentages, current phase) as
//! authoritative backend output and never recomputes them.

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// A JSON object deserialized with its key order intact.
///
/// serde's map types lose insertion order; several endpoints (category
/// breakdown, housing type mix, job sectors, resource catalog) are rendered
/// in exactly the order the backend sent them, so we collect entries into a
/// Vec as they arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ---- Auth ----

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetCodeResponse {
    pub reset_code: String,
}

/// Error/detail body the backend attaches to non-success responses, and the
/// `{message}` body served when an extension download is unavailable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---- Timeline ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub estimated_duration_days: u32,
    /// Ids of steps this one depends on. Not validated against the step set.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineOverview {
    pub timeline: Vec<TimelineStep>,
    pub completed_steps: u32,
    pub completion_percentage: f64,
    pub current_phase: String,
}

impl TimelineOverview {
    pub fn total_steps(&self) -> usize {
        self.timeline.len()
    }
}

/// One category's slice of the by-category breakdown: the summary counts
/// plus the steps that fall in the bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryGroup {
    pub completed_steps: u32,
    pub total_steps: u32,
    pub completion_percentage: f64,
    pub steps: Vec<TimelineStep>,
}

/// The full by-category response. Key order is whatever the backend sent for
/// this response; it is not guaranteed stable across loads.
pub type CategoryBreakdown = OrderedMap<CategoryGroup>;

// ---- Dashboard ----

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub user: Option<String>,
    pub quick_stats: QuickStats,
    pub relocation_progress: RelocationProgress,
    #[serde(default)]
    pub recent_activity: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickStats {
    pub days_until_move: i64,
    pub budget_allocated: u64,
    pub properties_viewed: u32,
    pub applications_sent: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelocationProgress {
    pub completion_percentage: f64,
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub pending_steps: Vec<String>,
}

// ---- Housing ----

#[derive(Debug, Clone, Deserialize)]
pub struct HousingStats {
    pub median_home_price: u64,
    pub median_rent: u64,
    pub price_per_sqft: u64,
    pub market_trend: String,
    /// Phoenix responses call this `popular_neighborhoods`, Peak District
    /// responses `popular_areas`.
    #[serde(default, alias = "popular_areas")]
    pub popular_neighborhoods: Vec<String>,
    #[serde(default)]
    pub housing_types: OrderedMap<u32>,
}

// ---- Jobs ----

/// Sector scores plus `avg_salary_*`, all numeric, keys open-ended.
pub type JobMarket = OrderedMap<f64>;

#[derive(Debug, Clone, Deserialize)]
pub struct JobOpportunities {
    pub phoenix_jobs: JobMarket,
    pub peak_district_jobs: JobMarket,
    #[serde(default)]
    pub remote_work_opportunities: Vec<String>,
}

// ---- Comparison ----

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherInfo {
    pub avg_temp_f: f64,
    pub sunny_days: u32,
    pub humidity: u32,
    pub climate: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationData {
    pub location_name: String,
    pub cost_of_living_index: f64,
    pub housing_cost_index: f64,
    pub safety_index: f64,
    pub weather_info: WeatherInfo,
    pub job_market_score: f64,
    pub education_score: f64,
    pub healthcare_score: f64,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub median_income: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClimateChange {
    pub temperature_change: f64,
    pub humidity_change: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonMetrics {
    pub cost_difference_percent: f64,
    pub housing_difference_percent: f64,
    pub safety_improvement: f64,
    pub climate_change: ClimateChange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationComparison {
    pub from_location: LocationData,
    pub to_location: LocationData,
    pub comparison_metrics: ComparisonMetrics,
    #[serde(default)]
    pub relocation_tips: Vec<String>,
}

// ---- Resources ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

pub type ResourceCatalog = OrderedMap<Vec<ResourceLink>>;

// ---- Extensions ----

#[derive(Debug, Clone, Deserialize)]
pub struct ChromeExtension {
    #[serde(default)]
    pub id: Option<String>,
    pub extension_name: String,
    pub download_url: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ChromeExtension {
    /// File name the archive is saved under: lowercased name, spaces
    /// collapsed to dashes, `.zip` extension.
    pub fn archive_file_name(&self) -> String {
        let slug = self
            .extension_name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}.zip", slug)
    }
}

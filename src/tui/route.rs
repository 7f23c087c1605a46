//! Route set and path parsing.
//!
//! Eight named routes sit behind the navigation bar. Route strings come from
//! the `--page` flag and are parsed leniently: unknown paths land on the
//! dashboard, mirroring the catch-all redirect of the original web client.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Progress,
    Housing,
    Employment,
    Visa,
    Resources,
    Comparison,
    Extensions,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Dashboard,
        Route::Progress,
        Route::Housing,
        Route::Employment,
        Route::Visa,
        Route::Resources,
        Route::Comparison,
        Route::Extensions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Progress => "Progress",
            Route::Housing => "Housing",
            Route::Employment => "Employment",
            Route::Visa => "Visa",
            Route::Resources => "Resources",
            Route::Comparison => "Comparison",
            Route::Extensions => "Extensions",
        }
    }

    /// Parse a route path. Unknown input redirects to the dashboard.
    pub fn parse(input: &str) -> Route {
        let path = input.trim().trim_start_matches('/').to_lowercase();
        match path.as_str() {
            "" | "dashboard" => Route::Dashboard,
            "progress" | "timeline" => Route::Progress,
            "housing" => Route::Housing,
            "employment" | "jobs" => Route::Employment,
            "visa" => Route::Visa,
            "resources" => Route::Resources,
            "comparison" | "compare" => Route::Comparison,
            "extensions" | "tools" => Route::Extensions,
            _ => Route::Dashboard,
        }
    }

    pub fn index(self) -> usize {
        Route::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Route> {
        Route::ALL.get(index).copied()
    }

    pub fn next(self) -> Route {
        Route::ALL[(self.index() + 1) % Route::ALL.len()]
    }

    pub fn prev(self) -> Route {
        Route::ALL[(self.index() + Route::ALL.len() - 1) % Route::ALL.len()]
    }
}

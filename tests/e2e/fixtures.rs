//! Scripted backend payloads for the e2e tests.
//!
//! Bodies are raw JSON strings, not `json!` values: serde_json's default map
//! re-sorts keys alphabetically, and several tests assert that the client
//! preserves the exact key order the backend sent.

pub const IDENTITY: &str = r#"{
    "id": "9a6f2c1e",
    "username": "relocate_user",
    "email": "relocate@example.com",
    "is_active": true
}"#;

/// Six seeded steps, two complete. Category key order is deliberately
/// non-alphabetical.
pub const TIMELINE_FULL_V1: &str = r#"{
    "timeline": [
        {"id": "h1", "title": "Research Peak District villages", "description": "Shortlist villages within commuting reach",
         "category": "housing", "estimated_duration_days": 14, "dependencies": [], "resources": ["Rightmove"], "is_completed": true},
        {"id": "h2", "title": "Book viewing trip", "description": "Arrange viewings in Bakewell and Buxton",
         "category": "housing", "estimated_duration_days": 7, "dependencies": ["h1"], "resources": [], "is_completed": false},
        {"id": "v1", "title": "Collect visa documents", "description": "Passport, sponsorship certificate, bank statements",
         "category": "visa", "estimated_duration_days": 21, "dependencies": [], "resources": ["gov.uk checklist"], "is_completed": true},
        {"id": "v2", "title": "Submit Skilled Worker visa application", "description": "",
         "category": "visa", "estimated_duration_days": 56, "dependencies": ["v1"], "resources": [], "is_completed": false},
        {"id": "e1", "title": "Update CV for UK market", "description": "Two pages, UK date formats",
         "category": "employment", "estimated_duration_days": 3, "dependencies": [], "resources": [], "is_completed": false},
        {"id": "l1", "title": "Get moving quotes", "description": "Three international movers minimum",
         "category": "logistics", "estimated_duration_days": 10, "dependencies": [], "resources": [], "is_completed": false}
    ],
    "completed_steps": 2,
    "completion_percentage": 33.3,
    "current_phase": "Early preparation"
}"#;

pub const TIMELINE_BY_CATEGORY_V1: &str = r#"{
    "housing": {
        "completed_steps": 1, "total_steps": 2, "completion_percentage": 50.0,
        "steps": [
            {"id": "h1", "title": "Research Peak District villages", "description": "Shortlist villages within commuting reach",
             "category": "housing", "estimated_duration_days": 14, "dependencies": [], "resources": ["Rightmove"], "is_completed": true},
            {"id": "h2", "title": "Book viewing trip", "description": "Arrange viewings in Bakewell and Buxton",
             "category": "housing", "estimated_duration_days": 7, "dependencies": ["h1"], "resources": [], "is_completed": false}
        ]
    },
    "visa": {
        "completed_steps": 1, "total_steps": 2, "completion_percentage": 50.0,
        "steps": [
            {"id": "v1", "title": "Collect visa documents", "description": "Passport, sponsorship certificate, bank statements",
             "category": "visa", "estimated_duration_days": 21, "dependencies": [], "resources": ["gov.uk checklist"], "is_completed": true},
            {"id": "v2", "title": "Submit Skilled Worker visa application", "description": "",
             "category": "visa", "estimated_duration_days": 56, "dependencies": ["v1"], "resources": [], "is_completed": false}
        ]
    },
    "employment": {
        "completed_steps": 0, "total_steps": 1, "completion_percentage": 0.0,
        "steps": [
            {"id": "e1", "title": "Update CV for UK market", "description": "Two pages, UK date formats",
             "category": "employment", "estimated_duration_days": 3, "dependencies": [], "resources": [], "is_completed": false}
        ]
    },
    "logistics": {
        "completed_steps": 0, "total_steps": 1, "completion_percentage": 0.0,
        "steps": [
            {"id": "l1", "title": "Get moving quotes", "description": "Three international movers minimum",
             "category": "logistics", "estimated_duration_days": 10, "dependencies": [], "resources": [], "is_completed": false}
        ]
    }
}"#;

/// V1 after `e1` was toggled complete: only the employment bucket moved.
pub const TIMELINE_FULL_V2: &str = r#"{
    "timeline": [
        {"id": "h1", "title": "Research Peak District villages", "description": "Shortlist villages within commuting reach",
         "category": "housing", "estimated_duration_days": 14, "dependencies": [], "resources": ["Rightmove"], "is_completed": true},
        {"id": "h2", "title": "Book viewing trip", "description": "Arrange viewings in Bakewell and Buxton",
         "category": "housing", "estimated_duration_days": 7, "dependencies": ["h1"], "resources": [], "is_completed": false},
        {"id": "v1", "title": "Collect visa documents", "description": "Passport, sponsorship certificate, bank statements",
         "category": "visa", "estimated_duration_days": 21, "dependencies": [], "resources": ["gov.uk checklist"], "is_completed": true},
        {"id": "v2", "title": "Submit Skilled Worker visa application", "description": "",
         "category": "visa", "estimated_duration_days": 56, "dependencies": ["v1"], "resources": [], "is_completed": false},
        {"id": "e1", "title": "Update CV for UK market", "description": "Two pages, UK date formats",
         "category": "employment", "estimated_duration_days": 3, "dependencies": [], "resources": [], "is_completed": true},
        {"id": "l1", "title": "Get moving quotes", "description": "Three international movers minimum",
         "category": "logistics", "estimated_duration_days": 10, "dependencies": [], "resources": [], "is_completed": false}
    ],
    "completed_steps": 3,
    "completion_percentage": 50.0,
    "current_phase": "Gaining momentum"
}"#;

pub const TIMELINE_BY_CATEGORY_V2: &str = r#"{
    "housing": {
        "completed_steps": 1, "total_steps": 2, "completion_percentage": 50.0,
        "steps": [
            {"id": "h1", "title": "Research Peak District villages", "description": "Shortlist villages within commuting reach",
             "category": "housing", "estimated_duration_days": 14, "dependencies": [], "resources": ["Rightmove"], "is_completed": true},
            {"id": "h2", "title": "Book viewing trip", "description": "Arrange viewings in Bakewell and Buxton",
             "category": "housing", "estimated_duration_days": 7, "dependencies": ["h1"], "resources": [], "is_completed": false}
        ]
    },
    "visa": {
        "completed_steps": 1, "total_steps": 2, "completion_percentage": 50.0,
        "steps": [
            {"id": "v1", "title": "Collect visa documents", "description": "Passport, sponsorship certificate, bank statements",
             "category": "visa", "estimated_duration_days": 21, "dependencies": [], "resources": ["gov.uk checklist"], "is_completed": true},
            {"id": "v2", "title": "Submit Skilled Worker visa application", "description": "",
             "category": "visa", "estimated_duration_days": 56, "dependencies": ["v1"], "resources": [], "is_completed": false}
        ]
    },
    "employment": {
        "completed_steps": 1, "total_steps": 1, "completion_percentage": 100.0,
        "steps": [
            {"id": "e1", "title": "Update CV for UK market", "description": "Two pages, UK date formats",
             "category": "employment", "estimated_duration_days": 3, "dependencies": [], "resources": [], "is_completed": true}
        ]
    },
    "logistics": {
        "completed_steps": 0, "total_steps": 1, "completion_percentage": 0.0,
        "steps": [
            {"id": "l1", "title": "Get moving quotes", "description": "Three international movers minimum",
             "category": "logistics", "estimated_duration_days": 10, "dependencies": [], "resources": [], "is_completed": false}
        ]
    }
}"#;

pub const DASHBOARD_OVERVIEW: &str = r#"{
    "user": "relocate_user",
    "relocation_progress": {
        "completion_percentage": 35,
        "completed_steps": ["Location research", "Cost analysis", "Housing search initiated"],
        "pending_steps": ["Visa application", "Job applications", "Moving logistics", "Healthcare setup"]
    },
    "quick_stats": {
        "days_until_move": 120,
        "budget_allocated": 45000,
        "properties_viewed": 8,
        "applications_sent": 3
    },
    "recent_activity": ["Viewed property in Bakewell", "Updated cost comparison"]
}"#;

pub const COMPARISON: &str = r#"{
    "from_location": {
        "location_name": "Phoenix, Arizona",
        "cost_of_living_index": 98.2,
        "housing_cost_index": 89.5,
        "safety_index": 6.8,
        "weather_info": {"avg_temp_f": 75, "sunny_days": 299, "humidity": 38, "climate": "Desert"},
        "job_market_score": 7.2,
        "education_score": 6.5,
        "healthcare_score": 7.1,
        "population": 1608139,
        "median_income": 62055
    },
    "to_location": {
        "location_name": "Peak District, UK",
        "cost_of_living_index": 112.8,
        "housing_cost_index": 125.3,
        "safety_index": 8.9,
        "weather_info": {"avg_temp_f": 48, "sunny_days": 120, "humidity": 78, "climate": "Temperate Oceanic"},
        "job_market_score": 6.8,
        "education_score": 8.9,
        "healthcare_score": 9.2,
        "population": 38000,
        "median_income": 35000
    },
    "comparison_metrics": {
        "cost_difference_percent": 14.9,
        "housing_difference_percent": 40.0,
        "safety_improvement": 2.1,
        "climate_change": {"temperature_change": -27, "humidity_change": 40}
    },
    "relocation_tips": [
        "Cost of living is approximately 15% higher in Peak District",
        "Consider visa requirements for UK relocation"
    ]
}"#;

pub const EXTENSIONS: &str = r#"[
    {
        "id": "5f1e9c2a",
        "extension_name": "Relocate Me Helper",
        "download_url": "/api/download/relocate-helper.crx",
        "version": "1.0.0",
        "description": "Quick access to relocation data and bookmarking tools",
        "features": ["Bookmark locations", "Compare costs", "Save searches"]
    },
    {
        "id": "7b3d8e4f",
        "extension_name": "Property Finder",
        "download_url": "/api/download/property-finder.crx",
        "version": "1.2.1",
        "description": "Find and compare properties across different locations",
        "features": ["Property search", "Price comparison", "Market analysis"]
    }
]"#;

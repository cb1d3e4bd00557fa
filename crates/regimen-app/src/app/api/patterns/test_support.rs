//! Shared fixtures for pattern endpoint tests.

use std::sync::Arc;

use salvo::{Router, Service};
use serde_json::{Value, json};

use crate::config::{ConfigHandler, LoggingConfig, ScheduleConfig, ServerConfig, Settings};
use crate::service_handler::PatternServiceHandler;
use regimen_service::schedule::{InMemoryRepository, PatternService};

pub const BASE_URL: &str = "http://127.0.0.1:5800/api/patterns";

pub fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        schedule: ScheduleConfig {
            regenerate_horizon_months: 12,
            max_window_days: 400,
        },
    }
}

/// Builds the API with a fresh in-memory repository behind it.
pub fn test_service() -> Service {
    let settings = test_settings();
    let patterns = PatternService::new(Arc::new(InMemoryRepository::new()), &settings.schedule);

    let router = Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(PatternServiceHandler { service: patterns })
        .push(crate::app::api::routes());

    Service::new(router)
}

/// Weekly Monday/Thursday evening pattern starting Monday 2024-01-01.
pub fn magnesium_json() -> Value {
    json!({
        "name": "Magnesium",
        "pattern_type": "weekly",
        "days_of_week": [1, 4],
        "start_date": "2024-01-01",
        "time": "21:00",
        "item_template": { "name": "Magnesium glycinate", "dose": "200 mg" }
    })
}

pub fn dates(body: &Value) -> Vec<String> {
    body["dates"]
        .as_array()
        .expect("dates array")
        .iter()
        .map(|d| d.as_str().expect("date string").to_string())
        .collect()
}

/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const PATTERNS_ROUTE_COMPONENT: &str = "patterns";
pub const PATTERNS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", PATTERNS_ROUTE_COMPONENT);

/// Days covered by a pattern preview, counted from the preview start date.
pub const PREVIEW_HORIZON_DAYS: u32 = 90;

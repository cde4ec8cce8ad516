use chrono::{NaiveDate, NaiveDateTime};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of nearest unconnected stations each station is linked to during augmentation
pub const DEFAULT_NEAREST_NEIGHBORS: usize = 3;

/// Average speed used to turn inferred distances into travel times
pub const DEFAULT_AVG_SPEED_KMPH: f64 = 70.0;

/// Travel time assumed for a hop the network has no section for
pub const DEFAULT_HOP_MINUTES: f64 = 5.0;

/// Lower bound applied to section travel times before they are used for routing
pub const MIN_TRAVEL_MINUTES: f64 = 1.0;

/// Upper bound on the number of hops a route search will expand
pub const MAX_ROUTE_HOPS: usize = 512;

/// Base date used for generated timetables
pub const BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 9, 19) {
    Some(date) => date,
    None => panic!("Invalid base date"),
};

/// Default first departure for generated and user timetables (`BASE_DATE` at 08:00:00)
pub const DEFAULT_START_TIME: NaiveDateTime = match BASE_DATE.and_hms_opt(8, 0, 0) {
    Some(dt) => dt,
    None => panic!("Invalid default start time"),
};

pub mod alert_service;
pub mod chart_service;
pub mod segment_service;
pub mod series_service;

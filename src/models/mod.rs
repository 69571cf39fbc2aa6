//! Data models shared by the services and the page server

pub mod alert;
pub mod chart;

pub use alert::AlertResult;
pub use chart::{PricePoint, Segment, Side};

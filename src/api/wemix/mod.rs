pub mod client;
pub mod models;

pub use client::WemixClient;
pub use models::ChartResponse;

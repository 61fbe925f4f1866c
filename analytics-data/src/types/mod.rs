//! Types used for serialization and deserialization of service data.

mod datetime;
mod timespan;

pub use datetime::AnalyticsDateTime;
pub use timespan::AnalyticsTimespan;

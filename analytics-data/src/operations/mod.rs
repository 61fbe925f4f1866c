//! Request execution and response-framing machinery used by [`crate::client::AnalyticsClient`].

mod async_deserializer;
mod skip_reader;
pub mod query;
pub mod v1;
pub mod v2;

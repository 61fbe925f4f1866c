#![cfg(feature = "mock_transport_framework")]

use analytics_data::prelude::*;
use dotenv::dotenv;

#[must_use]
pub fn create_analytics_client() -> (AnalyticsClient, String) {
    dotenv().ok();
    (
        ConnectionString::with_default_auth(
            std::env::var("ANALYTICS_CLUSTER_URL").expect("Set env variable ANALYTICS_CLUSTER_URL first!"),
        )
        .try_into()
        .expect("Failed to create AnalyticsClient"),
        std::env::var("ANALYTICS_DATABASE").expect("Set env variable ANALYTICS_DATABASE first!"),
    )
}

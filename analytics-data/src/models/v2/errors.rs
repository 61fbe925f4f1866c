use serde::{Deserialize, Serialize};

/// A single row-level error, as reported inline or in a completion frame.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct OneApiError {
    #[serde(rename = "error")]
    pub error_message: ErrorMessage,
}

/// A batch of row-level errors, as carried by [`crate::models::v2::Row::Error`].
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct OneApiErrors {
    pub errors: Vec<OneApiError>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(rename = "@type")]
    pub r#type: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "@context")]
    pub context: ErrorContext,
    #[serde(rename = "@permanent")]
    pub is_permanent: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    pub timestamp: String,
    pub service_alias: String,
    pub machine_name: String,
    pub process_name: String,
    pub process_id: i32,
    pub thread_id: i32,
    pub client_request_id: String,
    pub activity_id: String,
    pub sub_activity_id: String,
    pub activity_type: String,
    pub parent_activity_id: String,
    pub activity_stack: String,
}

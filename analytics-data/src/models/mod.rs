pub mod v1;
pub mod v2;

/// Alias for the raw v1 (management/legacy-query) dataset model, named to
/// match the row-source types ingestion resource discovery binds against.
pub type TableV1 = v1::Table;

#[cfg(test)]
pub(crate) mod test_helpers;

use serde::{Deserialize, Serialize};

/// Represents the scalar data types of the service.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Copy, Clone)]
pub enum ColumnType {
    #[serde(rename = "bool")]
    /// Boolean type, true or false. Internally is a u8.
    Bool,
    /// Datetime, represents a specific point in time.
    #[serde(rename = "datetime")]
    DateTime,
    /// A complex type, that is either an array or a dictionary of other values.
    #[serde(rename = "dynamic")]
    Dynamic,
    /// GUID type, represents a globally unique identifier.
    #[serde(rename = "guid")]
    Guid,
    #[serde(rename = "int")]
    /// 32 bit integer type.
    Int,
    /// 64 bit integer type.
    #[serde(rename = "long")]
    Long,
    /// 64 bit floating point type.
    #[serde(rename = "real")]
    Real,
    #[serde(rename = "string")]
    /// String type, represents a string of characters.
    String,
    /// Timespan type, represents a duration of time.
    #[serde(rename = "timespan")]
    Timespan,
    #[serde(alias = "decimal")]
    /// Decimal, represents a fixed-point number with a defined precision and scale.
    Decimal,
}


/// Wire body of a query or management command request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryBody {
    /// Name of the database in scope that is the target of the query or command.
    pub db: String,
    /// Text of the query or management command to execute.
    pub csl: String,
    /// Additional parameters and options for fine-grained control of the request behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<crate::request_options::ClientRequestProperties>,
}

pub trait Column {
    fn column_name(&self) -> &str;
    fn column_type(&self) -> ColumnType;
}

impl Column for v1::Column {
    fn column_name(&self) -> &str {
        &self.column_name
    }

    fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

impl Column for v2::Column {
    fn column_name(&self) -> &str {
        &self.column_name
    }

    fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

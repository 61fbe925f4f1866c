//! Typed bindings for the service's well-known v2 metadata tables
//! (`QueryProperties`, `QueryCompletionInformation`), built on the generic
//! [`crate::value::FromRow`] row-binding machinery.

use crate::error::Error;
use crate::value::{BoundRow, FromRow, Value};
use time::OffsetDateTime;
use uuid::Uuid;

/// One row of the `QueryProperties` metadata table.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryProperties {
    /// Table the property applies to.
    pub table_id: i32,
    /// Property name.
    pub key: String,
    /// Raw property value.
    pub value: serde_json::Value,
}

impl FromRow for QueryProperties {
    fn from_row(row: &BoundRow) -> Result<Self, Error> {
        Ok(Self {
            table_id: as_i32(row, "TableId")?,
            key: as_string(row, "Key")?,
            value: as_dynamic(row, "Value")?,
        })
    }
}

/// One row of the `QueryCompletionInformation` metadata table.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCompletionInformation {
    /// When this completion event was recorded.
    pub timestamp: OffsetDateTime,
    /// The request's client request id.
    pub client_request_id: String,
    /// The request's activity id.
    pub activity_id: Uuid,
    /// Sub-activity id.
    pub sub_activity_id: Uuid,
    /// Parent activity id.
    pub parent_activity_id: Uuid,
    /// Severity level.
    pub level: i32,
    /// Severity level, human readable.
    pub level_name: String,
    /// Status code.
    pub status_code: i32,
    /// Status code, human readable.
    pub status_code_name: String,
    /// Event type.
    pub event_type: i32,
    /// Event type, human readable.
    pub event_type_name: String,
    /// Event payload.
    pub payload: String,
}

impl FromRow for QueryCompletionInformation {
    fn from_row(row: &BoundRow) -> Result<Self, Error> {
        Ok(Self {
            timestamp: as_datetime(row, "Timestamp")?,
            client_request_id: as_string(row, "ClientRequestId")?,
            activity_id: as_guid(row, "ActivityId")?,
            sub_activity_id: as_guid(row, "SubActivityId")?,
            parent_activity_id: as_guid(row, "ParentActivityId")?,
            level: as_i32(row, "Level")?,
            level_name: as_string(row, "LevelName")?,
            status_code: as_i32(row, "StatusCode")?,
            status_code_name: as_string(row, "StatusCodeName")?,
            event_type: as_i32(row, "EventType")?,
            event_type_name: as_string(row, "EventTypeName")?,
            payload: as_string(row, "Payload")?,
        })
    }
}

fn as_i32(row: &BoundRow, field: &str) -> Result<i32, Error> {
    match row.get(field) {
        Some(Value::Int32(v)) => Ok(*v),
        Some(Value::Int64(v)) => Ok(*v as i32),
        _ => Err(Error::FieldConvertError(field.to_string())),
    }
}

fn as_string(row: &BoundRow, field: &str) -> Result<String, Error> {
    match row.get(field) {
        Some(Value::String(v)) => Ok(v.clone()),
        _ => Err(Error::FieldConvertError(field.to_string())),
    }
}

fn as_guid(row: &BoundRow, field: &str) -> Result<Uuid, Error> {
    match row.get(field) {
        Some(Value::Guid(v)) => Ok(*v),
        Some(Value::String(v)) => {
            Uuid::parse_str(v).map_err(|_| Error::FieldConvertError(field.to_string()))
        }
        _ => Err(Error::FieldConvertError(field.to_string())),
    }
}

fn as_datetime(row: &BoundRow, field: &str) -> Result<OffsetDateTime, Error> {
    match row.get(field) {
        Some(Value::DateTime(v)) => Ok(*v),
        _ => Err(Error::FieldConvertError(field.to_string())),
    }
}

fn as_dynamic(row: &BoundRow, field: &str) -> Result<serde_json::Value, Error> {
    match row.get(field) {
        Some(Value::Dynamic(v)) => Ok(v.clone()),
        Some(Value::String(v)) => Ok(serde_json::Value::String(v.clone())),
        Some(other) => Ok(serde_json::Value::String(format!("{:?}", other))),
        None => Err(Error::FieldConvertError(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, ColumnType};

    struct TestColumn {
        name: String,
    }

    impl Column for TestColumn {
        fn column_name(&self) -> &str {
            &self.name
        }
        fn column_type(&self) -> ColumnType {
            ColumnType::String
        }
    }

    #[test]
    fn binds_query_properties_row() {
        let columns = vec![
            TestColumn { name: "TableId".into() },
            TestColumn { name: "Key".into() },
            TestColumn { name: "Value".into() },
        ];
        let values = vec![
            Value::Int32(0),
            Value::String("Visualization".into()),
            Value::Dynamic(serde_json::json!({"Visualization": null})),
        ];
        let bound = BoundRow::new(&columns, &values);
        let row = QueryProperties::from_row(&bound).unwrap();
        assert_eq!(row.table_id, 0);
        assert_eq!(row.key, "Visualization");
    }
}

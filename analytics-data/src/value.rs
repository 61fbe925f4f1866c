//! Tagged value representation for cells returned by the service, and the
//! conversions between JSON wire values, [`Value`], and caller structs.

use crate::error::{Error, ParseError};
use crate::models::{Column, ColumnType};
use crate::types::{AnalyticsDateTime, AnalyticsTimespan};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// A single cell value.
///
/// Every variant other than [`Value::Null`] is guaranteed non-null; a cell
/// that was `null` on the wire is always represented as `Value::Null(kind)`,
/// never collapsed into a variant's zero value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A SQL-style null, tagged with the column kind it was null for.
    Null(ColumnType),
    /// `bool`.
    Bool(bool),
    /// 32 bit integer.
    Int32(i32),
    /// 64 bit integer.
    Int64(i64),
    /// 64 bit floating point.
    Real(f64),
    /// UTF-8 string.
    String(String),
    /// Raw JSON, kept undecoded until a caller asks for a concrete shape.
    Dynamic(serde_json::Value),
    /// UTC point in time.
    DateTime(OffsetDateTime),
    /// Signed duration, 100ns resolution.
    Timespan(time::Duration),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// 128 bit GUID.
    Guid(Uuid),
}

impl Value {
    /// The kind this value was decoded as (or is null for).
    pub fn kind(&self) -> ColumnType {
        match self {
            Value::Null(k) => *k,
            Value::Bool(_) => ColumnType::Bool,
            Value::Int32(_) => ColumnType::Int,
            Value::Int64(_) => ColumnType::Long,
            Value::Real(_) => ColumnType::Real,
            Value::String(_) => ColumnType::String,
            Value::Dynamic(_) => ColumnType::Dynamic,
            Value::DateTime(_) => ColumnType::DateTime,
            Value::Timespan(_) => ColumnType::Timespan,
            Value::Decimal(_) => ColumnType::Decimal,
            Value::Guid(_) => ColumnType::Guid,
        }
    }

    /// True for the null variant, regardless of kind.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Decodes a single JSON wire value into a [`Value`] of the given kind.
    ///
    /// `json null` always produces `Value::Null(kind)`. A value that cannot be
    /// parsed for its declared kind returns `Err`; callers that need a cell to
    /// always be produced (table/row assembly) should fall back to
    /// [`Value::parse_or_null`].
    pub fn parse(kind: ColumnType, raw: &serde_json::Value) -> Result<Value, Error> {
        if raw.is_null() {
            return Ok(Value::Null(kind));
        }

        Ok(match kind {
            ColumnType::Bool => Value::Bool(
                raw.as_bool()
                    .or_else(|| raw.as_i64().map(|n| n != 0))
                    .ok_or_else(|| ParseError::ValueNull("bool".into()))?,
            ),
            ColumnType::Int => Value::Int32(
                raw.as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| ParseError::ValueNull("int".into()))?,
            ),
            ColumnType::Long => Value::Int64(
                raw.as_i64()
                    .ok_or_else(|| ParseError::ValueNull("long".into()))?,
            ),
            ColumnType::Real => Value::Real(
                raw.as_f64()
                    .ok_or_else(|| ParseError::ValueNull("real".into()))?,
            ),
            ColumnType::String => Value::String(
                raw.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| ParseError::ValueNull("string".into()))?,
            ),
            ColumnType::Dynamic => Value::Dynamic(raw.clone()),
            ColumnType::DateTime => {
                let s = raw
                    .as_str()
                    .ok_or_else(|| ParseError::ValueNull("datetime".into()))?;
                let parsed: AnalyticsDateTime = s.parse()?;
                let as_opt: Option<OffsetDateTime> = parsed.into();
                Value::DateTime(as_opt.ok_or_else(|| ParseError::ValueNull("datetime".into()))?)
            }
            ColumnType::Timespan => {
                let s = raw
                    .as_str()
                    .ok_or_else(|| ParseError::ValueNull("timespan".into()))?;
                let parsed: AnalyticsTimespan = s.parse()?;
                let as_opt: Option<time::Duration> = parsed.into();
                Value::Timespan(as_opt.ok_or_else(|| ParseError::Timespan(s.to_string()))?)
            }
            ColumnType::Decimal => {
                let dec = match raw.as_str() {
                    Some(s) => Decimal::from_str(s).map_err(ParseError::Decimal)?,
                    None => Decimal::try_from(
                        raw.as_f64()
                            .ok_or_else(|| ParseError::ValueNull("decimal".into()))?,
                    )
                    .map_err(|_| ParseError::ValueNull("decimal".into()))?,
                };
                Value::Decimal(dec)
            }
            ColumnType::Guid => {
                let s = raw
                    .as_str()
                    .ok_or_else(|| ParseError::ValueNull("guid".into()))?;
                Value::Guid(Uuid::parse_str(s).map_err(ParseError::Guid)?)
            }
        })
    }

    /// Like [`Value::parse`], but never fails: an unparseable cell becomes
    /// `Value::Null(kind)` and the original error is returned alongside, per
    /// the rule that a decode failure nulls the cell without aborting the row.
    pub fn parse_or_null(ordinal: usize, kind: ColumnType, raw: &serde_json::Value) -> (Value, Option<Error>) {
        match Value::parse(kind, raw) {
            Ok(v) => (v, None),
            Err(e) => (
                Value::Null(kind),
                Some(Error::DecodeError {
                    ordinal,
                    token: raw.to_string(),
                    source: Box::new(e),
                }),
            ),
        }
    }
}

/// A decoded row together with the column schema needed to look cells up by
/// name, handed to [`FromRow::from_row`] implementations.
pub struct BoundRow<'a> {
    names: Vec<&'a str>,
    values: &'a [Value],
}

impl<'a> BoundRow<'a> {
    /// Builds a bound row from a column schema and its decoded values.
    pub fn new<C: Column>(columns: &'a [C], values: &'a [Value]) -> Self {
        Self {
            names: columns.iter().map(Column::column_name).collect(),
            values,
        }
    }

    /// Looks a cell up by exact, case-sensitive column name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.values.get(i))
    }

    /// Looks a cell up by ordinal position.
    pub fn ordinal(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All cells in column order.
    pub fn values(&self) -> &[Value] {
        self.values
    }
}

/// Implemented by types that can be reflected out of a row.
///
/// There is no derive macro for this trait in this crate; implementations
/// resolve each field by the column name it should bind to (the field's
/// declared name unless a caller supplies an override table — see
/// [`BoundRow::get`]), mirroring the tag-override-beats-declared-name rule
/// documented for this binding.
pub trait FromRow: Sized {
    /// Builds `Self` out of one decoded row.
    fn from_row(row: &BoundRow) -> Result<Self, Error>;
}

/// Binds a set of rows to `T`, accumulating per-row errors rather than
/// aborting the whole batch on the first failure.
pub fn to_structs<T: FromRow, C: Column>(
    columns: &[C],
    rows: impl IntoIterator<Item = Vec<Value>>,
) -> crate::error::Partial<Vec<T>> {
    let mut out = Vec::new();
    let mut errors = Vec::new();
    for row in rows {
        let bound = BoundRow::new(columns, &row);
        match T::from_row(&bound) {
            Ok(v) => out.push(v),
            Err(e) => errors.push(e),
        }
    }
    match (out.is_empty(), errors.is_empty()) {
        (_, true) => Ok(out),
        (true, false) => Err((None, errors.into())),
        (false, false) => Err((Some(out), errors.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_distinct_from_zero() {
        let zero = Value::parse(ColumnType::Int, &json!(0)).unwrap();
        let null = Value::parse(ColumnType::Int, &json!(null)).unwrap();
        assert_ne!(zero, null);
        assert!(null.is_null());
        assert!(!zero.is_null());
    }

    #[test]
    fn round_trips_each_kind() {
        assert_eq!(Value::parse(ColumnType::Bool, &json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::parse(ColumnType::Int, &json!(42)).unwrap(), Value::Int32(42));
        assert_eq!(Value::parse(ColumnType::Long, &json!(42)).unwrap(), Value::Int64(42));
        assert_eq!(Value::parse(ColumnType::Real, &json!(1.5)).unwrap(), Value::Real(1.5));
        assert_eq!(
            Value::parse(ColumnType::String, &json!("hi")).unwrap(),
            Value::String("hi".into())
        );
        let guid = Uuid::new_v4();
        assert_eq!(
            Value::parse(ColumnType::Guid, &json!(guid.to_string())).unwrap(),
            Value::Guid(guid)
        );
        assert_eq!(
            Value::parse(ColumnType::Timespan, &json!("1.00:00:00.0000000")).unwrap(),
            Value::Timespan(time::Duration::days(1))
        );
    }

    #[test]
    fn unparseable_cell_nulls_without_aborting() {
        let (value, err) = Value::parse_or_null(3, ColumnType::Guid, &json!("not-a-guid"));
        assert!(value.is_null());
        assert!(err.is_some());
    }
}

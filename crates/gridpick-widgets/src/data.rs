//! Rows, column descriptors and the rendered-value rule shared by filtering,
//! rendering and activation payloads.

use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a [`Row`]. Selection compares ids only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Integer id.
    Int(i64),
    /// String id.
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Str(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Str(s)
    }
}

/// One record: an id plus an open-ended set of named fields.
///
/// Deserializes from a flat JSON object whose `id` key is the row id:
///
/// ```ignore
/// let row: Row = serde_json::from_value(json!({"id": 1, "name": "Ada"}))?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Row identity.
    pub id: RowId,
    /// Field name to value.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Row {
    /// Create a row with no fields.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// How a column gets its value out of a row.
#[derive(Clone)]
pub enum Accessor {
    /// Read the named field.
    Field(String),
    /// Compute a value from the whole row.
    Derived(Arc<dyn Fn(&Row) -> Value + Send + Sync>),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Layout hints for a column, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthHint {
    /// Preferred width.
    pub preferred: Option<u16>,
    /// Lower bound.
    pub min: Option<u16>,
    /// Upper bound.
    pub max: Option<u16>,
}

impl WidthHint {
    /// Layout constraint for this hint.
    ///
    /// A preferred width wins (clamped to min/max); otherwise min, then max;
    /// with no hints at all the column shares leftover space.
    pub fn constraint(&self) -> Constraint {
        match (self.preferred, self.min, self.max) {
            (Some(p), min, max) => {
                let p = min.map_or(p, |m| p.max(m));
                Constraint::Length(max.map_or(p, |m| p.min(m)))
            }
            (None, Some(m), _) => Constraint::Min(m),
            (None, None, Some(m)) => Constraint::Max(m),
            (None, None, None) => Constraint::Fill(1),
        }
    }
}

/// A column: id, header text, value accessor and width hints.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column id, referenced by display-column lists.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Where the value comes from.
    pub accessor: Accessor,
    /// Layout hints.
    pub width: WidthHint,
}

impl Column {
    /// A column that reads the field named `id`.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id,
            header: header.into(),
            width: WidthHint::default(),
        }
    }

    /// A column whose value is computed from the row.
    pub fn derived(
        id: impl Into<String>,
        header: impl Into<String>,
        f: impl Fn(&Row) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Accessor::Derived(Arc::new(f)),
            width: WidthHint::default(),
        }
    }

    /// Read a different field than the column id.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.accessor = Accessor::Field(field.into());
        self
    }

    /// Set the preferred width.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width.preferred = Some(width);
        self
    }

    /// Set the minimum width.
    pub fn with_min_width(mut self, width: u16) -> Self {
        self.width.min = Some(width);
        self
    }

    /// Set the maximum width.
    pub fn with_max_width(mut self, width: u16) -> Self {
        self.width.max = Some(width);
        self
    }

    /// The raw value for `row`. Absent fields are `null`.
    pub fn value(&self, row: &Row) -> Value {
        match &self.accessor {
            Accessor::Field(name) => row.get(name).cloned().unwrap_or(Value::Null),
            Accessor::Derived(f) => f(row),
        }
    }

    /// The rendered text for `row`.
    pub fn render(&self, row: &Row) -> String {
        value_text(&self.value(row))
    }
}

/// Render a value as cell text.
///
/// Strings verbatim, `null` empty, everything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_text_rules() {
        assert_eq!(value_text(&json!("Design")), "Design");
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(1.5)), "1.5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(value_text(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn field_column_reads_named_field() {
        let row = Row::new(1).with("name", "Ada");
        assert_eq!(Column::new("name", "Name").render(&row), "Ada");
        assert_eq!(Column::new("missing", "Missing").render(&row), "");
    }

    #[test]
    fn column_can_read_other_field() {
        let row = Row::new(1).with("dept", "Ops");
        let col = Column::new("department", "Department").with_field("dept");
        assert_eq!(col.render(&row), "Ops");
    }

    #[test]
    fn derived_column_sees_whole_row() {
        let row = Row::new(1).with("first", "Ada").with("last", "Lovelace");
        let col = Column::derived("full", "Full name", |r| {
            let first = r.get("first").map(value_text).unwrap_or_default();
            let last = r.get("last").map(value_text).unwrap_or_default();
            Value::String(format!("{first} {last}"))
        });
        assert_eq!(col.render(&row), "Ada Lovelace");
    }

    #[test]
    fn row_deserializes_from_flat_object() {
        let row: Row = serde_json::from_value(json!({"id": "e-7", "name": "Ada", "age": 36}))
            .unwrap();
        assert_eq!(row.id, RowId::from("e-7"));
        assert_eq!(row.get("name"), Some(&json!("Ada")));
        assert_eq!(row.get("age"), Some(&json!(36)));
        assert!(row.get("id").is_none());
    }

    #[test]
    fn integer_ids_stay_integers() {
        let row: Row = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(row.id, RowId::Int(3));
        assert_eq!(row.id.to_string(), "3");
    }

    #[test]
    fn width_hint_constraints() {
        assert_eq!(WidthHint::default().constraint(), Constraint::Fill(1));
        let hint = WidthHint {
            preferred: Some(30),
            min: None,
            max: Some(20),
        };
        assert_eq!(hint.constraint(), Constraint::Length(20));
        let hint = WidthHint {
            preferred: Some(4),
            min: Some(8),
            max: None,
        };
        assert_eq!(hint.constraint(), Constraint::Length(8));
        let hint = WidthHint {
            preferred: None,
            min: Some(6),
            max: Some(12),
        };
        assert_eq!(hint.constraint(), Constraint::Min(6));
        let hint = WidthHint {
            preferred: None,
            min: None,
            max: Some(12),
        };
        assert_eq!(hint.constraint(), Constraint::Max(12));
    }
}

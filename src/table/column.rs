//! Column descriptors and cell values for the table engine.
//!
//! A column knows how to pull a typed value out of a record and how that
//! value should be rendered. The engine itself never looks inside a
//! record except through these descriptors.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// How a column's value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Text,
    Date,
    Currency,
    /// Short status label; the host styles it using the cell's tag.
    Badge,
}

/// Raw cell value extracted from a record, used for sorting and as the
/// base of the rendered string.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Ordering used by the engine's sort. Values of one column share a
    /// variant, so mismatched pairs only appear with `Empty`, which
    /// sorts first.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Integer(a), CellValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Float(a), CellValue::Integer(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Rendered string for display and substring search.
    pub fn render(&self, kind: RenderKind) -> String {
        match (kind, self) {
            (RenderKind::Currency, CellValue::Float(amount)) => format!("${amount:.2}"),
            (RenderKind::Currency, CellValue::Integer(amount)) => {
                format!("${:.2}", *amount as f64)
            }
            (RenderKind::Date, CellValue::Date(date)) => {
                date.format("%b %-d, %Y").to_string()
            }
            (_, CellValue::Text(text)) if text.is_empty() => "-".to_string(),
            (_, CellValue::Text(text)) => text.clone(),
            (_, CellValue::Integer(n)) => n.to_string(),
            (_, CellValue::Float(x)) => x.to_string(),
            (_, CellValue::Date(date)) => date.format("%Y-%m-%d").to_string(),
            (_, CellValue::Empty) => "-".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(RenderKind::Text))
    }
}

/// Declares one table column over records of type `T`.
pub struct ColumnSpec<T> {
    pub key: &'static str,
    pub label: String,
    pub kind: RenderKind,
    pub sortable: bool,
    extract: fn(&T) -> CellValue,
}

impl<T> ColumnSpec<T> {
    pub fn new(key: &'static str, label: impl Into<String>, extract: fn(&T) -> CellValue) -> Self {
        Self {
            key,
            label: label.into(),
            kind: RenderKind::Text,
            sortable: true,
            extract,
        }
    }

    pub fn with_kind(mut self, kind: RenderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn value(&self, record: &T) -> CellValue {
        (self.extract)(record)
    }

    pub fn rendered(&self, record: &T) -> String {
        self.value(record).render(self.kind)
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            kind: self.kind,
            sortable: self.sortable,
            extract: self.extract,
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_currency_rendering() {
        assert_eq!(CellValue::Float(29.99).render(RenderKind::Currency), "$29.99");
        assert_eq!(CellValue::Float(60.0).render(RenderKind::Currency), "$60.00");
        assert_eq!(CellValue::Integer(5).render(RenderKind::Currency), "$5.00");
    }

    #[test]
    fn test_date_rendering() {
        assert_eq!(
            CellValue::Date(d(2015, 5, 19)).render(RenderKind::Date),
            "May 19, 2015"
        );
        // Date value under a plain column falls back to ISO.
        assert_eq!(
            CellValue::Date(d(2015, 5, 19)).render(RenderKind::Text),
            "2015-05-19"
        );
    }

    #[test]
    fn test_empty_values_render_placeholder() {
        assert_eq!(CellValue::Empty.render(RenderKind::Text), "-");
        assert_eq!(CellValue::text("").render(RenderKind::Text), "-");
    }

    #[test]
    fn test_compare_is_typed_not_lexicographic() {
        let two = CellValue::Integer(2);
        let ten = CellValue::Integer(10);
        assert_eq!(two.compare(&ten), Ordering::Less);

        let a = CellValue::Float(9.5);
        let b = CellValue::Float(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(
            CellValue::Empty.compare(&CellValue::text("anything")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Integer(0).compare(&CellValue::Empty),
            Ordering::Greater
        );
    }

    #[test]
    fn test_column_extraction() {
        struct Row {
            name: &'static str,
        }
        let column = ColumnSpec::new("name", "Name", |row: &Row| CellValue::text(row.name));
        assert_eq!(column.rendered(&Row { name: "Halo" }), "Halo");
        assert!(column.sortable);
    }
}

use std::borrow::Cow;
use std::fmt::{self, Display};

/// A single table cell
///
/// Loaders read every cell as text; spreadsheet lookups may also yield
/// numbers. An empty field is `Missing`, never an empty `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Absence of a value
    Missing,
    /// Textual scalar
    Text(String),
    /// Numeric scalar
    Number(f64),
}

impl DataValue {
    /// Build a cell from a raw field, mapping the empty string to `Missing`
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            DataValue::Missing
        } else {
            DataValue::Text(field.to_string())
        }
    }

    /// Check if the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, DataValue::Missing)
    }

    /// Textual form of the value, `None` when missing
    ///
    /// Integral numbers render without a fractional part so that a numeric
    /// `7.0` and the text `"7"` share the same textual form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            DataValue::Missing => None,
            DataValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            DataValue::Number(n) => Some(Cow::Owned(format_number(*n))),
        }
    }

    /// Numeric form of the value, `None` when missing or not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Missing => None,
            DataValue::Number(n) => Some(*n),
            DataValue::Text(s) => parse_number(s),
        }
    }

    /// Text written to output files (missing cells become empty fields)
    pub fn to_field(&self) -> Cow<'_, str> {
        self.as_text().unwrap_or(Cow::Borrowed(""))
    }
}

impl Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Missing => write!(f, "NaN"),
            other => write!(f, "{}", other.to_field()),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::from_field(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            DataValue::Missing
        } else {
            DataValue::Text(value)
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Number(value as f64)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DataValue::Missing)
    }
}

/// Render a number the way cells and keys are compared textually
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse trimmed text as a decimal number literal
///
/// Accepts an optional sign, digits and at most one decimal point. Exponents,
/// `inf` and `NaN` are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if crate::core::column::is_numeric_text(trimmed) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// How a column orders its values. Chosen when the column is declared,
/// never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(text) => Some(text.clone()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Empty => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }

    fn as_instant(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Text(text) => parse_instant(text),
            _ => None,
        }
    }

    fn sort_key(&self, kind: SortKind) -> SortKey {
        match kind {
            SortKind::Text => SortKey::Text(self.as_text()),
            SortKind::Number => SortKey::Number(self.as_number()),
            SortKind::Date => SortKey::Date(self.as_instant()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

macro_rules! numeric_cell {
    ($($ty:ty),+) => {
        $(impl From<$ty> for CellValue {
            fn from(value: $ty) -> Self {
                CellValue::Number(f64::from(value))
            }
        })+
    };
}

numeric_cell!(u8, u16, u32, i8, i16, i32, f32, f64);

/// Missing values order before present ones.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SortKey {
    Text(Option<String>),
    Number(Option<f64>),
    Date(Option<NaiveDateTime>),
}

impl SortKey {
    pub(crate) fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => match (a, b) {
                (Some(a), Some(b)) => compare_text(a, b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            },
            (SortKey::Number(a), SortKey::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            },
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Case-insensitive, with the raw strings breaking ties so the order stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

type Accessor<R> = Box<dyn Fn(&R) -> CellValue + Send + Sync>;
type Renderer<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

pub struct Column<R> {
    key: &'static str,
    header: &'static str,
    sortable: bool,
    kind: SortKind,
    value: Accessor<R>,
    render: Option<Renderer<R>>,
}

impl<R> Column<R> {
    pub fn new<F, V>(key: &'static str, header: &'static str, kind: SortKind, value: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self {
            key,
            header,
            sortable: false,
            kind,
            value: Box::new(move |row| value(row).into()),
            render: None,
        }
    }

    pub fn text<F, V>(key: &'static str, header: &'static str, value: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self::new(key, header, SortKind::Text, value)
    }

    pub fn number<F, V>(key: &'static str, header: &'static str, value: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self::new(key, header, SortKind::Number, value)
    }

    pub fn date<F, V>(key: &'static str, header: &'static str, value: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self::new(key, header, SortKind::Date, value)
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.value)(row)
    }

    pub fn display(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }

    pub(crate) fn sort_key(&self, row: &R) -> SortKey {
        self.value(row).sort_key(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically_not_lexicographically() {
        let nine = CellValue::Text("9".into()).sort_key(SortKind::Number);
        let ten = CellValue::Number(10.0).sort_key(SortKind::Number);
        assert_eq!(nine.compare(&ten), Ordering::Less);

        let nine_text = CellValue::Text("9".into()).sort_key(SortKind::Text);
        let ten_text = CellValue::Text("10".into()).sort_key(SortKind::Text);
        assert_eq!(nine_text.compare(&ten_text), Ordering::Greater);
    }

    #[test]
    fn text_compares_without_regard_to_case() {
        let lower = CellValue::from("amit").sort_key(SortKind::Text);
        let upper = CellValue::from("Sneha").sort_key(SortKind::Text);
        assert_eq!(lower.compare(&upper), Ordering::Less);

        let capital = CellValue::from("Amit").sort_key(SortKind::Text);
        assert_eq!(capital.compare(&lower), Ordering::Less);
        assert_eq!(lower.compare(&lower.clone()), Ordering::Equal);
    }

    #[test]
    fn dates_compare_chronologically_across_formats() {
        let earlier = CellValue::from("2023-12-15").sort_key(SortKind::Date);
        let later = CellValue::from("2024-01-01T00:00:00.000+05:30").sort_key(SortKind::Date);
        let latest = CellValue::from("2024-01-02").sort_key(SortKind::Date);
        assert_eq!(earlier.compare(&later), Ordering::Less);
        assert_eq!(later.compare(&latest), Ordering::Less);
    }

    #[test]
    fn missing_values_sort_first() {
        let missing = CellValue::Empty.sort_key(SortKind::Number);
        let present = CellValue::Number(-5.0).sort_key(SortKind::Number);
        assert_eq!(missing.compare(&present), Ordering::Less);
        assert_eq!(present.compare(&missing), Ordering::Greater);
        assert_eq!(missing.compare(&missing), Ordering::Equal);
    }

    #[test]
    fn render_overrides_display_value() {
        let column: Column<(String, u32)> = Column::text("name", "Name", |row: &(String, u32)| {
            row.0.clone()
        })
        .render(|row| format!("{} ({})", row.0, row.1));
        let row = ("Ada".to_string(), 3);
        assert_eq!(column.value(&row), CellValue::Text("Ada".into()));
        assert_eq!(column.display(&row), "Ada (3)");
    }
}

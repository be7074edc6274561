//! In-memory table engine shared by every list screen: equality filter,
//! case-insensitive search, single-key stable sort and page slicing.
//!
//! The pipeline always runs in the same order (filter → search → sort →
//! paginate) and is recomputed from the source rows on every state change.

use thiserror::Error;
use tracing::debug;

mod column;

pub use column::{CellValue, Column, SortKind};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    All,
    Equals(String),
}

impl FilterValue {
    /// `"all"` is the sentinel the filter dropdown uses for "no filter".
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            FilterValue::All
        } else {
            FilterValue::Equals(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewState {
    pub search_query: String,
    pub sort_key: Option<&'static str>,
    pub sort_direction: SortDirection,
    pub active_filter: FilterValue,
    pub current_page: usize,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            active_filter: FilterValue::All,
            current_page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no column named '{0}'")]
    UnknownColumn(String),
    #[error("column '{0}' is not sortable")]
    NotSortable(String),
    #[error("this table has no filter field")]
    NoFilterField,
}

type FieldAccessor<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

struct FilterField<R> {
    key: &'static str,
    options: Vec<FilterOption>,
    value: FieldAccessor<R>,
}

struct SearchField<R> {
    key: &'static str,
    value: FieldAccessor<R>,
}

pub struct DataTable<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    search: Option<SearchField<R>>,
    filter: Option<FilterField<R>>,
    page_size: usize,
    state: TableViewState,
    /// Indices into `rows` after filter, search and sort.
    view: Vec<usize>,
}

impl<R> DataTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            search: None,
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
            state: TableViewState::default(),
            view: Vec::new(),
        }
    }

    pub fn search_by<F>(mut self, key: &'static str, value: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.search = Some(SearchField {
            key,
            value: Box::new(value),
        });
        self.recompute();
        self
    }

    pub fn filter_by<F>(mut self, key: &'static str, options: Vec<FilterOption>, value: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.filter = Some(FilterField {
            key,
            options,
            value: Box::new(value),
        });
        self.recompute();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.recompute();
        self
    }

    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.recompute();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn state(&self) -> &TableViewState {
        &self.state
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::header).collect()
    }

    pub fn search_key(&self) -> Option<&'static str> {
        self.search.as_ref().map(|search| search.key)
    }

    pub fn filter_key(&self) -> Option<&'static str> {
        self.filter.as_ref().map(|filter| filter.key)
    }

    pub fn filter_options(&self) -> &[FilterOption] {
        self.filter
            .as_ref()
            .map(|filter| filter.options.as_slice())
            .unwrap_or_default()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
        self.state.current_page = 1;
        self.recompute();
    }

    /// Reselecting the active key flips the direction; a new key starts ascending.
    pub fn set_sort(&mut self, key: &str) -> Result<(), TableError> {
        let column = self
            .columns
            .iter()
            .find(|column| column.key() == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        if !column.is_sortable() {
            debug!(column = key, "table: ignoring sort on non-sortable column");
            return Err(TableError::NotSortable(key.to_string()));
        }

        let column_key = column.key();
        if self.state.sort_key == Some(column_key) {
            self.state.sort_direction = self.state.sort_direction.toggled();
        } else {
            self.state.sort_key = Some(column_key);
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.recompute();
        Ok(())
    }

    pub fn set_filter(&mut self, value: FilterValue) -> Result<(), TableError> {
        if self.filter.is_none() && value != FilterValue::All {
            return Err(TableError::NoFilterField);
        }
        self.state.active_filter = value;
        self.state.current_page = 1;
        self.recompute();
        Ok(())
    }

    /// Out-of-range pages clamp to the nearest valid page.
    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page.clamp(1, self.page_count());
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.page_size).max(1)
    }

    pub fn filtered_rows(&self) -> Vec<&R> {
        self.view.iter().map(|&idx| &self.rows[idx]).collect()
    }

    pub fn page_rows(&self) -> Vec<&R> {
        let start = (self.state.current_page - 1) * self.page_size;
        self.view
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&idx| &self.rows[idx])
            .collect()
    }

    pub fn render_row(&self, row: &R) -> Vec<String> {
        self.columns.iter().map(|column| column.display(row)).collect()
    }

    /// Applies a local edit to the source rows and re-runs the pipeline.
    pub fn patch_rows<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<R>),
    {
        edit(&mut self.rows);
        self.recompute();
    }

    pub fn update_where<P, F>(&mut self, predicate: P, mut update: F) -> usize
    where
        P: Fn(&R) -> bool,
        F: FnMut(&mut R),
    {
        let mut touched = 0;
        self.patch_rows(|rows| {
            for row in rows.iter_mut().filter(|row| predicate(row)) {
                update(row);
                touched += 1;
            }
        });
        touched
    }

    pub fn retain<P>(&mut self, keep: P)
    where
        P: Fn(&R) -> bool,
    {
        self.patch_rows(|rows| rows.retain(|row| keep(row)));
    }

    pub fn push(&mut self, row: R) {
        self.patch_rows(|rows| rows.push(row));
    }

    fn recompute(&mut self) {
        let needle = self.state.search_query.to_lowercase();
        let mut view: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches_filter(row))
            .filter(|(_, row)| self.matches_search(row, &needle))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(column) = self
            .state
            .sort_key
            .and_then(|key| self.columns.iter().find(|column| column.key() == key))
        {
            let mut keyed: Vec<_> = view
                .into_iter()
                .map(|idx| (idx, column.sort_key(&self.rows[idx])))
                .collect();
            let direction = self.state.sort_direction;
            // `sort_by` is stable, so ties keep source order in both directions.
            keyed.sort_by(|(_, a), (_, b)| match direction {
                SortDirection::Ascending => a.compare(b),
                SortDirection::Descending => b.compare(a),
            });
            view = keyed.into_iter().map(|(idx, _)| idx).collect();
        }

        self.view = view;
        self.state.current_page = self.state.current_page.clamp(1, self.page_count());
    }

    fn matches_filter(&self, row: &R) -> bool {
        match (&self.state.active_filter, &self.filter) {
            (FilterValue::Equals(expected), Some(filter)) => (filter.value)(row) == *expected,
            _ => true,
        }
    }

    fn matches_search(&self, row: &R, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        match &self.search {
            Some(search) => (search.value)(row).to_lowercase().contains(needle),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

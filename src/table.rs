//! Sortable, paginated tables
//!
//! Sorting and paging logic for tabular views (top products, categories).
//! Rendering is left to the caller; this module only decides which rows are
//! shown, in which order, and which page links to offer.
//!
//! Sorting cycles per column: unsorted → ascending → descending → unsorted.
//! Missing values always sort last regardless of direction, and rows that
//! compare equal keep their input order.

use crate::engine::{Product, ProductCategory};
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised by table operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Invalid page size: {0} (must be >= 1)")]
    InvalidPageSize(usize),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// A column a table can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn new(key: &'static str, header: &'static str, sortable: bool) -> Self {
        Self {
            key,
            header,
            sortable,
        }
    }
}

/// Value of one cell as seen by the sorter
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
    Missing,
}

impl SortValue<'_> {
    fn text(&self) -> String {
        match self {
            SortValue::Number(n) => n.to_string(),
            SortValue::Text(s) => s.to_string(),
            SortValue::Missing => String::new(),
        }
    }
}

/// Rows that can be shown in a sortable table
pub trait TableRow {
    /// Columns in display order
    fn columns() -> &'static [Column];

    /// Value of the cell under `key`
    fn sort_value(&self, key: &str) -> SortValue<'_>;
}

/// Sort direction of the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Which column the table is sorted by, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(&'static str, SortDirection)>,
}

impl SortState {
    /// Sorted ascending by `key`
    pub fn ascending(key: &'static str) -> Self {
        Self {
            active: Some((key, SortDirection::Asc)),
        }
    }

    /// Sorted descending by `key`
    pub fn descending(key: &'static str) -> Self {
        Self {
            active: Some((key, SortDirection::Desc)),
        }
    }

    pub fn key(&self) -> Option<&'static str> {
        self.active.map(|(key, _)| key)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, direction)| direction)
    }

    /// Advance the sort cycle for `column`
    ///
    /// Returns `false` (and changes nothing) for non-sortable columns.
    pub fn toggle(&mut self, column: &Column) -> bool {
        if !column.sortable {
            return false;
        }

        self.active = match self.active {
            Some((key, SortDirection::Asc)) if key == column.key => {
                Some((key, SortDirection::Desc))
            }
            Some((key, SortDirection::Desc)) if key == column.key => None,
            _ => Some((column.key, SortDirection::Asc)),
        };
        true
    }

    /// Compare two rows under this sort state
    pub fn compare<T: TableRow>(&self, a: &T, b: &T) -> Ordering {
        let Some((key, direction)) = self.active else {
            return Ordering::Equal;
        };

        let a = a.sort_value(key);
        let b = b.sort_value(key);

        if a == b {
            return Ordering::Equal;
        }

        let ordering = match (&a, &b) {
            (SortValue::Missing, _) => return Ordering::Greater,
            (_, SortValue::Missing) => return Ordering::Less,
            (SortValue::Number(x), SortValue::Number(y)) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            // case-only differences compare equal and keep input order
            _ => a.text().to_lowercase().cmp(&b.text().to_lowercase()),
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Rows in display order under `sort` (stable)
pub fn sort_rows<'a, T: TableRow>(rows: &'a [T], sort: &SortState) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| sort.compare(*a, *b));
    sorted
}

/// One page of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T: Serialize> {
    pub rows: Vec<&'a T>,
    /// 1-based page number actually shown
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub first_row: usize,
    /// 1-based index of the last row shown, 0 when empty
    pub last_row: usize,
}

impl<T: Serialize> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination controls are only shown for more than one page
    pub fn needs_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Number of pages needed for `rows` rows
pub fn total_pages(rows: usize, page_size: usize) -> TableResult<usize> {
    if page_size == 0 {
        return Err(TableError::InvalidPageSize(page_size));
    }
    Ok(rows.div_ceil(page_size))
}

/// Slice `rows` to the requested 1-based page, clamped to existing pages
pub fn paginate<'a, T: Serialize>(
    rows: Vec<&'a T>,
    page: usize,
    page_size: usize,
) -> TableResult<Page<'a, T>> {
    let total_rows = rows.len();
    let total_pages = total_pages(total_rows, page_size)?;
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_rows);
    let shown: Vec<&T> = rows.into_iter().skip(start).take(end.saturating_sub(start)).collect();

    let (first_row, last_row) = if shown.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Ok(Page {
        rows: shown,
        page,
        total_pages,
        total_rows,
        first_row,
        last_row,
    })
}

/// Entry in the page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page selector entries for `current` of `total` pages
///
/// Always lists the first and last page plus the neighbours of the current
/// page; a gap of more than one page collapses into an ellipsis.
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    let mut links = Vec::new();

    for page in 1..=total {
        let near = page + 1 >= current && page <= current + 1;
        if page == 1 || page == total || near {
            links.push(PageLink::Page(page));
        } else if page + 2 == current || page == current + 2 {
            links.push(PageLink::Ellipsis);
        }
    }

    links
}

/// Sort and page position of an interactive table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: SortState,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    pub fn new(page_size: usize) -> TableResult<Self> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the sort state and return to the first page
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 1;
    }

    /// Click on the header of column `key`
    pub fn toggle_sort<T: TableRow>(&mut self, key: &str) -> TableResult<()> {
        let column = T::columns()
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;

        if self.sort.toggle(column) {
            self.page = 1;
        }
        Ok(())
    }

    /// Jump to a page, clamped to `[1, total_pages]`
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page + 1, total_pages);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Rows visible in the current state
    pub fn view<'a, T: TableRow + Serialize>(&self, rows: &'a [T]) -> TableResult<Page<'a, T>> {
        paginate(sort_rows(rows, &self.sort), self.page, self.page_size)
    }
}

const PRODUCT_COLUMNS: &[Column] = &[
    Column::new("name", "Product Name", true),
    Column::new("category", "Category", true),
    Column::new("sales", "Sales", true),
    Column::new("units", "Units Sold", true),
    Column::new("growth", "Growth", true),
];

impl TableRow for Product {
    fn columns() -> &'static [Column] {
        PRODUCT_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "id" => SortValue::Text(&self.id),
            "name" => SortValue::Text(&self.name),
            "category" => SortValue::Text(&self.category),
            "sales" => SortValue::Number(self.sales as f64),
            "units" => SortValue::Number(self.units as f64),
            "growth" => SortValue::Number(self.growth),
            "imageUrl" => self
                .image_url
                .as_deref()
                .map(SortValue::Text)
                .unwrap_or(SortValue::Missing),
            _ => SortValue::Missing,
        }
    }
}

const CATEGORY_COLUMNS: &[Column] = &[
    Column::new("name", "Category", true),
    Column::new("value", "Sales", true),
    Column::new("percentage", "Share", true),
    Column::new("growth", "Growth", true),
    Column::new("color", "Color", false),
];

impl TableRow for ProductCategory {
    fn columns() -> &'static [Column] {
        CATEGORY_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "id" => SortValue::Text(&self.id),
            "name" => SortValue::Text(&self.name),
            "value" => SortValue::Number(self.value as f64),
            "percentage" => SortValue::Number(self.percentage),
            "growth" => SortValue::Number(self.growth),
            "color" => SortValue::Text(&self.color),
            _ => SortValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Catalog;

    fn products() -> Vec<Product> {
        Catalog::standard().top_products.as_ref().clone()
    }

    #[test]
    fn test_sort_cycle() {
        let column = PRODUCT_COLUMNS[2];
        let mut sort = SortState::default();

        assert!(sort.toggle(&column));
        assert_eq!(sort, SortState::ascending("sales"));
        sort.toggle(&column);
        assert_eq!(sort, SortState::descending("sales"));
        sort.toggle(&column);
        assert_eq!(sort.key(), None);

        let mut sort = SortState::descending("sales");
        sort.toggle(&PRODUCT_COLUMNS[0]);
        assert_eq!(sort, SortState::ascending("name"));
    }

    #[test]
    fn test_non_sortable_column_is_ignored() {
        let mut sort = SortState::ascending("name");
        assert!(!sort.toggle(&CATEGORY_COLUMNS[4]));
        assert_eq!(sort, SortState::ascending("name"));
    }

    #[test]
    fn test_numeric_sort() {
        let rows = products();

        let asc = sort_rows(&rows, &SortState::ascending("units"));
        assert_eq!(asc[0].units, 178);
        assert_eq!(asc[9].units, 2_847);

        let desc = sort_rows(&rows, &SortState::descending("growth"));
        assert_eq!(desc[0].name, "La Prairie Skin Serum");
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_stable() {
        let mut rows = products();
        rows[1].category = "electronics".to_string();

        let sorted = sort_rows(&rows, &SortState::ascending("category"));
        assert_eq!(sorted[0].category, "Beauty & Care");

        let electronics: Vec<&str> = sorted
            .iter()
            .skip(1)
            .take(4)
            .map(|p| p.id.as_str())
            .collect();
        // equal keys keep input order, whatever their case
        assert_eq!(electronics, vec!["prod-001", "prod-002", "prod-004", "prod-006"]);

        let desc = sort_rows(&rows, &SortState::descending("category"));
        let electronics: Vec<&str> = desc
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case("electronics"))
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(electronics, vec!["prod-001", "prod-002", "prod-004", "prod-006"]);
        assert_eq!(sorted[5].category, "Fashion & Apparel");
    }

    #[test]
    fn test_missing_values_sort_last_both_ways() {
        let mut rows = products();
        rows[0].image_url = None;

        let asc = sort_rows(&rows, &SortState::ascending("imageUrl"));
        assert_eq!(asc.last().unwrap().id, "prod-001");

        let desc = sort_rows(&rows, &SortState::descending("imageUrl"));
        assert_eq!(desc.last().unwrap().id, "prod-001");
    }

    #[test]
    fn test_unsorted_keeps_order() {
        let rows = products();
        let sorted = sort_rows(&rows, &SortState::default());
        assert!(sorted.iter().zip(&rows).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_paginate() {
        let rows = products();
        let page = paginate(rows.iter().collect(), 3, 4).unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 2);
        assert_eq!((page.first_row, page.last_row), (9, 10));
        assert!(page.has_previous());
        assert!(!page.has_next());

        let clamped = paginate(rows.iter().collect(), 99, 4).unwrap();
        assert_eq!(clamped.page, 3);

        let single = paginate(rows.iter().collect(), 1, 10).unwrap();
        assert!(!single.needs_pagination());
    }

    #[test]
    fn test_paginate_empty() {
        let rows: Vec<Product> = Vec::new();
        let page = paginate(rows.iter().collect(), 1, 10).unwrap();

        assert!(page.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!((page.first_row, page.last_row), (0, 0));
    }

    #[test]
    fn test_zero_page_size() {
        assert_eq!(total_pages(5, 0).unwrap_err(), TableError::InvalidPageSize(0));
        assert!(TableState::new(0).is_err());
    }

    #[test]
    fn test_page_links() {
        use PageLink::{Ellipsis, Page};

        assert_eq!(page_links(1, 1), vec![Page(1)]);
        assert_eq!(page_links(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_links(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(page_links(1, 6), vec![Page(1), Page(2), Ellipsis, Page(6)]);
        assert!(page_links(1, 0).is_empty());
    }

    #[test]
    fn test_table_state_resets_page_on_sort() {
        let rows = products();
        let mut state = TableState::new(3).unwrap();

        state.next_page(4);
        state.next_page(4);
        assert_eq!(state.page(), 3);

        state.toggle_sort::<Product>("sales").unwrap();
        assert_eq!(state.page(), 1);

        let page = state.view(&rows).unwrap();
        assert_eq!(page.rows[0].sales, 54_230);

        state.prev_page();
        assert_eq!(state.page(), 1);

        assert_eq!(
            state.toggle_sort::<Product>("price").unwrap_err(),
            TableError::UnknownColumn("price".to_string())
        );
    }

    #[test]
    fn test_next_page_stops_at_last() {
        let mut state = TableState::default();
        state.next_page(1);
        assert_eq!(state.page(), 1);
    }
}

use fleet_schema::{DEFAULT_PAGE_SIZE, ListParams, ShipField, SortOrder};
use std::collections::BTreeMap;

/// Filter, sort and paging state behind the ship table.
///
/// Every mutator reports whether the parameters actually changed, which is
/// exactly when the caller owes the server one new list fetch. Changing a
/// filter keeps the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipQueryState {
    filters: BTreeMap<ShipField, String>,
    sort: Option<(ShipField, SortOrder)>,
    page: u32,
    page_size: u32,
}

impl Default for ShipQueryState {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ShipQueryState {
    pub fn filters(&self) -> &BTreeMap<ShipField, String> {
        &self.filters
    }

    pub fn sort(&self) -> Option<(ShipField, SortOrder)> {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn put_filter(&mut self, field: ShipField, value: &str) -> bool {
        if !field.is_filterable() {
            return false;
        }
        if value.is_empty() {
            return self.filters.remove(&field).is_some();
        }
        if self.filters.get(&field).map(String::as_str) == Some(value) {
            return false;
        }
        self.filters.insert(field, value.to_string());
        true
    }

    /// An empty value removes the filter. Fields that cannot be filtered are
    /// ignored.
    pub fn set_filter(&mut self, field: ShipField, value: &str) -> bool {
        self.put_filter(field, value)
    }

    /// Applies several filter edits at once; the caller fetches at most once.
    pub fn apply_filters<'a, I>(&mut self, edits: I) -> bool
    where
        I: IntoIterator<Item = (ShipField, &'a str)>,
    {
        edits
            .into_iter()
            .fold(false, |changed, (field, value)| {
                self.put_filter(field, value) | changed
            })
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = !self.filters.is_empty();
        self.filters.clear();
        changed
    }

    pub fn set_sort(&mut self, field: ShipField, order: SortOrder) -> bool {
        let next = Some((field, order));
        let changed = self.sort != next;
        self.sort = next;
        changed
    }

    pub fn clear_sort(&mut self) -> bool {
        self.sort.take().is_some()
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// A zero page size is refused.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        true
    }

    /// Canonical `key=value&key=value` form of the active filters, in field
    /// table order with percent-encoded values.
    ///
    /// Uses the same pairs and encoder as the query string of a list fetch.
    pub fn filter_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_params().filter_pairs())
            .finish()
    }

    /// Parameters for the next list fetch. Paging is always sent, so the
    /// server always returns a window.
    pub fn to_params(&self) -> ListParams {
        ListParams {
            filters: self.filters.clone(),
            sort: self.sort,
            page: Some(self.page),
            page_size: Some(self.page_size),
        }
    }

    /// Number of pages needed for `count` records at the current page size.
    pub fn page_count(&self, count: u64) -> u64 {
        count.div_ceil(u64::from(self.page_size))
    }
}

//! Collection-endpoint contract shared by the server and its clients.
//!
//! `GET /ships` understands:
//! - `name`, `displacement`: substring filters (any other key is ignored)
//! - `sortField`, `sortOrder`: single-field ordering, descending iff `sortOrder=-1`
//! - `page` (zero-based), `pageSize` (default [`DEFAULT_PAGE_SIZE`])

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ship::Ship;

pub const PARAM_SORT_FIELD: &str = "sortField";
pub const PARAM_SORT_ORDER: &str = "sortOrder";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "pageSize";

/// Page size applied when the request does not carry a usable `pageSize`.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Sentinel value of `sortOrder` that selects descending order.
const DESCENDING_SENTINEL: &str = "-1";

/// Response body of the collection endpoint.
///
/// `count` is the total number of ships in the store, independent of the
/// filter that produced `records`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipList {
    pub records: Vec<Ship>,
    pub count: u64,
}

/// Fields of the ship collection that can appear in list parameters.
///
/// Variant order is the canonical order used when serializing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipField {
    Id,
    Name,
    Displacement,
}

impl ShipField {
    pub const ALL: [ShipField; 3] = [ShipField::Id, ShipField::Name, ShipField::Displacement];

    pub const fn as_str(self) -> &'static str {
        match self {
            ShipField::Id => "id",
            ShipField::Name => "name",
            ShipField::Displacement => "displacement",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        ShipField::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Only `name` and `displacement` accept filters.
    pub const fn is_filterable(self) -> bool {
        matches!(self, ShipField::Name | ShipField::Displacement)
    }
}

impl fmt::Display for ShipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Anything but the `-1` sentinel, including a missing value, is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(DESCENDING_SENTINEL) => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    pub const fn as_param(self) -> &'static str {
        match self {
            SortOrder::Ascending => "1",
            SortOrder::Descending => DESCENDING_SENTINEL,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Typed form of the collection-endpoint query string, as a client sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub filters: BTreeMap<ShipField, String>,
    pub sort: Option<(ShipField, SortOrder)>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListParams {
    /// Filter pairs in field table order, empty values dropped.
    pub fn filter_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Query pairs in canonical order: filters by field, then sort, then paging.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .filter_pairs()
            .map(|(key, value)| (key, value.to_string()))
            .collect();

        if let Some((field, order)) = self.sort {
            pairs.push((PARAM_SORT_FIELD, field.as_str().to_string()));
            pairs.push((PARAM_SORT_ORDER, order.as_param().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push((PARAM_PAGE, page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push((PARAM_PAGE_SIZE, page_size.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_only_honours_the_descending_sentinel() {
        assert_eq!(SortOrder::from_param(Some("-1")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(Some("1")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(Some("")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(None), SortOrder::Ascending);
    }

    #[test]
    fn field_table_lookup() {
        assert_eq!(ShipField::parse("name"), Some(ShipField::Name));
        assert_eq!(ShipField::parse("Name"), None);
        assert!(ShipField::Displacement.is_filterable());
        assert!(!ShipField::Id.is_filterable());
    }

    #[test]
    fn query_pairs_are_canonical() {
        let mut params = ListParams::default();
        params
            .filters
            .insert(ShipField::Displacement, "12".to_string());
        params.filters.insert(ShipField::Name, "Naut".to_string());
        params.sort = Some((ShipField::Name, SortOrder::Descending));
        params.page = Some(0);
        params.page_size = Some(5);

        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("name", "Naut".to_string()),
                ("displacement", "12".to_string()),
                ("sortField", "name".to_string()),
                ("sortOrder", "-1".to_string()),
                ("page", "0".to_string()),
                ("pageSize", "5".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_values_are_dropped() {
        let mut params = ListParams::default();
        params.filters.insert(ShipField::Name, String::new());
        assert!(params.to_query_pairs().is_empty());
    }
}

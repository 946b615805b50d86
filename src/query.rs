//! Translation of collection-endpoint parameters into a ship query descriptor.
//!
//! Building a [`ShipQuery`] never touches the store and never fails: a
//! parameter that cannot be used simply has no effect on its part of the
//! descriptor (filter key skipped, sort omitted, pagination disabled).

use fleet_schema::{
    DEFAULT_PAGE_SIZE, PARAM_PAGE, PARAM_PAGE_SIZE, PARAM_SORT_FIELD, PARAM_SORT_ORDER,
    ShipField, SortOrder,
};
use std::collections::HashMap;

/// How a field is matched and ordered in SQL.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: ShipField,
    /// Column used in `ORDER BY`.
    pub column: &'static str,
    /// Text expression matched by `LIKE`. Only used for fields that
    /// [`ShipField::is_filterable`] admits.
    pub match_expr: &'static str,
}

/// Static field table for the ship collection.
pub static SHIP_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        field: ShipField::Id,
        column: "id",
        match_expr: "CAST(id AS TEXT)",
    },
    FieldSpec {
        field: ShipField::Name,
        column: "name",
        match_expr: "name",
    },
    FieldSpec {
        field: ShipField::Displacement,
        column: "displacement",
        match_expr: "CAST(displacement AS TEXT)",
    },
];

impl FieldSpec {
    pub fn of(field: ShipField) -> &'static FieldSpec {
        // SHIP_FIELDS is indexed in `ShipField::ALL` order.
        &SHIP_FIELDS[field as usize]
    }
}

/// Substring constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: ShipField,
    pub needle: String,
}

impl FieldFilter {
    /// `LIKE` pattern matching `needle` anywhere, with `\` as escape character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for c in self.needle.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: ShipField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u64,
}

/// Store query descriptor for the ship collection. The three parts are
/// independent; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipQuery {
    /// Conjunction of substring matches, in field-table order.
    pub filters: Vec<FieldFilter>,
    pub order: Option<OrderBy>,
    pub window: Option<Window>,
}

impl ShipQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str);

        let filters = SHIP_FIELDS
            .iter()
            .filter(|spec| spec.field.is_filterable())
            .filter_map(|spec| {
                let value = get(spec.field.as_str())?;
                (!value.is_empty()).then(|| FieldFilter {
                    field: spec.field,
                    needle: value.to_string(),
                })
            })
            .collect();

        let order = get(PARAM_SORT_FIELD)
            .and_then(ShipField::parse)
            .map(|field| OrderBy {
                field,
                order: SortOrder::from_param(get(PARAM_SORT_ORDER)),
            });

        let page_size = get(PARAM_PAGE_SIZE)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let window = get(PARAM_PAGE)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .map(|page| Window {
                limit: page_size,
                offset: u64::from(page_size) * u64::from(page),
            });

        Self {
            filters,
            order,
            window,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.filters.is_empty() && self.order.is_none() && self.window.is_none()
    }
}

//! Read-side SQL: rendering a [`ShipQuery`] and scoped lookups.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::{DbCrewMember, DbShip};
use crate::error::{Entity, FleetError};
use crate::query::{FieldSpec, ShipQuery};

/// Render a ship query descriptor as a `SELECT` with bound parameters.
///
/// Rows come back in descriptor order, with `id` as tie-breaker so paging is
/// stable when the sort key has duplicates.
pub fn ship_select(query: &ShipQuery) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT id, name, displacement FROM ships");

    let mut sep = " WHERE ";
    for filter in &query.filters {
        if !filter.field.is_filterable() {
            continue;
        }
        qb.push(sep)
            .push(FieldSpec::of(filter.field).match_expr)
            .push(" LIKE ")
            .push_bind(filter.like_pattern())
            .push(" ESCAPE '\\'");
        sep = " AND ";
    }

    qb.push(" ORDER BY ");
    if let Some(order) = query.order {
        qb.push(FieldSpec::of(order.field).column)
            .push(" ")
            .push(order.order.as_sql())
            .push(", ");
    }
    qb.push("id ASC");

    if let Some(window) = query.window {
        qb.push(" LIMIT ")
            .push_bind(i64::from(window.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));
    }

    qb
}

pub(crate) async fn ensure_ship(pool: &SqlitePool, ship_id: i64) -> Result<(), FleetError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM ships WHERE id = ?")
        .bind(ship_id)
        .fetch_optional(pool)
        .await?;
    found.map(|_| ()).ok_or(FleetError::NotFound(Entity::Ship))
}

pub(crate) async fn find_ship(pool: &SqlitePool, id: i64) -> Result<DbShip, FleetError> {
    sqlx::query_as::<_, DbShip>("SELECT id, name, displacement FROM ships WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(FleetError::NotFound(Entity::Ship))
}

pub(crate) async fn find_crew_member(
    pool: &SqlitePool,
    ship_id: i64,
    id: i64,
) -> Result<DbCrewMember, FleetError> {
    ensure_ship(pool, ship_id).await?;
    sqlx::query_as::<_, DbCrewMember>(
        r#"
        SELECT id, name, role, ship_id
        FROM crew_members
        WHERE id = ? AND ship_id = ?
        "#,
    )
    .bind(id)
    .bind(ship_id)
    .fetch_optional(pool)
    .await?
    .ok_or(FleetError::NotFound(Entity::CrewMember))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sql_for(pairs: &[(&str, &str)]) -> String {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ship_select(&ShipQuery::from_params(&params))
            .sql()
            .to_string()
    }

    #[test]
    fn unconstrained_select() {
        assert_eq!(
            sql_for(&[]),
            "SELECT id, name, displacement FROM ships ORDER BY id ASC"
        );
    }

    #[test]
    fn full_select() {
        assert_eq!(
            sql_for(&[
                ("displacement", "1"),
                ("name", "a"),
                ("sortField", "name"),
                ("sortOrder", "-1"),
                ("page", "2"),
            ]),
            "SELECT id, name, displacement FROM ships \
             WHERE name LIKE ? ESCAPE '\\' AND CAST(displacement AS TEXT) LIKE ? ESCAPE '\\' \
             ORDER BY name DESC, id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn hand_built_filters_on_unfilterable_fields_are_skipped() {
        use crate::query::FieldFilter;
        use fleet_schema::ShipField;

        let query = ShipQuery {
            filters: vec![FieldFilter {
                field: ShipField::Id,
                needle: "1".to_string(),
            }],
            ..ShipQuery::default()
        };
        assert_eq!(
            ship_select(&query).sql().to_string(),
            "SELECT id, name, displacement FROM ships ORDER BY id ASC"
        );
    }
}

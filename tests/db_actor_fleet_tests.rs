use fleet::db::{CrewMemberCreate, FleetPatch, FleetStore, ShipCreate, ShipPatch};
use fleet::error::{Entity, FleetError};
use fleet::query::ShipQuery;
use fleet_schema::CrewRole;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_db(tag: &str) -> (PathBuf, String) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "fleet-db-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let url = format!("sqlite:{}", path.display());
    (path, url)
}

fn ship(name: &str, displacement: i64) -> ShipCreate {
    ShipCreate {
        name: name.to_string(),
        displacement,
    }
}

fn query(pairs: &[(&str, &str)]) -> ShipQuery {
    let params: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    ShipQuery::from_params(&params)
}

#[tokio::test]
async fn ship_lifecycle_and_bulk_atomicity() {
    let (path, url) = temp_db("ships");
    let db = fleet::db::spawn(&url).await.expect("spawn DbActor");

    // 1. Fresh store is empty
    assert!(db.list_ships(ShipQuery::default()).await.unwrap().is_empty());
    assert_eq!(db.count_ships().await.unwrap(), 0);

    // 2. Bulk insert returns ids in input order
    let ids = db
        .create_ships(vec![
            ship("Nautilus", 1200),
            ship("Argo", 300),
            ship("Endurance", 75),
        ])
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);

    // 3. One bad record rejects the whole batch
    let err = db
        .create_ships(vec![ship("Beagle", 235), ship("Ox", 100)])
        .await
        .unwrap_err();
    assert!(matches!(err, FleetError::Validation(_)), "got {err:?}");
    assert_eq!(db.count_ships().await.unwrap(), 3);

    // 4. Filter, sort, page
    let found = db.list_ships(query(&[("name", "Naut")])).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Nautilus");

    let found = db
        .list_ships(query(&[("displacement", "0")]))
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Nautilus", "Argo"]);

    let found = db
        .list_ships(query(&[
            ("sortField", "displacement"),
            ("sortOrder", "-1"),
            ("page", "1"),
            ("pageSize", "2"),
        ]))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Endurance");

    // 5. Patch touches only the given fields, and rejects bad values
    db.patch(FleetPatch::Ship {
        id: ids[1],
        patch: ShipPatch {
            name: None,
            displacement: Some(310),
        },
    })
    .await
    .unwrap();
    let argo = db.get_ship(ids[1]).await.unwrap();
    assert_eq!(argo.name, "Argo");
    assert_eq!(argo.displacement, 310);

    let err = db
        .patch(FleetPatch::Ship {
            id: ids[1],
            patch: ShipPatch {
                name: Some("Ar".to_string()),
                displacement: None,
            },
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FleetError::Validation(_)));
    assert_eq!(db.get_ship(ids[1]).await.unwrap().name, "Argo");

    // 6. Missing rows
    assert!(matches!(
        db.get_ship(9999).await,
        Err(FleetError::NotFound(Entity::Ship))
    ));
    assert!(matches!(
        db.delete_ship(9999).await,
        Err(FleetError::NotFound(Entity::Ship))
    ));

    // 7. Reset empties everything
    db.reset().await.unwrap();
    assert_eq!(db.count_ships().await.unwrap(), 0);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn crew_members_are_scoped_to_their_ship_and_cascade() {
    let (path, url) = temp_db("crew");
    let db = fleet::db::spawn(&url).await.expect("spawn DbActor");

    let ids = db
        .create_ships(vec![ship("Pequod", 900), ship("Rachel", 800)])
        .await
        .unwrap();
    let (pequod, rachel) = (ids[0], ids[1]);

    // 1. Create under the first ship
    let ahab = db
        .create_crew_member(
            pequod,
            CrewMemberCreate {
                name: "Captain Ahab".to_string(),
                role: CrewRole::Captain,
            },
        )
        .await
        .unwrap();
    let crew = db.list_crew_members(pequod).await.unwrap();
    assert_eq!(crew.len(), 1);
    assert_eq!(crew[0].ship_id, pequod);
    assert_eq!(crew[0].role, CrewRole::Captain);

    // 2. Wrong parent is not-found, not a cross reference
    assert!(matches!(
        db.get_crew_member(rachel, ahab).await,
        Err(FleetError::NotFound(Entity::CrewMember))
    ));
    assert!(matches!(
        db.get_crew_member(9999, ahab).await,
        Err(FleetError::NotFound(Entity::Ship))
    ));
    assert!(matches!(
        db.delete_crew_member(rachel, ahab).await,
        Err(FleetError::NotFound(Entity::CrewMember))
    ));
    let err = db
        .patch(FleetPatch::CrewMember {
            ship_id: rachel,
            id: ahab,
            patch: Default::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FleetError::NotFound(Entity::CrewMember)));

    // 3. Short names are rejected
    let err = db
        .create_crew_member(
            pequod,
            CrewMemberCreate {
                name: "Pip".to_string(),
                role: CrewRole::Deckhand,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FleetError::Validation(_)));

    // 4. Deleting the ship removes its crew rows
    db.create_crew_member(
        pequod,
        CrewMemberCreate {
            name: "Starbuck".to_string(),
            role: CrewRole::Boatswain,
        },
    )
    .await
    .unwrap();
    db.delete_ship(pequod).await.unwrap();
    assert!(matches!(
        db.list_crew_members(pequod).await,
        Err(FleetError::NotFound(Entity::Ship))
    ));

    let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM crew_members WHERE ship_id = ?")
        .bind(pequod)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    pool.close().await;

    let _ = tokio::fs::remove_file(&path).await;
}

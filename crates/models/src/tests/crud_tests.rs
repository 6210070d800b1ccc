use crate::audit::{AuditStamp, Audited};
use crate::db::connect_in_memory;
use crate::{expedition, store, storage};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter};

fn stamp(actor: &str) -> AuditStamp {
    AuditStamp { actor: actor.into(), at: Utc::now(), agent: "core-test".into(), timezone_offset: 7 }
}

/// Insert, read back, soft delete a store
#[tokio::test]
async fn test_store_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    let mut row = store::Model {
        name: "Store A".into(),
        code: "C1".into(),
        store_category: Some("cat".into()),
        city: Some("city".into()),
        latitude: Some(-6.2),
        ..Default::default()
    };
    row.stamp_created(&stamp("alice"));
    let mut am = row.into_active_model().reset_all();
    am.id = NotSet;
    let created = am.insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.created_by, "alice");
    assert_eq!(created.timezone_offset, 7);

    let found = store::Entity::find_by_id(created.id).one(&db).await?.expect("stored row");
    assert_eq!(found.code, "C1");
    assert_eq!(found.latitude, Some(-6.2));

    let mut deleted = found.clone();
    deleted.stamp_deleted(&stamp("bob"));
    deleted.into_active_model().reset_all().update(&db).await?;

    let live = store::Entity::find()
        .filter(store::Column::IsDeleted.eq(false))
        .all(&db)
        .await?;
    assert!(live.is_empty());
    let after = store::Entity::find_by_id(created.id).one(&db).await?.expect("soft deleted row");
    assert_eq!(after.deleted_by.as_deref(), Some("bob"));
    assert_eq!(after.created_by, "alice");
    Ok(())
}

/// Ids are generated per table
#[tokio::test]
async fn test_ids_are_generated() -> Result<()> {
    let db = connect_in_memory().await?;

    for code in ["E1", "E2"] {
        let mut row = expedition::Model { code: code.into(), name: format!("Expedition {code}"), ..Default::default() };
        row.stamp_created(&stamp("alice"));
        let mut am = row.into_active_model().reset_all();
        am.id = NotSet;
        am.insert(&db).await?;
    }
    let ids: Vec<i32> = expedition::Entity::find().all(&db).await?.into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let storages = storage::Entity::find().all(&db).await?;
    assert!(storages.is_empty());
    Ok(())
}

#[test]
fn keep_created_from_preserves_creation_block() {
    let mut stored = storage::Model { id: 3, code: "S1".into(), name: "Main".into(), ..Default::default() };
    stored.stamp_created(&stamp("alice"));

    let mut incoming = storage::Model { code: "S1".into(), name: "Main 2".into(), ..Default::default() };
    incoming.set_id(stored.id());
    incoming.keep_created_from(&stored);
    incoming.stamp_modified(&stamp("bob"));

    let audit = incoming.audit();
    assert_eq!(incoming.id, 3);
    assert_eq!(audit.created_by, "alice");
    assert_eq!(audit.last_modified_by, "bob");
    assert!(!incoming.is_deleted());
}

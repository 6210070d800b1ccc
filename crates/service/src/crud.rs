//! Generic CRUD service shared by every master-data resource.
//!
//! A resource plugs in by implementing [`CrudResource`]: it names its SeaORM
//! entity, active model and view model, and supplies the pure mapping pair
//! between model and view model. [`CrudService`] then provides validation,
//! audit stamping and persistence for it.
//!
//! Writes follow one shape: collaborators (validation, identity) are
//! consulted first, then a single transaction performs the existence check
//! and the write, so a row change and its audit stamp land together.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use models::audit::{AuditStamp, Audited};
use models::validation::Validatable;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::errors::{InternalError, ServiceError, ValidationErrors};
use crate::identity::IdentityService;
use crate::pagination::{ListQuery, Page, MAX_OFFSET};
use crate::validation::ValidateService;

/// Agent recorded in the `*_agent` audit columns.
pub const USER_AGENT: &str = "core-service";

type ColumnOf<R> = <<R as CrudResource>::Entity as EntityTrait>::Column;

/// Binds an entity, its view model and the mapping pair between them.
pub trait CrudResource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Audited
        + Validatable
        + Clone
        + Default
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync + 'static;
    type ViewModel: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static;

    /// Singular name used in errors and logs.
    const NAME: &'static str;

    fn id_column() -> ColumnOf<Self>;
    fn deleted_column() -> ColumnOf<Self>;
    /// Columns matched by the list keyword.
    fn keyword_columns() -> Vec<ColumnOf<Self>>;

    fn to_view_model(model: &Self::Model) -> Self::ViewModel;
    /// Audit columns are never taken from the view model.
    fn to_model(view_model: &Self::ViewModel) -> Self::Model;
}

/// Business service for one resource type.
///
/// The persistence context is optional so that a service can be built
/// before a connection exists; every persistence call on an unbound service
/// fails with [`InternalError::Unbound`].
pub struct CrudService<R: CrudResource> {
    db: Option<DatabaseConnection>,
    identity: Arc<dyn IdentityService>,
    validator: Arc<dyn ValidateService<R::Model>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: CrudResource> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            identity: Arc::clone(&self.identity),
            validator: Arc::clone(&self.validator),
            _resource: PhantomData,
        }
    }
}

impl<R: CrudResource> CrudService<R> {
    pub fn new(identity: Arc<dyn IdentityService>, validator: Arc<dyn ValidateService<R::Model>>) -> Self {
        Self { db: None, identity, validator, _resource: PhantomData }
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub(crate) fn db(&self) -> Result<&DatabaseConnection, ServiceError> {
        self.db.as_ref().ok_or(ServiceError::Internal(InternalError::Unbound("persistence context")))
    }

    pub fn map_to_view_model(&self, model: &R::Model) -> R::ViewModel {
        R::to_view_model(model)
    }

    pub fn map_to_model(&self, view_model: &R::ViewModel) -> R::Model {
        R::to_model(view_model)
    }

    /// Non-deleted rows only.
    pub(crate) fn live() -> Select<R::Entity> {
        R::Entity::find().filter(R::deleted_column().eq(false))
    }

    async fn find_live<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<R::Model>, ServiceError> {
        let found = Self::live().filter(R::id_column().eq(id)).one(conn).await?;
        Ok(found)
    }

    fn stamp(&self) -> AuditStamp {
        AuditStamp {
            actor: self.identity.username(),
            at: Utc::now(),
            agent: USER_AGENT.to_string(),
            timezone_offset: self.identity.timezone_offset(),
        }
    }

    fn validate(&self, model: &R::Model) -> Result<(), ServiceError> {
        let errors = self.validator.validate(model);
        if errors.is_empty() {
            return Ok(());
        }
        let errors = ValidationErrors(errors);
        debug!(resource = R::NAME, fields = %errors, "validation failed");
        Err(ServiceError::Validation(errors))
    }

    #[instrument(skip(self, query), fields(resource = R::NAME))]
    pub async fn read_model(&self, query: &ListQuery) -> Result<Page<R::Model>, ServiceError> {
        let db = self.db()?;
        let mut select = Self::live();
        if let Some(keyword) = query.keyword() {
            // LOWER on both sides: LIKE folds case on SQLite but not on Postgres
            let pattern = format!("%{}%", keyword.to_lowercase());
            let any = R::keyword_columns().into_iter().fold(Condition::any(), |cond, col| {
                cond.add(Expr::expr(Func::lower(Expr::col(col))).like(pattern.as_str()))
            });
            select = select.filter(any);
        }
        let total = select.clone().count(db).await?;

        let pagination = query.pagination();
        let (offset, size) = pagination.normalize();
        let page = pagination.page.max(1);
        if offset > MAX_OFFSET {
            debug!(page, total, "page beyond addressable range");
            return Ok(Page { items: Vec::new(), total, page, size });
        }
        select = if query.descending() {
            select.order_by_desc(R::id_column())
        } else {
            select.order_by_asc(R::id_column())
        };
        let items = select.offset(offset).limit(size).all(db).await?;
        debug!(count = items.len(), total, "read models");
        Ok(Page { items, total, page, size })
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn read_model_by_id(&self, id: i32) -> Result<R::Model, ServiceError> {
        let db = self.db()?;
        Self::find_live(db, id).await?.ok_or_else(|| ServiceError::not_found(R::NAME, id))
    }

    /// Validate, stamp creator, insert. Returns the generated id.
    #[instrument(skip(self, model), fields(resource = R::NAME))]
    pub async fn create_model(&self, mut model: R::Model) -> Result<i32, ServiceError> {
        self.validate(&model)?;
        model.stamp_created(&self.stamp());
        let db = self.db()?;

        let mut active: R::ActiveModel = model.into_active_model().reset_all();
        active.not_set(R::id_column());
        let txn = db.begin().await?;
        let created = active.insert(&txn).await?;
        txn.commit().await?;

        let id = created.id();
        info!(id, by = %self.identity.username(), "created");
        Ok(id)
    }

    /// Replace the domain fields of an existing row. The stored creation
    /// block is kept; the modifier is stamped.
    #[instrument(skip(self, model), fields(resource = R::NAME))]
    pub async fn update_model(&self, id: i32, mut model: R::Model) -> Result<u64, ServiceError> {
        if model.id() != 0 && model.id() != id {
            return Err(ServiceError::invalid("_id", "id in body does not match id in path"));
        }
        self.validate(&model)?;
        let stamp = self.stamp();
        let db = self.db()?;

        let txn = db.begin().await?;
        let stored = Self::find_live(&txn, id).await?.ok_or_else(|| ServiceError::not_found(R::NAME, id))?;
        model.set_id(id);
        model.keep_created_from(&stored);
        model.stamp_modified(&stamp);
        let active: R::ActiveModel = model.into_active_model().reset_all();
        active.update(&txn).await?;
        txn.commit().await?;

        info!(id, by = %stamp.actor, "updated");
        Ok(1)
    }

    /// Soft delete: the row stays, flagged and stamped with the deleter.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn delete_model(&self, id: i32) -> Result<u64, ServiceError> {
        let stamp = self.stamp();
        let db = self.db()?;

        let txn = db.begin().await?;
        let Some(mut stored) = Self::find_live(&txn, id).await? else {
            warn!(id, "delete of missing row");
            return Err(ServiceError::not_found(R::NAME, id));
        };
        stored.stamp_deleted(&stamp);
        let active: R::ActiveModel = stored.into_active_model().reset_all();
        active.update(&txn).await?;
        txn.commit().await?;

        info!(id, by = %stamp.actor, "deleted");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentityService;
    use crate::resources::store::{StoreResource, StoreViewModel};
    use crate::resources::AuditView;
    use crate::test_support::{get_db, identity, service_for};
    use crate::validation::{DefaultValidateService, MockValidateService};
    use models::store;
    use models::validation::FieldError;

    fn store_a() -> StoreViewModel {
        StoreViewModel {
            name: "Store A".into(),
            code: "C1".into(),
            store_category: Some("cat".into()),
            city: Some("city".into()),
            ..Default::default()
        }
    }

    fn mock_identity(username: &'static str, offset: i32) -> Arc<dyn IdentityService> {
        let mut identity = MockIdentityService::new();
        identity.expect_username().return_const(username.to_string());
        identity.expect_timezone_offset().return_const(offset);
        identity.expect_token().never();
        Arc::new(identity)
    }

    #[tokio::test]
    async fn create_then_read_round_trips_and_stamps_creator() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc: CrudService<StoreResource> =
            CrudService::new(mock_identity("alice", 7), Arc::new(DefaultValidateService)).with_db(db);

        let input = store_a();
        let id = svc.create_model(svc.map_to_model(&input)).await?;
        assert!(id > 0);

        let read = svc.map_to_view_model(&svc.read_model_by_id(id).await?);
        assert_eq!(read.id, id);
        assert_eq!(read.code, "C1");
        assert_eq!(read.audit.created_by.as_deref(), Some("alice"));
        assert_eq!(read.audit.last_modified_by.as_deref(), Some("alice"));
        assert_eq!(read.audit.timezone_offset, Some(7));

        let expected = StoreViewModel { id, audit: read.audit.clone(), ..input };
        assert_eq!(read, expected);
        Ok(())
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field_and_writes_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut validator = MockValidateService::<store::Model>::new();
        validator
            .expect_validate()
            .times(1)
            .returning(|_| vec![FieldError::required("name"), FieldError::required("code")]);
        let svc: CrudService<StoreResource> =
            CrudService::new(Arc::new(identity("alice", 0)), Arc::new(validator)).with_db(db.clone());

        let err = svc.create_model(svc.map_to_model(&store_a())).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.fields(), vec!["name", "code"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_with_invalid_input_leaves_row_untouched() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        let id = svc.create_model(svc.map_to_model(&store_a())).await?;

        let mut bad = store_a();
        bad.name = String::new();
        bad.email = Some("not-an-address".into());
        let err = svc.update_model(id, svc.map_to_model(&bad)).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.fields(), vec!["name", "email"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(svc.read_model_by_id(id).await?.name, "Store A");
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");

        assert!(matches!(svc.read_model_by_id(999).await, Err(ServiceError::NotFound { .. })));
        assert!(matches!(
            svc.update_model(999, svc.map_to_model(&store_a())).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(svc.delete_model(999).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn unbound_persistence_is_internal_not_not_found() {
        let svc: CrudService<StoreResource> =
            CrudService::new(Arc::new(identity("alice", 0)), Arc::new(DefaultValidateService));

        let err = svc.read_model(&ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(InternalError::Unbound(_))));
        let err = svc.delete_model(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(InternalError::Unbound(_))));
        // validation still runs first
        let err = svc.create_model(store::Model::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_keeps_creator_and_stamps_modifier() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = service_for::<StoreResource>(&db, "alice");
        let bob = service_for::<StoreResource>(&db, "bob");
        let id = alice.create_model(alice.map_to_model(&store_a())).await?;

        let mut changed = store_a();
        changed.id = id;
        changed.city = Some("Solo".into());
        assert_eq!(bob.update_model(id, bob.map_to_model(&changed)).await?, 1);

        let stored = bob.read_model_by_id(id).await?;
        assert_eq!(stored.city.as_deref(), Some("Solo"));
        assert_eq!(stored.created_by, "alice");
        assert_eq!(stored.last_modified_by, "bob");
        assert!(stored.last_modified_utc >= stored.created_utc);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_mismatched_body_id() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        let id = svc.create_model(svc.map_to_model(&store_a())).await?;

        let mut other = store_a();
        other.id = id + 1;
        let err = svc.update_model(id, svc.map_to_model(&other)).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.fields(), vec!["_id"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_soft_and_hides_the_row() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        let id = svc.create_model(svc.map_to_model(&store_a())).await?;

        assert_eq!(svc.delete_model(id).await?, 1);
        assert!(matches!(svc.read_model_by_id(id).await, Err(ServiceError::NotFound { .. })));
        assert!(matches!(svc.delete_model(id).await, Err(ServiceError::NotFound { .. })));
        assert_eq!(svc.read_model(&ListQuery::default()).await?.total, 0);

        let raw = store::Entity::find_by_id(id).one(&db).await?.expect("row kept");
        assert!(raw.is_deleted);
        assert_eq!(raw.deleted_by.as_deref(), Some("alice"));
        Ok(())
    }

    #[tokio::test]
    async fn read_model_filters_pages_and_orders() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        for (name, code) in [("Alpha", "A1"), ("Beta", "B1"), ("Alpine", "A2")] {
            let vm = StoreViewModel { name: name.into(), code: code.into(), ..Default::default() };
            svc.create_model(svc.map_to_model(&vm)).await?;
        }

        let empty = svc.read_model(&ListQuery { keyword: Some("zzz".into()), ..Default::default() }).await?;
        assert!(empty.items.is_empty());
        assert_eq!(empty.total, 0);

        let alps = svc.read_model(&ListQuery { keyword: Some("Alp".into()), ..Default::default() }).await?;
        assert_eq!(alps.total, 2);
        let folded = svc.read_model(&ListQuery { keyword: Some("aLPINE".into()), ..Default::default() }).await?;
        assert_eq!(folded.items.len(), 1);
        assert_eq!(folded.items[0].code, "A2");

        let page = svc
            .read_model(&ListQuery { page: Some(1), size: Some(2), order: Some("desc".into()), ..Default::default() })
            .await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.size, 2);
        let codes: Vec<&str> = page.items.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["A2", "B1"]);
        Ok(())
    }

    #[tokio::test]
    async fn pages_past_the_end_are_empty() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        svc.create_model(svc.map_to_model(&store_a())).await?;

        for page in [u64::MAX, 100_000_000_000_000_000, 50] {
            let res = svc.read_model(&ListQuery { page: Some(page), size: Some(100), ..Default::default() }).await?;
            assert!(res.items.is_empty(), "page {page}");
            assert_eq!(res.total, 1);
            assert_eq!(res.page, page);
        }
        Ok(())
    }

    #[test]
    fn mapping_round_trips_domain_fields() {
        let svc: CrudService<StoreResource> =
            CrudService::new(Arc::new(identity("alice", 0)), Arc::new(DefaultValidateService));
        let v = StoreViewModel {
            id: 4,
            latitude: Some(-7.56),
            longitude: Some(110.8),
            sales_target: 1500.5,
            opening_date: Some(Utc::now()),
            email: Some("store@example.com".into()),
            audit: AuditView { created_by: Some("ignored".into()), ..Default::default() },
            ..store_a()
        };
        let mut round = svc.map_to_view_model(&svc.map_to_model(&v));
        assert_ne!(round.audit.created_by.as_deref(), Some("ignored"));
        round.audit = v.audit.clone();
        assert_eq!(round, v);
    }
}

use chrono::{DateTime, Utc};
use models::audit::Audited;
use models::{storage, store};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{required_param, AuditView};
use crate::crud::{CrudResource, CrudService};
use crate::errors::ServiceError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreViewModel {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub pic: Option<String>,
    pub store_category: Option<String>,
    pub store_wide: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
    pub online_offline: Option<String>,
    pub sales_target: f64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub opening_date: Option<DateTime<Utc>>,
    pub closing_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub audit: AuditView,
}

/// A store together with its distance from the reference store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStoreViewModel {
    #[serde(flatten)]
    pub store: StoreViewModel,
    pub distance_km: f64,
}

pub struct StoreResource;

impl CrudResource for StoreResource {
    type Entity = store::Entity;
    type Model = store::Model;
    type ActiveModel = store::ActiveModel;
    type ViewModel = StoreViewModel;

    const NAME: &'static str = "store";

    fn id_column() -> store::Column { store::Column::Id }

    fn deleted_column() -> store::Column { store::Column::IsDeleted }

    fn keyword_columns() -> Vec<store::Column> {
        vec![store::Column::Code, store::Column::Name, store::Column::City, store::Column::StoreCategory]
    }

    fn to_view_model(m: &store::Model) -> StoreViewModel {
        StoreViewModel {
            id: m.id,
            name: m.name.clone(),
            code: m.code.clone(),
            description: m.description.clone(),
            address: m.address.clone(),
            city: m.city.clone(),
            phone: m.phone.clone(),
            fax: m.fax.clone(),
            email: m.email.clone(),
            pic: m.pic.clone(),
            store_category: m.store_category.clone(),
            store_wide: m.store_wide.clone(),
            channel: m.channel.clone(),
            status: m.status.clone(),
            online_offline: m.online_offline.clone(),
            sales_target: m.sales_target,
            longitude: m.longitude,
            latitude: m.latitude,
            opening_date: m.opening_date,
            closing_date: m.closing_date,
            audit: m.audit().into(),
        }
    }

    fn to_model(v: &StoreViewModel) -> store::Model {
        store::Model {
            id: v.id,
            name: v.name.clone(),
            code: v.code.clone(),
            description: v.description.clone(),
            address: v.address.clone(),
            city: v.city.clone(),
            phone: v.phone.clone(),
            fax: v.fax.clone(),
            email: v.email.clone(),
            pic: v.pic.clone(),
            store_category: v.store_category.clone(),
            store_wide: v.store_wide.clone(),
            channel: v.channel.clone(),
            status: v.status.clone(),
            online_offline: v.online_offline.clone(),
            sales_target: v.sales_target,
            longitude: v.longitude,
            latitude: v.latitude,
            opening_date: v.opening_date,
            closing_date: v.closing_date,
            ..Default::default()
        }
    }
}

pub type StoreService = CrudService<StoreResource>;

impl CrudService<StoreResource> {
    /// First live store carrying `code`.
    #[instrument(skip(self))]
    pub async fn read_by_code(&self, code: &str) -> Result<store::Model, ServiceError> {
        let code = required_param("code", code)?;
        let db = self.db()?;
        Self::live()
            .filter(store::Column::Code.eq(code))
            .order_by_asc(store::Column::Id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("store", format!("with code {code}")))
    }

    /// All live stores in a category; empty is not an error.
    #[instrument(skip(self))]
    pub async fn read_by_category(&self, category: &str) -> Result<Vec<store::Model>, ServiceError> {
        let category = required_param("category", category)?;
        let db = self.db()?;
        let rows = Self::live()
            .filter(store::Column::StoreCategory.eq(category))
            .order_by_asc(store::Column::Id)
            .all(db)
            .await?;
        Ok(rows)
    }

    /// Other live stores with coordinates, nearest first, paired with their
    /// great-circle distance in kilometres from the store with `code`.
    #[instrument(skip(self))]
    pub async fn read_nearest_by_code(&self, code: &str) -> Result<Vec<(store::Model, f64)>, ServiceError> {
        let origin = self.read_by_code(code).await?;
        let (Some(lat), Some(lng)) = (origin.latitude, origin.longitude) else {
            return Err(ServiceError::not_found("store location", format!("for store {}", origin.code)));
        };
        let db = self.db()?;
        let rows = Self::live()
            .filter(store::Column::Id.ne(origin.id))
            .filter(store::Column::Latitude.is_not_null())
            .filter(store::Column::Longitude.is_not_null())
            .all(db)
            .await?;

        let mut nearby: Vec<(store::Model, f64)> = rows
            .into_iter()
            .filter_map(|s| {
                let d = haversine_km((lat, lng), (s.latitude?, s.longitude?));
                Some((s, d))
            })
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.id.cmp(&b.0.id)));
        Ok(nearby)
    }

    /// The storage that stocks the store with `code`: it shares the code.
    #[instrument(skip(self))]
    pub async fn read_storage_by_store_code(&self, code: &str) -> Result<storage::Model, ServiceError> {
        let store = self.read_by_code(code).await?;
        let db = self.db()?;
        storage::Entity::find()
            .filter(storage::Column::IsDeleted.eq(false))
            .filter(storage::Column::Code.eq(store.code.as_str()))
            .order_by_asc(storage::Column::Id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("storage", format!("for store {}", store.code)))
    }
}

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two `(latitude, longitude)` points in degrees.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lat2) = (a.0.to_radians(), b.0.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (b.1 - a.1).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::storage::{StorageResource, StorageViewModel};
    use crate::test_support::{get_db, service_for};

    async fn seed(svc: &StoreService, code: &str, category: &str) -> Result<i32, ServiceError> {
        let vm = StoreViewModel {
            name: format!("Store {code}"),
            code: code.into(),
            store_category: Some(category.into()),
            ..Default::default()
        };
        svc.create_model(svc.map_to_model(&vm)).await
    }

    #[tokio::test]
    async fn lookups_by_code_and_category() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        let c1 = seed(&svc, "C1", "mall").await?;
        seed(&svc, "C2", "mall").await?;
        let c3 = seed(&svc, "C3", "outlet").await?;
        svc.delete_model(c3).await?;

        assert_eq!(svc.read_by_code(" C1 ").await?.id, c1);
        assert!(matches!(svc.read_by_code("C3").await, Err(ServiceError::NotFound { .. })));
        assert_eq!(svc.read_by_category("mall").await?.len(), 2);
        assert!(svc.read_by_category("outlet").await?.is_empty());
        Ok(())
    }

    #[test]
    fn haversine_matches_known_distances() {
        assert_eq!(haversine_km((-6.2, 106.8), (-6.2, 106.8)), 0.0);
        // Jakarta to Surabaya is roughly 660 km
        let d = haversine_km((-6.2088, 106.8456), (-7.2575, 112.7521));
        assert!((640.0..680.0).contains(&d), "{d}");
    }

    async fn seed_at(svc: &StoreService, code: &str, at: Option<(f64, f64)>) -> Result<i32, ServiceError> {
        let vm = StoreViewModel {
            name: format!("Store {code}"),
            code: code.into(),
            latitude: at.map(|p| p.0),
            longitude: at.map(|p| p.1),
            ..Default::default()
        };
        svc.create_model(svc.map_to_model(&vm)).await
    }

    #[tokio::test]
    async fn nearest_orders_other_stores_by_distance() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        seed_at(&svc, "JKT", Some((-6.2088, 106.8456))).await?;
        let sby = seed_at(&svc, "SBY", Some((-7.2575, 112.7521))).await?;
        let bdg = seed_at(&svc, "BDG", Some((-6.9175, 107.6191))).await?;
        seed_at(&svc, "NOWHERE", None).await?;
        let gone = seed_at(&svc, "BGR", Some((-6.5950, 106.8166))).await?;
        svc.delete_model(gone).await?;

        let nearest = svc.read_nearest_by_code("JKT").await?;
        let ids: Vec<i32> = nearest.iter().map(|(s, _)| s.id).collect();
        assert_eq!(ids, vec![bdg, sby]);
        assert!(nearest[0].1 < nearest[1].1);
        Ok(())
    }

    #[tokio::test]
    async fn nearest_needs_a_located_known_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        seed_at(&svc, "NOWHERE", None).await?;

        assert!(matches!(svc.read_nearest_by_code(" ").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.read_nearest_by_code("MISSING").await, Err(ServiceError::NotFound { .. })));
        match svc.read_nearest_by_code("NOWHERE").await {
            Err(ServiceError::NotFound { resource, .. }) => assert_eq!(resource, "store location"),
            other => panic!("expected missing location, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn blank_lookup_params_are_validation_errors() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = service_for::<StoreResource>(&db, "alice");
        match svc.read_by_category("  ").await {
            Err(ServiceError::Validation(errors)) => assert_eq!(errors.fields(), vec!["category"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(matches!(svc.read_storage_by_store_code("").await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn storage_is_found_through_store_code() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let stores = service_for::<StoreResource>(&db, "alice");
        let storages = service_for::<StorageResource>(&db, "alice");
        seed(&stores, "C1", "mall").await?;
        seed(&stores, "C2", "mall").await?;
        let vm = StorageViewModel { code: "C1".into(), name: "Gudang C1".into(), ..Default::default() };
        let storage_id = storages.create_model(storages.map_to_model(&vm)).await?;

        assert_eq!(stores.read_storage_by_store_code("C1").await?.id, storage_id);
        match stores.read_storage_by_store_code("C2").await {
            Err(ServiceError::NotFound { resource, .. }) => assert_eq!(resource, "storage"),
            other => panic!("expected missing storage, got {other:?}"),
        }
        Ok(())
    }
}

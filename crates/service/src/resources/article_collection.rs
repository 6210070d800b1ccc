use models::audit::Audited;
use models::article_collection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuditView;
use crate::crud::CrudResource;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleCollectionViewModel {
    #[serde(rename = "_id")]
    pub id: i32,
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub audit: AuditView,
}

pub struct ArticleCollectionResource;

impl CrudResource for ArticleCollectionResource {
    type Entity = article_collection::Entity;
    type Model = article_collection::Model;
    type ActiveModel = article_collection::ActiveModel;
    type ViewModel = ArticleCollectionViewModel;

    const NAME: &'static str = "article collection";

    fn id_column() -> article_collection::Column { article_collection::Column::Id }

    fn deleted_column() -> article_collection::Column { article_collection::Column::IsDeleted }

    fn keyword_columns() -> Vec<article_collection::Column> {
        vec![article_collection::Column::Code, article_collection::Column::Name]
    }

    fn to_view_model(m: &article_collection::Model) -> ArticleCollectionViewModel {
        ArticleCollectionViewModel { id: m.id, code: m.code.clone(), name: m.name.clone(), audit: m.audit().into() }
    }

    fn to_model(v: &ArticleCollectionViewModel) -> article_collection::Model {
        article_collection::Model { id: v.id, code: v.code.clone(), name: v.name.clone(), ..Default::default() }
    }
}

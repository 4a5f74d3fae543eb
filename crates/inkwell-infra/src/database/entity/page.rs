//! Page entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inkwell_core::domain::{Page, ensure_slug};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_published: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Page {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            is_published: model.is_published,
        }
    }
}

impl From<Page> for ActiveModel {
    fn from(page: Page) -> Self {
        Self {
            id: super::key(page.id),
            slug: Set(ensure_slug(&page.slug, &page.title)),
            title: Set(page.title),
            content: Set(page.content),
            is_published: Set(page.is_published),
        }
    }
}

//! Site setup entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inkwell_core::domain::SiteSetup;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "site_setups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub show_header: bool,
    pub show_search: bool,
    pub show_menu: bool,
    pub show_description: bool,
    pub show_pagination: bool,
    pub show_footer: bool,
    pub favicon: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_link::Entity")]
    MenuLink,
}

impl Related<super::menu_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Menu links are loaded separately; see `find_active`.
impl From<Model> for SiteSetup {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            show_header: model.show_header,
            show_search: model.show_search,
            show_menu: model.show_menu,
            show_description: model.show_description,
            show_pagination: model.show_pagination,
            show_footer: model.show_footer,
            favicon: model.favicon,
            menu: Vec::new(),
        }
    }
}

impl From<SiteSetup> for ActiveModel {
    fn from(setup: SiteSetup) -> Self {
        Self {
            id: super::key(setup.id),
            title: Set(setup.title),
            description: Set(setup.description),
            show_header: Set(setup.show_header),
            show_search: Set(setup.show_search),
            show_menu: Set(setup.show_menu),
            show_description: Set(setup.show_description),
            show_pagination: Set(setup.show_pagination),
            show_footer: Set(setup.show_footer),
            favicon: Set(setup.favicon),
        }
    }
}

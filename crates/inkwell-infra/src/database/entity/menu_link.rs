//! Menu link entity for SeaORM.

use sea_orm::entity::prelude::*;

use inkwell_core::domain::MenuLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub text: String,
    pub url_or_path: String,
    pub new_tab: bool,
    pub site_setup_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site_setup::Entity",
        from = "Column::SiteSetupId",
        to = "super::site_setup::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SiteSetup,
}

impl Related<super::site_setup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SiteSetup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MenuLink {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            url_or_path: model.url_or_path,
            new_tab: model.new_tab,
        }
    }
}

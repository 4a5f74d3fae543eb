//! PostgreSQL repository implementations for the simple entities.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use inkwell_core::domain::{Category, MenuLink, Page, SiteSetup, Tag};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{
    CategoryRepository, PageRepository, SiteSetupRepository, TagRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::menu_link::{self, Entity as MenuLinkEntity};
use super::entity::page::{self, Entity as PageEntity};
use super::entity::site_setup::{self, Entity as SiteSetupEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::Entity as UserEntity;
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL page repository.
pub type PostgresPageRepository = PostgresBaseRepository<PageEntity>;

/// PostgreSQL site setup repository.
pub type PostgresSiteSetupRepository = PostgresBaseRepository<SiteSetupEntity>;

impl UserRepository for PostgresUserRepository {}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PageRepository for PostgresPageRepository {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Page>, RepoError> {
        tracing::debug!(slug, "Resolving published page");

        let result = PageEntity::find()
            .filter(page::Column::Slug.eq(slug))
            .filter(page::Column::IsPublished.eq(true))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl SiteSetupRepository for PostgresSiteSetupRepository {
    async fn find_active(&self) -> Result<Option<SiteSetup>, RepoError> {
        let Some(model) = SiteSetupEntity::find()
            .order_by_desc(site_setup::Column::Id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let links = MenuLinkEntity::find()
            .filter(menu_link::Column::SiteSetupId.eq(model.id))
            .order_by_asc(menu_link::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut setup = SiteSetup::from(model);
        setup.menu = links.into_iter().map(Into::into).collect();
        Ok(Some(setup))
    }

    async fn add_menu_link(&self, setup_id: i64, link: MenuLink) -> Result<MenuLink, RepoError> {
        let model = menu_link::ActiveModel {
            text: Set(link.text),
            url_or_path: Set(link.url_or_path),
            new_tab: Set(link.new_tab),
            site_setup_id: Set(setup_id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}

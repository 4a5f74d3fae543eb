use async_trait::async_trait;

use crate::domain::{Category, MenuLink, Page, Post, PostDraft, SiteSetup, Tag, User};
use crate::error::RepoError;
use crate::pagination::PageWindow;
use crate::query::PostPredicate;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create when its id is 0, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository; authors are only ever resolved by id.
pub trait UserRepository: BaseRepository<User, i64> {}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}

/// Page repository.
#[async_trait]
pub trait PageRepository: BaseRepository<Page, i64> {
    /// Resolve a page by slug, only if it is published.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Page>, RepoError>;
}

/// Site configuration repository.
///
/// `save` and `find_by_id` cover the setup row alone: a saved `menu` is
/// ignored and a loaded one is empty. Links are written with
/// `add_menu_link` and read back through `find_active`.
#[async_trait]
pub trait SiteSetupRepository: BaseRepository<SiteSetup, i64> {
    /// The active configuration: the row with the highest id, menu included.
    /// `None` when no configuration has been saved yet.
    async fn find_active(&self) -> Result<Option<SiteSetup>, RepoError>;

    /// Append a navigation link to a setup.
    async fn add_menu_link(&self, setup_id: i64, link: MenuLink) -> Result<MenuLink, RepoError>;
}

/// Post repository.
///
/// Reads return posts with category, tags and authors resolved. Results are
/// always in the collection's default order: descending id.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Insert (`draft.id == 0`) or update a post and replace its tags.
    async fn save(&self, draft: PostDraft) -> Result<Post, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// Number of posts matching `predicate`, each post counted once.
    async fn count(&self, predicate: &PostPredicate) -> Result<u64, RepoError>;

    /// The `window` slice of posts matching `predicate`.
    async fn find_window(
        &self,
        predicate: &PostPredicate,
        window: PageWindow,
    ) -> Result<Vec<Post>, RepoError>;

    /// The post with `slug`, if it also satisfies `predicate`.
    async fn find_by_slug(
        &self,
        slug: &str,
        predicate: &PostPredicate,
    ) -> Result<Option<Post>, RepoError>;
}

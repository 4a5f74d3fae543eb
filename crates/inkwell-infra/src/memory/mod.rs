//! In-memory content store - used when no database is configured and in tests.
//!
//! Implements every repository port over plain maps behind an async
//! `RwLock`, mirroring the SQL schema's constraints: unique slugs, set-null
//! on user and category deletion, tag links dropped with their post or tag.
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use inkwell_core::PostPredicate;
use inkwell_core::domain::{
    Category, MenuLink, Page, Post, PostDraft, SiteSetup, Tag, User, ensure_slug,
};
use inkwell_core::error::RepoError;
use inkwell_core::pagination::PageWindow;
use inkwell_core::ports::{
    BaseRepository, CategoryRepository, PageRepository, PostRepository, SiteSetupRepository,
    TagRepository, UserRepository,
};

/// Stored post row; relations by id.
#[derive(Debug, Clone)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: String,
    content: String,
    cover: String,
    cover_in_post_content: bool,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: Option<i64>,
    tag_ids: Vec<i64>,
    created_by_id: Option<i64>,
    updated_by_id: Option<i64>,
}

#[derive(Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    tags: BTreeMap<i64, Tag>,
    pages: BTreeMap<i64, Page>,
    setups: BTreeMap<i64, SiteSetup>,
    /// Menu links by owning setup id, kept apart from the setup row.
    menu_links: BTreeMap<i64, Vec<MenuLink>>,
    posts: BTreeMap<i64, PostRow>,
}

impl Tables {
    /// One id sequence shared by every table.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn hydrate(&self, row: &PostRow) -> Post {
        let mut tags: Vec<Tag> = row
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect();
        tags.sort_by_key(|t| t.id);
        Post {
            id: row.id,
            title: row.title.clone(),
            slug: row.slug.clone(),
            excerpt: row.excerpt.clone(),
            content: row.content.clone(),
            cover: row.cover.clone(),
            cover_in_post_content: row.cover_in_post_content,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category: row.category_id.and_then(|id| self.categories.get(&id).cloned()),
            tags,
            created_by: row.created_by_id.and_then(|id| self.users.get(&id).cloned()),
            updated_by: row.updated_by_id.and_then(|id| self.users.get(&id).cloned()),
        }
    }

    /// Matching posts in default order (descending id).
    fn matching(&self, predicate: &PostPredicate) -> Vec<Post> {
        self.posts
            .values()
            .rev()
            .map(|row| self.hydrate(row))
            .filter(|post| predicate.matches(post))
            .collect()
    }
}

fn unique_slug<'a>(
    mut existing: impl Iterator<Item = (i64, &'a str)>,
    id: i64,
    slug: &str,
    table: &str,
) -> Result<(), RepoError> {
    if existing.any(|(other, s)| other != id && s == slug) {
        return Err(RepoError::Constraint(format!(
            "duplicate key value violates unique constraint \"{table}_slug_key\""
        )));
    }
    Ok(())
}

/// Insert-or-update on a map keyed by id.
fn upsert<T>(
    map: &mut BTreeMap<i64, T>,
    id: i64,
    fresh_id: i64,
    build: impl FnOnce(i64) -> T,
) -> Result<T, RepoError>
where
    T: Clone,
{
    let id = if id == 0 {
        fresh_id
    } else if map.contains_key(&id) {
        id
    } else {
        return Err(RepoError::NotFound);
    };
    let value = build(id);
    map.insert(id, value.clone());
    Ok(value)
}

/// Thread-safe in-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != entity.id && u.username == entity.username)
        {
            return Err(RepoError::Constraint(format!(
                "duplicate username {}",
                entity.username
            )));
        }
        let fresh = if entity.id == 0 { tables.next_id() } else { 0 };
        upsert(&mut tables.users, entity.id, fresh, |id| User {
            id,
            ..entity
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        for row in tables.posts.values_mut() {
            if row.created_by_id == Some(id) {
                row.created_by_id = None;
            }
            if row.updated_by_id == Some(id) {
                row.updated_by_id = None;
            }
        }
        Ok(())
    }
}

impl UserRepository for InMemoryStore {}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let slug = ensure_slug(&entity.slug, &entity.name);
        unique_slug(
            tables.categories.values().map(|c| (c.id, c.slug.as_str())),
            entity.id,
            &slug,
            "categories",
        )?;
        let fresh = if entity.id == 0 { tables.next_id() } else { 0 };
        upsert(&mut tables.categories, entity.id, fresh, |id| Category {
            id,
            slug,
            ..entity
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.categories.remove(&id).ok_or(RepoError::NotFound)?;
        for row in tables.posts.values_mut() {
            if row.category_id == Some(id) {
                row.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Tag, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn save(&self, entity: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        let slug = ensure_slug(&entity.slug, &entity.name);
        unique_slug(
            tables.tags.values().map(|t| (t.id, t.slug.as_str())),
            entity.id,
            &slug,
            "tags",
        )?;
        let fresh = if entity.id == 0 { tables.next_id() } else { 0 };
        upsert(&mut tables.tags, entity.id, fresh, |id| Tag {
            id,
            slug,
            ..entity
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.tags.remove(&id).ok_or(RepoError::NotFound)?;
        for row in tables.posts.values_mut() {
            row.tag_ids.retain(|t| *t != id);
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Page, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, RepoError> {
        Ok(self.tables.read().await.pages.get(&id).cloned())
    }

    async fn save(&self, entity: Page) -> Result<Page, RepoError> {
        let mut tables = self.tables.write().await;
        let slug = ensure_slug(&entity.slug, &entity.title);
        unique_slug(
            tables.pages.values().map(|p| (p.id, p.slug.as_str())),
            entity.id,
            &slug,
            "pages",
        )?;
        let fresh = if entity.id == 0 { tables.next_id() } else { 0 };
        upsert(&mut tables.pages, entity.id, fresh, |id| Page {
            id,
            slug,
            ..entity
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.pages.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PageRepository for InMemoryStore {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Page>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pages
            .values()
            .find(|p| p.slug == slug && p.is_published)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<SiteSetup, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<SiteSetup>, RepoError> {
        Ok(self.tables.read().await.setups.get(&id).cloned())
    }

    async fn save(&self, entity: SiteSetup) -> Result<SiteSetup, RepoError> {
        let mut tables = self.tables.write().await;
        let fresh = if entity.id == 0 { tables.next_id() } else { 0 };
        upsert(&mut tables.setups, entity.id, fresh, |id| SiteSetup {
            id,
            menu: Vec::new(),
            ..entity
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.setups.remove(&id).ok_or(RepoError::NotFound)?;
        tables.menu_links.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl SiteSetupRepository for InMemoryStore {
    async fn find_active(&self) -> Result<Option<SiteSetup>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.setups.values().next_back().map(|setup| SiteSetup {
            menu: tables.menu_links.get(&setup.id).cloned().unwrap_or_default(),
            ..setup.clone()
        }))
    }

    async fn add_menu_link(&self, setup_id: i64, link: MenuLink) -> Result<MenuLink, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.setups.contains_key(&setup_id) {
            return Err(RepoError::NotFound);
        }
        let link = MenuLink {
            id: tables.next_id(),
            ..link
        };
        tables.menu_links.entry(setup_id).or_default().push(link.clone());
        Ok(link)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|row| tables.hydrate(row)))
    }

    async fn save(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slug = ensure_slug(&draft.slug, &draft.title);
        unique_slug(
            tables.posts.values().map(|p| (p.id, p.slug.as_str())),
            draft.id,
            &slug,
            "posts",
        )?;
        if let Some(category_id) = draft.category_id {
            if !tables.categories.contains_key(&category_id) {
                return Err(RepoError::Constraint(format!(
                    "unknown category {category_id}"
                )));
            }
        }
        if let Some(missing) = draft.tag_ids.iter().find(|id| !tables.tags.contains_key(*id)) {
            return Err(RepoError::Constraint(format!("unknown tag {missing}")));
        }

        let now = Utc::now();
        let (id, created_at, created_by_id) = if draft.id == 0 {
            (tables.next_id(), now, draft.editor_id)
        } else {
            let existing = tables.posts.get(&draft.id).ok_or(RepoError::NotFound)?;
            (existing.id, existing.created_at, existing.created_by_id)
        };

        let mut tag_ids = draft.tag_ids;
        tag_ids.sort_unstable();
        tag_ids.dedup();

        let row = PostRow {
            id,
            title: draft.title,
            slug,
            excerpt: draft.excerpt,
            content: draft.content,
            cover: draft.cover,
            cover_in_post_content: draft.cover_in_post_content,
            is_published: draft.is_published,
            created_at,
            updated_at: now,
            category_id: draft.category_id,
            tag_ids,
            created_by_id,
            updated_by_id: draft.editor_id,
        };
        let post = tables.hydrate(&row);
        tables.posts.insert(id, row);
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn count(&self, predicate: &PostPredicate) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.matching(predicate).len() as u64)
    }

    async fn find_window(
        &self,
        predicate: &PostPredicate,
        window: PageWindow,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matching(predicate)
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect())
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        predicate: &PostPredicate,
    ) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .find(|row| row.slug == slug)
            .map(|row| tables.hydrate(row))
            .filter(|post| predicate.matches(post)))
    }
}

#[cfg(test)]
mod tests;

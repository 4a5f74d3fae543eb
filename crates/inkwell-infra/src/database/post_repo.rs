//! PostgreSQL post repository.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use inkwell_core::PostPredicate;
use inkwell_core::domain::{Category, Post, PostDraft, Tag, User, ensure_slug};
use inkwell_core::error::RepoError;
use inkwell_core::pagination::PageWindow;
use inkwell_core::ports::PostRepository;

use super::entity::{self, category, post, post_tag, tag, user};
use super::filter::post_condition;
use super::postgres_base::map_db_err;

/// PostgreSQL post repository.
///
/// Posts are read in two steps: the filtered page of `posts` rows, then one
/// query per relation to resolve categories, authors and tags for that page.
pub struct PostgresPostRepository {
    pub(crate) db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self { db: db.into() }
    }

    async fn hydrate(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: BTreeSet<i64> = models.iter().filter_map(|m| m.category_id).collect();
        let categories: HashMap<i64, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(&*self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|m| (m.id, Category::from(m)))
                .collect()
        };

        let user_ids: BTreeSet<i64> = models
            .iter()
            .flat_map(|m| [m.created_by_id, m.updated_by_id])
            .flatten()
            .collect();
        let users: HashMap<i64, User> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(&*self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|m| (m.id, User::from(m)))
                .collect()
        };

        let links = post_tag::Entity::find()
            .filter(post_tag::Column::PostId.is_in(models.iter().map(|m| m.id)))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        let tag_ids: BTreeSet<i64> = links.iter().map(|l| l.tag_id).collect();
        let tags: HashMap<i64, Tag> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            tag::Entity::find()
                .filter(tag::Column::Id.is_in(tag_ids))
                .all(&*self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|m| (m.id, Tag::from(m)))
                .collect()
        };
        let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags.get(&link.tag_id) {
                tags_by_post.entry(link.post_id).or_default().push(tag.clone());
            }
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let mut post_tags = tags_by_post.remove(&m.id).unwrap_or_default();
                post_tags.sort_by_key(|t| t.id);
                Post {
                    category: m.category_id.and_then(|id| categories.get(&id).cloned()),
                    created_by: m.created_by_id.and_then(|id| users.get(&id).cloned()),
                    updated_by: m.updated_by_id.and_then(|id| users.get(&id).cloned()),
                    tags: post_tags,
                    id: m.id,
                    title: m.title,
                    slug: m.slug,
                    excerpt: m.excerpt,
                    content: m.content,
                    cover: m.cover,
                    cover_in_post_content: m.cover_in_post_content,
                    is_published: m.is_published,
                    created_at: m.created_at.into(),
                    updated_at: m.updated_at.into(),
                }
            })
            .collect())
    }

    async fn find_where(&self, condition: Condition) -> Result<Option<Post>, RepoError> {
        let model = post::Entity::find()
            .filter(condition)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(self
            .hydrate(model.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        self.find_where(Condition::all().add(post::Column::Id.eq(id)))
            .await
    }

    async fn save(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now().fixed_offset();
        let slug = ensure_slug(&draft.slug, &draft.title);
        let tag_ids: BTreeSet<i64> = draft.tag_ids.iter().copied().collect();

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active = post::ActiveModel {
            id: entity::key(draft.id),
            title: Set(draft.title),
            slug: Set(slug),
            excerpt: Set(draft.excerpt),
            content: Set(draft.content),
            cover: Set(draft.cover),
            cover_in_post_content: Set(draft.cover_in_post_content),
            is_published: Set(draft.is_published),
            category_id: Set(draft.category_id),
            updated_at: Set(now),
            updated_by_id: Set(draft.editor_id),
            ..Default::default()
        };
        let model = if draft.id == 0 {
            active.created_at = Set(now);
            active.created_by_id = Set(draft.editor_id);
            active.insert(&txn).await
        } else {
            active.update(&txn).await
        }
        .map_err(map_db_err)?;

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(model.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if !tag_ids.is_empty() {
            let rows = tag_ids.into_iter().map(|tag_id| post_tag::ActiveModel {
                post_id: Set(model.id),
                tag_id: Set(tag_id),
            });
            post_tag::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = model.id, "Post saved");

        self.find_by_id(model.id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = post::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, predicate: &PostPredicate) -> Result<u64, RepoError> {
        post::Entity::find()
            .filter(post_condition(predicate))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_window(
        &self,
        predicate: &PostPredicate,
        window: PageWindow,
    ) -> Result<Vec<Post>, RepoError> {
        let models = post::Entity::find()
            .filter(post_condition(predicate))
            .order_by_desc(post::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.hydrate(models).await
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        predicate: &PostPredicate,
    ) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Resolving post");

        self.find_where(
            Condition::all()
                .add(post::Column::Slug.eq(slug))
                .add(post_condition(predicate)),
        )
        .await
    }
}

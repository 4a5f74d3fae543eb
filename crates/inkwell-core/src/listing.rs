//! Listing and detail composition.
//!
//! Every public post listing goes through [`BlogService::list_posts`], driven
//! by a [`ListingSpec`]: the predicate to apply on top of the published base,
//! how to title the page, and what an empty result means.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Page, Post, SiteSetup};
use crate::error::DomainError;
use crate::pagination::{PageNumber, Paginated, Paginator};
use crate::ports::{PageRepository, PostRepository, SiteSetupRepository, UserRepository};
use crate::query::PostPredicate;

/// Characters of the search term echoed into the page title.
const SEARCH_TITLE_CHARS: usize = 30;

/// How a listing derives its page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleRule {
    /// A title known before querying.
    Fixed(String),
    /// `"<category name> - Category - "` from the first post on the page.
    FirstCategory,
    /// `"<tag name> - Tag - "` from the first post's tag with this slug.
    FirstTag { slug: String },
}

impl TitleRule {
    pub fn derive(&self, first: Option<&Post>) -> String {
        match self {
            Self::Fixed(title) => title.clone(),
            Self::FirstCategory => {
                let name = first
                    .and_then(|p| p.category.as_ref())
                    .map(|c| c.name.as_str())
                    .unwrap_or_default();
                format!("{name} - Category - ")
            }
            Self::FirstTag { slug } => {
                let name = first
                    .and_then(|p| p.tag_by_slug(slug).or_else(|| p.tags.first()))
                    .map(|t| t.name.as_str())
                    .unwrap_or_default();
                format!("{name} - Tag - ")
            }
        }
    }
}

/// What an empty listing means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Render an empty page.
    Allow,
    /// Fail with [`DomainError::EmptyListing`].
    NotFound {
        entity_type: &'static str,
        slug: String,
    },
}

/// Configuration of one listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSpec {
    /// Added to the published base with logical AND.
    pub filter: Option<PostPredicate>,
    pub title: TitleRule,
    pub empty: EmptyPolicy,
}

impl ListingSpec {
    pub fn index() -> Self {
        Self {
            filter: None,
            title: TitleRule::Fixed("Home - ".to_string()),
            empty: EmptyPolicy::Allow,
        }
    }

    pub fn category(slug: &str) -> Self {
        Self {
            filter: Some(PostPredicate::CategorySlug(slug.to_string())),
            title: TitleRule::FirstCategory,
            empty: EmptyPolicy::NotFound {
                entity_type: "Category",
                slug: slug.to_string(),
            },
        }
    }

    pub fn tag(slug: &str) -> Self {
        Self {
            filter: Some(PostPredicate::TagSlug(slug.to_string())),
            title: TitleRule::FirstTag {
                slug: slug.to_string(),
            },
            empty: EmptyPolicy::NotFound {
                entity_type: "Tag",
                slug: slug.to_string(),
            },
        }
    }

    pub fn created_by(user_id: i64, display_name: &str) -> Self {
        Self {
            filter: Some(PostPredicate::CreatedBy(user_id)),
            title: TitleRule::Fixed(format!("{display_name} - Posts - ")),
            empty: EmptyPolicy::Allow,
        }
    }

    /// `term` must already be trimmed and non-empty.
    pub fn search(term: &str) -> Self {
        let shown: String = term.chars().take(SEARCH_TITLE_CHARS).collect();
        Self {
            filter: Some(PostPredicate::Search(term.to_string())),
            title: TitleRule::Fixed(format!("{shown} - Search - ")),
            empty: EmptyPolicy::Allow,
        }
    }

    /// Full predicate: published AND the optional filter.
    pub fn predicate(&self) -> PostPredicate {
        match &self.filter {
            Some(filter) => PostPredicate::published().and(filter.clone()),
            None => PostPredicate::published(),
        }
    }
}

/// A rendered post listing.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub page_title: String,
    pub posts: Paginated<Post>,
    /// The trimmed search term, for search listings only.
    pub search_value: Option<String>,
}

/// A single resolved entity.
#[derive(Debug, Clone, Serialize)]
pub struct Detail<T> {
    pub page_title: String,
    pub entity: T,
}

/// Read-side operations of the blog.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    pages: Arc<dyn PageRepository>,
    users: Arc<dyn UserRepository>,
    site: Arc<dyn SiteSetupRepository>,
    paginator: Paginator,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        pages: Arc<dyn PageRepository>,
        users: Arc<dyn UserRepository>,
        site: Arc<dyn SiteSetupRepository>,
    ) -> Self {
        Self {
            posts,
            pages,
            users,
            site,
            paginator: Paginator::default(),
        }
    }

    /// Run a listing: count, clamp the page, fetch the window, title it.
    pub async fn list_posts(
        &self,
        spec: &ListingSpec,
        page: PageNumber,
    ) -> Result<Listing, DomainError> {
        let predicate = spec.predicate();
        let total = self.posts.count(&predicate).await?;
        let number = self.paginator.resolve(page, total);
        let items = if total == 0 {
            Vec::new()
        } else {
            self.posts
                .find_window(&predicate, self.paginator.window(number))
                .await?
        };
        let posts = self.paginator.page(items, number, total);

        if posts.is_empty() {
            if let EmptyPolicy::NotFound { entity_type, slug } = &spec.empty {
                tracing::debug!(entity_type, slug = %slug, "Listing is empty");
                return Err(DomainError::EmptyListing {
                    entity_type: *entity_type,
                    slug: slug.clone(),
                });
            }
        }

        Ok(Listing {
            page_title: spec.title.derive(posts.items.first()),
            posts,
            search_value: None,
        })
    }

    pub async fn index(&self, page: PageNumber) -> Result<Listing, DomainError> {
        self.list_posts(&ListingSpec::index(), page).await
    }

    pub async fn category(&self, slug: &str, page: PageNumber) -> Result<Listing, DomainError> {
        self.list_posts(&ListingSpec::category(slug), page).await
    }

    pub async fn tag(&self, slug: &str, page: PageNumber) -> Result<Listing, DomainError> {
        self.list_posts(&ListingSpec::tag(slug), page).await
    }

    pub async fn created_by(&self, user_id: i64, page: PageNumber) -> Result<Listing, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        self.list_posts(&ListingSpec::created_by(user.id, &user.display_name()), page)
            .await
    }

    /// Search listing. A blank term yields an empty page without querying.
    pub async fn search(&self, raw: &str, page: PageNumber) -> Result<Listing, DomainError> {
        let term = raw.trim();
        if term.is_empty() {
            return Ok(Listing {
                page_title: "Search - ".to_string(),
                posts: Paginated::empty(self.paginator.per_page()),
                search_value: Some(String::new()),
            });
        }

        let mut listing = self.list_posts(&ListingSpec::search(term), page).await?;
        listing.search_value = Some(term.to_string());
        Ok(listing)
    }

    /// A published post by slug.
    pub async fn post_detail(&self, slug: &str) -> Result<Detail<Post>, DomainError> {
        let post = self
            .posts
            .find_by_slug(slug, &PostPredicate::published())
            .await?
            .ok_or_else(|| DomainError::not_found("Post", slug))?;
        Ok(Detail {
            page_title: format!("{} - Post - ", post.title),
            entity: post,
        })
    }

    /// A published page by slug.
    pub async fn page_detail(&self, slug: &str) -> Result<Detail<Page>, DomainError> {
        let page = self
            .pages
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("Page", slug))?;
        Ok(Detail {
            page_title: format!("{} - Page - ", page.title),
            entity: page,
        })
    }

    /// The active site configuration, if any.
    pub async fn site_setup(&self) -> Result<Option<SiteSetup>, DomainError> {
        Ok(self.site.find_active().await?)
    }
}

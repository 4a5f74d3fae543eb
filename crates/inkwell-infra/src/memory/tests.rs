use inkwell_core::PostPredicate;
use inkwell_core::domain::{Category, MenuLink, Page, PostDraft, SiteSetup, Tag, User};
use inkwell_core::error::RepoError;
use inkwell_core::pagination::PageWindow;
use inkwell_core::ports::{
    BaseRepository, CategoryRepository, PageRepository, PostRepository, SiteSetupRepository,
    TagRepository,
};

use super::InMemoryStore;

async fn category(store: &InMemoryStore, name: &str, slug: &str) -> Category {
    BaseRepository::<Category, i64>::save(store, Category::new(name, slug))
        .await
        .unwrap()
}

async fn tag(store: &InMemoryStore, name: &str, slug: &str) -> Tag {
    BaseRepository::<Tag, i64>::save(store, Tag::new(name, slug))
        .await
        .unwrap()
}

async fn user(store: &InMemoryStore, username: &str) -> User {
    BaseRepository::<User, i64>::save(store, User::new(username, "Ana", "Silva"))
        .await
        .unwrap()
}

fn window(offset: u64, limit: u64) -> PageWindow {
    PageWindow { offset, limit }
}

#[tokio::test]
async fn test_save_post_resolves_relations_and_audit() {
    let store = InMemoryStore::new();
    let news = category(&store, "News", "news").await;
    let rust = tag(&store, "Rust", "rust").await;
    let ana = user(&store, "ana").await;

    let post = PostRepository::save(
        &store,
        PostDraft::new("Hello", "hello")
            .published()
            .in_category(news.id)
            .with_tags(vec![rust.id, rust.id])
            .edited_by(ana.id),
    )
    .await
    .unwrap();

    assert!(post.id > 0);
    assert_eq!(post.category.as_ref().map(|c| c.slug.as_str()), Some("news"));
    assert_eq!(post.tags.len(), 1);
    assert_eq!(post.created_by.as_ref().map(|u| u.id), Some(ana.id));
    assert_eq!(post.updated_by.as_ref().map(|u| u.id), Some(ana.id));
    assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn test_update_keeps_creator_and_creation_time() {
    let store = InMemoryStore::new();
    let ana = user(&store, "ana").await;
    let bob = user(&store, "bob").await;

    let first = PostRepository::save(&store, PostDraft::new("Hello", "hello").edited_by(ana.id))
        .await
        .unwrap();
    let second = PostRepository::save(
        &store,
        PostDraft::from_post(&first)
            .with_excerpt("edited")
            .edited_by(bob.id),
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.created_by.as_ref().map(|u| u.id), Some(ana.id));
    assert_eq!(second.updated_by.as_ref().map(|u| u.id), Some(bob.id));
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn test_duplicate_slug_is_constraint_error() {
    let store = InMemoryStore::new();
    category(&store, "News", "news").await;

    let result = BaseRepository::<Category, i64>::save(&store, Category::new("More news", "news")).await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));

    PostRepository::save(&store, PostDraft::new("A", "same")).await.unwrap();
    let result = PostRepository::save(&store, PostDraft::new("B", "same")).await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_empty_slug_is_derived_on_save() {
    let store = InMemoryStore::new();
    let mut draft = PostDraft::new("Hello World", "");
    draft.slug.clear();

    let post = PostRepository::save(&store, draft).await.unwrap();
    assert!(post.slug.starts_with("hello-world-"));
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let store = InMemoryStore::new();
    let mut ghost = Category::new("Ghost", "ghost");
    ghost.id = 99;

    let result = BaseRepository::<Category, i64>::save(&store, ghost).await;
    assert!(matches!(result, Err(RepoError::NotFound)));

    let result = BaseRepository::<Tag, i64>::delete(&store, 99).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_unknown_relations_are_rejected() {
    let store = InMemoryStore::new();

    let result = PostRepository::save(&store, PostDraft::new("A", "a").in_category(42)).await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));

    let result = PostRepository::save(&store, PostDraft::new("A", "a").with_tags(vec![42])).await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_deletes_cascade_like_the_schema() {
    let store = InMemoryStore::new();
    let news = category(&store, "News", "news").await;
    let rust = tag(&store, "Rust", "rust").await;
    let ana = user(&store, "ana").await;
    let post = PostRepository::save(
        &store,
        PostDraft::new("Hello", "hello")
            .in_category(news.id)
            .with_tags(vec![rust.id])
            .edited_by(ana.id),
    )
    .await
    .unwrap();

    BaseRepository::<Category, i64>::delete(&store, news.id).await.unwrap();
    BaseRepository::<Tag, i64>::delete(&store, rust.id).await.unwrap();
    BaseRepository::<User, i64>::delete(&store, ana.id).await.unwrap();

    let post = PostRepository::find_by_id(&store, post.id).await.unwrap().unwrap();
    assert!(post.category.is_none());
    assert!(post.tags.is_empty());
    assert!(post.created_by.is_none());
    assert!(post.updated_by.is_none());
}

#[tokio::test]
async fn test_window_is_newest_first_and_filtered() {
    let store = InMemoryStore::new();
    let news = category(&store, "News", "news").await;
    for i in 1..=5 {
        let mut draft = PostDraft::new(format!("Post {i}"), &format!("post-{i}")).published();
        if i % 2 == 1 {
            draft = draft.in_category(news.id);
        }
        PostRepository::save(&store, draft).await.unwrap();
    }
    PostRepository::save(&store, PostDraft::new("Draft", "draft")).await.unwrap();

    let published = PostPredicate::published();
    assert_eq!(store.count(&published).await.unwrap(), 5);

    let page = store.find_window(&published, window(0, 2)).await.unwrap();
    let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Post 5", "Post 4"]);

    let in_news = published.and(PostPredicate::CategorySlug("news".into()));
    assert_eq!(store.count(&in_news).await.unwrap(), 3);
    let rest = store.find_window(&in_news, window(2, 9)).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].title, "Post 1");
}

#[tokio::test]
async fn test_find_by_slug_applies_predicate() {
    let store = InMemoryStore::new();
    PostRepository::save(&store, PostDraft::new("Draft", "draft")).await.unwrap();

    let any = PostRepository::find_by_slug(&store, "draft", &PostPredicate::All(Vec::new()))
        .await
        .unwrap();
    assert!(any.is_some());

    let published = PostRepository::find_by_slug(&store, "draft", &PostPredicate::published())
        .await
        .unwrap();
    assert!(published.is_none());
}

#[tokio::test]
async fn test_published_page_lookup() {
    let store = InMemoryStore::new();
    let mut about = Page::new("About", "about", "Hi");
    about.is_published = true;
    BaseRepository::<Page, i64>::save(&store, about).await.unwrap();
    BaseRepository::<Page, i64>::save(&store, Page::new("Secret", "secret", "..."))
        .await
        .unwrap();

    assert!(store.find_published_by_slug("about").await.unwrap().is_some());
    assert!(store.find_published_by_slug("secret").await.unwrap().is_none());
}

#[tokio::test]
async fn test_slug_lookups() {
    let store = InMemoryStore::new();
    category(&store, "News", "news").await;
    tag(&store, "Rust", "rust").await;

    assert_eq!(
        CategoryRepository::find_by_slug(&store, "news").await.unwrap().map(|c| c.name),
        Some("News".to_owned())
    );
    assert_eq!(
        TagRepository::find_by_slug(&store, "rust").await.unwrap().map(|t| t.name),
        Some("Rust".to_owned())
    );
    assert!(TagRepository::find_by_slug(&store, "go").await.unwrap().is_none());
}

#[tokio::test]
async fn test_active_setup_is_highest_id_with_menu() {
    let store = InMemoryStore::new();
    assert!(store.find_active().await.unwrap().is_none());

    BaseRepository::<SiteSetup, i64>::save(&store, SiteSetup::new("Old", ""))
        .await
        .unwrap();
    let latest = BaseRepository::<SiteSetup, i64>::save(&store, SiteSetup::new("New", ""))
        .await
        .unwrap();
    store
        .add_menu_link(
            latest.id,
            MenuLink {
                id: 0,
                text: "About".into(),
                url_or_path: "/page/about/".into(),
                new_tab: false,
            },
        )
        .await
        .unwrap();

    let active = store.find_active().await.unwrap().unwrap();
    assert_eq!(active.title, "New");
    assert_eq!(active.menu.len(), 1);
    assert!(active.menu[0].id > 0);
}

#[tokio::test]
async fn test_setup_save_leaves_menu_to_menu_links() {
    let store = InMemoryStore::new();
    let mut setup = SiteSetup::new("Inkwell", "");
    setup.menu.push(MenuLink {
        id: 0,
        text: "Ignored".into(),
        url_or_path: "/".into(),
        new_tab: false,
    });

    let saved = BaseRepository::<SiteSetup, i64>::save(&store, setup)
        .await
        .unwrap();
    assert!(saved.menu.is_empty());
    assert!(store.find_active().await.unwrap().unwrap().menu.is_empty());

    let link = store
        .add_menu_link(
            saved.id,
            MenuLink {
                id: 0,
                text: "About".into(),
                url_or_path: "/page/about/".into(),
                new_tab: false,
            },
        )
        .await
        .unwrap();

    // Re-saving the row keeps links added through `add_menu_link`.
    let mut edited = saved.clone();
    edited.title = "Inkwell 2".into();
    BaseRepository::<SiteSetup, i64>::save(&store, edited)
        .await
        .unwrap();

    let active = store.find_active().await.unwrap().unwrap();
    assert_eq!(active.title, "Inkwell 2");
    assert_eq!(active.menu, vec![link]);
    let by_id = BaseRepository::<SiteSetup, i64>::find_by_id(&store, saved.id)
        .await
        .unwrap()
        .unwrap();
    assert!(by_id.menu.is_empty());

    assert!(matches!(
        store
            .add_menu_link(
                9999,
                MenuLink {
                    id: 0,
                    text: "Lost".into(),
                    url_or_path: "/".into(),
                    new_tab: false,
                },
            )
            .await,
        Err(RepoError::NotFound)
    ));
}

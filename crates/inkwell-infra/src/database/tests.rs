use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    DatabaseBackend, DbConn, DbErr, EntityTrait, MockDatabase, MockExecResult, QueryFilter,
    QueryTrait, Value,
};

use inkwell_core::PostPredicate;
use inkwell_core::domain::{Category, MenuLink, PostDraft, SiteSetup};
use inkwell_core::error::RepoError;
use inkwell_core::pagination::PageWindow;
use inkwell_core::ports::{BaseRepository, PostRepository, SiteSetupRepository};

use crate::database::entity::{category, menu_link, post, post_tag, site_setup, tag, user};
use crate::database::filter::{like_pattern, post_condition};
use crate::database::postgres_base::map_db_err;
use crate::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
    PostgresSiteSetupRepository,
};

fn post_model(id: i64, title: &str) -> post::Model {
    let now = Utc::now().fixed_offset();
    post::Model {
        id,
        title: title.to_owned(),
        slug: format!("post-{id}"),
        excerpt: "Excerpt".to_owned(),
        content: "Content".to_owned(),
        cover: String::new(),
        cover_in_post_content: true,
        is_published: true,
        created_at: now,
        updated_at: now,
        category_id: None,
        created_by_id: None,
        updated_by_id: None,
    }
}

fn setup_model(id: i64, title: &str) -> site_setup::Model {
    site_setup::Model {
        id,
        title: title.to_owned(),
        description: String::new(),
        show_header: true,
        show_search: true,
        show_menu: true,
        show_description: true,
        show_pagination: true,
        show_footer: true,
        favicon: String::new(),
    }
}

fn user_model(id: i64, username: &str, first_name: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_owned(),
        first_name: first_name.to_owned(),
        last_name: String::new(),
    }
}

fn tag_model(id: i64, name: &str) -> tag::Model {
    tag::Model {
        id,
        name: name.to_owned(),
        slug: name.to_lowercase(),
    }
}

fn link(post_id: i64, tag_id: i64) -> post_tag::Model {
    post_tag::Model { post_id, tag_id }
}

/// Debug rendering of each statement the mock connection ran, in order.
///
/// The repository must be dropped first so the connection is no longer shared.
fn statements(db: Arc<DbConn>) -> Vec<String> {
    let log = Arc::into_inner(db)
        .expect("connection still shared")
        .into_transaction_log();
    log.iter()
        .flat_map(|txn| {
            format!("{txn:?}")
                .split("Statement {")
                .skip(1)
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The statement whose SQL starts with `prefix`.
fn statement<'a>(stmts: &'a [String], prefix: &str) -> (usize, &'a str) {
    stmts
        .iter()
        .enumerate()
        .find(|(_, s)| s.trim_start().trim_start_matches("sql: \"").starts_with(prefix))
        .map(|(i, s)| (i, s.as_str()))
        .unwrap_or_else(|| panic!("no statement starting with {prefix}: {stmts:#?}"))
}

/// Text of `sql` between `from` and the first `to` after it.
fn clause<'a>(sql: &'a str, from: &str, to: &str) -> &'a str {
    let start = sql.find(from).unwrap();
    let end = start + sql[start..].find(to).unwrap();
    &sql[start..end]
}

fn render(predicate: &PostPredicate) -> String {
    post::Entity::find()
        .filter(post_condition(predicate))
        .build(DatabaseBackend::Postgres)
        .to_string()
}

#[tokio::test]
async fn test_find_category_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id: 1,
            name: "News".to_owned(),
            slug: "news".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let result: Option<Category> = repo.find_by_id(1).await.unwrap();

    let category = result.unwrap();
    assert_eq!(category.name, "News");
    assert_eq!(category.slug, "news");
}

#[tokio::test]
async fn test_active_site_setup_is_latest_row_with_menu() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![setup_model(4, "Latest")]])
        .append_query_results(vec![vec![
            menu_link::Model {
                id: 1,
                text: "About".to_owned(),
                url_or_path: "/page/about/".to_owned(),
                new_tab: false,
                site_setup_id: 4,
            },
            menu_link::Model {
                id: 2,
                text: "Source".to_owned(),
                url_or_path: "https://example.com".to_owned(),
                new_tab: true,
                site_setup_id: 4,
            },
        ]])
        .into_connection();

    let repo = PostgresSiteSetupRepository::new(db);
    let active: SiteSetup = repo.find_active().await.unwrap().unwrap();

    assert_eq!(active.id, 4);
    assert_eq!(active.title, "Latest");
    assert_eq!(active.menu.len(), 2);
    assert!(active.menu[1].new_tab);

    let log = statements(repo.db).concat();
    assert!(log.contains("ORDER BY"));
    assert!(log.contains("DESC"));
}

#[tokio::test]
async fn test_no_site_setup_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<site_setup::Model>::new()])
        .into_connection();

    let repo = PostgresSiteSetupRepository::new(db);
    assert!(repo.find_active().await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_published_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(12)),
        )])]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let total = repo.count(&PostPredicate::published()).await.unwrap();

    assert_eq!(total, 12);
}

#[tokio::test]
async fn test_find_window_hydrates_untagged_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(10, "Tenth"), post_model(9, "Ninth")]])
        .append_query_results(vec![Vec::<post_tag::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo
        .find_window(
            &PostPredicate::published(),
            PageWindow {
                offset: 9,
                limit: 9,
            },
        )
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Tenth");
    assert!(posts[0].tags.is_empty());
    assert!(posts[0].category.is_none());

    let log = statements(repo.db).concat();
    assert!(log.contains("LIMIT"));
    assert!(log.contains("OFFSET"));
    assert!(log.contains("DESC"));
}

#[tokio::test]
async fn test_find_post_hydrates_category_authors_and_tags() {
    let mut model = post_model(1, "Hello");
    model.category_id = Some(3);
    model.created_by_id = Some(7);
    model.updated_by_id = Some(8);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .append_query_results(vec![vec![category::Model {
            id: 3,
            name: "News".to_owned(),
            slug: "news".to_owned(),
        }]])
        .append_query_results(vec![vec![
            user_model(7, "ana", "Ana"),
            user_model(8, "bo", "Bo"),
        ]])
        .append_query_results(vec![vec![link(1, 5), link(1, 2)]])
        .append_query_results(vec![vec![tag_model(2, "Rust"), tag_model(5, "Web")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = PostRepository::find_by_id(&repo, 1).await.unwrap().unwrap();

    assert_eq!(post.category.clone().map(|c| c.slug), Some("news".to_owned()));
    assert_eq!(post.created_by.clone().map(|u| u.username), Some("ana".to_owned()));
    assert_eq!(post.updated_by.clone().map(|u| u.username), Some("bo".to_owned()));
    let tags: Vec<_> = post.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(tags, ["rust", "web"]);
    assert!(post.tag_by_slug("web").is_some());

    // Post row, then one query per relation.
    assert_eq!(statements(repo.db).len(), 5);
}

#[tokio::test]
async fn test_insert_post_stamps_created_and_replaces_tags() {
    let mut saved = post_model(5, "Hello");
    saved.created_by_id = Some(7);
    saved.updated_by_id = Some(7);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![saved.clone()]])
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
        ])
        .append_query_results(vec![vec![saved]])
        .append_query_results(vec![vec![user_model(7, "ana", "Ana")]])
        .append_query_results(vec![vec![link(5, 1), link(5, 2)]])
        .append_query_results(vec![vec![tag_model(1, "Go"), tag_model(2, "Rust")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let draft = PostDraft::new("Hello", "post-5")
        .published()
        .with_tags(vec![2, 1, 2])
        .edited_by(7);
    let post = repo.save(draft).await.unwrap();

    assert_eq!(post.id, 5);
    assert_eq!(post.created_by.map(|u| u.id), Some(7));
    assert_eq!(post.tags.len(), 2);

    let stmts = statements(repo.db);
    let (insert_at, insert) = statement(&stmts, r#"INSERT INTO \"posts\""#);
    let columns = clause(insert, "INSERT INTO", "VALUES");
    assert!(columns.contains("created_at"));
    assert!(columns.contains("created_by_id"));
    assert!(columns.contains("updated_by_id"));

    let (delete_at, _) = statement(&stmts, r#"DELETE FROM \"post_tags\""#);
    let (link_at, links) = statement(&stmts, r#"INSERT INTO \"post_tags\""#);
    assert!(insert_at < delete_at);
    assert!(delete_at < link_at);
    // Duplicate tag ids collapse to one row each.
    assert_eq!(links.matches("BigInt(Some(5))").count(), 2);
}

#[tokio::test]
async fn test_update_post_keeps_created_stamps() {
    let mut saved = post_model(5, "Edited");
    saved.created_by_id = Some(7);
    saved.updated_by_id = Some(8);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![saved.clone()]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 3,
        }])
        .append_query_results(vec![vec![saved]])
        .append_query_results(vec![vec![
            user_model(7, "ana", "Ana"),
            user_model(8, "bo", "Bo"),
        ]])
        .append_query_results(vec![Vec::<post_tag::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let mut draft = PostDraft::new("Edited", "post-5").edited_by(8);
    draft.id = 5;
    let post = repo.save(draft).await.unwrap();

    assert_eq!(post.created_by.map(|u| u.id), Some(7));
    assert_eq!(post.updated_by.map(|u| u.id), Some(8));
    assert!(post.tags.is_empty());

    let stmts = statements(repo.db);
    let (update_at, update) = statement(&stmts, r#"UPDATE \"posts\""#);
    let set = clause(update, "SET", "WHERE");
    assert!(set.contains("updated_at"));
    assert!(set.contains("updated_by_id"));
    assert!(!set.contains("created_at"));
    assert!(!set.contains("created_by_id"));

    // Tags are cleared even when the draft carries none, and nothing is re-inserted.
    let (delete_at, _) = statement(&stmts, r#"DELETE FROM \"post_tags\""#);
    assert!(update_at < delete_at);
    assert!(!stmts.iter().any(|s| s.contains(r#"INSERT INTO \"post_tags\""#)));
}

#[tokio::test]
async fn test_setup_save_writes_only_the_setup_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![setup_model(1, "Inkwell")]])
        .into_connection();

    let repo = PostgresSiteSetupRepository::new(db);
    let mut setup = SiteSetup::new("Inkwell", "");
    setup.menu.push(MenuLink {
        id: 0,
        text: "Ignored".to_owned(),
        url_or_path: "/".to_owned(),
        new_tab: false,
    });
    let saved = BaseRepository::<SiteSetup, i64>::save(&repo, setup)
        .await
        .unwrap();

    assert_eq!(saved.id, 1);
    assert!(saved.menu.is_empty());
    let stmts = statements(repo.db);
    statement(&stmts, r#"INSERT INTO \"site_setups\""#);
    assert!(!stmts.iter().any(|s| s.contains("menu_links")));
}

#[tokio::test]
async fn test_repositories_share_one_pooled_connection() {
    let connections = DatabaseConnections {
        main: Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![category::Model {
                    id: 1,
                    name: "News".to_owned(),
                    slug: "news".to_owned(),
                }]])
                .append_query_results(vec![vec![BTreeMap::from([(
                    "num_items",
                    Value::BigInt(Some(4)),
                )])]])
                .into_connection(),
        ),
    };

    let categories = PostgresCategoryRepository::new(Arc::clone(&connections.main));
    let posts = PostgresPostRepository::new(Arc::clone(&connections.main));
    assert_eq!(Arc::strong_count(&connections.main), 3);

    let found: Option<Category> = categories.find_by_id(1).await.unwrap();
    assert!(found.is_some());
    assert_eq!(posts.count(&PostPredicate::published()).await.unwrap(), 4);

    drop((categories, posts));
    assert_eq!(statements(connections.main).len(), 2);
}

#[test]
fn test_published_condition() {
    let sql = render(&PostPredicate::published());
    assert!(sql.contains(r#""posts"."is_published" = TRUE"#));
}

#[test]
fn test_category_and_tag_conditions_use_subqueries() {
    let sql = render(&PostPredicate::published().and(PostPredicate::CategorySlug("news".into())));
    assert!(sql.contains(r#""category_id" IN (SELECT"#));
    assert!(sql.contains("'news'"));

    let sql = render(&PostPredicate::TagSlug("rust".into()));
    assert!(sql.contains(r#""posts"."id" IN (SELECT"#));
    assert!(sql.contains(r#""post_tags""#));
    assert!(sql.contains("'rust'"));
}

#[test]
fn test_search_condition_is_case_insensitive_or() {
    let sql = render(&PostPredicate::Search("Hello".into()));
    assert!(sql.contains("LOWER("));
    assert!(sql.contains("'%hello%'"));
    assert!(sql.contains(" OR "));
    assert!(sql.contains(r#""tags""#));
}

#[test]
fn test_like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("Hello"), "%hello%");
    assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
}

#[test]
fn test_db_error_mapping() {
    assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
    assert!(matches!(
        map_db_err(DbErr::Custom(
            "duplicate key value violates unique constraint".to_owned()
        )),
        RepoError::Constraint(_)
    ));
    assert!(matches!(
        map_db_err(DbErr::Custom("syntax error".to_owned())),
        RepoError::Query(_)
    ));
}

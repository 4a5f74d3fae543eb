//! Translation of `PostPredicate` into SeaORM conditions.
//!
//! Tag predicates are expressed as `posts.id IN (SELECT post_id ...)` so a
//! post matching through several tags is still returned once, and counts need
//! no DISTINCT.

use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SelectStatement, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait};

use inkwell_core::PostPredicate;

use super::entity::{category, post, post_tag, tag};

/// Build the WHERE condition for `predicate` over the `posts` table.
pub fn post_condition(predicate: &PostPredicate) -> Condition {
    match predicate {
        PostPredicate::Published => Condition::all().add(post::Column::IsPublished.eq(true)),
        PostPredicate::CategorySlug(slug) => Condition::all().add(
            post::Column::CategoryId.in_subquery(
                Query::select()
                    .column((category::Entity, category::Column::Id))
                    .from(category::Entity)
                    .and_where(category::Column::Slug.eq(slug.as_str()))
                    .to_owned(),
            ),
        ),
        PostPredicate::TagSlug(slug) => Condition::all().add(
            post::Column::Id.in_subquery(post_ids_tagged(tag::Column::Slug.eq(slug.as_str()))),
        ),
        PostPredicate::CreatedBy(user_id) => {
            Condition::all().add(post::Column::CreatedById.eq(*user_id))
        }
        PostPredicate::Search(term) => Condition::any()
            .add(contains_ci(post::Entity, post::Column::Title, term))
            .add(contains_ci(post::Entity, post::Column::Excerpt, term))
            .add(contains_ci(post::Entity, post::Column::Content, term))
            .add(post::Column::Id.in_subquery(post_ids_tagged(contains_ci(
                tag::Entity,
                tag::Column::Name,
                term,
            )))),
        PostPredicate::All(parts) => parts
            .iter()
            .fold(Condition::all(), |cond, part| cond.add(post_condition(part))),
    }
}

/// `SELECT post_tags.post_id FROM post_tags JOIN tags ... WHERE <tag_filter>`.
fn post_ids_tagged(tag_filter: SimpleExpr) -> SelectStatement {
    Query::select()
        .column((post_tag::Entity, post_tag::Column::PostId))
        .from(post_tag::Entity)
        .inner_join(
            tag::Entity,
            Expr::col((tag::Entity, tag::Column::Id))
                .equals((post_tag::Entity, post_tag::Column::TagId)),
        )
        .and_where(tag_filter)
        .to_owned()
}

/// `LOWER(table.col) LIKE '%term%'` with LIKE wildcards in `term` escaped.
fn contains_ci<E, C>(entity: E, column: C, term: &str) -> SimpleExpr
where
    E: EntityTrait,
    C: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col((entity, column))))
        .like(LikeExpr::new(like_pattern(term)).escape('\\'))
}

pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

//! SeaORM entities for the blog schema.

pub mod category;
pub mod menu_link;
pub mod page;
pub mod post;
pub mod post_tag;
pub mod site_setup;
pub mod tag;
pub mod user;

use sea_orm::ActiveValue::{self, NotSet, Unchanged};

/// `0` means "not yet stored": leave the key unset so the database assigns it.
pub(crate) fn key(id: i64) -> ActiveValue<i64> {
    if id == 0 { NotSet } else { Unchanged(id) }
}

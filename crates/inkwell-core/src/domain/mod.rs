//! Domain entities - the core business objects.

mod category;
mod page;
mod post;
mod site_setup;
mod slugs;
mod tag;
mod user;

pub use category::Category;
pub use page::Page;
pub use post::{Post, PostDraft};
pub use site_setup::{MenuLink, SiteSetup};
pub use slugs::{ensure_slug, slugify_new};
pub use tag::Tag;
pub use user::User;

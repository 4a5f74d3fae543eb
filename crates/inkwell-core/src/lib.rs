//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog.
//! This crate holds the content model, the post query predicates, pagination
//! and listing composition. It has no infrastructure dependencies; storage is
//! reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod ports;
pub mod query;

pub use error::{DomainError, RepoError};
pub use listing::{BlogService, Detail, EmptyPolicy, Listing, ListingSpec, TitleRule};
pub use pagination::{PER_PAGE, PageNumber, Paginated};
pub use query::PostPredicate;

//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;

pub use repository::{
    BaseRepository, CategoryRepository, PageRepository, PostRepository, SiteSetupRepository,
    TagRepository, UserRepository,
};

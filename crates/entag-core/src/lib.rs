//! # entag-core
//!
//! Core types, traits, and tag-string logic for the entag library.
//!
//! This crate holds everything that does not touch a database: the data
//! model ([`Tag`], [`EntityTag`], [`TagDelta`]), the request context that
//! replaces ambient tenant/user state, the [`TagRepository`] trait, and
//! the pure parse/format/diff/slug helpers. The PostgreSQL implementation
//! lives in `entag-db`.

pub mod context;
pub mod error;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use context::RequestContext;
pub use error::{Error, Result};
pub use models::{EntityTag, Tag, TagDelta};
pub use tags::{
    diff_tag_strings, diff_tags, format_tag_string, parse_tag_string, slugify,
    validate_tag_name, MAX_TAG_NAME_LEN,
};
pub use traits::TagRepository;

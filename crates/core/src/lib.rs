//! Domain logic for the page generator.
//!
//! Nothing in this crate performs I/O: the HTTP layer, the page store and the
//! model gateway all build on these pieces.

pub mod error;
pub mod fence;
pub mod page_meta;
pub mod prompt;
pub mod slug;
pub mod types;

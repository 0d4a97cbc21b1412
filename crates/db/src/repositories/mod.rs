//! Repository layer: one zero-sized struct per table with async CRUD methods.

pub mod page_repo;

pub use page_repo::PageRepo;

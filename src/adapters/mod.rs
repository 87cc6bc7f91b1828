// Adapters layer: concrete implementations for external systems (files, caches, catalogs).

pub mod cache;
pub mod catalog;
pub mod storage;

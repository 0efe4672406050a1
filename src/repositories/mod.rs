//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all document collections through a
//! single generic repository.

mod document_repo;

pub use document_repo::DocumentRepository;

use crate::db::AsyncDbPool;
use crate::models::{Product, User};

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub products: DocumentRepository<Product>,
    pub users: DocumentRepository<User>,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            products: DocumentRepository::new(pool.clone()),
            users: DocumentRepository::new(pool),
        }
    }
}

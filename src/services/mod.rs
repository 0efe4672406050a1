//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod document_service;

pub use document_service::DocumentService;

use crate::models::{Document, Product, User};
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub products: DocumentService<Product>,
    pub users: DocumentService<User>,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            products: DocumentService::new(repos.products),
            users: DocumentService::new(repos.users),
        }
    }
}

/// Maps a document type to its service inside `Services`.
///
/// This is what lets the route factory stay generic: a handler bounded on
/// `Services: ProvideCollection<T>` can fetch "its" service without knowing
/// which collection it serves.
pub trait ProvideCollection<T: Document> {
    fn collection(&self) -> &DocumentService<T>;
}

impl ProvideCollection<Product> for Services {
    fn collection(&self) -> &DocumentService<Product> {
        &self.products
    }
}

impl ProvideCollection<User> for Services {
    fn collection(&self) -> &DocumentService<User> {
        &self.users
    }
}

//! Generic document service.
//!
//! Holds the per-collection business rules on top of the repository: the
//! shared lookup-by-id (the single place a missing record becomes a 404),
//! create-onto-defaults and the shallow-merge update.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Document, DocumentRecord};
use crate::repositories::DocumentRepository;

/// Service over one document collection.
///
/// Cloning is cheap since the repository only wraps the pooled connection
/// handle.
#[derive(Clone)]
pub struct DocumentService<T: Document> {
    repo: DocumentRepository<T>,
}

impl<T: Document> DocumentService<T> {
    /// Creates a new DocumentService with the given repository.
    pub fn new(repo: DocumentRepository<T>) -> Self {
        Self { repo }
    }

    /// Lists all records of the collection in insertion order.
    pub async fn list(&self) -> AppResult<Vec<DocumentRecord<T>>> {
        self.repo.list_all().await
    }

    /// Looks a record up by id.
    ///
    /// This is the shared lookup used by get, update and delete, so the
    /// "`<Name>` not found" resolution exists exactly once per collection.
    ///
    /// # Returns
    /// The record if found, or `NotFound` with the collection display name
    pub async fn get(&self, id: Uuid) -> AppResult<DocumentRecord<T>> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::NAME))
    }

    /// Persists a new record built from the client body.
    ///
    /// Absent fields already came back as their defaults during
    /// deserialization, so the body-merged-onto-defaults contract holds by
    /// construction.
    pub async fn create(&self, doc: T) -> AppResult<DocumentRecord<T>> {
        self.repo.create(&doc).await
    }

    /// Shallow-merges `patch` onto the stored record and persists it.
    ///
    /// Fields absent from the patch are untouched; nested sub-documents are
    /// replaced wholesale.
    pub async fn update(&self, id: Uuid, patch: T) -> AppResult<DocumentRecord<T>> {
        let mut record = self.get(id).await?;
        record.data.merge(patch);
        self.repo.update(id, &record.data).await
    }

    /// Deletes a record.
    ///
    /// # Returns
    /// `NotFound` if no record matched the id
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found(T::NAME));
        }
        Ok(())
    }
}

// Integration tests against a live store. Each test resolves its service
// through `test_service`, which returns None (skipping the test body) unless
// TEST_DATABASE_URL or DATABASE_URL points at a reachable Postgres instance.
#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::sync::OnceCell;

    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{establish_async_connection_pool, run_migrations};
    use crate::models::{Product, User};

    static SCHEMA_READY: OnceCell<bool> = OnceCell::const_new();

    async fn test_service<T: Document>() -> Option<DocumentService<T>> {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok()?;

        // Migrations run once per test process; concurrent harness runs
        // against a fresh database would otherwise race on schema creation.
        let migration_url = url.clone();
        let ready = SCHEMA_READY
            .get_or_init(|| async move { run_migrations(&migration_url).await.is_ok() })
            .await;
        if !ready {
            return None;
        }

        let config = DatabaseConfig {
            url,
            connect_retries: 0,
            retry_delay: 0,
            ..DatabaseConfig::default()
        };
        let pool = establish_async_connection_pool(&config).await.ok()?;
        Some(DocumentService::new(DocumentRepository::new(pool)))
    }

    fn user_doc(value: serde_json::Value) -> User {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_returns_identical_document() {
        let Some(service) = test_service::<Product>().await else {
            return;
        };
        let doc: Product = serde_json::from_value(json!({
            "images": [{"imageUrl": "https://example.com/1.jpg", "alt": "front"}],
            "property": {
                "title": "Garden villa",
                "beds": 4,
                "location": {"city": "Tashkent"}
            },
            "features": ["garden", "garage"],
            "reviewSummary": {"Cleanliness": 4.5, "Check-in": 4.0}
        }))
        .unwrap();

        let created = service.create(doc.clone()).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.data, doc);

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.data, doc);
    }

    #[tokio::test]
    async fn test_user_create_update_delete_lifecycle() {
        let Some(service) = test_service::<User>().await else {
            return;
        };

        let created = service
            .create(user_doc(json!({"phone": 5551234, "username": "a"})))
            .await
            .unwrap();
        assert_eq!(created.data.phone, Some(5551234.0));
        assert_eq!(created.data.username.as_deref(), Some("a"));

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.data, created.data);

        // Partial update: the patched field changes, the other survives.
        let updated = service
            .update(created.id, user_doc(json!({"username": "b"})))
            .await
            .unwrap();
        assert_eq!(updated.data.username.as_deref(), Some("b"));
        assert_eq!(updated.data.phone, Some(5551234.0));

        service.delete(created.id).await.unwrap();
        let err = service.get(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_for_every_operation() {
        let Some(service) = test_service::<User>().await else {
            return;
        };
        let missing = Uuid::new_v4();

        let err = service.get(missing).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = service
            .update(missing, user_doc(json!({"username": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = service.delete(missing).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_list_contains_new_records_in_insertion_order() {
        let Some(service) = test_service::<User>().await else {
            return;
        };

        // Unique marker usernames keep this test stable while other tests
        // write to the same shared collection.
        let marker = Uuid::new_v4().simple().to_string();
        let first = service
            .create(user_doc(json!({"username": format!("{marker}-first")})))
            .await
            .unwrap();
        let second = service
            .create(user_doc(json!({"username": format!("{marker}-second")})))
            .await
            .unwrap();

        let listed = service.list().await.unwrap();
        let ours: Vec<_> = listed
            .iter()
            .filter(|r| {
                r.data
                    .username
                    .as_deref()
                    .is_some_and(|name| name.starts_with(&marker))
            })
            .collect();

        assert_eq!(ours.len(), 2);
        assert_eq!(ours[0].id, first.id);
        assert_eq!(ours[1].id, second.id);
    }
}

//! Generic document repository for async database operations.
//!
//! One repository type serves every collection: rows live in the shared
//! `documents` table and are discriminated by the `collection` column, so
//! `DocumentRepository<Product>` and `DocumentRepository<User>` are the same
//! code instantiated twice.

use std::marker::PhantomData;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Document, DocumentRecord};

/// Raw row shape of the `documents` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct DocumentRow {
    id: Uuid,
    #[allow(dead_code)]
    collection: String,
    data: serde_json::Value,
    created_at: jiff_diesel::DateTime,
    updated_at: jiff_diesel::DateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::documents)]
struct NewDocumentRow<'a> {
    collection: &'a str,
    data: serde_json::Value,
}

impl DocumentRow {
    /// Decodes the JSONB payload into the typed document.
    fn into_record<T: Document>(self) -> AppResult<DocumentRecord<T>> {
        let data = serde_json::from_value(self.data).map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e),
        })?;
        Ok(DocumentRecord {
            id: self.id,
            data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Generic repository over one document collection.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<DocumentRepository>`.
#[derive(Clone)]
pub struct DocumentRepository<T: Document> {
    pool: AsyncDbPool,
    _collection: PhantomData<T>,
}

impl<T: Document> DocumentRepository<T> {
    /// Creates a new repository bound to `T::COLLECTION`.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            pool,
            _collection: PhantomData,
        }
    }

    /// Lists every record of the collection in insertion order.
    pub async fn list_all(&self) -> AppResult<Vec<DocumentRecord<T>>> {
        use crate::schema::documents::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows: Vec<DocumentRow> = documents
            .filter(collection.eq(T::COLLECTION))
            .order((created_at.asc(), id.asc()))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await?;

        rows.into_iter().map(DocumentRow::into_record).collect()
    }

    /// Finds a record by its store-assigned identifier.
    ///
    /// # Returns
    /// `Some(record)` if found, `None` otherwise
    pub async fn find_by_id(&self, doc_id: Uuid) -> AppResult<Option<DocumentRecord<T>>> {
        use crate::schema::documents::dsl::*;
        let mut conn = self.pool.get().await?;

        let row: Option<DocumentRow> = documents
            .filter(collection.eq(T::COLLECTION))
            .filter(id.eq(doc_id))
            .select(DocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        row.map(DocumentRow::into_record).transpose()
    }

    /// Persists a new record and returns it with its generated identifier.
    ///
    /// Store rejections of the write are reported as `BadRequest`, matching
    /// the create contract (400, not 500).
    pub async fn create(&self, doc: &T) -> AppResult<DocumentRecord<T>> {
        use crate::schema::documents::dsl::*;
        let mut conn = self.pool.get().await?;

        let new_row = NewDocumentRow {
            collection: T::COLLECTION,
            data: encode(doc)?,
        };

        diesel::insert_into(documents)
            .values(&new_row)
            .returning(DocumentRow::as_returning())
            .get_result::<DocumentRow>(&mut conn)
            .await
            .map_err(write_rejection)?
            .into_record()
    }

    /// Replaces the stored document body and bumps `updated_at`.
    ///
    /// The shallow-merge against the previous state happens in the service
    /// layer; by the time the repository runs, `doc` is the full new body.
    pub async fn update(&self, doc_id: Uuid, doc: &T) -> AppResult<DocumentRecord<T>> {
        use crate::schema::documents::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(
            documents
                .filter(collection.eq(T::COLLECTION))
                .filter(id.eq(doc_id)),
        )
        .set((data.eq(encode(doc)?), updated_at.eq(diesel::dsl::now)))
        .returning(DocumentRow::as_returning())
        .get_result::<DocumentRow>(&mut conn)
        .await
        .map_err(write_rejection)?
        .into_record()
    }

    /// Deletes a record.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, doc_id: Uuid) -> AppResult<usize> {
        use crate::schema::documents::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(
            documents
                .filter(collection.eq(T::COLLECTION))
                .filter(id.eq(doc_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }
}

fn encode<T: Document>(doc: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(doc).map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })
}

/// Maps a failed insert/update to the 400-class error the write contract
/// requires, keeping the store's own message.
fn write_rejection(error: diesel::result::Error) -> AppError {
    AppError::bad_request(error.to_string())
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use tracker_core::model::{Category, Chapter, ChapterId, Subject, SubjectBooks};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Input for creating a chapter row during curriculum seeding.
///
/// Action state is never part of creation: fresh chapters start with every
/// action unset and the revision counter at zero.
#[derive(Debug, Clone)]
pub struct NewChapterRecord {
    pub subject: Subject,
    pub category: Category,
    pub ordinal: u32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Repository contract for chapter records.
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Insert a chapter unless one with the same (subject, title) exists.
    ///
    /// Returns `None` when the chapter was already present, so repeated
    /// seeding is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the chapter cannot be stored.
    async fn insert_chapter_if_absent(
        &self,
        chapter: NewChapterRecord,
    ) -> Result<Option<ChapterId>, StorageError>;

    /// Fetch a chapter by ID. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, StorageError>;

    /// All chapters of a subject, ordered by (category, ordinal).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_by_subject(&self, subject: Subject) -> Result<Vec<Chapter>, StorageError>;

    /// Persist a chapter's full action state in one write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the row is missing, or other
    /// storage errors.
    async fn update_chapter(&self, chapter: &Chapter) -> Result<(), StorageError>;
}

/// Repository contract for subject book records.
#[async_trait]
pub trait SubjectBookRepository: Send + Sync {
    /// Create the book record for a subject if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn ensure_books(
        &self,
        subject: Subject,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Fetch a subject's book record. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_books(&self, subject: Subject) -> Result<Option<SubjectBooks>, StorageError>;

    /// Persist a subject's book flags.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the record is missing, or
    /// other storage errors.
    async fn update_books(&self, books: &SubjectBooks) -> Result<(), StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    next_chapter_id: u64,
    chapters: HashMap<ChapterId, Chapter>,
    books: HashMap<Subject, SubjectBooks>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChapterRepository for InMemoryRepository {
    async fn insert_chapter_if_absent(
        &self,
        chapter: NewChapterRecord,
    ) -> Result<Option<ChapterId>, StorageError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let title = chapter.title.trim();
        let exists = state
            .chapters
            .values()
            .any(|c| c.subject() == chapter.subject && c.title() == title);
        if exists {
            return Ok(None);
        }

        state.next_chapter_id += 1;
        let id = ChapterId::new(state.next_chapter_id);
        let record = Chapter::new(
            id,
            chapter.subject,
            chapter.category,
            chapter.ordinal,
            chapter.title,
            chapter.created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        state.chapters.insert(id, record);
        Ok(Some(id))
    }

    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, StorageError> {
        let state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(state.chapters.get(&id).cloned())
    }

    async fn list_by_subject(&self, subject: Subject) -> Result<Vec<Chapter>, StorageError> {
        let state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut chapters: Vec<Chapter> = state
            .chapters
            .values()
            .filter(|c| c.subject() == subject)
            .cloned()
            .collect();
        chapters.sort_by_key(|c| (c.category(), c.ordinal()));
        Ok(chapters)
    }

    async fn update_chapter(&self, chapter: &Chapter) -> Result<(), StorageError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match state.chapters.get_mut(&chapter.id()) {
            Some(slot) => {
                *slot = chapter.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }
}

#[async_trait]
impl SubjectBookRepository for InMemoryRepository {
    async fn ensure_books(
        &self,
        subject: Subject,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        state
            .books
            .entry(subject)
            .or_insert_with(|| SubjectBooks::new(subject, now));
        Ok(())
    }

    async fn get_books(&self, subject: Subject) -> Result<Option<SubjectBooks>, StorageError> {
        let state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(state.books.get(&subject).cloned())
    }

    async fn update_books(&self, books: &SubjectBooks) -> Result<(), StorageError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match state.books.get_mut(&books.subject()) {
            Some(slot) => {
                *slot = books.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }
}

/// Aggregates both repositories behind trait objects for backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub chapters: Arc<dyn ChapterRepository>,
    pub books: Arc<dyn SubjectBookRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let chapters: Arc<dyn ChapterRepository> = Arc::new(repo.clone());
        let books: Arc<dyn SubjectBookRepository> = Arc::new(repo);
        Self { chapters, books }
    }
}

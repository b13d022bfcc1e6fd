//! The mutation engine: validates one state-changing operation, applies it
//! to exactly one record, and returns freshly recomputed aggregates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracker_core::model::{ActionKind, Chapter, ChapterId, Subject};
use tracker_core::progress;
use tracker_core::registry::{ActionField, BookField};
use tracker_core::Clock;

use storage::repository::{ChapterRepository, StorageError, SubjectBookRepository};

use crate::error::MutationError;
use crate::views::{ChapterAggregates, MutationOutcome};

/// What a mutation points at. A caller supplies exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    Chapter(ChapterId),
    SubjectBooks(Subject),
}

/// A single state-changing request from the API layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub target: MutationTarget,
    pub field: String,
    pub action: ActionKind,
}

impl MutationRequest {
    /// Toggle request against a chapter field.
    #[must_use]
    pub fn chapter(id: ChapterId, field: impl Into<String>) -> Self {
        Self {
            target: MutationTarget::Chapter(id),
            field: field.into(),
            action: ActionKind::Toggle,
        }
    }

    /// Counter request against a chapter field.
    #[must_use]
    pub fn chapter_counter(id: ChapterId, field: impl Into<String>, action: ActionKind) -> Self {
        Self {
            target: MutationTarget::Chapter(id),
            field: field.into(),
            action,
        }
    }

    /// Toggle request against a subject's book flag.
    #[must_use]
    pub fn book(subject: Subject, field: impl Into<String>) -> Self {
        Self {
            target: MutationTarget::SubjectBooks(subject),
            field: field.into(),
            action: ActionKind::Toggle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LockKey {
    Chapter(ChapterId),
    Books(Subject),
}

/// Per-record async locks so read-modify-write on the same target
/// serializes while unrelated targets proceed in parallel.
#[derive(Default)]
struct LockMap {
    inner: Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl LockMap {
    fn lock_for(&self, key: LockKey) -> Result<Arc<tokio::sync::Mutex<()>>, StorageError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Arc::clone(map.entry(key).or_default()))
    }
}

/// Applies mutations and recomputes the aggregates callers render.
#[derive(Clone)]
pub struct MutationService {
    clock: Clock,
    chapters: Arc<dyn ChapterRepository>,
    books: Arc<dyn SubjectBookRepository>,
    locks: Arc<LockMap>,
}

impl MutationService {
    #[must_use]
    pub fn new(
        clock: Clock,
        chapters: Arc<dyn ChapterRepository>,
        books: Arc<dyn SubjectBookRepository>,
    ) -> Self {
        Self {
            clock,
            chapters,
            books,
            locks: Arc::new(LockMap::default()),
        }
    }

    /// Validates and applies one mutation, touching exactly one record.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::NotFound` if the target does not resolve,
    /// `MutationError::InvalidField` if the field is not registered for the
    /// target's subject, and `MutationError::Storage` on repository
    /// failures. Driving the revision counter below zero is not an error:
    /// it clamps silently (see `Chapter::apply_action`).
    pub async fn apply(
        &self,
        request: &MutationRequest,
    ) -> Result<MutationOutcome, MutationError> {
        match request.target {
            MutationTarget::Chapter(id) => {
                self.apply_chapter(id, &request.field, request.action).await
            }
            MutationTarget::SubjectBooks(subject) => {
                self.apply_books(subject, &request.field).await
            }
        }
    }

    async fn apply_chapter(
        &self,
        id: ChapterId,
        field_name: &str,
        action: ActionKind,
    ) -> Result<MutationOutcome, MutationError> {
        let lock = self.locks.lock_for(LockKey::Chapter(id))?;
        let _guard = lock.lock().await;

        let mut chapter = self
            .chapters
            .get_chapter(id)
            .await?
            .ok_or(MutationError::NotFound)?;

        let field = ActionField::from_name(field_name)
            .ok_or_else(|| MutationError::InvalidField(field_name.to_string()))?;
        chapter
            .apply_action(field, action, self.clock.now())
            .map_err(|_| MutationError::InvalidField(field_name.to_string()))?;

        self.chapters.update_chapter(&chapter).await?;

        // Aggregates always come from current records, never from a
        // maintained running total.
        let siblings = self.chapters.list_by_subject(chapter.subject()).await?;
        let subject_percent = progress::aggregate_percent(&siblings);
        let category_chapters: Vec<Chapter> = siblings
            .into_iter()
            .filter(|c| c.category() == chapter.category())
            .collect();
        let category_percent = progress::aggregate_percent(&category_chapters);

        Ok(MutationOutcome::Chapter(ChapterAggregates {
            subject_percent,
            category_percent,
            chapter_progress: chapter.progress_score(),
            chapter_max: chapter.max_progress(),
            revision_count: chapter.revision_count(),
        }))
    }

    async fn apply_books(
        &self,
        subject: Subject,
        field_name: &str,
    ) -> Result<MutationOutcome, MutationError> {
        let lock = self.locks.lock_for(LockKey::Books(subject))?;
        let _guard = lock.lock().await;

        let mut books = self
            .books
            .get_books(subject)
            .await?
            .ok_or(MutationError::NotFound)?;

        let book = BookField::from_name(field_name)
            .ok_or_else(|| MutationError::InvalidField(field_name.to_string()))?;
        let completed = books
            .toggle(book)
            .map_err(|_| MutationError::InvalidField(field_name.to_string()))?;

        self.books.update_books(&books).await?;

        Ok(MutationOutcome::Book {
            subject,
            field: book.name(),
            completed,
        })
    }
}

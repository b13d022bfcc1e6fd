use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::ids::ChapterId;
use crate::model::subject::{Category, Subject};
use crate::progress;
use crate::registry::{self, ActionField};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChapterError {
    #[error("chapter title cannot be empty")]
    EmptyTitle,

    #[error("chapter ordinal must be >= 1")]
    InvalidOrdinal,

    #[error("field {field} does not apply to {subject} chapters")]
    FieldNotApplicable { field: &'static str, subject: Subject },
}

//
// ─── ACTION KIND ───────────────────────────────────────────────────────────────
//

/// How a mutation should be applied to a field.
///
/// Only the revision counter distinguishes the kinds: booleans flip on any
/// kind, and `Toggle` on the counter is an accepted no-op write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionKind {
    #[default]
    Toggle,
    Increment,
    Decrement,
}

//
// ─── CHAPTER ───────────────────────────────────────────────────────────────────
//

/// One chapter of the fixed curriculum, holding its raw action state.
///
/// The set of applicable actions is fully determined by the subject via the
/// registry and never changes after construction. All writes go through
/// [`Chapter::apply_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: ChapterId,
    subject: Subject,
    category: Category,
    ordinal: u32,
    title: String,
    flags: BTreeMap<ActionField, bool>,
    revision_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Chapter {
    /// Creates a fresh chapter with no completed actions.
    ///
    /// # Errors
    ///
    /// Returns `ChapterError::EmptyTitle` if the title is empty or
    /// whitespace-only, and `ChapterError::InvalidOrdinal` if `ordinal` is 0.
    pub fn new(
        id: ChapterId,
        subject: Subject,
        category: Category,
        ordinal: u32,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ChapterError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ChapterError::EmptyTitle);
        }
        if ordinal == 0 {
            return Err(ChapterError::InvalidOrdinal);
        }

        let flags = registry::actions(subject)
            .into_iter()
            .filter(|f| f.is_flag())
            .map(|f| (f, false))
            .collect();

        Ok(Self {
            id,
            subject,
            category,
            ordinal,
            title: title.trim().to_owned(),
            flags,
            revision_count: 0,
            created_at,
            updated_at: created_at,
        })
    }

    /// Rebuilds a chapter from persisted state.
    ///
    /// Flags for fields that do not apply to the subject are rejected;
    /// applicable fields missing from `flags` default to false.
    ///
    /// # Errors
    ///
    /// Returns `ChapterError` on invalid title/ordinal or a non-applicable
    /// flag field.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: ChapterId,
        subject: Subject,
        category: Category,
        ordinal: u32,
        title: impl Into<String>,
        flags: BTreeMap<ActionField, bool>,
        revision_count: u32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ChapterError> {
        let mut chapter = Chapter::new(id, subject, category, ordinal, title, created_at)?;
        for (field, value) in flags {
            match chapter.flags.get_mut(&field) {
                Some(slot) => *slot = value,
                None => {
                    return Err(ChapterError::FieldNotApplicable {
                        field: field.name(),
                        subject,
                    });
                }
            }
        }
        chapter.revision_count = revision_count;
        chapter.updated_at = updated_at;
        Ok(chapter)
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ChapterId {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// 1-based position of this chapter within its subject's curriculum list.
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn revision_count(&self) -> u32 {
        self.revision_count
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When this chapter last accepted a mutation.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Value of a boolean action flag.
    ///
    /// Returns `None` for fields that do not apply to this subject and for
    /// the revision counter.
    #[must_use]
    pub fn flag(&self, field: ActionField) -> Option<bool> {
        self.flags.get(&field).copied()
    }

    /// Count of satisfied actions.
    ///
    /// Each set boolean flag counts 1; the revision counter counts 1 once
    /// it is above zero, regardless of magnitude.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_score(&self) -> u32 {
        let flags = self.flags.values().filter(|v| **v).count() as u32;
        flags + u32::from(self.revision_count > 0)
    }

    /// Maximum achievable score for this chapter's subject.
    #[must_use]
    pub fn max_progress(&self) -> u32 {
        registry::max_progress(self.subject)
    }

    /// Completion percentage in `[0, 100]`, rounded half-up.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        progress::percent(self.progress_score(), self.max_progress())
    }

    /// Applies a single state-changing operation.
    ///
    /// Booleans flip regardless of `kind`. The revision counter increments
    /// without an upper bound, decrements with a silent clamp at zero, and
    /// treats `Toggle` as an accepted no-op write. Every accepted call
    /// stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ChapterError::FieldNotApplicable` if `field` is not in the
    /// registry for this chapter's subject.
    pub fn apply_action(
        &mut self,
        field: ActionField,
        kind: ActionKind,
        now: DateTime<Utc>,
    ) -> Result<(), ChapterError> {
        if !registry::applies_to(self.subject, field) {
            return Err(ChapterError::FieldNotApplicable {
                field: field.name(),
                subject: self.subject,
            });
        }

        if field == ActionField::RevisionCount {
            match kind {
                ActionKind::Increment => self.revision_count += 1,
                ActionKind::Decrement => {
                    self.revision_count = self.revision_count.saturating_sub(1);
                }
                ActionKind::Toggle => {}
            }
        } else if let Some(slot) = self.flags.get_mut(&field) {
            *slot = !*slot;
        }

        self.updated_at = now;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

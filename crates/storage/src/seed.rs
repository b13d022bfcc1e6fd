//! Idempotent curriculum seeding.
//!
//! Runs once at process startup (or via the `seed` binary). Duplicate
//! suppression happens at the repository level, keyed by (subject, title),
//! so concurrent or repeated runs converge on the same rows instead of
//! racing on an application-level "initialized" flag.

use chrono::{DateTime, Utc};

use tracker_core::curriculum;
use tracker_core::model::Subject;

use crate::repository::{NewChapterRecord, Storage, StorageError};

/// What a seeding pass actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub chapters_inserted: usize,
    pub chapters_existing: usize,
    pub subjects: usize,
}

/// Inserts every missing curriculum chapter and ensures one book record
/// per subject. Safe to call any number of times.
///
/// # Errors
///
/// Returns `StorageError` if any insert or lookup fails.
pub async fn seed_curriculum(
    storage: &Storage,
    now: DateTime<Utc>,
) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    for entry in curriculum::entries() {
        let inserted = storage
            .chapters
            .insert_chapter_if_absent(NewChapterRecord {
                subject: entry.subject,
                category: entry.category,
                ordinal: entry.ordinal,
                title: entry.title.to_string(),
                created_at: now,
            })
            .await?;
        if inserted.is_some() {
            report.chapters_inserted += 1;
        } else {
            report.chapters_existing += 1;
        }
    }

    for subject in Subject::ALL {
        storage.books.ensure_books(subject, now).await?;
        report.subjects += 1;
    }

    Ok(report)
}

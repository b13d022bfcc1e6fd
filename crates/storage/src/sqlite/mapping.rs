use std::collections::BTreeMap;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use tracker_core::model::{Category, Chapter, ChapterId, Subject, SubjectBooks};
use tracker_core::registry::{self, ActionField, BookField};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn chapter_id_from_i64(v: i64) -> Result<ChapterId, StorageError> {
    let id = u64::try_from(v)
        .map_err(|_| StorageError::Serialization("chapter id sign overflow".into()))?;
    Ok(ChapterId::new(id))
}

pub(crate) fn chapter_id_to_i64(id: ChapterId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("chapter id overflow".into()))
}

/// Value to persist for a boolean action column.
///
/// Non-applicable fields are stored as 0 so the row stays fully written in
/// one statement regardless of subject.
pub(crate) fn flag_to_i64(chapter: &Chapter, field: ActionField) -> i64 {
    i64::from(chapter.flag(field).unwrap_or(false))
}

pub(crate) fn book_to_i64(books: &SubjectBooks, book: BookField) -> i64 {
    i64::from(books.completed(book).unwrap_or(false))
}

pub(crate) fn map_chapter_row(row: &SqliteRow) -> Result<Chapter, StorageError> {
    let subject: Subject = row
        .try_get::<String, _>("subject")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let category: Category = row
        .try_get::<String, _>("category")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    // Only the registry-declared columns for this subject are read back;
    // the rest stay at their default 0 and never reach the domain record.
    let mut flags = BTreeMap::new();
    for field in registry::actions(subject) {
        if field.is_flag() {
            let value: i64 = row.try_get(field.name()).map_err(ser)?;
            flags.insert(field, value != 0);
        }
    }

    let ordinal_i64: i64 = row.try_get("ordinal").map_err(ser)?;
    let ordinal = u32::try_from(ordinal_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid ordinal: {ordinal_i64}")))?;

    let revision_i64: i64 = row.try_get("revision_count").map_err(ser)?;
    let revision_count = u32::try_from(revision_i64).map_err(|_| {
        StorageError::Serialization(format!("invalid revision_count: {revision_i64}"))
    })?;

    Chapter::from_persisted(
        chapter_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        subject,
        category,
        ordinal,
        row.try_get::<String, _>("title").map_err(ser)?,
        flags,
        revision_count,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_books_row(row: &SqliteRow) -> Result<SubjectBooks, StorageError> {
    let subject: Subject = row
        .try_get::<String, _>("subject")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    let mut flags = BTreeMap::new();
    for book in registry::subject_books(subject) {
        let value: i64 = row.try_get(book.name()).map_err(ser)?;
        flags.insert(*book, value != 0);
    }

    SubjectBooks::from_persisted(subject, flags, row.try_get("created_at").map_err(ser)?)
        .map_err(ser)
}

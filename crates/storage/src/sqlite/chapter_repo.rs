use tracker_core::model::{Chapter, ChapterId, Subject};
use tracker_core::registry::ActionField;

use super::SqliteRepository;
use super::mapping::{chapter_id_from_i64, chapter_id_to_i64, flag_to_i64, map_chapter_row};
use crate::repository::{ChapterRepository, NewChapterRecord, StorageError};

#[async_trait::async_trait]
impl ChapterRepository for SqliteRepository {
    async fn insert_chapter_if_absent(
        &self,
        chapter: NewChapterRecord,
    ) -> Result<Option<ChapterId>, StorageError> {
        let ordinal = i64::from(chapter.ordinal);

        let res = sqlx::query(
            r"
            INSERT INTO chapters (subject, category, ordinal, title, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(subject, title) DO NOTHING
            ",
        )
        .bind(chapter.subject.as_str())
        .bind(chapter.category.as_str())
        .bind(ordinal)
        .bind(chapter.title.trim())
        .bind(chapter.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Ok(None);
        }
        chapter_id_from_i64(res.last_insert_rowid()).map(Some)
    }

    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, subject, category, ordinal, title,
                   theory, pyqs, module_a, module_b, revision_count,
                   physics_galaxy, cengage, created_at, updated_at
            FROM chapters WHERE id = ?1
            ",
        )
        .bind(chapter_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_chapter_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_by_subject(&self, subject: Subject) -> Result<Vec<Chapter>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, subject, category, ordinal, title,
                   theory, pyqs, module_a, module_b, revision_count,
                   physics_galaxy, cengage, created_at, updated_at
            FROM chapters
            WHERE subject = ?1
            ORDER BY category ASC, ordinal ASC
            ",
        )
        .bind(subject.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut chapters = Vec::with_capacity(rows.len());
        for row in rows {
            chapters.push(map_chapter_row(&row)?);
        }
        Ok(chapters)
    }

    async fn update_chapter(&self, chapter: &Chapter) -> Result<(), StorageError> {
        // One statement writes the whole action state, so a concurrent
        // reader never observes a partially updated row.
        let res = sqlx::query(
            r"
            UPDATE chapters SET
                theory = ?2,
                pyqs = ?3,
                module_a = ?4,
                module_b = ?5,
                revision_count = ?6,
                physics_galaxy = ?7,
                cengage = ?8,
                updated_at = ?9
            WHERE id = ?1
            ",
        )
        .bind(chapter_id_to_i64(chapter.id())?)
        .bind(flag_to_i64(chapter, ActionField::Theory))
        .bind(flag_to_i64(chapter, ActionField::Pyqs))
        .bind(flag_to_i64(chapter, ActionField::ModuleA))
        .bind(flag_to_i64(chapter, ActionField::ModuleB))
        .bind(i64::from(chapter.revision_count()))
        .bind(flag_to_i64(chapter, ActionField::PhysicsGalaxy))
        .bind(flag_to_i64(chapter, ActionField::Cengage))
        .bind(chapter.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

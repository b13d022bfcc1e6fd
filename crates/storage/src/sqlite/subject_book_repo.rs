use chrono::{DateTime, Utc};
use tracker_core::model::{Subject, SubjectBooks};
use tracker_core::registry::BookField;

use super::SqliteRepository;
use super::mapping::{book_to_i64, map_books_row};
use crate::repository::{StorageError, SubjectBookRepository};

#[async_trait::async_trait]
impl SubjectBookRepository for SqliteRepository {
    async fn ensure_books(
        &self,
        subject: Subject,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO subject_books (subject, created_at)
            VALUES (?1, ?2)
            ON CONFLICT(subject) DO NOTHING
            ",
        )
        .bind(subject.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn get_books(&self, subject: Subject) -> Result<Option<SubjectBooks>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT subject, pinkbook, yellowbook, play_with_graphs,
                   n_awasthi, ms_chauhan, created_at
            FROM subject_books WHERE subject = ?1
            ",
        )
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_books_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn update_books(&self, books: &SubjectBooks) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE subject_books SET
                pinkbook = ?2,
                yellowbook = ?3,
                play_with_graphs = ?4,
                n_awasthi = ?5,
                ms_chauhan = ?6
            WHERE subject = ?1
            ",
        )
        .bind(books.subject().as_str())
        .bind(book_to_i64(books, BookField::Pinkbook))
        .bind(book_to_i64(books, BookField::Yellowbook))
        .bind(book_to_i64(books, BookField::PlayWithGraphs))
        .bind(book_to_i64(books, BookField::NAwasthi))
        .bind(book_to_i64(books, BookField::MsChauhan))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

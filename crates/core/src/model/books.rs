use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::subject::Subject;
use crate::registry::{self, BookField};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookError {
    #[error("book {book} does not apply to {subject}")]
    BookNotApplicable { book: &'static str, subject: Subject },
}

/// Subject-level supplementary book completion, one record per subject.
///
/// Book flags are tracked and reported independently and never enter
/// chapter, category, or subject percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBooks {
    subject: Subject,
    flags: BTreeMap<BookField, bool>,
    created_at: DateTime<Utc>,
}

impl SubjectBooks {
    /// Creates the record for a subject with every book unfinished.
    ///
    /// Subjects with no registered books get an empty record.
    #[must_use]
    pub fn new(subject: Subject, created_at: DateTime<Utc>) -> Self {
        let flags = registry::subject_books(subject)
            .iter()
            .map(|b| (*b, false))
            .collect();
        Self {
            subject,
            flags,
            created_at,
        }
    }

    /// Rebuilds a record from persisted state.
    ///
    /// # Errors
    ///
    /// Returns `BookError::BookNotApplicable` for flags of books the subject
    /// does not have.
    pub fn from_persisted(
        subject: Subject,
        flags: BTreeMap<BookField, bool>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BookError> {
        let mut books = SubjectBooks::new(subject, created_at);
        for (book, value) in flags {
            match books.flags.get_mut(&book) {
                Some(slot) => *slot = value,
                None => {
                    return Err(BookError::BookNotApplicable {
                        book: book.name(),
                        subject,
                    });
                }
            }
        }
        Ok(books)
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completion flag for a book, `None` if the subject does not have it.
    #[must_use]
    pub fn completed(&self, book: BookField) -> Option<bool> {
        self.flags.get(&book).copied()
    }

    /// All book flags in registry order.
    #[must_use]
    pub fn books(&self) -> Vec<(BookField, bool)> {
        registry::subject_books(self.subject)
            .iter()
            .map(|b| (*b, self.flags.get(b).copied().unwrap_or(false)))
            .collect()
    }

    /// Flips a book flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `BookError::BookNotApplicable` if the subject does not have
    /// the book.
    pub fn toggle(&mut self, book: BookField) -> Result<bool, BookError> {
        match self.flags.get_mut(&book) {
            Some(slot) => {
                *slot = !*slot;
                Ok(*slot)
            }
            None => Err(BookError::BookNotApplicable {
                book: book.name(),
                subject: self.subject,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn new_record_has_all_books_unfinished() {
        let books = SubjectBooks::new(Subject::Mathematics, fixed_now());
        assert_eq!(books.completed(BookField::Pinkbook), Some(false));
        assert_eq!(books.completed(BookField::Yellowbook), Some(false));
        assert_eq!(books.completed(BookField::PlayWithGraphs), Some(false));
        assert_eq!(books.completed(BookField::NAwasthi), None);
    }

    #[test]
    fn physics_has_no_books() {
        let books = SubjectBooks::new(Subject::Physics, fixed_now());
        assert!(books.books().is_empty());
    }

    #[test]
    fn toggle_flips_and_reports_new_value() {
        let mut books = SubjectBooks::new(Subject::Chemistry, fixed_now());
        assert_eq!(books.toggle(BookField::NAwasthi), Ok(true));
        assert_eq!(books.toggle(BookField::NAwasthi), Ok(false));
    }

    #[test]
    fn toggle_rejects_foreign_book() {
        let mut books = SubjectBooks::new(Subject::Physics, fixed_now());
        let err = books.toggle(BookField::Pinkbook).unwrap_err();
        assert_eq!(
            err,
            BookError::BookNotApplicable {
                book: "pinkbook",
                subject: Subject::Physics,
            }
        );
    }

    #[test]
    fn from_persisted_rejects_foreign_book() {
        let mut flags = BTreeMap::new();
        flags.insert(BookField::MsChauhan, true);
        let err = SubjectBooks::from_persisted(Subject::Mathematics, flags, fixed_now())
            .unwrap_err();
        assert!(matches!(err, BookError::BookNotApplicable { .. }));
    }

    #[test]
    fn from_persisted_keeps_set_flags() {
        let mut flags = BTreeMap::new();
        flags.insert(BookField::Yellowbook, true);
        let books =
            SubjectBooks::from_persisted(Subject::Mathematics, flags, fixed_now()).unwrap();
        assert_eq!(books.completed(BookField::Yellowbook), Some(true));
        assert_eq!(books.completed(BookField::Pinkbook), Some(false));
    }
}

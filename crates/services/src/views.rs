//! Presentation-agnostic response shapes for the external API layer.
//!
//! These serialize to the wire contract directly; HTTP status codes and the
//! `ok` envelope are the transport collaborator's concern.

use serde::Serialize;
use std::collections::BTreeMap;

use tracker_core::model::{Category, Chapter, ChapterId, Subject, SubjectBooks};

/// Per-subject line of the subjects overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectOverview {
    pub subject: Subject,
    pub total: usize,
    pub percent: u8,
}

/// One chapter with its raw action state and derived progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterView {
    pub id: ChapterId,
    pub title: String,
    pub ordinal: u32,
    pub actions: BTreeMap<&'static str, bool>,
    pub revision_count: u32,
    pub progress: u32,
    pub max_progress: u32,
    pub percent: u8,
}

impl ChapterView {
    #[must_use]
    pub fn from_chapter(chapter: &Chapter) -> Self {
        let actions = tracker_core::registry::actions(chapter.subject())
            .into_iter()
            .filter_map(|field| chapter.flag(field).map(|value| (field.name(), value)))
            .collect();
        Self {
            id: chapter.id(),
            title: chapter.title().to_owned(),
            ordinal: chapter.ordinal(),
            actions,
            revision_count: chapter.revision_count(),
            progress: chapter.progress_score(),
            max_progress: chapter.max_progress(),
            percent: chapter.completion_percent(),
        }
    }
}

/// Chapters of one category, in ordinal order, with the category percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub percent: u8,
    pub chapters: Vec<ChapterView>,
}

/// A subject-level book flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub name: &'static str,
    pub completed: bool,
}

impl BookView {
    #[must_use]
    pub fn from_books(books: &SubjectBooks) -> Vec<Self> {
        books
            .books()
            .into_iter()
            .map(|(book, completed)| Self {
                name: book.name(),
                completed,
            })
            .collect()
    }
}

/// Full subject page: grouped chapters, per-category percents, book flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub total: usize,
    pub percent: u8,
    pub marked: u32,
    pub max_possible: u32,
    pub categories: Vec<CategoryGroup>,
    pub books: Vec<BookView>,
}

/// Recomputed aggregates returned by a chapter-scoped mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterAggregates {
    pub subject_percent: u8,
    pub category_percent: u8,
    pub chapter_progress: u32,
    pub chapter_max: u32,
    pub revision_count: u32,
}

/// Successful mutation result.
///
/// Book-scoped mutations acknowledge only: book flags are deliberately
/// excluded from every percent computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MutationOutcome {
    Chapter(ChapterAggregates),
    Book {
        subject: Subject,
        field: &'static str,
        completed: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::model::{ActionKind, Chapter, ChapterId};
    use tracker_core::registry::ActionField;
    use tracker_core::time::fixed_now;

    #[test]
    fn chapter_view_lists_only_applicable_actions() {
        let chapter = Chapter::new(
            ChapterId::new(1),
            Subject::Chemistry,
            Category::One,
            1,
            "Mole Concept",
            fixed_now(),
        )
        .unwrap();
        let view = ChapterView::from_chapter(&chapter);
        assert_eq!(view.actions.len(), 4);
        assert!(!view.actions.contains_key("physics_galaxy"));
        assert!(!view.actions.contains_key("cengage"));
        assert!(!view.actions.contains_key("revision_count"));
        assert_eq!(view.max_progress, 5);
    }

    #[test]
    fn chapter_aggregates_serialize_to_wire_names() {
        let outcome = MutationOutcome::Chapter(ChapterAggregates {
            subject_percent: 40,
            category_percent: 50,
            chapter_progress: 2,
            chapter_max: 6,
            revision_count: 1,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["subject_percent"], 40);
        assert_eq!(json["category_percent"], 50);
        assert_eq!(json["chapter_progress"], 2);
        assert_eq!(json["chapter_max"], 6);
        assert_eq!(json["revision_count"], 1);
    }

    #[test]
    fn subject_serializes_as_display_name() {
        let overview = SubjectOverview {
            subject: Subject::Mathematics,
            total: 27,
            percent: 0,
        };
        let json = serde_json::to_value(&overview).unwrap();
        assert_eq!(json["subject"], "Mathematics");
    }

    #[test]
    fn chapter_view_tracks_progress() {
        let mut chapter = Chapter::new(
            ChapterId::new(2),
            Subject::Physics,
            Category::Two,
            1,
            "Ray Optics",
            fixed_now(),
        )
        .unwrap();
        chapter
            .apply_action(ActionField::Theory, ActionKind::Toggle, fixed_now())
            .unwrap();
        let view = ChapterView::from_chapter(&chapter);
        assert_eq!(view.progress, 1);
        assert_eq!(view.percent, 17);
        assert!(view.actions["theory"]);
    }
}

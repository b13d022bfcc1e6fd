//! Static registry of the actions and books each subject exposes.
//!
//! Both scoring and mutation validation go through this module; no other
//! component hard-codes action names. Adding a subject or an action is a
//! registry-only change.

use crate::model::Subject;

/// A single completable unit of study work on a chapter.
///
/// All fields except `RevisionCount` are boolean flags. `RevisionCount`
/// is a non-negative counter that scores as "done" once it is above zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionField {
    Theory,
    Pyqs,
    ModuleA,
    ModuleB,
    RevisionCount,
    PhysicsGalaxy,
    Cengage,
}

impl ActionField {
    /// Wire/storage name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ActionField::Theory => "theory",
            ActionField::Pyqs => "pyqs",
            ActionField::ModuleA => "module_a",
            ActionField::ModuleB => "module_b",
            ActionField::RevisionCount => "revision_count",
            ActionField::PhysicsGalaxy => "physics_galaxy",
            ActionField::Cengage => "cengage",
        }
    }

    /// Parses a wire/storage name back into a field.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "theory" => Some(ActionField::Theory),
            "pyqs" => Some(ActionField::Pyqs),
            "module_a" => Some(ActionField::ModuleA),
            "module_b" => Some(ActionField::ModuleB),
            "revision_count" => Some(ActionField::RevisionCount),
            "physics_galaxy" => Some(ActionField::PhysicsGalaxy),
            "cengage" => Some(ActionField::Cengage),
            _ => None,
        }
    }

    /// True for fields that store a boolean flag rather than a counter.
    #[must_use]
    pub fn is_flag(self) -> bool {
        !matches!(self, ActionField::RevisionCount)
    }
}

/// A subject-level supplementary book, tracked outside chapter percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookField {
    Pinkbook,
    Yellowbook,
    PlayWithGraphs,
    NAwasthi,
    MsChauhan,
}

impl BookField {
    /// Wire/storage name of the book flag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BookField::Pinkbook => "pinkbook",
            BookField::Yellowbook => "yellowbook",
            BookField::PlayWithGraphs => "play_with_graphs",
            BookField::NAwasthi => "n_awasthi",
            BookField::MsChauhan => "ms_chauhan",
        }
    }

    /// Parses a wire/storage name back into a book flag.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pinkbook" => Some(BookField::Pinkbook),
            "yellowbook" => Some(BookField::Yellowbook),
            "play_with_graphs" => Some(BookField::PlayWithGraphs),
            "n_awasthi" => Some(BookField::NAwasthi),
            "ms_chauhan" => Some(BookField::MsChauhan),
            _ => None,
        }
    }
}

const COMMON_ACTIONS: [ActionField; 5] = [
    ActionField::Theory,
    ActionField::Pyqs,
    ActionField::ModuleA,
    ActionField::ModuleB,
    ActionField::RevisionCount,
];

/// Actions shared by every subject, in declared order.
#[must_use]
pub fn common_actions() -> &'static [ActionField] {
    &COMMON_ACTIONS
}

/// Subject-specific actions, possibly empty.
#[must_use]
pub fn subject_actions(subject: Subject) -> &'static [ActionField] {
    match subject {
        Subject::Physics => &[ActionField::PhysicsGalaxy],
        Subject::Mathematics => &[ActionField::Cengage],
        Subject::Chemistry => &[],
    }
}

/// The full ordered action list for a subject: common, then specific.
#[must_use]
pub fn actions(subject: Subject) -> Vec<ActionField> {
    let mut all = COMMON_ACTIONS.to_vec();
    all.extend_from_slice(subject_actions(subject));
    all
}

/// Whether `field` is a legal action for chapters of `subject`.
#[must_use]
pub fn applies_to(subject: Subject, field: ActionField) -> bool {
    COMMON_ACTIONS.contains(&field) || subject_actions(subject).contains(&field)
}

/// Maximum achievable progress score for a chapter of `subject`.
///
/// Each boolean action contributes 1, and the revision counter contributes
/// 1 once it has been incremented at least once.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn max_progress(subject: Subject) -> u32 {
    (COMMON_ACTIONS.len() + subject_actions(subject).len()) as u32
}

/// Supplementary books tracked for a subject, possibly empty.
#[must_use]
pub fn subject_books(subject: Subject) -> &'static [BookField] {
    match subject {
        Subject::Physics => &[],
        Subject::Mathematics => &[
            BookField::Pinkbook,
            BookField::Yellowbook,
            BookField::PlayWithGraphs,
        ],
        Subject::Chemistry => &[BookField::NAwasthi, BookField::MsChauhan],
    }
}

/// Whether `book` is a legal book flag for `subject`.
#[must_use]
pub fn book_applies_to(subject: Subject, book: BookField) -> bool {
    subject_books(subject).contains(&book)
}

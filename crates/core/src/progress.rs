//! Pure aggregation over collections of chapters.
//!
//! Percentages are weighted: they are computed from summed raw scores, not
//! from the mean of per-chapter percentages, so groups mixing chapters with
//! different maximum scores are not distorted.

use serde::Serialize;

use crate::model::{Category, Chapter};

/// Integer percentage of `marked / max`, rounded half-up.
///
/// Half-up is the documented rounding rule for every displayed percentage:
/// exactly `.5` rounds away from zero (e.g. 1/8 -> 12.5 -> 13). Returns 0
/// when `max` is 0 rather than dividing by zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn percent(marked: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let rounded = (u64::from(marked) * 200 + u64::from(max)) / (u64::from(max) * 2);
    rounded.min(100) as u8
}

/// Groups items by a key, preserving first-seen key order.
pub fn group_by<'a, T, K, F>(items: &'a [T], key_fn: F) -> Vec<(K, Vec<&'a T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    for item in items {
        let key = key_fn(item);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups
}

/// Weighted completion percentage over a collection of chapters.
///
/// `round(100 * sum(progress_score) / sum(max_progress))`, 0 for an empty
/// collection.
#[must_use]
pub fn aggregate_percent(chapters: &[Chapter]) -> u8 {
    let marked: u32 = chapters.iter().map(Chapter::progress_score).sum();
    let max: u32 = chapters.iter().map(Chapter::max_progress).sum();
    percent(marked, max)
}

/// Subject-level rollup of chapter progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubjectSummary {
    pub total: usize,
    pub percent: u8,
    pub marked: u32,
    pub max_possible: u32,
}

/// Builds the subject rollup from all chapters of one subject.
#[must_use]
pub fn subject_summary(chapters: &[Chapter]) -> SubjectSummary {
    let marked: u32 = chapters.iter().map(Chapter::progress_score).sum();
    let max_possible: u32 = chapters.iter().map(Chapter::max_progress).sum();
    SubjectSummary {
        total: chapters.len(),
        percent: percent(marked, max_possible),
        marked,
        max_possible,
    }
}

/// Per-category weighted percentages, in first-seen category order.
#[must_use]
pub fn category_summaries(chapters: &[Chapter]) -> Vec<(Category, u8)> {
    group_by(chapters, |c| c.category())
        .into_iter()
        .map(|(category, members)| {
            let marked: u32 = members.iter().map(|c| c.progress_score()).sum();
            let max: u32 = members.iter().map(|c| c.max_progress()).sum();
            (category, percent(marked, max))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionKind, ChapterId, Subject};
    use crate::registry::{self, ActionField};
    use crate::time::fixed_now;

    fn chapter(id: u64, subject: Subject, category: Category, score: u32) -> Chapter {
        let mut chapter = Chapter::new(
            ChapterId::new(id),
            subject,
            category,
            id as u32,
            format!("Chapter {id}"),
            fixed_now(),
        )
        .unwrap();
        let fields: Vec<_> = registry::actions(subject)
            .into_iter()
            .filter(|f| f.is_flag())
            .collect();
        assert!(score as usize <= fields.len() + 1, "score too high for subject");
        for field in fields.into_iter().take(score as usize) {
            chapter
                .apply_action(field, ActionKind::Toggle, fixed_now())
                .unwrap();
        }
        if score as usize > chapter.progress_score() as usize {
            chapter
                .apply_action(ActionField::RevisionCount, ActionKind::Increment, fixed_now())
                .unwrap();
        }
        assert_eq!(chapter.progress_score(), score);
        chapter
    }

    #[test]
    fn percent_rounds_half_up() {
        // 1/8 = 12.5 -> 13
        assert_eq!(percent(1, 8), 13);
        // 1/6 = 16.67 -> 17
        assert_eq!(percent(1, 6), 17);
        // 1/3 = 33.33 -> 33
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(0, 6), 0);
        assert_eq!(percent(6, 6), 100);
    }

    #[test]
    fn percent_guards_zero_max() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(3, 0), 0);
    }

    #[test]
    fn group_by_preserves_first_seen_order() {
        let items = ["b", "a", "b", "c", "a"];
        let groups = group_by(&items, |s| *s);
        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn aggregate_is_weighted_not_mean_of_percentages() {
        // Physics max 6 at full marks, Chemistry max 5 at zero.
        // Weighted: round(6/11 * 100) = 55. Mean of percentages would be 50.
        let chapters = vec![
            chapter(1, Subject::Physics, Category::One, 6),
            chapter(2, Subject::Chemistry, Category::One, 0),
        ];
        assert_eq!(aggregate_percent(&chapters), 55);
    }

    #[test]
    fn category_example_from_two_chapters() {
        // scores (3, 6) over max (6, 6) -> round(9/12 * 100) = 75
        let chapters = vec![
            chapter(1, Subject::Physics, Category::Two, 3),
            chapter(2, Subject::Physics, Category::Two, 6),
        ];
        assert_eq!(aggregate_percent(&chapters), 75);
    }

    #[test]
    fn aggregate_of_empty_collection_is_zero() {
        assert_eq!(aggregate_percent(&[]), 0);
    }

    #[test]
    fn subject_summary_reports_raw_scores() {
        let chapters = vec![
            chapter(1, Subject::Mathematics, Category::One, 2),
            chapter(2, Subject::Mathematics, Category::Two, 4),
        ];
        let summary = subject_summary(&chapters);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.marked, 6);
        assert_eq!(summary.max_possible, 12);
        assert_eq!(summary.percent, 50);
    }

    #[test]
    fn category_summaries_follow_input_order() {
        let chapters = vec![
            chapter(1, Subject::Chemistry, Category::One, 5),
            chapter(2, Subject::Chemistry, Category::One, 0),
            chapter(3, Subject::Chemistry, Category::Two, 1),
        ];
        let summaries = category_summaries(&chapters);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0], (Category::One, 50));
        assert_eq!(summaries[1], (Category::Two, 20));
    }

    #[test]
    fn max_progress_constant_within_subject() {
        for subject in Subject::ALL {
            let a = chapter(1, subject, Category::One, 0);
            let b = chapter(2, subject, Category::Four, 0);
            assert_eq!(a.max_progress(), b.max_progress());
        }
    }
}

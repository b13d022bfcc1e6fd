use std::sync::Arc;

use tracker_core::model::Subject;
use tracker_core::progress;

use storage::repository::{ChapterRepository, SubjectBookRepository};

use crate::error::OverviewError;
use crate::views::{BookView, CategoryGroup, ChapterView, SubjectDetail, SubjectOverview};

/// Read-side queries the API layer serves: the subjects overview and the
/// per-subject page. Everything is recomputed from current records.
#[derive(Clone)]
pub struct OverviewService {
    chapters: Arc<dyn ChapterRepository>,
    books: Arc<dyn SubjectBookRepository>,
}

impl OverviewService {
    #[must_use]
    pub fn new(
        chapters: Arc<dyn ChapterRepository>,
        books: Arc<dyn SubjectBookRepository>,
    ) -> Self {
        Self { chapters, books }
    }

    /// Chapter count and weighted percent for every subject.
    ///
    /// # Errors
    ///
    /// Returns `OverviewError::Storage` if repository access fails.
    pub async fn subjects_overview(&self) -> Result<Vec<SubjectOverview>, OverviewError> {
        let mut overview = Vec::with_capacity(Subject::ALL.len());
        for subject in Subject::ALL {
            let chapters = self.chapters.list_by_subject(subject).await?;
            let summary = progress::subject_summary(&chapters);
            overview.push(SubjectOverview {
                subject,
                total: summary.total,
                percent: summary.percent,
            });
        }
        Ok(overview)
    }

    /// One subject's chapters grouped by category in declared order, with
    /// per-category percents, the subject rollup, and its book flags.
    ///
    /// # Errors
    ///
    /// Returns `OverviewError::Storage` if repository access fails.
    pub async fn subject_detail(&self, subject: Subject) -> Result<SubjectDetail, OverviewError> {
        let chapters = self.chapters.list_by_subject(subject).await?;
        let summary = progress::subject_summary(&chapters);

        let categories = progress::group_by(&chapters, |c| c.category())
            .into_iter()
            .map(|(category, members)| {
                let marked: u32 = members.iter().map(|c| c.progress_score()).sum();
                let max: u32 = members.iter().map(|c| c.max_progress()).sum();
                CategoryGroup {
                    category,
                    percent: progress::percent(marked, max),
                    chapters: members.iter().map(|c| ChapterView::from_chapter(c)).collect(),
                }
            })
            .collect();

        let books = self
            .books
            .get_books(subject)
            .await?
            .map(|b| BookView::from_books(&b))
            .unwrap_or_default();

        Ok(SubjectDetail {
            subject,
            total: summary.total,
            percent: summary.percent,
            marked: summary.marked,
            max_possible: summary.max_possible,
            categories,
            books,
        })
    }
}

#![forbid(unsafe_code)]

pub mod error;
pub mod mutation_service;
pub mod overview_service;
pub mod views;

pub use tracker_core::Clock;

pub use error::{MutationError, OverviewError};
pub use mutation_service::{MutationRequest, MutationService, MutationTarget};
pub use overview_service::OverviewService;
pub use views::{
    BookView, CategoryGroup, ChapterAggregates, ChapterView, MutationOutcome, SubjectDetail,
    SubjectOverview,
};

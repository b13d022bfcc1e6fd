mod books;
mod chapter;
mod ids;
mod subject;

pub use books::{BookError, SubjectBooks};
pub use chapter::{ActionKind, Chapter, ChapterError};
pub use ids::{ChapterId, ParseIdError};
pub use subject::{Category, Subject, UnknownCategory, UnknownSubject};

use tracker_core::model::{ActionKind, Category, Chapter, ChapterId, Subject};
use tracker_core::registry::{ActionField, BookField};
use tracker_core::time::fixed_now;

use storage::repository::{
    ChapterRepository, NewChapterRecord, StorageError, SubjectBookRepository,
};
use storage::sqlite::SqliteRepository;

fn record(subject: Subject, category: Category, ordinal: u32, title: &str) -> NewChapterRecord {
    NewChapterRecord {
        subject,
        category,
        ordinal,
        title: title.to_string(),
        created_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_roundtrip_persists_action_state() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = repo
        .insert_chapter_if_absent(record(Subject::Physics, Category::One, 1, "Gravitation"))
        .await
        .unwrap()
        .expect("inserted");

    let mut chapter = repo.get_chapter(id).await.unwrap().expect("fetched");
    assert_eq!(chapter.title(), "Gravitation");
    assert_eq!(chapter.progress_score(), 0);

    chapter
        .apply_action(ActionField::Theory, ActionKind::Toggle, fixed_now())
        .unwrap();
    chapter
        .apply_action(ActionField::PhysicsGalaxy, ActionKind::Toggle, fixed_now())
        .unwrap();
    chapter
        .apply_action(ActionField::RevisionCount, ActionKind::Increment, fixed_now())
        .unwrap();
    repo.update_chapter(&chapter).await.unwrap();

    let fetched = repo.get_chapter(id).await.unwrap().expect("fetched");
    assert_eq!(fetched.flag(ActionField::Theory), Some(true));
    assert_eq!(fetched.flag(ActionField::PhysicsGalaxy), Some(true));
    assert_eq!(fetched.revision_count(), 1);
    assert_eq!(fetched.progress_score(), 3);
    assert_eq!(fetched.max_progress(), 6);
}

#[tokio::test]
async fn sqlite_suppresses_duplicate_chapters() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_duplicates?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = repo
        .insert_chapter_if_absent(record(Subject::Chemistry, Category::Two, 1, "Amines"))
        .await
        .unwrap();
    assert!(first.is_some());

    let second = repo
        .insert_chapter_if_absent(record(Subject::Chemistry, Category::Two, 1, "Amines"))
        .await
        .unwrap();
    assert!(second.is_none());

    let listed = repo.list_by_subject(Subject::Chemistry).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn sqlite_lists_by_category_then_ordinal() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_listing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.insert_chapter_if_absent(record(Subject::Mathematics, Category::Two, 9, "Vector 3D"))
        .await
        .unwrap();
    repo.insert_chapter_if_absent(record(Subject::Mathematics, Category::One, 2, "Sequence And Series"))
        .await
        .unwrap();
    repo.insert_chapter_if_absent(record(
        Subject::Mathematics,
        Category::One,
        1,
        "Matrices And Determinants",
    ))
    .await
    .unwrap();

    let titles: Vec<String> = repo
        .list_by_subject(Subject::Mathematics)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title().to_string())
        .collect();
    assert_eq!(
        titles,
        vec!["Matrices And Determinants", "Sequence And Series", "Vector 3D"]
    );
}

#[tokio::test]
async fn sqlite_update_missing_chapter_is_not_found() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let phantom = Chapter::new(
        ChapterId::new(999),
        Subject::Physics,
        Category::One,
        1,
        "Phantom",
        fixed_now(),
    )
    .unwrap();
    let err = repo.update_chapter(&phantom).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_books_roundtrip_and_idempotent_ensure() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_books?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.ensure_books(Subject::Mathematics, fixed_now()).await.unwrap();

    let mut books = repo
        .get_books(Subject::Mathematics)
        .await
        .unwrap()
        .expect("present");
    assert_eq!(books.completed(BookField::Pinkbook), Some(false));

    books.toggle(BookField::Pinkbook).unwrap();
    repo.update_books(&books).await.unwrap();

    // Re-ensuring must not reset persisted flags.
    repo.ensure_books(Subject::Mathematics, fixed_now()).await.unwrap();
    let fetched = repo
        .get_books(Subject::Mathematics)
        .await
        .unwrap()
        .expect("present");
    assert_eq!(fetched.completed(BookField::Pinkbook), Some(true));

    // Physics has a record too, with no book flags applicable.
    repo.ensure_books(Subject::Physics, fixed_now()).await.unwrap();
    let physics = repo.get_books(Subject::Physics).await.unwrap().expect("present");
    assert!(physics.books().is_empty());
}

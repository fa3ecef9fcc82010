use super::*;

/// Tests mixing existing and new tag names.
///
/// Expected: Ok with one row per name, existing IDs reused, ordered by name
#[tokio::test]
async fn reuses_existing_and_creates_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_tag(db, "sketch").await?;

    let tags = TagRepository::new(db)
        .get_or_create_many(&["sketch".to_string(), "anime".to_string()])
        .await?;

    assert_eq!(
        tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["anime", "sketch"]
    );
    assert_eq!(tags[1].id, existing.id);

    Ok(())
}

/// Tests an empty name list.
///
/// Expected: Ok(empty) without touching the database
#[tokio::test]
async fn returns_empty_for_no_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tags = TagRepository::new(db).get_or_create_many(&[]).await?;

    assert!(tags.is_empty());

    Ok(())
}

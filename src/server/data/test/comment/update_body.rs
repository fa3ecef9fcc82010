use super::*;

/// Tests editing a comment.
///
/// Expected: Ok(Some) with new body and later updated_at
#[tokio::test]
async fn updates_body() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;
    let comment = factory::comment::CommentFactory::new(db, work.id, owner.id)
        .created_at(Utc::now() - Duration::minutes(5))
        .build()
        .await?;

    let updated = CommentRepository::new(db)
        .update_body(comment.id, "Edited".to_string())
        .await?
        .unwrap();

    assert_eq!(updated.body, "Edited");
    assert_eq!(updated.created_at, comment.created_at);
    assert!(updated.updated_at > comment.updated_at);

    Ok(())
}

/// Tests editing a missing comment.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CommentRepository::new(db)
        .update_body(uuid::Uuid::new_v4(), "Edited".to_string())
        .await?;

    assert!(result.is_none());

    Ok(())
}

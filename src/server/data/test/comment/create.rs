use super::*;

/// Tests creating and deleting a comment.
///
/// Expected: comment stored with equal timestamps, then removed
#[tokio::test]
async fn creates_and_deletes_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;

    let repo = CommentRepository::new(db);
    let comment = repo
        .create(work.id, owner.id, "Work in progress".to_string())
        .await?;

    assert_eq!(comment.body, "Work in progress");
    assert_eq!(comment.created_at, comment.updated_at);
    assert!(repo.find_by_id(comment.id).await?.is_some());

    assert!(repo.delete(comment.id).await?);
    assert!(repo.find_by_id(comment.id).await?.is_none());

    Ok(())
}

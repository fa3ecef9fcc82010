use super::*;

/// Tests creating a work.
///
/// Expected: Ok with matching fields and created_at == updated_at
#[tokio::test]
async fn creates_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = WorkRepository::new(db);
    let work = repo
        .create(CreateWorkParam {
            user_id: user.id,
            title: "Forest".to_string(),
            description: "Oil on canvas".to_string(),
            visibility: Visibility::Unlisted,
        })
        .await?;

    assert_eq!(work.user_id, user.id);
    assert_eq!(work.title, "Forest");
    assert_eq!(work.visibility, "unlisted");
    assert_eq!(work.created_at, work.updated_at);

    let found = repo.find_by_id(work.id).await?.unwrap();
    assert_eq!(found.id, work.id);

    Ok(())
}

/// Tests creating a work for a user that does not exist.
///
/// Expected: Err due to foreign key constraint
#[tokio::test]
async fn fails_for_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = WorkRepository::new(db)
        .create(CreateWorkParam {
            user_id: uuid::Uuid::new_v4(),
            title: "Orphan".to_string(),
            description: String::new(),
            visibility: Visibility::Public,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}

use super::*;

/// Tests replacing the editable fields of a work.
///
/// Expected: Ok(Some) with new values and a bumped updated_at
#[tokio::test]
async fn updates_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let work = factory::work::WorkFactory::new(db, user.id)
        .created_at(Utc::now() - Duration::days(1))
        .build()
        .await?;

    let updated = WorkRepository::new(db)
        .update(UpdateWorkParam {
            id: work.id,
            title: "Renamed".to_string(),
            description: "Now with text".to_string(),
            visibility: Visibility::Private,
        })
        .await?
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.visibility, "private");
    assert_eq!(updated.created_at, work.created_at);
    assert!(updated.updated_at > work.updated_at);

    Ok(())
}

/// Tests updating a missing work.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = WorkRepository::new(db)
        .update(UpdateWorkParam {
            id: uuid::Uuid::new_v4(),
            title: "Nothing".to_string(),
            description: String::new(),
            visibility: Visibility::Public,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests touching a work.
///
/// Expected: updated_at moves forward, other fields unchanged
#[tokio::test]
async fn touch_bumps_updated_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let work = factory::work::WorkFactory::new(db, user.id)
        .created_at(Utc::now() - Duration::hours(3))
        .build()
        .await?;

    let repo = WorkRepository::new(db);
    repo.touch(work.id).await?;

    let touched = repo.find_by_id(work.id).await?.unwrap();
    assert_eq!(touched.title, work.title);
    assert!(touched.updated_at > work.updated_at);

    Ok(())
}

use super::*;

/// Tests that only public works are listed, newest first.
///
/// Expected: Ok with the two public works in descending creation order
#[tokio::test]
async fn lists_public_works_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();

    let older = factory::work::WorkFactory::new(db, user.id)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::work::WorkFactory::new(db, user.id)
        .created_at(now - Duration::days(1))
        .build()
        .await?;
    factory::work::WorkFactory::new(db, user.id)
        .visibility("unlisted")
        .build()
        .await?;
    factory::work::WorkFactory::new(db, user.id)
        .visibility("private")
        .build()
        .await?;

    let (works, total) = WorkRepository::new(db)
        .get_public_paginated(None, 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert_eq!(
        works.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    Ok(())
}

/// Tests filtering by tag.
///
/// Expected: Ok with only the public work carrying the tag
#[tokio::test]
async fn filters_by_tag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tag = factory::create_tag(db, "pixel-art").await?;
    let other_tag = factory::create_tag(db, "3d").await?;

    let tagged = factory::create_work(db, user.id).await?;
    let untagged = factory::create_work(db, user.id).await?;
    let hidden = factory::work::WorkFactory::new(db, user.id)
        .visibility("private")
        .build()
        .await?;

    factory::tag_work(db, tagged.id, tag.id).await?;
    factory::tag_work(db, tagged.id, other_tag.id).await?;
    factory::tag_work(db, untagged.id, other_tag.id).await?;
    factory::tag_work(db, hidden.id, tag.id).await?;

    let (works, total) = WorkRepository::new(db)
        .get_public_paginated(Some(tag.id), 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(works[0].id, tagged.id);

    Ok(())
}

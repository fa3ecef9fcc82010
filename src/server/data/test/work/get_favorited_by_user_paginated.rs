use super::*;

/// Tests ordering of favorites.
///
/// Expected: Ok with the most recently favorited work first
#[tokio::test]
async fn orders_by_favorite_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let first = factory::create_work(db, owner.id).await?;
    let second = factory::create_work(db, owner.id).await?;
    let now = Utc::now();

    factory::favorite::create_favorite_at(db, fan.id, second.id, now - Duration::hours(2))
        .await?;
    factory::favorite::create_favorite_at(db, fan.id, first.id, now - Duration::hours(1))
        .await?;

    let (works, total) = WorkRepository::new(db)
        .get_favorited_by_user_paginated(fan.id, None, false, 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert_eq!(
        works.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    Ok(())
}

/// Tests visibility filtering for different viewers.
///
/// Expected: anonymous sees only public, the owner of a private work sees it too,
/// include_all sees everything
#[tokio::test]
async fn filters_by_viewer() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let public = factory::create_work(db, owner.id).await?;
    let private = factory::work::WorkFactory::new(db, owner.id)
        .visibility("private")
        .build()
        .await?;
    let unlisted = factory::work::WorkFactory::new(db, owner.id)
        .visibility("unlisted")
        .build()
        .await?;

    for work in [&public, &private, &unlisted] {
        factory::create_favorite(db, fan.id, work.id).await?;
    }

    let repo = WorkRepository::new(db);

    let (_, anonymous) = repo
        .get_favorited_by_user_paginated(fan.id, None, false, 0, 10)
        .await?;
    let (owner_view, owner_total) = repo
        .get_favorited_by_user_paginated(fan.id, Some(owner.id), false, 0, 10)
        .await?;
    let (_, admin_total) = repo
        .get_favorited_by_user_paginated(fan.id, None, true, 0, 10)
        .await?;

    assert_eq!(anonymous, 1);
    assert_eq!(owner_total, 3);
    assert!(owner_view.iter().any(|w| w.id == private.id));
    assert_eq!(admin_total, 3);

    Ok(())
}

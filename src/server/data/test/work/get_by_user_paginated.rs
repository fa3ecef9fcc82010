use super::*;

/// Tests listing every work of a user.
///
/// Expected: Ok with all three works when not restricted to public
#[tokio::test]
async fn lists_all_works_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    for visibility in ["public", "unlisted", "private"] {
        factory::work::WorkFactory::new(db, user.id)
            .visibility(visibility)
            .build()
            .await?;
    }
    factory::create_work(db, other.id).await?;

    let repo = WorkRepository::new(db);
    let (all, all_total) = repo.get_by_user_paginated(user.id, false, 0, 10).await?;
    let (public, public_total) = repo.get_by_user_paginated(user.id, true, 0, 10).await?;

    assert_eq!(all_total, 3);
    assert!(all.iter().all(|w| w.user_id == user.id));
    assert_eq!(public_total, 1);
    assert_eq!(public[0].visibility, "public");

    Ok(())
}

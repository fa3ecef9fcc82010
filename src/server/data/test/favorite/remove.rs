use super::*;

/// Tests removing an existing and a missing favorite.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn removes_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let fan = factory::create_user(db).await?;
    factory::create_favorite(db, fan.id, work.id).await?;

    let repo = FavoriteRepository::new(db);

    assert!(repo.remove(fan.id, work.id).await?);
    assert!(!repo.is_favorited(fan.id, work.id).await?);
    assert!(!repo.remove(fan.id, work.id).await?);

    Ok(())
}

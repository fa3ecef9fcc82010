use super::*;

/// Tests ordering of a work's assets.
///
/// Expected: Ok with assets sorted by position, excluding other works' assets
#[tokio::test]
async fn returns_assets_in_position_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;
    let other_work = factory::create_work(db, owner.id).await?;

    let third = factory::create_asset(db, work.id, 2).await?;
    let first = factory::create_asset(db, work.id, 0).await?;
    let second = factory::create_asset(db, work.id, 1).await?;
    factory::create_asset(db, other_work.id, 0).await?;

    let assets = AssetRepository::new(db).get_by_work(work.id).await?;

    assert_eq!(
        assets.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![first.id, second.id, third.id]
    );

    Ok(())
}

/// Tests removing one asset.
///
/// Expected: Ok(true) and the asset is gone
#[tokio::test]
async fn deletes_asset() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let asset = factory::create_asset(db, work.id, 0).await?;

    let repo = AssetRepository::new(db);

    assert!(repo.delete(asset.id).await?);
    assert!(repo.find_by_id(asset.id).await?.is_none());
    assert!(!repo.delete(asset.id).await?);

    Ok(())
}

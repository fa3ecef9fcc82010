use super::*;

/// Tests that adding a favorite twice keeps one row.
///
/// Expected: Ok both times, count of one
#[tokio::test]
async fn add_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let fan = factory::create_user(db).await?;

    let repo = FavoriteRepository::new(db);
    repo.add(fan.id, work.id).await?;
    repo.add(fan.id, work.id).await?;

    assert!(repo.is_favorited(fan.id, work.id).await?);
    assert_eq!(repo.count_by_works(&[work.id]).await?.get(&work.id), Some(&1));

    Ok(())
}

/// Tests counting favorites across works.
///
/// Expected: per-work counts, unfavorited works absent
#[tokio::test]
async fn counts_per_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, liked) = factory::helpers::create_work_with_owner(db).await?;
    let ignored = factory::create_work(db, owner.id).await?;

    for _ in 0..3 {
        let fan = factory::create_user(db).await?;
        factory::create_favorite(db, fan.id, liked.id).await?;
    }

    let counts = FavoriteRepository::new(db)
        .count_by_works(&[liked.id, ignored.id])
        .await?;

    assert_eq!(counts.get(&liked.id), Some(&3));
    assert!(!counts.contains_key(&ignored.id));

    Ok(())
}

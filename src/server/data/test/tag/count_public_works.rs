use super::*;

/// Tests counting only public works per tag.
///
/// Expected: private works are not counted; tags without public works are absent
#[tokio::test]
async fn counts_public_works_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let popular = factory::create_tag(db, "popular").await?;
    let secret = factory::create_tag(db, "secret").await?;

    let first = factory::create_work(db, user.id).await?;
    let second = factory::create_work(db, user.id).await?;
    let private = factory::work::WorkFactory::new(db, user.id)
        .visibility("private")
        .build()
        .await?;

    factory::tag_work(db, first.id, popular.id).await?;
    factory::tag_work(db, second.id, popular.id).await?;
    factory::tag_work(db, private.id, popular.id).await?;
    factory::tag_work(db, private.id, secret.id).await?;

    let counts = TagRepository::new(db)
        .count_public_works(&[popular.id, secret.id])
        .await?;

    assert_eq!(counts.get(&popular.id), Some(&2));
    assert!(!counts.contains_key(&secret.id));

    Ok(())
}

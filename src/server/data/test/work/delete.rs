use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that deleting a work cascades to its dependent rows.
///
/// Expected: Ok(true) and no assets, taggings, comments or favorites left
#[tokio::test]
async fn deletes_work_and_dependents() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;
    let fan = factory::create_user(db).await?;
    let tag = factory::create_tag(db, "ink").await?;

    factory::create_asset(db, work.id, 0).await?;
    factory::tag_work(db, work.id, tag.id).await?;
    factory::create_comment(db, work.id, fan.id).await?;
    factory::create_favorite(db, fan.id, work.id).await?;

    let repo = WorkRepository::new(db);
    assert!(repo.delete(work.id).await?);

    assert_eq!(entity::prelude::Asset::find().count(db).await?, 0);
    assert_eq!(entity::prelude::WorkTag::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Favorite::find().count(db).await?, 0);
    // Tags and users outlive the work
    assert_eq!(entity::prelude::Tag::find().count(db).await?, 1);
    assert!(entity::prelude::User::find_by_id(owner.id).one(db).await?.is_some());

    Ok(())
}

/// Tests deleting a missing work.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!WorkRepository::new(db).delete(uuid::Uuid::new_v4()).await?);

    Ok(())
}

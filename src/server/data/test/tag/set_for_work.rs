use super::*;

/// Tests replacing a work's taggings.
///
/// Expected: only the new tags remain on the work, other works untouched
#[tokio::test]
async fn replaces_taggings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;
    let other = factory::create_work(db, owner.id).await?;
    let old = factory::create_tag(db, "old").await?;
    let kept = factory::create_tag(db, "kept").await?;
    let added = factory::create_tag(db, "added").await?;

    factory::tag_work(db, work.id, old.id).await?;
    factory::tag_work(db, work.id, kept.id).await?;
    factory::tag_work(db, other.id, old.id).await?;

    let repo = TagRepository::new(db);
    repo.set_for_work(work.id, &[kept.id, added.id]).await?;

    assert_eq!(repo.get_names_for_work(work.id).await?, vec!["added", "kept"]);
    assert_eq!(repo.get_names_for_work(other.id).await?, vec!["old"]);

    repo.set_for_work(work.id, &[]).await?;
    assert!(repo.get_names_for_work(work.id).await?.is_empty());

    Ok(())
}

/// Tests fetching tag names for several works at once.
///
/// Expected: map entries only for tagged works
#[tokio::test]
async fn groups_names_by_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, first) = factory::helpers::create_work_with_owner(db).await?;
    let second = factory::create_work(db, owner.id).await?;
    let untagged = factory::create_work(db, owner.id).await?;
    let a = factory::create_tag(db, "a").await?;
    let b = factory::create_tag(db, "b").await?;

    factory::tag_work(db, first.id, b.id).await?;
    factory::tag_work(db, first.id, a.id).await?;
    factory::tag_work(db, second.id, b.id).await?;

    let names = TagRepository::new(db)
        .get_names_for_works(&[first.id, second.id, untagged.id])
        .await?;

    assert_eq!(names.get(&first.id), Some(&vec!["a".to_string(), "b".to_string()]));
    assert_eq!(names.get(&second.id), Some(&vec!["b".to_string()]));
    assert!(!names.contains_key(&untagged.id));

    Ok(())
}

/// Tests a replacement whose insert fails halfway.
///
/// Expected: Err, and the previous taggings are still in place
#[tokio::test]
async fn keeps_taggings_when_insert_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let old = factory::create_tag(db, "old").await?;
    let added = factory::create_tag(db, "added").await?;
    factory::tag_work(db, work.id, old.id).await?;

    let repo = TagRepository::new(db);
    // Duplicate ID violates the work_tag primary key after the old rows were deleted.
    let result = repo.set_for_work(work.id, &[added.id, added.id]).await;

    assert!(result.is_err());
    assert_eq!(repo.get_names_for_work(work.id).await?, vec!["old"]);

    Ok(())
}

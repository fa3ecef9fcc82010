use super::*;

/// Tests the prefix filter.
///
/// Expected: Ok with only tags starting with the prefix, ordered by name
#[tokio::test]
async fn filters_by_prefix() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["pixel-art", "painting", "pixel", "sculpture"] {
        factory::create_tag(db, name).await?;
    }

    let repo = TagRepository::new(db);
    let (tags, total) = repo.get_paginated(Some("pix"), 0, 10).await?;
    let (_, all_total) = repo.get_paginated(None, 0, 10).await?;

    assert_eq!(total, 2);
    assert_eq!(
        tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["pixel", "pixel-art"]
    );
    assert_eq!(all_total, 4);

    Ok(())
}

/// Tests a prefix containing `_`.
///
/// Expected: `_` matches only itself, not any single character
#[tokio::test]
async fn matches_underscore_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["ab", "a_x", "a-b"] {
        factory::create_tag(db, name).await?;
    }

    let repo = TagRepository::new(db);
    let (tags, total) = repo.get_paginated(Some("a_"), 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(tags[0].name, "a_x");

    let (tags, total) = repo.get_paginated(Some("%"), 0, 10).await?;
    assert_eq!(total, 0);
    assert!(tags.is_empty());

    Ok(())
}

use super::*;

/// Tests paging through users ordered by name.
///
/// Expected: Ok with users sorted by name and the total across pages
#[tokio::test]
async fn pages_users_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Charlie", "Alice", "Bob"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (second, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        first.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bob"]
    );
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "Charlie");

    Ok(())
}

/// Tests a page past the end.
///
/// Expected: Ok with no users but the full total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let (users, total) = UserRepository::new(db).get_all_paginated(5, 10).await?;

    assert!(users.is_empty());
    assert_eq!(total, 1);

    Ok(())
}

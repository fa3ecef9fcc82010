use super::*;

/// Tests creating a user that does not exist yet.
///
/// Expected: Ok with a new user carrying the given fields and admin=false
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            name: "Painter".to_string(),
            avatar_url: Some("https://cdn.example/a.png".to_string()),
            is_admin: None,
        })
        .await?;

    assert_eq!(user.discord_id, "123456789");
    assert_eq!(user.name, "Painter");
    assert!(!user.admin);

    let found = repo.find_by_id(user.id).await?;
    assert_eq!(found.map(|u| u.discord_id), Some("123456789".to_string()));

    Ok(())
}

/// Tests logging in again with changed profile data.
///
/// Expected: Ok with the same ID, updated name, and admin untouched
#[tokio::test]
async fn updates_existing_user_and_keeps_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .discord_id("42")
        .name("Old Name")
        .admin(true)
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 42,
            name: "New Name".to_string(),
            avatar_url: None,
            is_admin: None,
        })
        .await?;

    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.name, "New Name");
    assert!(updated.admin);
    assert!(updated.last_login_at >= existing.last_login_at);

    Ok(())
}

/// Tests that a login with the admin flag raises admin status.
///
/// Expected: Ok with admin=true on the existing row
#[tokio::test]
async fn raises_admin_when_requested() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .discord_id("7")
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 7,
            name: existing.name.clone(),
            avatar_url: None,
            is_admin: Some(true),
        })
        .await?;

    assert_eq!(updated.id, existing.id);
    assert!(updated.admin);
    assert!(UserRepository::new(db).admin_exists().await?);

    Ok(())
}

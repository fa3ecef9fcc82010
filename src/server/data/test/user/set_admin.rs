use super::*;

/// Tests revoking admin from an admin.
///
/// Expected: Ok(Some) with admin=false
#[tokio::test]
async fn revokes_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_admin(admin.id, false).await?.unwrap();

    assert!(!updated.admin);
    assert!(!repo.admin_exists().await?);

    Ok(())
}

/// Tests setting admin on an unknown user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .set_admin(uuid::Uuid::new_v4(), true)
        .await?;

    assert!(result.is_none());

    Ok(())
}

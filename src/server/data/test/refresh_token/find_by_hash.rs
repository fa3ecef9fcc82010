use super::*;

/// Tests finding a stored token by its hash.
///
/// Expected: Ok(Some) with the owning user
#[tokio::test]
async fn finds_token_by_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    let created = repo
        .create(user.id, "abc123".to_string(), Utc::now() + Duration::days(1))
        .await?;

    let found = repo.find_by_hash("abc123").await?.unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.user_id, user.id);
    assert!(repo.find_by_hash("other").await?.is_none());

    Ok(())
}

/// Tests that deleting the user removes their tokens.
///
/// Expected: Ok(None) after the user row is gone
#[tokio::test]
async fn cascades_on_user_delete() -> Result<(), DbErr> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::refresh_token::create_refresh_token_with(
        db,
        user.id,
        "hash",
        Utc::now() + Duration::days(1),
    )
    .await?;

    entity::prelude::User::delete_by_id(user.id).exec(db).await?;

    assert!(RefreshTokenRepository::new(db)
        .find_by_hash("hash")
        .await?
        .is_none());

    Ok(())
}

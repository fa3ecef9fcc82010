use super::*;

/// Tests that a token can only be deleted once.
///
/// Expected: first delete Ok(true), second Ok(false)
#[tokio::test]
async fn deletes_token_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let token = factory::create_refresh_token(db, user.id).await?;

    let repo = RefreshTokenRepository::new(db);

    assert!(repo.delete(token.id).await?);
    assert!(!repo.delete(token.id).await?);

    Ok(())
}

/// Tests deleting by hash for an unknown hash.
///
/// Expected: Ok(0)
#[tokio::test]
async fn delete_by_unknown_hash_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_refresh_token(db, user.id).await?;

    let deleted = RefreshTokenRepository::new(db)
        .delete_by_hash("missing")
        .await?;

    assert_eq!(deleted, 0);

    Ok(())
}

use super::*;

/// Tests purging tokens at a cutoff.
///
/// Verifies that tokens expiring exactly at the cutoff count as expired.
///
/// Expected: Ok(2) with only the future token left
#[tokio::test]
async fn deletes_tokens_expired_at_or_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();

    factory::refresh_token::create_refresh_token_with(db, user.id, "past", now - Duration::days(1))
        .await?;
    factory::refresh_token::create_refresh_token_with(db, user.id, "edge", now).await?;
    factory::refresh_token::create_refresh_token_with(db, user.id, "future", now + Duration::days(1))
        .await?;

    let repo = RefreshTokenRepository::new(db);
    let deleted = repo.delete_expired(now).await?;

    assert_eq!(deleted, 2);
    assert!(repo.find_by_hash("future").await?.is_some());
    assert!(repo.find_by_hash("edge").await?.is_none());

    Ok(())
}

use super::*;

/// Tests an anonymous request.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &jwt, &headers).optional().await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests a request with a valid token.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn returns_user_with_valid_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);

    let user = factory::create_user(db).await?;
    let headers = bearer(&jwt.issue(user.id).unwrap());

    let result = AuthGuard::new(db, &jwt, &headers).optional().await?;

    assert_eq!(result.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that a present but invalid token is not treated as anonymous.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_invalid_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);
    let headers = bearer("garbage");

    let result = AuthGuard::new(db, &jwt, &headers).optional().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

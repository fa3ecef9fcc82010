use super::*;

/// Tests a valid token for an existing user.
///
/// Expected: Ok(User) matching the token subject
#[tokio::test]
async fn grants_access_with_valid_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);

    let user = factory::user::UserFactory::new(db)
        .name("Artist")
        .build()
        .await?;
    let headers = bearer(&jwt.issue(user.id).unwrap());

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await?;

    assert_eq!(result.id, user.id);
    assert_eq!(result.name, "Artist");

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a non-bearer Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests an expired access token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);

    let user = factory::create_user(db).await?;
    let token = jwt
        .issue_at(user.id, Utc::now() - Duration::hours(2))
        .unwrap();
    let headers = bearer(&token);

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token whose user has been deleted.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);
    let missing = uuid::Uuid::new_v4();
    let headers = bearer(&jwt.issue(missing).unwrap());

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) => assert_eq!(id, missing),
        other => panic!("Expected UserNotInDatabase, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests the admin permission for an admin user.
///
/// Expected: Ok(User) with admin=true
#[tokio::test]
async fn grants_admin_permission_to_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);

    let admin = factory::user::create_admin(db).await?;
    let headers = bearer(&jwt.issue(admin.id).unwrap());

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert!(result.admin);

    Ok(())
}

/// Tests the admin permission for a regular user.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_permission_to_regular_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new(SECRET, 900);

    let user = factory::create_user(db).await?;
    let headers = bearer(&jwt.issue(user.id).unwrap());

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) => assert_eq!(id, user.id),
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

use super::*;

/// Tests recording an asset and the next position afterwards.
///
/// Expected: Ok with the given fields, next position one past it
#[tokio::test]
async fn creates_asset_and_advances_position() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let repo = AssetRepository::new(db);

    assert_eq!(repo.next_position(work.id).await?, 0);

    let id = Uuid::new_v4();
    let asset = repo
        .create(CreateAssetParam {
            id,
            work_id: work.id,
            kind: AssetKind::Video,
            storage_key: format!("works/{}/{}.mp4", work.id, id),
            file_name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            size: 2048,
            position: 0,
        })
        .await?;

    assert_eq!(asset.id, id);
    assert_eq!(asset.kind, "video");
    assert_eq!(asset.size, 2048);
    assert_eq!(repo.next_position(work.id).await?, 1);

    Ok(())
}

/// Tests that storage keys are unique.
///
/// Expected: Err on the second insert with the same key
#[tokio::test]
async fn rejects_duplicate_storage_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, work) = factory::helpers::create_work_with_owner(db).await?;
    let repo = AssetRepository::new(db);

    let param = |position| CreateAssetParam {
        id: Uuid::new_v4(),
        work_id: work.id,
        kind: AssetKind::Image,
        storage_key: "works/same.png".to_string(),
        file_name: "same.png".to_string(),
        content_type: "image/png".to_string(),
        size: 1,
        position,
    };

    repo.create(param(0)).await?;
    let result = repo.create(param(1)).await;

    assert!(result.is_err());

    Ok(())
}

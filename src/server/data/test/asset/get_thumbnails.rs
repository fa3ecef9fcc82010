use super::*;

/// Tests picking the first image of each work.
///
/// Expected: the lowest-position image per work; works without images are absent
#[tokio::test]
async fn picks_first_image_per_work() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, gallery) = factory::helpers::create_work_with_owner(db).await?;
    let audio_only = factory::create_work(db, owner.id).await?;

    factory::asset::AssetFactory::new(db, gallery.id)
        .kind("video")
        .content_type("video/mp4")
        .position(0)
        .build()
        .await?;
    let cover = factory::asset::AssetFactory::new(db, gallery.id)
        .position(1)
        .build()
        .await?;
    factory::asset::AssetFactory::new(db, gallery.id)
        .position(2)
        .build()
        .await?;
    factory::asset::AssetFactory::new(db, audio_only.id)
        .kind("audio")
        .content_type("audio/mpeg")
        .build()
        .await?;

    let thumbnails = AssetRepository::new(db)
        .get_thumbnails(&[gallery.id, audio_only.id])
        .await?;

    assert_eq!(thumbnails.len(), 1);
    assert_eq!(thumbnails.get(&gallery.id).map(|a| a.id), Some(cover.id));

    Ok(())
}

use super::*;

/// Tests paging comments oldest first with authors.
///
/// Expected: Ok with the requested page in ascending order and the total count
#[tokio::test]
async fn pages_comments_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_work_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, work) = factory::helpers::create_work_with_owner(db).await?;
    let other_work = factory::create_work(db, owner.id).await?;
    let now = Utc::now();

    let mut ids = Vec::new();
    for minutes in [30, 20, 10] {
        let comment = factory::comment::CommentFactory::new(db, work.id, owner.id)
            .created_at(now - Duration::minutes(minutes))
            .build()
            .await?;
        ids.push(comment.id);
    }
    factory::create_comment(db, other_work.id, owner.id).await?;

    let repo = CommentRepository::new(db);
    let (first_page, total) = repo.get_by_work_paginated(work.id, 0, 2).await?;
    let (second_page, _) = repo.get_by_work_paginated(work.id, 1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        first_page.iter().map(|(c, _)| c.id).collect::<Vec<_>>(),
        ids[..2].to_vec()
    );
    assert_eq!(second_page[0].0.id, ids[2]);
    assert_eq!(
        first_page[0].1.as_ref().map(|u| u.id),
        Some(owner.id)
    );

    let counts = repo.count_by_works(&[work.id, other_work.id]).await?;
    assert_eq!(counts.get(&work.id), Some(&3));
    assert_eq!(counts.get(&other_work.id), Some(&1));

    Ok(())
}

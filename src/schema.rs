//! Idempotent schema bootstrap. Creates whatever is missing; never alters or
//! drops existing tables.
//!
//! The pair indexes are required at runtime: edge activation upserts against
//! them. Rows duplicated on a pair must be merged before they can be built.

use crate::orm::{comment_likes, comments, followers, likes, posts, user_details, users};
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, user_details::Entity).await?;
    create_table(db, posts::Entity).await?;
    create_table(db, comments::Entity).await?;
    create_table(db, followers::Entity).await?;
    create_table(db, likes::Entity).await?;
    create_table(db, comment_likes::Entity).await?;
    log::info!("Tables are in place.");

    create_pair_indexes(db).await
}

/// Unique (owner, subject) indexes on the three edge tables.
pub async fn create_pair_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_index(
        db,
        Index::create()
            .name("idx_followers_pair")
            .table(followers::Entity)
            .col(followers::Column::UserId)
            .col(followers::Column::FollowingUserId)
            .unique()
            .if_not_exists()
            .to_owned(),
    )
    .await?;
    create_index(
        db,
        Index::create()
            .name("idx_likes_pair")
            .table(likes::Entity)
            .col(likes::Column::UserId)
            .col(likes::Column::PostId)
            .unique()
            .if_not_exists()
            .to_owned(),
    )
    .await?;
    create_index(
        db,
        Index::create()
            .name("idx_comment_likes_pair")
            .table(comment_likes::Entity)
            .col(comment_likes::Column::UserId)
            .col(comment_likes::Column::CommentId)
            .unique()
            .if_not_exists()
            .to_owned(),
    )
    .await?;

    log::info!("Edge pair indexes are in place.");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

async fn create_index(db: &DatabaseConnection, stmt: IndexCreateStatement) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

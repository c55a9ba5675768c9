use crate::error::Error;
use crate::orm::{comment_likes, comments, posts, user_details, users};
use chrono::prelude::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, TransactionTrait};

pub async fn create_comment(
    db: &DatabaseConnection,
    user_id: i32,
    post_id: i32,
    content: String,
) -> Result<comments::Model, Error> {
    validate_references(db, user_id, post_id).await?;

    let comment = comments::ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
        content: Set(content),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::debug!("comment {} created on post {}", comment.id, post_id);
    Ok(comment)
}

/// Only the comment's own author, on its own post, can change it.
pub async fn update_comment(
    db: &DatabaseConnection,
    comment_id: i32,
    user_id: i32,
    post_id: i32,
    content: String,
) -> Result<comments::Model, Error> {
    validate_references(db, user_id, post_id).await?;

    let res = comments::Entity::update_many()
        .col_expr(comments::Column::Content, Expr::value(content))
        .filter(comments::Column::Id.eq(comment_id))
        .filter(comments::Column::UserId.eq(user_id))
        .filter(comments::Column::PostId.eq(post_id))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        return Err(Error::not_found("No comment found for this user and post"));
    }

    comments::Entity::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("No comment found"))
}

/// Removes the comment and its likes in one transaction.
pub async fn delete_comment(db: &DatabaseConnection, comment_id: i32) -> Result<(), Error> {
    let txn = db.begin().await?;

    comment_likes::Entity::delete_many()
        .filter(comment_likes::Column::CommentId.eq(comment_id))
        .exec(&txn)
        .await?;
    comments::Entity::delete_by_id(comment_id).exec(&txn).await?;

    txn.commit().await?;
    log::debug!("comment {} deleted", comment_id);
    Ok(())
}

/// Comments whose author has a profile, newest first.
pub async fn list_comments_by_post(
    db: &DatabaseConnection,
    post_id: i32,
) -> Result<Vec<comments::Model>, Error> {
    Ok(comments::Entity::find()
        .inner_join(user_details::Entity)
        .filter(comments::Column::PostId.eq(post_id))
        .order_by_desc(comments::Column::CreatedAt)
        .order_by_desc(comments::Column::Id)
        .all(db)
        .await?)
}

// User first, then post.
async fn validate_references(db: &DatabaseConnection, user_id: i32, post_id: i32) -> Result<(), Error> {
    if users::Entity::find_by_id(user_id).one(db).await?.is_none() {
        return Err(Error::validation("User does not exist"));
    }
    if posts::Entity::find_by_id(post_id).one(db).await?.is_none() {
        return Err(Error::validation("Post does not exist"));
    }
    Ok(())
}

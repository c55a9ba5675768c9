use crate::error::Error;
use crate::orm::{comment_likes, comments, likes, posts, users};
use chrono::prelude::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    entity::*, query::*, ConnectionTrait, DatabaseConnection, TransactionTrait,
};

/// Fields a client supplies for a new or edited post.
pub struct NewPost {
    pub title: String,
    pub content: String,
}

pub async fn create_post(
    db: &DatabaseConnection,
    user_id: i32,
    post: NewPost,
) -> Result<posts::Model, Error> {
    if users::Entity::find_by_id(user_id).one(db).await?.is_none() {
        return Err(Error::validation("User does not exist"));
    }

    let post = posts::ActiveModel {
        title: Set(post.title),
        content: Set(post.content),
        user_id: Set(user_id),
        created_at: Set(Utc::now().naive_utc()),
        views: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::debug!("post {} created by user {}", post.id, user_id);
    Ok(post)
}

pub async fn update_post(
    db: &DatabaseConnection,
    post_id: i32,
    post: NewPost,
) -> Result<posts::Model, Error> {
    let res = posts::Entity::update_many()
        .col_expr(posts::Column::Title, Expr::value(post.title))
        .col_expr(posts::Column::Content, Expr::value(post.content))
        .filter(posts::Column::Id.eq(post_id))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        return Err(Error::not_found("No post found"));
    }

    get_post(db, post_id).await
}

/// Removes the post together with its likes, its comments and their likes.
/// Runs in one transaction; nothing is deleted unless everything is.
pub async fn delete_post(db: &DatabaseConnection, post_id: i32) -> Result<(), Error> {
    let txn = db.begin().await?;

    likes::Entity::delete_many()
        .filter(likes::Column::PostId.eq(post_id))
        .exec(&txn)
        .await?;
    comment_likes::Entity::delete_many()
        .filter(
            comment_likes::Column::CommentId.in_subquery(
                Query::select()
                    .column(comments::Column::Id)
                    .from(comments::Entity)
                    .and_where(comments::Column::PostId.eq(post_id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;
    comments::Entity::delete_many()
        .filter(comments::Column::PostId.eq(post_id))
        .exec(&txn)
        .await?;
    let res = posts::Entity::delete_by_id(post_id).exec(&txn).await?;

    txn.commit().await?;
    log::debug!("post {} deleted ({} rows)", post_id, res.rows_affected);
    Ok(())
}

/// Overwrites the view counter with an absolute value.
pub async fn set_views(db: &DatabaseConnection, post_id: i32, views: i32) -> Result<posts::Model, Error> {
    write_views(db, post_id, Expr::value(views)).await
}

/// Adds one view in a single statement, so concurrent viewers are all counted.
pub async fn increment_views(db: &DatabaseConnection, post_id: i32) -> Result<posts::Model, Error> {
    write_views(db, post_id, Expr::col(posts::Column::Views).add(1)).await
}

async fn write_views<C>(db: &C, post_id: i32, value: sea_orm::sea_query::SimpleExpr) -> Result<posts::Model, Error>
where
    C: ConnectionTrait,
{
    posts::Entity::update_many()
        .col_expr(posts::Column::Views, value)
        .filter(posts::Column::Id.eq(post_id))
        .exec(db)
        .await?;

    posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("No post found"))
}

pub async fn get_post(db: &DatabaseConnection, post_id: i32) -> Result<posts::Model, Error> {
    posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("No post found"))
}

/// Newest first.
pub async fn list_posts_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<posts::Model>, Error> {
    let posts = posts::Entity::find()
        .filter(posts::Column::UserId.eq(user_id))
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
        .all(db)
        .await?;

    if posts.is_empty() {
        return Err(Error::not_found("No posts found for this user"));
    }

    Ok(posts)
}

//! Likes on posts and on comments.

use crate::edge;
use crate::error::Error;
use crate::orm::{comment_likes, likes, users};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct PostLiker {
    pub username: String,
    pub user_id: i32,
    pub likes_id: i32,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct CommentLiker {
    pub username: String,
    pub user_id: i32,
    pub comment_likes_id: i32,
}

pub async fn like_post(db: &DatabaseConnection, user_id: i32, post_id: i32) -> Result<likes::Model, Error> {
    edge::activate::<likes::Entity>(db, user_id, post_id)
        .await
        .map_err(|e| Error::missing_reference(e, "User or post does not exist"))
}

pub async fn unlike_post(db: &DatabaseConnection, user_id: i32, post_id: i32) -> Result<(), Error> {
    edge::deactivate::<likes::Entity>(db, user_id, post_id).await?;
    Ok(())
}

/// Users with an active like on the post.
pub async fn list_post_likers(db: &DatabaseConnection, post_id: i32) -> Result<Vec<PostLiker>, Error> {
    Ok(likes::Entity::find()
        .select_only()
        .inner_join(users::Entity)
        .column_as(users::Column::Username, "username")
        .column_as(likes::Column::UserId, "user_id")
        .column_as(likes::Column::Id, "likes_id")
        .filter(likes::Column::PostId.eq(post_id))
        .filter(likes::Column::Active.eq(true))
        .order_by_asc(likes::Column::Id)
        .into_model::<PostLiker>()
        .all(db)
        .await?)
}

pub async fn like_comment(
    db: &DatabaseConnection,
    user_id: i32,
    comment_id: i32,
) -> Result<comment_likes::Model, Error> {
    edge::activate::<comment_likes::Entity>(db, user_id, comment_id)
        .await
        .map_err(|e| Error::missing_reference(e, "User or comment does not exist"))
}

pub async fn unlike_comment(db: &DatabaseConnection, user_id: i32, comment_id: i32) -> Result<(), Error> {
    edge::deactivate::<comment_likes::Entity>(db, user_id, comment_id).await?;
    Ok(())
}

/// Users with an active like on the comment.
pub async fn list_comment_likers(
    db: &DatabaseConnection,
    comment_id: i32,
) -> Result<Vec<CommentLiker>, Error> {
    Ok(comment_likes::Entity::find()
        .select_only()
        .inner_join(users::Entity)
        .column_as(users::Column::Username, "username")
        .column_as(comment_likes::Column::UserId, "user_id")
        .column_as(comment_likes::Column::Id, "comment_likes_id")
        .filter(comment_likes::Column::CommentId.eq(comment_id))
        .filter(comment_likes::Column::Active.eq(true))
        .order_by_asc(comment_likes::Column::Id)
        .into_model::<CommentLiker>()
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;
    use sea_orm::PaginatorTrait;

    #[actix_rt::test]
    async fn test_post_likers_follow_toggles() {
        let db = test_util::setup().await;
        let alice = test_util::insert_user(&db, "alice").await;
        let bob = test_util::insert_user(&db, "bob").await;
        let post = test_util::insert_post(&db, alice, "hello").await;

        let like = like_post(&db, alice, post).await.unwrap();
        like_post(&db, bob, post).await.unwrap();
        like_post(&db, bob, post).await.unwrap();
        assert_eq!(likes::Entity::find().count(&db).await.unwrap(), 2);

        let likers = list_post_likers(&db, post).await.unwrap();
        assert_eq!(likers.len(), 2);
        assert_eq!(likers[0].user_id, alice);
        assert_eq!(likers[0].likes_id, like.id);
        assert_eq!(likers[0].username, "alice@example.com");

        unlike_post(&db, bob, post).await.unwrap();
        let likers = list_post_likers(&db, post).await.unwrap();
        assert_eq!(likers.len(), 1);
        assert_eq!(likers[0].user_id, alice);
    }

    #[actix_rt::test]
    async fn test_unlike_without_like() {
        let db = test_util::setup().await;
        let alice = test_util::insert_user(&db, "alice").await;

        unlike_post(&db, alice, 1).await.unwrap();
        unlike_comment(&db, alice, 1).await.unwrap();
        assert_eq!(likes::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(comment_likes::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[actix_rt::test]
    async fn test_comment_like_cycle() {
        let db = test_util::setup().await;
        let alice = test_util::insert_user(&db, "alice").await;
        let post = test_util::insert_post(&db, alice, "hello").await;
        let comment = test_util::insert_comment(&db, alice, post).await;

        let first = like_comment(&db, alice, comment).await.unwrap();
        unlike_comment(&db, alice, comment).await.unwrap();
        assert!(list_comment_likers(&db, comment).await.unwrap().is_empty());

        let again = like_comment(&db, alice, comment).await.unwrap();
        assert_eq!(again.id, first.id);
        assert!(again.active);

        let likers = list_comment_likers(&db, comment).await.unwrap();
        assert_eq!(likers.len(), 1);
        assert_eq!(likers[0].comment_likes_id, first.id);
    }

    #[actix_rt::test]
    async fn test_like_missing_target() {
        let db = test_util::setup().await;
        let alice = test_util::insert_user(&db, "alice").await;
        let post = test_util::insert_post(&db, alice, "hello").await;

        let err = like_post(&db, alice, post + 100).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = like_post(&db, alice + 100, post).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = like_comment(&db, alice, 999).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "User or comment does not exist"));

        assert_eq!(likes::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(comment_likes::Entity::find().count(&db).await.unwrap(), 0);
    }
}

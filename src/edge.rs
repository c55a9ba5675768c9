//! Soft-deactivated edges: follows, post likes and comment likes.
//!
//! An edge is a row keyed by an (owner, subject) pair with a boolean flag.
//! Activation is a single upsert against the pair's unique index, so a row
//! is created at most once per pair and reused across every later toggle.

use crate::orm::{comment_likes, followers, likes};
use chrono::{NaiveDateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};

pub trait Edge: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send + 'static;

    /// Human readable name used in logs.
    const NAME: &'static str;

    fn owner_column() -> Self::Column;
    fn subject_column() -> Self::Column;
    fn flag_column() -> Self::Column;

    /// A fresh, active edge.
    fn new_active(owner: i32, subject: i32, created_at: NaiveDateTime) -> Self::Active;
}

impl Edge for followers::Entity {
    type Active = followers::ActiveModel;
    const NAME: &'static str = "follow";

    fn owner_column() -> Self::Column {
        followers::Column::UserId
    }

    fn subject_column() -> Self::Column {
        followers::Column::FollowingUserId
    }

    fn flag_column() -> Self::Column {
        followers::Column::Following
    }

    fn new_active(owner: i32, subject: i32, created_at: NaiveDateTime) -> Self::Active {
        followers::ActiveModel {
            user_id: Set(owner),
            following_user_id: Set(subject),
            created_at: Set(created_at),
            following: Set(true),
            ..Default::default()
        }
    }
}

impl Edge for likes::Entity {
    type Active = likes::ActiveModel;
    const NAME: &'static str = "like";

    fn owner_column() -> Self::Column {
        likes::Column::UserId
    }

    fn subject_column() -> Self::Column {
        likes::Column::PostId
    }

    fn flag_column() -> Self::Column {
        likes::Column::Active
    }

    fn new_active(owner: i32, subject: i32, created_at: NaiveDateTime) -> Self::Active {
        likes::ActiveModel {
            user_id: Set(owner),
            post_id: Set(subject),
            created_at: Set(created_at),
            active: Set(true),
            ..Default::default()
        }
    }
}

impl Edge for comment_likes::Entity {
    type Active = comment_likes::ActiveModel;
    const NAME: &'static str = "comment like";

    fn owner_column() -> Self::Column {
        comment_likes::Column::UserId
    }

    fn subject_column() -> Self::Column {
        comment_likes::Column::CommentId
    }

    fn flag_column() -> Self::Column {
        comment_likes::Column::Active
    }

    fn new_active(owner: i32, subject: i32, created_at: NaiveDateTime) -> Self::Active {
        comment_likes::ActiveModel {
            user_id: Set(owner),
            comment_id: Set(subject),
            created_at: Set(created_at),
            active: Set(true),
            ..Default::default()
        }
    }
}

/// Turns the edge on, reactivating the pair's existing row if there is one.
/// Returns the row as it stands afterwards.
pub async fn activate<E>(db: &DatabaseConnection, owner: i32, subject: i32) -> Result<E::Model, DbErr>
where
    E: Edge,
    E::Model: IntoActiveModel<E::Active>,
{
    E::insert(E::new_active(owner, subject, Utc::now().naive_utc()))
        .on_conflict(
            OnConflict::columns([E::owner_column(), E::subject_column()])
                .update_column(E::flag_column())
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    log::debug!("{} {} -> {} active", E::NAME, owner, subject);

    find::<E>(db, owner, subject).await?.ok_or_else(|| {
        DbErr::RecordNotFound(format!("{} {} -> {} vanished after upsert", E::NAME, owner, subject))
    })
}

/// Turns the edge off. Pairs with no active row are left untouched.
/// Returns the number of rows deactivated.
pub async fn deactivate<E>(db: &DatabaseConnection, owner: i32, subject: i32) -> Result<u64, DbErr>
where
    E: Edge,
{
    let res = E::update_many()
        .col_expr(E::flag_column(), Expr::value(false))
        .filter(E::owner_column().eq(owner))
        .filter(E::subject_column().eq(subject))
        .filter(E::flag_column().eq(true))
        .exec(db)
        .await?;

    log::debug!(
        "{} {} -> {} inactive ({} rows)",
        E::NAME,
        owner,
        subject,
        res.rows_affected
    );

    Ok(res.rows_affected)
}

/// The pair's row, active or not.
pub async fn find<E>(db: &DatabaseConnection, owner: i32, subject: i32) -> Result<Option<E::Model>, DbErr>
where
    E: Edge,
{
    E::find()
        .filter(E::owner_column().eq(owner))
        .filter(E::subject_column().eq(subject))
        .one(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::{activate, deactivate, find};
    use crate::orm::likes;
    use crate::test_util;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[actix_rt::test]
    async fn test_activate_reuses_row() {
        let db = test_util::setup().await;
        let user = test_util::insert_user(&db, "alice").await;
        let post = test_util::insert_post(&db, user, "hello").await;

        let first = activate::<likes::Entity>(&db, user, post).await.unwrap();
        let second = activate::<likes::Entity>(&db, user, post).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(second.active);
        assert_eq!(likes::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn test_deactivate_without_row() {
        let db = test_util::setup().await;
        let user = test_util::insert_user(&db, "alice").await;

        assert_eq!(deactivate::<likes::Entity>(&db, user, 99).await.unwrap(), 0);
        assert!(find::<likes::Entity>(&db, user, 99).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_reactivation_keeps_created_at() {
        let db = test_util::setup().await;
        let user = test_util::insert_user(&db, "alice").await;
        let post = test_util::insert_post(&db, user, "hello").await;

        let first = activate::<likes::Entity>(&db, user, post).await.unwrap();
        assert_eq!(deactivate::<likes::Entity>(&db, user, post).await.unwrap(), 1);
        let inactive = find::<likes::Entity>(&db, user, post).await.unwrap().unwrap();
        assert!(!inactive.active);

        let again = activate::<likes::Entity>(&db, user, post).await.unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.created_at, first.created_at);
        assert!(again.active);
    }
}

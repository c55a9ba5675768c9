//! Follow edges between users.

use crate::edge;
use crate::error::Error;
use crate::orm::{followers, user_details, users};
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;

#[derive(Debug, FromQueryResult, Serialize, PartialEq, Eq)]
pub struct UserId {
    pub id: i32,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RelationshipCounts {
    pub following: u64,
    pub follower: u64,
}

/// Users with a profile that `user_id` does not actively follow, excluding themselves.
pub async fn list_non_followed(db: &DatabaseConnection, user_id: i32) -> Result<Vec<UserId>, Error> {
    let followed = Query::select()
        .column(followers::Column::FollowingUserId)
        .from(followers::Entity)
        .and_where(followers::Column::UserId.eq(user_id))
        .and_where(followers::Column::Following.eq(true))
        .to_owned();

    let users = users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .inner_join(user_details::Entity)
        .filter(users::Column::Id.ne(user_id))
        .filter(users::Column::Id.not_in_subquery(followed))
        .order_by_asc(users::Column::Id)
        .into_model::<UserId>()
        .all(db)
        .await?;

    if users.is_empty() {
        return Err(Error::not_found("You are already following all users"));
    }

    Ok(users)
}

pub async fn count_relationships(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<RelationshipCounts, Error> {
    let following = followers::Entity::find()
        .filter(followers::Column::UserId.eq(user_id))
        .filter(followers::Column::Following.eq(true))
        .count(db)
        .await?;
    let follower = followers::Entity::find()
        .filter(followers::Column::FollowingUserId.eq(user_id))
        .filter(followers::Column::Following.eq(true))
        .count(db)
        .await?;

    Ok(RelationshipCounts {
        following,
        follower,
    })
}

/// `None` means the pair has never had an edge.
pub async fn get_relationship_status(
    db: &DatabaseConnection,
    user_id: i32,
    target_id: i32,
) -> Result<Option<bool>, Error> {
    Ok(edge::find::<followers::Entity>(db, user_id, target_id)
        .await?
        .map(|edge| edge.following))
}

pub async fn follow(
    db: &DatabaseConnection,
    user_id: i32,
    target_id: i32,
) -> Result<followers::Model, Error> {
    edge::activate::<followers::Entity>(db, user_id, target_id)
        .await
        .map_err(|e| Error::missing_reference(e, "User does not exist"))
}

pub async fn unfollow(db: &DatabaseConnection, user_id: i32, target_id: i32) -> Result<(), Error> {
    edge::deactivate::<followers::Entity>(db, user_id, target_id).await?;
    Ok(())
}

//! Substring search over profiles and posts. No ranking.

use crate::error::Error;
use crate::orm::{posts, user_details, users};
use crate::relationship::UserId;
use sea_orm::{entity::*, query::*, Condition, DatabaseConnection};

/// Users whose display username or name contains `keyword`.
pub async fn search_users(db: &DatabaseConnection, keyword: &str) -> Result<Vec<UserId>, Error> {
    let users = users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .inner_join(user_details::Entity)
        .filter(
            Condition::any()
                .add(user_details::Column::UserName.contains(keyword))
                .add(user_details::Column::Name.contains(keyword)),
        )
        .order_by_asc(users::Column::Id)
        .into_model::<UserId>()
        .all(db)
        .await?;

    if users.is_empty() {
        return Err(Error::not_found("No user found"));
    }

    Ok(users)
}

/// Posts whose content contains `keyword`, newest first.
pub async fn search_posts(db: &DatabaseConnection, keyword: &str) -> Result<Vec<posts::Model>, Error> {
    let posts = posts::Entity::find()
        .filter(posts::Column::Content.contains(keyword))
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_desc(posts::Column::Id)
        .all(db)
        .await?;

    if posts.is_empty() {
        return Err(Error::not_found("No post found"));
    }

    Ok(posts)
}

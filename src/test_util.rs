//! Fixtures for store tests: a private in-memory database per test.

use crate::orm::{comments, posts, user_details, users};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

/// In-memory SQLite with the full schema. One connection, so every query sees
/// the same database.
pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    crate::schema::create_tables(&db).await.unwrap();
    db
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> i32 {
    users::ActiveModel {
        username: Set(format!("{}@example.com", username)),
        password: Set("x".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Inserts a profile row directly, bypassing the profile store's checks.
pub async fn insert_details(db: &DatabaseConnection, user_id: i32, user_name: &str) {
    user_details::ActiveModel {
        user_id: Set(user_id),
        user_name: Set(user_name.to_owned()),
        name: Set(user_name.to_uppercase()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_post(db: &DatabaseConnection, user_id: i32, content: &str) -> i32 {
    posts::ActiveModel {
        title: Set("title".to_owned()),
        content: Set(content.to_owned()),
        user_id: Set(user_id),
        created_at: Set(Utc::now().naive_utc()),
        views: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_comment(db: &DatabaseConnection, user_id: i32, post_id: i32) -> i32 {
    comments::ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
        content: Set("nice".to_owned()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

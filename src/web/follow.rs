use crate::error::Error;
use crate::relationship::{
    count_relationships, follow, get_relationship_status, list_non_followed, unfollow,
};
use actix_web::{get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(view_relationship_counts)
        .service(view_non_followed)
        .service(view_relationship_status)
        .service(create_follow)
        .service(destroy_follow);
}

#[derive(Deserialize)]
pub struct FollowFormData {
    pub user_id: i32,
    pub following_user_id: i32,
}

#[get("/follows/count/{user_id}")]
async fn view_relationship_counts(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let counts = count_relationships(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(counts))
}

/// Accounts the user could follow next.
#[get("/follows/{user_id}")]
async fn view_non_followed(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let users = list_non_followed(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// 204 when the pair has never had an edge.
#[get("/follows/{user_id}/{following_user_id}")]
async fn view_relationship_status(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (user_id, following_user_id) = path.into_inner();
    Ok(
        match get_relationship_status(&db, user_id, following_user_id).await? {
            Some(following) => HttpResponse::Ok().json(json!({ "following": following })),
            None => HttpResponse::NoContent().finish(),
        },
    )
}

#[post("/follows")]
async fn create_follow(
    db: web::Data<DatabaseConnection>,
    form: web::Json<FollowFormData>,
) -> Result<HttpResponse, Error> {
    let edge = follow(&db, form.user_id, form.following_user_id).await?;
    Ok(HttpResponse::Ok().json(edge))
}

#[put("/follows/{user_id}/{following_user_id}")]
async fn destroy_follow(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (user_id, following_user_id) = path.into_inner();
    unfollow(&db, user_id, following_user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully unfollowed" })))
}

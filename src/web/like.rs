use crate::engagement::{
    like_comment, like_post, list_comment_likers, list_post_likers, unlike_comment, unlike_post,
};
use crate::error::Error;
use actix_web::{get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(create_like)
        .service(destroy_like)
        .service(view_post_likes)
        .service(create_comment_like)
        .service(destroy_comment_like)
        .service(view_comment_likes);
}

#[derive(Deserialize)]
pub struct LikeFormData {
    pub user_id: i32,
    pub post_id: i32,
}

#[derive(Deserialize)]
pub struct CommentLikeFormData {
    pub user_id: i32,
    pub comment_id: i32,
}

#[post("/likes")]
async fn create_like(
    db: web::Data<DatabaseConnection>,
    form: web::Json<LikeFormData>,
) -> Result<HttpResponse, Error> {
    let like = like_post(&db, form.user_id, form.post_id).await?;
    Ok(HttpResponse::Ok().json(like))
}

#[put("/likes/{user_id}/{post_id}")]
async fn destroy_like(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (user_id, post_id) = path.into_inner();
    unlike_post(&db, user_id, post_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "The like has been removed successfully!" })))
}

#[get("/likes/post/{post_id}")]
async fn view_post_likes(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let likers = list_post_likers(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likers))
}

#[post("/comment_likes")]
async fn create_comment_like(
    db: web::Data<DatabaseConnection>,
    form: web::Json<CommentLikeFormData>,
) -> Result<HttpResponse, Error> {
    let like = like_comment(&db, form.user_id, form.comment_id).await?;
    Ok(HttpResponse::Ok().json(like))
}

#[put("/comment_likes/{user_id}/{comment_id}")]
async fn destroy_comment_like(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (user_id, comment_id) = path.into_inner();
    unlike_comment(&db, user_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Like deleted successfully" })))
}

#[get("/comment_likes/comment/{comment_id}")]
async fn view_comment_likes(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let likers = list_comment_likers(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likers))
}

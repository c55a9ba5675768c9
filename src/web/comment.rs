use crate::comment::{create_comment, delete_comment, list_comments_by_post, update_comment};
use crate::error::Error;
use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(create_comment_json)
        .service(view_comments_by_post)
        .service(update_comment_json)
        .service(destroy_comment);
}

#[derive(Deserialize)]
pub struct CommentFormData {
    pub user_id: i32,
    pub post_id: i32,
    pub content: String,
}

#[post("/comments")]
async fn create_comment_json(
    db: web::Data<DatabaseConnection>,
    form: web::Json<CommentFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let comment = create_comment(&db, form.user_id, form.post_id, form.content).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[get("/comments/post/{post_id}")]
async fn view_comments_by_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let comments = list_comments_by_post(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[put("/comments/{comment_id}")]
async fn update_comment_json(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Json<CommentFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let comment = update_comment(
        &db,
        path.into_inner(),
        form.user_id,
        form.post_id,
        form.content,
    )
    .await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/comments/{comment_id}")]
async fn destroy_comment(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    delete_comment(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Comment deleted successfully" })))
}

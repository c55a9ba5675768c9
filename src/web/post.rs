use crate::error::Error;
use crate::post::{
    create_post, delete_post, get_post, increment_views, list_posts_by_user, set_views,
    update_post, NewPost,
};
use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(view_posts_by_user)
        .service(view_post)
        .service(create_post_json)
        .service(overwrite_post_views)
        .service(bump_post_views)
        .service(update_post_json)
        .service(destroy_post);
}

#[derive(Deserialize)]
pub struct NewPostFormData {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

#[derive(Deserialize)]
pub struct UpdatePostFormData {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ViewsFormData {
    pub views: i32,
}

#[get("/posts/user/{user_id}")]
async fn view_posts_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let posts = list_posts_by_user(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/posts/{post_id}")]
async fn view_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let post = get_post(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[post("/posts")]
async fn create_post_json(
    db: web::Data<DatabaseConnection>,
    form: web::Json<NewPostFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let post = create_post(
        &db,
        form.user_id,
        NewPost {
            title: form.title,
            content: form.content,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Sets the counter to a client-supplied total. Prefer `POST` on the same path.
#[put("/posts/views/{post_id}")]
async fn overwrite_post_views(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Json<ViewsFormData>,
) -> Result<HttpResponse, Error> {
    let post = set_views(&db, path.into_inner(), form.views).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Counts one view.
#[post("/posts/views/{post_id}")]
async fn bump_post_views(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let post = increment_views(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/posts/{post_id}")]
async fn update_post_json(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Json<UpdatePostFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let post = update_post(
        &db,
        path.into_inner(),
        NewPost {
            title: form.title,
            content: form.content,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/posts/{post_id}")]
async fn destroy_post(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    delete_post(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Post deleted successfully" })))
}

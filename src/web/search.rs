use crate::error::Error;
use crate::search::{search_posts, search_users};
use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(view_user_search).service(view_post_search);
}

#[get("/search/users/{keyword}")]
async fn view_user_search(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let users = search_users(&db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/search/posts/{keyword}")]
async fn view_post_search(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let posts = search_posts(&db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

mod comment;
pub mod error;
mod follow;
mod index;
mod like;
mod post;
mod profile;
mod search;

use actix_web::web;

/// Configures the web app
///
/// @see https://docs.rs/actix-web/4/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut web::ServiceConfig) {
    conf.app_data(web::JsonConfig::default().error_handler(error::json_error))
        .app_data(web::PathConfig::default().error_handler(error::path_error));

    // Services are matched top->down. Within each module, literal segments
    // (`/follows/count/...`) are registered before the parameters they shadow.
    index::configure(conf);
    search::configure(conf);
    follow::configure(conf);
    profile::configure(conf);
    post::configure(conf);
    like::configure(conf);
    comment::configure(conf);
}

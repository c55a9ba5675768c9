use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use chirper::config::Config;
use chirper::filesystem::ImageStore;
use env_logger::Env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_lib_mods();

    let config = Config::from_env().expect("Configuration failed to load.");
    let db = chirper::init_db(&config.database_url, &config.pool)
        .await
        .expect("Database connection was not established.");
    if config.ensure_schema {
        chirper::schema::create_tables(&db)
            .await
            .expect("Schema bootstrap failed.");
    } else {
        chirper::schema::create_pair_indexes(&db)
            .await
            .expect("Edge pair indexes could not be created.");
    }

    let images = ImageStore::new(&config.image_dir);
    images.init()?;

    let image_url_prefix = config.image_url_prefix.to_owned();
    log::info!("Listening on {}", config.bind_address);

    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(images.clone()))
            .wrap(Logger::default())
            .configure(chirper::web::configure)
            .service(Files::new(&image_url_prefix, images.dir()))
            .default_service(web::to(chirper::web::error::not_found))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}

/// Initialize third party crates we rely on but don't have control over.
fn init_lib_mods() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

use crate::error::Error;
use crate::filesystem::{ImageStore, Upload};
use crate::profile::{get_profile, save_profile, ProfileForm};
use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;
use sea_orm::DatabaseConnection;

/// Largest single form field we will buffer.
const MAX_FIELD_BYTES: usize = 10 * 1024 * 1024;

pub(super) fn configure(conf: &mut web::ServiceConfig) {
    conf.service(view_profile).service(update_profile);
}

#[get("/profile/{user_id}")]
async fn view_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let profile = get_profile(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Multipart form: `username`, `name`, `bio`, and optional `profileImage` and
/// `bannerImage` files.
#[post("/profile/{user_id}")]
async fn update_profile(
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    path: web::Path<i32>,
    multipart: Multipart,
) -> Result<HttpResponse, Error> {
    let form = read_profile_form(multipart).await?;
    let details = save_profile(&db, &images, path.into_inner(), form).await?;
    Ok(HttpResponse::Ok().json(details))
}

async fn read_profile_form(mut fields: Multipart) -> Result<ProfileForm, Error> {
    let mut form = ProfileForm::default();

    while let Some(mut field) = fields
        .try_next()
        .await
        .map_err(|e| Error::validation(format!("Malformed form data: {}", e)))?
    {
        let disposition = field.content_disposition();
        let field_name = disposition.get_name().unwrap_or_default().to_owned();
        let filename = disposition.get_filename().map(str::to_owned);
        let content_type = field.content_type().cloned();
        let data = read_field(&mut field).await?;

        match field_name.as_str() {
            "profileImage" => form.profile_image = into_upload(filename, content_type, data),
            "bannerImage" => form.banner_image = into_upload(filename, content_type, data),
            "username" => form.username = Some(into_text(data)?),
            "name" => form.name = Some(into_text(data)?),
            "bio" => form.bio = Some(into_text(data)?),
            other => log::debug!("update_profile: ignoring field '{}'", other),
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    while let Some(chunk) = field.try_next().await.map_err(|e| {
        log::error!("update_profile: multipart read error: {}", e);
        Error::validation("Error reading upload data")
    })? {
        if buf.len() + chunk.len() > MAX_FIELD_BYTES {
            return Err(Error::validation("Upload is too large"));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Browsers send an empty, nameless part for file inputs left blank.
fn into_upload(
    filename: Option<String>,
    content_type: Option<mime::Mime>,
    data: Vec<u8>,
) -> Option<Upload> {
    let filename = filename.unwrap_or_default();
    if filename.is_empty() && data.is_empty() {
        return None;
    }

    Some(Upload {
        filename,
        content_type,
        data,
    })
}

fn into_text(data: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(data).map_err(|_| Error::validation("Form fields must be UTF-8 text"))
}

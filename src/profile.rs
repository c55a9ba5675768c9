use crate::error::Error;
use crate::filesystem::{ImageStore, StoredImage, Upload};
use crate::orm::{user_details, users};
use mime::Mime;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, SqlErr};
use serde::Serialize;

/// Media types accepted for profile and banner images.
const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// What `get_profile` returns: the full profile once one has been saved,
/// otherwise the bare account.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProfileView {
    #[serde(rename_all = "camelCase")]
    Detailed {
        user_id: i32,
        username: String,
        name: String,
        bio: Option<String>,
        profile_image: Option<String>,
        banner_image: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Basic { user_id: i32, email: String },
}

/// A profile submission. Text fields are optional here so missing ones can be
/// reported as validation errors rather than decode failures.
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub username: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<Upload>,
    pub banner_image: Option<Upload>,
}

pub async fn get_profile(db: &DatabaseConnection, user_id: i32) -> Result<ProfileView, Error> {
    let (user, details) = users::Entity::find_by_id(user_id)
        .find_also_related(user_details::Entity)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("No user found"))?;

    Ok(match details {
        Some(details) => ProfileView::Detailed {
            user_id: details.user_id,
            username: details.user_name,
            name: details.name,
            bio: details.bio,
            profile_image: details.profile_image_path,
            banner_image: details.banner_image_path,
        },
        None => ProfileView::Basic {
            user_id: user.id,
            email: user.username,
        },
    })
}

pub fn is_accepted_image(content_type: Option<&Mime>) -> bool {
    content_type
        .map(|mime| ACCEPTED_IMAGE_TYPES.iter().any(|t| *t == mime.essence_str()))
        .unwrap_or(false)
}

/// Creates or updates the user's profile. Images not uploaded in this call keep
/// their previous value; they are replaced, never cleared.
pub async fn save_profile(
    db: &DatabaseConnection,
    images: &ImageStore,
    user_id: i32,
    form: ProfileForm,
) -> Result<user_details::Model, Error> {
    let uploads = [&form.profile_image, &form.banner_image];
    if uploads
        .iter()
        .filter_map(|upload| upload.as_ref())
        .any(|upload| !is_accepted_image(upload.content_type.as_ref()))
    {
        return Err(Error::validation(
            "Invalid file format. Please upload valid image files (jpg, jpeg, png, gif)",
        ));
    }

    let username = required(form.username, "username")?;
    let name = required(form.name, "name")?;
    let bio = form.bio.filter(|bio| !bio.is_empty());

    if users::Entity::find_by_id(user_id).one(db).await?.is_none() {
        return Err(Error::validation("User does not exist"));
    }

    let taken = user_details::Entity::find()
        .filter(user_details::Column::UserName.eq(username.as_str()))
        .one(db)
        .await?;
    if matches!(taken, Some(ref owner) if owner.user_id != user_id) {
        return Err(Error::validation("Username already exists"));
    }

    let profile_image = store(images, form.profile_image).await?;
    let banner_image = match store(images, form.banner_image).await {
        Ok(image) => image,
        Err(err) => {
            discard(images, profile_image).await;
            return Err(err);
        }
    };

    let written = write_details(
        db,
        user_id,
        username,
        name,
        bio,
        profile_image.clone(),
        banner_image.clone(),
    )
    .await;
    let saved = match written {
        Ok(saved) => saved,
        Err(err) => {
            discard(images, profile_image).await;
            discard(images, banner_image).await;
            return Err(unique_username(err));
        }
    };

    log::debug!("profile saved for user {}", user_id);
    Ok(saved)
}

/// Updates the user's profile row in place, or inserts the first one.
async fn write_details(
    db: &DatabaseConnection,
    user_id: i32,
    username: String,
    name: String,
    bio: Option<String>,
    profile_image: Option<StoredImage>,
    banner_image: Option<StoredImage>,
) -> Result<user_details::Model, DbErr> {
    let previous = user_details::Entity::find()
        .filter(user_details::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match previous {
        Some(previous) => {
            let mut details: user_details::ActiveModel = previous.into();
            details.user_name = Set(username);
            details.name = Set(name);
            details.bio = Set(bio);
            if let Some(image) = profile_image {
                details.profile_image = Set(Some(image.filename));
                details.profile_image_path = Set(Some(image.path));
            }
            if let Some(image) = banner_image {
                details.banner_image = Set(Some(image.filename));
                details.banner_image_path = Set(Some(image.path));
            }
            details.update(db).await
        }
        None => {
            let (profile_image, profile_image_path) = split(profile_image);
            let (banner_image, banner_image_path) = split(banner_image);
            user_details::ActiveModel {
                user_id: Set(user_id),
                user_name: Set(username),
                name: Set(name),
                bio: Set(bio),
                profile_image: Set(profile_image),
                profile_image_path: Set(profile_image_path),
                banner_image: Set(banner_image),
                banner_image_path: Set(banner_image_path),
                ..Default::default()
            }
            .insert(db)
            .await
        }
    }
}

/// A unique violation here means another request claimed the username after
/// our check.
fn unique_username(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::validation("Username already exists"),
        _ => err.into(),
    }
}

async fn discard(images: &ImageStore, image: Option<StoredImage>) {
    if let Some(image) = image {
        images.discard(image).await;
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::validation(format!("{} is required", field))),
    }
}

async fn store(images: &ImageStore, upload: Option<Upload>) -> Result<Option<StoredImage>, Error> {
    match upload {
        Some(upload) => Ok(Some(images.save(upload).await?)),
        None => Ok(None),
    }
}

fn split(image: Option<StoredImage>) -> (Option<String>, Option<String>) {
    match image {
        Some(image) => (Some(image.filename), Some(image.path)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;
    use sea_orm::ConnectionTrait;
    use uuid::Uuid;

    fn image_store() -> ImageStore {
        let store = ImageStore::new(
            std::env::temp_dir().join(format!("chirper-profile-{}", Uuid::new_v4())),
        );
        store.init().unwrap();
        store
    }

    fn form(username: &str) -> ProfileForm {
        ProfileForm {
            username: Some(username.to_owned()),
            name: Some("Display Name".to_owned()),
            bio: Some(String::new()),
            ..Default::default()
        }
    }

    fn upload(filename: &str, content_type: mime::Mime) -> Upload {
        Upload {
            filename: filename.to_owned(),
            content_type: Some(content_type),
            data: vec![0xff, 0xd8],
        }
    }

    #[test]
    fn test_accepted_image_types() {
        assert!(is_accepted_image(Some(&mime::IMAGE_JPEG)));
        assert!(is_accepted_image(Some(&mime::IMAGE_PNG)));
        assert!(is_accepted_image(Some(&mime::IMAGE_GIF)));
        assert!(is_accepted_image(Some(&"image/jpg".parse::<mime::Mime>().unwrap())));
        assert!(!is_accepted_image(Some(&mime::IMAGE_SVG)));
        assert!(!is_accepted_image(Some(&mime::TEXT_PLAIN)));
        assert!(!is_accepted_image(None));
    }

    #[actix_rt::test]
    async fn test_username_uniqueness() {
        let db = test_util::setup().await;
        let images = image_store();
        let one = test_util::insert_user(&db, "one").await;
        let two = test_util::insert_user(&db, "two").await;

        save_profile(&db, &images, one, form("x")).await.unwrap();
        let err = save_profile(&db, &images, two, form("x")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Username already exists"));

        let again = save_profile(&db, &images, one, form("x")).await.unwrap();
        assert_eq!(again.user_id, one);
        assert_eq!(again.user_name, "x");
        assert_eq!(again.bio, None);
    }

    #[actix_rt::test]
    async fn test_partial_image_update_keeps_banner() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;

        let first = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                profile_image: Some(upload("a.png", mime::IMAGE_PNG)),
                banner_image: Some(upload("banner.gif", mime::IMAGE_GIF)),
                ..form("x")
            },
        )
        .await
        .unwrap();
        assert!(first.banner_image.is_some());

        let second = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                profile_image: Some(upload("b.jpg", mime::IMAGE_JPEG)),
                ..form("x")
            },
        )
        .await
        .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.banner_image, first.banner_image);
        assert_eq!(second.banner_image_path, first.banner_image_path);
        assert_ne!(second.profile_image, first.profile_image);
        assert!(second.profile_image.unwrap().ends_with("-b.jpg"));
    }

    #[actix_rt::test]
    async fn test_rejects_bad_media_type_before_writing() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;

        let err = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                profile_image: Some(upload("a.png", mime::IMAGE_PNG)),
                banner_image: Some(upload("evil.svg", mime::IMAGE_SVG)),
                ..form("x")
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(std::fs::read_dir(images.dir()).unwrap().count(), 0);
        assert!(user_details::Entity::find().one(&db).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_requires_username_and_name() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;

        let err = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                username: None,
                ..form("x")
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "username is required"));
    }

    #[actix_rt::test]
    async fn test_get_profile_views() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;

        assert_eq!(
            get_profile(&db, user).await.unwrap(),
            ProfileView::Basic {
                user_id: user,
                email: "one@example.com".to_owned()
            }
        );

        save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                bio: Some("hi there".to_owned()),
                ..form("x")
            },
        )
        .await
        .unwrap();
        assert_eq!(
            get_profile(&db, user).await.unwrap(),
            ProfileView::Detailed {
                user_id: user,
                username: "x".to_owned(),
                name: "Display Name".to_owned(),
                bio: Some("hi there".to_owned()),
                profile_image: None,
                banner_image: None,
            }
        );

        assert!(matches!(
            get_profile(&db, user + 1).await,
            Err(Error::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_whitespace_bio_is_kept() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;

        let saved = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                bio: Some("  ".to_owned()),
                ..form("x")
            },
        )
        .await
        .unwrap();
        assert_eq!(saved.bio.as_deref(), Some("  "));
    }

    #[actix_rt::test]
    async fn test_failed_write_discards_uploads() {
        let db = test_util::setup().await;
        let images = image_store();
        let user = test_util::insert_user(&db, "one").await;
        save_profile(&db, &images, user, form("x")).await.unwrap();

        db.execute_unprepared(
            "CREATE TRIGGER block_profile_update BEFORE UPDATE ON user_details \
             BEGIN SELECT RAISE(ABORT, 'blocked'); END",
        )
        .await
        .unwrap();

        let err = save_profile(
            &db,
            &images,
            user,
            ProfileForm {
                profile_image: Some(upload("a.png", mime::IMAGE_PNG)),
                banner_image: Some(upload("b.gif", mime::IMAGE_GIF)),
                ..form("y")
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
        assert_eq!(std::fs::read_dir(images.dir()).unwrap().count(), 0);
        let details = user_details::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(details.user_name, "x");
        assert_eq!(details.profile_image, None);
    }
}

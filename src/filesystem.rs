//! Storage for uploaded profile images. Files land in one directory which the
//! server also exposes as static content.

use actix_web::web;
use chrono::Utc;
use mime::Mime;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A file received from a client, held in memory until it is accepted.
#[derive(Debug)]
pub struct Upload {
    /// Name the client gave the file.
    pub filename: String,
    /// Declared media type. Never sniffed from the bytes.
    pub content_type: Option<Mime>,
    pub data: Vec<u8>,
}

/// Where a stored upload can be found again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the image directory if it is missing.
    pub fn init(&self) -> io::Result<()> {
        if !self.dir.exists() {
            log::info!("Creating image directory {}", self.dir.display());
            std::fs::DirBuilder::new().recursive(true).create(&self.dir)?;
        }
        Ok(())
    }

    /// Writes the upload under a generated `<unix millis>-<tag>-<name>` filename.
    /// The random tag keeps two uploads with the same name apart within one
    /// millisecond, and an existing file is never overwritten.
    pub async fn save(&self, upload: Upload) -> io::Result<StoredImage> {
        let tag = Uuid::new_v4().simple().to_string();
        let filename = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            &tag[..8],
            sanitize_filename(&upload.filename)
        );
        let path = self.dir.join(&filename);
        let display_path = path.to_string_lossy().into_owned();

        let data = upload.data;
        web::block(move || {
            let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
            file.write_all(&data)
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))??;

        log::debug!("stored upload {}", display_path);
        Ok(StoredImage {
            filename,
            path: display_path,
        })
    }

    /// Removes a file written by `save` whose record was never committed.
    /// Failures are logged, not returned.
    pub async fn discard(&self, image: StoredImage) {
        let path = self.dir.join(&image.filename);
        match web::block(move || std::fs::remove_file(path)).await {
            Ok(Ok(())) => log::debug!("discarded upload {}", image.path),
            Ok(Err(e)) => log::warn!("could not discard upload {}: {}", image.path, e),
            Err(e) => log::warn!("could not discard upload {}: {}", image.path, e),
        }
    }
}

/// Keeps the last path component and replaces anything outside `[A-Za-z0-9._-]`.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if clean.trim_matches('.').is_empty() {
        Uuid::new_v4().to_string()
    } else {
        clean
    }
}

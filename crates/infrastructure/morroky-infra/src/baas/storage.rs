use chrono::Utc;
use morroky_config::IMAGE_BUCKET;
use morroky_core::UploadFile;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::{check, BaasClient};
use crate::error::BaasError;

/// Characters escaped inside a single object-path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Unique object name inside `folder`: `<folder>/<millis>_<random>.<ext>`.
pub fn object_name(folder: &str, file: &UploadFile) -> String {
    let folder = folder.trim_matches('/');
    let folder = if folder.is_empty() { "uploads" } else { folder };
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{folder}/{}_{}.{}",
        Utc::now().timestamp_millis(),
        &random[..7],
        file.extension()
    )
}

fn encode_path(name: &str) -> String {
    name.split('/')
        .map(|seg| utf8_percent_encode(seg, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl BaasClient {
    pub fn public_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.base_url,
            encode_path(name)
        )
    }

    /// Uploads into the image bucket and returns the public URL. No type or
    /// size checks happen here.
    pub async fn upload_image(&self, file: &UploadFile, folder: &str) -> Result<String, BaasError> {
        let name = object_name(folder, file);
        tracing::debug!(object = %name, bytes = file.len(), "uploading image");
        let resp = self
            .authorize(self.http.post(self.url(&format!(
                "/storage/v1/object/{IMAGE_BUCKET}/{}",
                encode_path(&name)
            ))))
            .header("content-type", &file.content_type)
            .header("cache-control", "3600")
            .header("x-upsert", "false")
            .body(file.bytes.clone())
            .send()
            .await?;
        check(resp).await?;
        Ok(self.public_url(IMAGE_BUCKET, &name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_keep_folder_and_extension() {
        let file = UploadFile::new("Logo.PNG", "image/png", vec![1]);
        let name = object_name("products/m1", &file);
        assert!(name.starts_with("products/m1/"));
        assert!(name.ends_with(".png"));
        assert_ne!(name, object_name("products/m1", &file));
    }

    #[test]
    fn blank_folder_defaults_to_uploads() {
        let file = UploadFile::new("a.jpg", "image/jpeg", vec![]);
        assert!(object_name("/", &file).starts_with("uploads/"));
    }

    #[test]
    fn segments_are_escaped_but_slashes_kept() {
        assert_eq!(encode_path("logos/my shop.png"), "logos/my%20shop.png");
    }
}

use bytes::Bytes;

use crate::app::{self, errors::TryOnError};

/// The reconciled result of a try-on job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnImage {
    pub output_url: String,
}

impl TryOnImage {
    pub fn new(output_url: &str) -> Self {
        Self {
            output_url: output_url.to_string(),
        }
    }

    /// Fetch the generated image itself.
    pub async fn download(&self) -> Result<Bytes, TryOnError> {
        app::util::reqwest::get_bytes(&self.output_url).await
    }
}

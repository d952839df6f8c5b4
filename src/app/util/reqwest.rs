use bytes::Bytes;

use crate::app::errors::TryOnError;

pub async fn get_bytes(url: &str) -> Result<Bytes, TryOnError> {
    match reqwest::get(url).await {
        Ok(res) => match res.bytes().await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::error!(%e);
                Err(TryOnError::Transport(
                    "Failed to read the image bytes.".to_string(),
                ))
            }
        },
        Err(e) => {
            tracing::error!(%e);
            Err(TryOnError::Transport(
                "Failed to reach the image url.".to_string(),
            ))
        }
    }
}

use std::sync::Arc;

use reqwest::header;
use validator::Validate;

use crate::{
    app::{config::TryOnConfig, errors::TryOnError},
    sessions::{
        enums::session_outcome::SessionOutcome,
        service::{FetchStatusProbe, StatusProbe},
    },
    TryOnState,
};

use super::{
    dtos::create_tryon_job_dto::CreateTryonJobDto, enums::submission_result::SubmissionResult,
    models::tryon_image::TryOnImage, structs::tryon_generate_response::TryonGenerateResponse,
};

/// Run one submission cycle end to end: validate, submit, and when the
/// service answers with a fetch handle, poll it to a terminal outcome.
///
/// A new cycle invalidates whatever the previous cycle left polling, even
/// when this one never reaches the polling stage itself.
pub async fn run_tryon_job(
    dto: &CreateTryonJobDto,
    state: &TryOnState,
) -> Result<TryOnImage, TryOnError> {
    dto.validate()?;

    state.reset().await;

    let dto = dto.sanitized();

    match submit_tryon_job(&dto, &state.config).await {
        Ok(SubmissionResult::RemoteError(message)) => Err(TryOnError::Remote(message)),
        Ok(SubmissionResult::ImmediateImage(url)) => Ok(TryOnImage::new(&url)),
        Ok(SubmissionResult::Pending(fetch_url)) => {
            let probe = Arc::new(FetchStatusProbe::new(&fetch_url, &dto.key));
            await_pending(&fetch_url, probe, state).await
        }
        Err(e) => Err(e),
    }
}

/// Poll a fetch handle under the configured cadence and deadline, and map
/// the session's terminal state to the caller-visible outcome.
pub async fn await_pending(
    fetch_url: &str,
    probe: Arc<dyn StatusProbe>,
    state: &TryOnState,
) -> Result<TryOnImage, TryOnError> {
    let session = state.begin_session(fetch_url, probe).await;

    match session.await_outcome().await {
        Some(SessionOutcome::Succeeded(output_url)) => Ok(TryOnImage::new(&output_url)),
        Some(SessionOutcome::TimedOut) => Err(TryOnError::Timeout),
        Some(SessionOutcome::Failed(message)) => Err(TryOnError::Transport(message)),
        None => Err(TryOnError::Canceled),
    }
}

/// Send the job to the creation endpoint. Exactly one outbound call; a
/// transport failure is surfaced immediately, never retried.
pub async fn submit_tryon_job(
    dto: &CreateTryonJobDto,
    config: &TryOnConfig,
) -> Result<SubmissionResult, TryOnError> {
    let mut headers = header::HeaderMap::new();
    headers.insert("Content-Type", "application/json".parse().unwrap());

    let client = reqwest::Client::new();
    let result = client
        .post(&config.create_url)
        .headers(headers)
        .json(dto)
        .send()
        .await;

    match result {
        Ok(res) => match res.text().await {
            Ok(text) => classify_generate_response(&text),
            Err(e) => {
                tracing::warn!("submit_tryon_job (1): {:?}", e);
                Err(TryOnError::Transport(
                    "Failed to read the creation response.".to_string(),
                ))
            }
        },
        Err(e) => {
            tracing::warn!("submit_tryon_job (2): {:?}", e);
            Err(TryOnError::Transport(
                "Failed to reach the creation endpoint.".to_string(),
            ))
        }
    }
}

/// Decide what one creation response means. A reported error blocks
/// polling; a direct image with no fetch handle is final; a fetch handle
/// means the caller must poll.
pub fn classify_generate_response(text: &str) -> Result<SubmissionResult, TryOnError> {
    let response: TryonGenerateResponse = match serde_json::from_str(text) {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("classify_generate_response: {:?}", text);
            return Err(TryOnError::Transport(
                "Failed to parse the creation response.".to_string(),
            ));
        }
    };

    if response.is_error() {
        return Ok(SubmissionResult::RemoteError(response.message_text()));
    }

    match (response.direct_image_url(), &response.fetch_result) {
        (Some(url), None) => Ok(SubmissionResult::ImmediateImage(url)),
        (_, Some(fetch_url)) => Ok(SubmissionResult::Pending(fetch_url.to_string())),
        (None, None) => Err(TryOnError::Transport(
            "The creation response carried neither a result nor a fetch handle.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn an_error_status_is_a_remote_error() {
        let result =
            classify_generate_response(r#"{"status":"error","message":"invalid api key"}"#);

        assert_eq!(
            result.unwrap(),
            SubmissionResult::RemoteError("invalid api key".to_string())
        );
    }

    #[test]
    fn structured_error_messages_are_preserved() {
        let result =
            classify_generate_response(r#"{"status":"failed","message":{"prompt":["required"]}}"#);

        assert_matches!(
            result.unwrap(),
            SubmissionResult::RemoteError(message) if message.contains("required")
        );
    }

    #[test]
    fn a_direct_result_without_a_handle_is_immediate() {
        let result = classify_generate_response(
            r#"{"status":"success","result":"https://img.test/now.png"}"#,
        );

        assert_eq!(
            result.unwrap(),
            SubmissionResult::ImmediateImage("https://img.test/now.png".to_string())
        );
    }

    #[test]
    fn an_output_array_counts_as_a_direct_result() {
        let result = classify_generate_response(
            r#"{"status":"success","output":["https://img.test/a.png","https://img.test/b.png"]}"#,
        );

        assert_eq!(
            result.unwrap(),
            SubmissionResult::ImmediateImage("https://img.test/a.png".to_string())
        );
    }

    #[test]
    fn a_fetch_handle_wins_over_a_direct_result() {
        let result = classify_generate_response(
            r#"{"status":"processing","output":["https://img.test/later.png"],"fetch_result":"https://fetch.test/42"}"#,
        );

        assert_eq!(
            result.unwrap(),
            SubmissionResult::Pending("https://fetch.test/42".to_string())
        );
    }

    #[test]
    fn a_processing_response_is_pending() {
        let result = classify_generate_response(
            r#"{"status":"processing","id":5264,"eta":12.5,"fetch_result":"https://fetch.test/5264"}"#,
        );

        assert_eq!(
            result.unwrap(),
            SubmissionResult::Pending("https://fetch.test/5264".to_string())
        );
    }

    #[test]
    fn an_empty_shell_is_a_transport_error() {
        let result = classify_generate_response(r#"{"status":"success"}"#);
        assert_matches!(result, Err(TryOnError::Transport(_)));
    }

    #[test]
    fn an_unparseable_body_is_a_transport_error() {
        let result = classify_generate_response("<html>bad gateway</html>");
        assert_matches!(result, Err(TryOnError::Transport(_)));
    }
}

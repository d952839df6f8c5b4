use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TryonGenerateResponse {
    pub status: Option<String>,
    pub message: Option<Value>,
    pub result: Option<String>,
    pub output: Option<GenerateOutput>,
    pub fetch_result: Option<String>,
    pub id: Option<u64>,
    pub eta: Option<f32>,
}

// The api returns `output` as a single url on some routes and as an array
// on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerateOutput {
    One(String),
    Many(Vec<String>),
}

impl TryonGenerateResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status.as_deref(), Some("error") | Some("failed"))
    }

    /// The server-supplied error message, whatever shape it arrived in.
    pub fn message_text(&self) -> String {
        match &self.message {
            Some(Value::String(text)) => text.to_string(),
            Some(value) => value.to_string(),
            None => "The image service reported an error.".to_string(),
        }
    }

    pub fn direct_image_url(&self) -> Option<String> {
        if let Some(result) = &self.result {
            if !result.is_empty() {
                return Some(result.to_string());
            }
        }

        match &self.output {
            Some(GenerateOutput::One(url)) if !url.is_empty() => Some(url.to_string()),
            Some(GenerateOutput::Many(urls)) => urls
                .iter()
                .find(|url| !url.is_empty())
                .map(|url| url.to_string()),
            _ => None,
        }
    }
}

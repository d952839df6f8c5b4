use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TryonFetchResponse {
    pub status: Option<String>,
    pub output: Option<FetchOutput>,
}

// `output` arrives as a single url or as an array depending on the api
// version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FetchOutput {
    One(String),
    Many(Vec<String>),
}

impl TryonFetchResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn output_url(&self) -> Option<String> {
        match &self.output {
            Some(FetchOutput::One(url)) if !url.is_empty() => Some(url.to_string()),
            Some(FetchOutput::Many(urls)) => urls
                .iter()
                .find(|url| !url.is_empty())
                .map(|url| url.to_string()),
            _ => None,
        }
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    pub tryon_create_url: Option<String>,
    pub tryon_tick_interval_ms: Option<u64>,
    pub tryon_deadline_ms: Option<u64>,
    pub tryon_progress_interval_ms: Option<u64>,
}

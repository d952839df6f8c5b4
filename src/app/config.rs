use std::time::Duration;

use crate::{jobs, sessions::service::PollConfig};

use super::env::Envy;

/// Injectable client configuration: the creation endpoint and the polling
/// timings. Everything else about a job travels in the request itself.
#[derive(Debug, Clone)]
pub struct TryOnConfig {
    pub create_url: String,
    pub poll: PollConfig,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            create_url: jobs::config::API_URL.to_string(),
            poll: PollConfig::default(),
        }
    }
}

impl TryOnConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        let envy = envy::from_env::<Envy>()?;
        Ok(Self::from_envy(envy))
    }

    pub fn from_envy(envy: Envy) -> Self {
        let defaults = PollConfig::default();

        Self {
            create_url: envy
                .tryon_create_url
                .unwrap_or_else(|| jobs::config::API_URL.to_string()),
            poll: PollConfig {
                tick_interval: envy
                    .tryon_tick_interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.tick_interval),
                deadline: envy
                    .tryon_deadline_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.deadline),
                progress_interval: envy
                    .tryon_progress_interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.progress_interval),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_timings() {
        let config = TryOnConfig::default();

        assert_eq!(config.create_url, jobs::config::API_URL);
        assert_eq!(config.poll.tick_interval, Duration::from_millis(14000));
        assert_eq!(config.poll.deadline, Duration::from_millis(30000));
        assert_eq!(config.poll.progress_interval, Duration::from_millis(1000));
    }

    #[test]
    fn env_values_override_the_defaults() {
        let envy = Envy {
            tryon_create_url: Some("https://example.test/create".to_string()),
            tryon_tick_interval_ms: Some(5000),
            tryon_deadline_ms: None,
            tryon_progress_interval_ms: Some(250),
        };

        let config = TryOnConfig::from_envy(envy);

        assert_eq!(config.create_url, "https://example.test/create");
        assert_eq!(config.poll.tick_interval, Duration::from_millis(5000));
        assert_eq!(config.poll.deadline, Duration::from_millis(30000));
        assert_eq!(config.poll.progress_interval, Duration::from_millis(250));
    }
}

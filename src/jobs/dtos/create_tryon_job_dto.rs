use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::jobs::enums::cloth_type::ClothType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTryonJobDto {
    #[validate(length(min = 1, message = "key must not be empty."))]
    pub key: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "prompt must be between 1 and 1000 characters."
    ))]
    pub prompt: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "negative_prompt must be between 1 and 1000 characters."
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[validate(custom = "super::validate_image_url")]
    pub init_image: String,
    #[validate(custom = "super::validate_image_url")]
    pub cloth_image: String,
    pub cloth_type: ClothType,
    #[validate(range(min = 1, max = 2048, message = "height must be between 1 and 2048."))]
    pub height: u16,
    #[validate(range(min = 1, max = 2048, message = "width must be between 1 and 2048."))]
    pub width: u16,
    #[validate(range(min = 0.0, max = 20.0, message = "guidance_scale must be between 0 and 20."))]
    pub guidance_scale: f32,
    #[validate(range(
        min = 1,
        max = 100,
        message = "num_inference_steps must be between 1 and 100."
    ))]
    pub num_inference_steps: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[validate(url(message = "webhook must be a valid url."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
}

impl CreateTryonJobDto {
    pub fn sanitized(&self) -> Self {
        return Self {
            key: self.key.to_string(),
            prompt: self.prompt.trim().replace("\n", "").replace("\r", ""),
            negative_prompt: self
                .negative_prompt
                .as_ref()
                .map(|prompt| prompt.trim().replace("\n", "").replace("\r", "")),
            init_image: self.init_image.to_string(),
            cloth_image: self.cloth_image.to_string(),
            cloth_type: self.cloth_type,
            height: self.height,
            width: self.width,
            guidance_scale: self.guidance_scale,
            num_inference_steps: self.num_inference_steps,
            seed: self.seed,
            webhook: self.webhook.clone(),
            track_id: self.track_id.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateTryonJobDto {
        CreateTryonJobDto {
            key: "test-key".to_string(),
            prompt: "A realistic photo of a model wearing a leather jacket.".to_string(),
            negative_prompt: Some("Low quality, unrealistic, bad cloth".to_string()),
            init_image: "https://img.test/model.jpg".to_string(),
            cloth_image: "https://img.test/jacket.jpg".to_string(),
            cloth_type: ClothType::UpperBody,
            height: 709,
            width: 473,
            guidance_scale: 7.5,
            num_inference_steps: 21,
            seed: None,
            webhook: None,
            track_id: None,
        }
    }

    #[test]
    fn accepts_the_reference_request() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn rejects_an_empty_key() {
        let mut dto = dto();
        dto.key = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_a_malformed_image_reference() {
        let mut dto = dto();
        dto.init_image = "not a url".to_string();
        assert!(dto.validate().is_err());

        let mut dto = self::dto();
        dto.cloth_image = "file:///etc/passwd".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_an_ftp_image_reference() {
        let mut dto = dto();
        dto.init_image = "ftp://img.test/model.jpg".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let mut dto = dto();
        dto.height = 0;
        assert!(dto.validate().is_err());

        let mut dto = self::dto();
        dto.num_inference_steps = 0;
        assert!(dto.validate().is_err());

        let mut dto = self::dto();
        dto.guidance_scale = -1.0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_an_invalid_webhook() {
        let mut dto = dto();
        dto.webhook = Some("not a url".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn sanitized_strips_line_breaks() {
        let mut dto = dto();
        dto.prompt = "  a jacket\r\non a model  ".to_string();
        assert_eq!(dto.sanitized().prompt, "a jacketon a model");
    }
}

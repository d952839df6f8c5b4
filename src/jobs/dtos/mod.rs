use regex::Regex;
use validator::ValidationError;

pub mod create_tryon_job_dto;

lazy_static! {
    pub static ref IMAGE_URL_REGEX: Regex = Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).unwrap();
}

pub fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    match IMAGE_URL_REGEX.is_match(value) {
        true => Ok(()),
        false => Err(ValidationError::new("image_url_validation")),
    }
}

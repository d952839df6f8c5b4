use serde::{Deserialize, Serialize};

/// Garment category understood by the try-on endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothType {
    UpperBody,
    LowerBody,
    Dress,
}

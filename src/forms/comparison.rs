use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonType {
    Price,
    Specs,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct Comparison {
    #[validate(min_length = 1)]
    pub build_id: String,
    pub comparison_type: ComparisonType,
}

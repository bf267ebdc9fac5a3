use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseSource {
    #[default]
    Market,
    Wall,
}

impl std::fmt::Display for ParseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseSource::Market => write!(f, "market"),
            ParseSource::Wall => write!(f, "wall"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct Parse {
    #[validate(min_items = 1)]
    pub group_ids: Vec<i64>,
    #[serde(default)]
    pub source: ParseSource,
}

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_builds: i64,
    pub our_builds: i64,
    pub other_builds: i64,
    pub last_update: Option<DateTime<Utc>>,
}

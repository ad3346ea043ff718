use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, IntoParams)]
pub struct FindCartQuery {
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message for one customer, fetched fresh for each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "customerId")]
    pub customer_id: i32,
    pub subject: Option<String>,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

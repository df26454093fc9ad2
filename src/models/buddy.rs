use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A potential travel companion from the read-only catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buddy {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    pub location: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub email: String,
}

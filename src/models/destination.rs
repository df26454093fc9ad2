use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::quiz::{Accommodation, DestinationKind, GroupSize, TravelStyle};

/// A destination from the read-only catalog. `cost_tier` is a discrete
/// category: 1 = budget, 2 = mid-range, 3 = luxury.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub approximate_cost: String,
    pub cost_tier: u8,
    pub duration: String,
    pub group_sizes: Vec<GroupSize>,
    pub trip_highlights: Vec<String>,
    pub tags: Vec<String>,
    pub rating: f64,
    pub travel_styles: Vec<TravelStyle>,
    pub accommodation_types: Vec<Accommodation>,
    pub destination_types: Vec<DestinationKind>,
}

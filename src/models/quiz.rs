use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Culture,
    Relaxation,
    Nightlife,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    #[serde(rename = "mid-range")]
    MidRange,
    Luxury,
    Flexible,
}

impl BudgetTier {
    /// Discrete cost level used for destination budget-distance scoring.
    /// `Flexible` defaults to the middle tier.
    pub fn level(self) -> u8 {
        match self {
            BudgetTier::Budget => 1,
            BudgetTier::MidRange | BudgetTier::Flexible => 2,
            BudgetTier::Luxury => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    Hostel,
    Hotel,
    Airbnb,
    Camping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupSize {
    Solo,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    Beach,
    Mountains,
    Cities,
    Nature,
}

/// One completed preference quiz. Immutable once submitted: retaking the
/// quiz creates a fresh booking selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub travel_style: TravelStyle,
    pub budget: BudgetTier,
    pub accommodation: Accommodation,
    pub group_size: GroupSize,
    pub destination_type: DestinationKind,
}

use rand::Rng;
use serde::Serialize;

use crate::models::buddy::Buddy;
use crate::models::destination::Destination;
use crate::models::quiz::{Accommodation, BudgetTier, QuizAnswers, TravelStyle};

/// Buddy matches never report a perfect score.
pub const BUDDY_SCORE_CAP: u32 = 98;
pub const DESTINATION_SCORE_CAP: u32 = 100;
pub const PERFECT_MATCH_THRESHOLD: u8 = 80;
/// The variety bonus is drawn uniformly from 0..VARIETY_BONUS_BOUND.
const VARIETY_BONUS_BOUND: u32 = 15;

/// Travel-style answer, the buddy interest it pairs with, and the reason
/// shown to the user when the pairing fires. The answers are mutually
/// exclusive, so at most one pairing applies per buddy.
const STYLE_PAIRINGS: [(TravelStyle, &str, &str); 4] = [
    (
        TravelStyle::Adventure,
        "Hiking",
        "Both love adventure and outdoor activities",
    ),
    (
        TravelStyle::Culture,
        "Museums",
        "Shared passion for culture and history",
    ),
    (
        TravelStyle::Relaxation,
        "Spas",
        "Both prefer relaxing and luxury experiences",
    ),
    (
        TravelStyle::Nightlife,
        "Nightlife",
        "Both love nightlife and party scenes",
    ),
];

const ACCOMMODATION_PAIRINGS: [(&str, Accommodation); 3] = [
    ("Hostels", Accommodation::Hostel),
    ("Luxury Hotels", Accommodation::Hotel),
    ("Camping", Accommodation::Camping),
];

#[derive(Debug, Clone, Serialize)]
pub struct BuddyScore {
    pub score: u8,
    pub reasons: Vec<String>,
}

pub fn score_buddy(buddy: &Buddy, answers: &QuizAnswers, rng: &mut impl Rng) -> BuddyScore {
    let mut score: u32 = 0;
    let mut reasons: Vec<String> = Vec::new();
    let has = |keyword: &str| buddy.interests.iter().any(|interest| interest == keyword);

    for (style, keyword, reason) in STYLE_PAIRINGS {
        if answers.travel_style == style && has(keyword) {
            score += 25;
            reasons.push(reason.to_string());
        }
    }

    match answers.budget {
        BudgetTier::Budget if has("Hostels") => {
            score += 20;
            reasons.push("Similar budget-conscious travel style".to_string());
        }
        BudgetTier::Luxury if has("Luxury Hotels") => {
            score += 20;
            reasons.push("Both enjoy luxury travel experiences".to_string());
        }
        _ => {}
    }

    match answers.accommodation {
        Accommodation::Camping if has("Camping") => {
            score += 20;
            reasons.push("Both love outdoor camping adventures".to_string());
        }
        Accommodation::Hotel if has("Fine Dining") => {
            score += 20;
            reasons.push("Both prefer comfortable hotel stays".to_string());
        }
        _ => {}
    }

    score += rng.gen_range(0..VARIETY_BONUS_BOUND);

    if reasons.is_empty() {
        reasons.push("Compatible travel personalities".to_string());
    }

    BuddyScore {
        score: score.min(BUDDY_SCORE_CAP) as u8,
        reasons,
    }
}

pub fn score_destination(destination: &Destination, answers: &QuizAnswers, buddy: &Buddy) -> u8 {
    let mut score: u32 = 0;
    let buddy_has = |keyword: &str| buddy.interests.iter().any(|interest| interest == keyword);

    // Travel style: direct answer match, plus one inference from the
    // buddy's interests (independent of the direct match).
    if destination.travel_styles.contains(&answers.travel_style) {
        score += 15;
    }
    if STYLE_PAIRINGS
        .iter()
        .any(|(style, keyword, _)| buddy_has(keyword) && destination.travel_styles.contains(style))
    {
        score += 10;
    }

    // Budget distance between the answer tier and the destination tier.
    score += match destination.cost_tier.abs_diff(answers.budget.level()) {
        0 => 20,
        1 => 10,
        _ => 0,
    };

    if destination
        .accommodation_types
        .contains(&answers.accommodation)
    {
        score += 10;
    }
    if ACCOMMODATION_PAIRINGS
        .iter()
        .any(|(keyword, kind)| buddy_has(keyword) && destination.accommodation_types.contains(kind))
    {
        score += 5;
    }

    if destination.group_sizes.contains(&answers.group_size) {
        score += 15;
    }

    if destination
        .destination_types
        .contains(&answers.destination_type)
    {
        score += 15;
    }

    // Tag overlap: buddy interests whose lowercase form appears inside a
    // lowercased destination tag, 5 points each, capped at 10.
    let overlapping = buddy
        .interests
        .iter()
        .filter(|interest| {
            let needle = interest.to_lowercase();
            destination
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .count() as u32;
    score += (overlapping * 5).min(10);

    score.min(DESTINATION_SCORE_CAP) as u8
}

pub fn is_perfect_match(score: u8) -> bool {
    score >= PERFECT_MATCH_THRESHOLD
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredBuddy {
    #[serde(flatten)]
    pub buddy: Buddy,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Scores and ranks every buddy, highest first. The sort is stable, so ties
/// keep catalog order.
pub fn rank_buddies(
    buddies: &[Buddy],
    answers: &QuizAnswers,
    rng: &mut impl Rng,
) -> Vec<ScoredBuddy> {
    let mut ranked: Vec<ScoredBuddy> = buddies
        .iter()
        .map(|buddy| {
            let scored = score_buddy(buddy, answers, rng);
            ScoredBuddy {
                buddy: buddy.clone(),
                score: scored.score,
                reasons: scored.reasons,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredDestination {
    #[serde(flatten)]
    pub destination: Destination,
    pub score: u8,
    pub perfect_match: bool,
}

pub fn rank_destinations(
    destinations: &[Destination],
    answers: &QuizAnswers,
    buddy: &Buddy,
) -> Vec<ScoredDestination> {
    let mut ranked: Vec<ScoredDestination> = destinations
        .iter()
        .map(|destination| {
            let score = score_destination(destination, answers, buddy);
            ScoredDestination {
                destination: destination.clone(),
                score,
                perfect_match: is_perfect_match(score),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    use super::{
        is_perfect_match, rank_buddies, rank_destinations, score_buddy, score_destination,
    };
    use crate::catalog::Catalog;
    use crate::models::buddy::Buddy;
    use crate::models::destination::Destination;
    use crate::models::quiz::{
        Accommodation, BudgetTier, DestinationKind, GroupSize, QuizAnswers, TravelStyle,
    };

    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn answers(
        travel_style: TravelStyle,
        budget: BudgetTier,
        accommodation: Accommodation,
    ) -> QuizAnswers {
        QuizAnswers {
            travel_style,
            budget,
            accommodation,
            group_size: GroupSize::Small,
            destination_type: DestinationKind::Mountains,
        }
    }

    fn buddy_with_interests(interests: &[&str]) -> Buddy {
        Buddy {
            id: Uuid::from_u128(1),
            name: "Test Buddy".to_string(),
            age: 27,
            location: "Test City".to_string(),
            bio: "test".to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            email: "buddy@example.com".to_string(),
        }
    }

    fn destination(
        cost_tier: u8,
        travel_styles: &[TravelStyle],
        accommodation_types: &[Accommodation],
        group_sizes: &[GroupSize],
        destination_types: &[DestinationKind],
        tags: &[&str],
    ) -> Destination {
        Destination {
            id: Uuid::from_u128(2),
            name: "Test Destination".to_string(),
            description: "test".to_string(),
            approximate_cost: "₹10,000".to_string(),
            cost_tier,
            duration: "3-4 Days".to_string(),
            group_sizes: group_sizes.to_vec(),
            trip_highlights: vec![],
            tags: tags.iter().map(|s| s.to_string()).collect(),
            rating: 4.5,
            travel_styles: travel_styles.to_vec(),
            accommodation_types: accommodation_types.to_vec(),
            destination_types: destination_types.to_vec(),
        }
    }

    #[test]
    fn adventure_budget_camper_scores_65_with_three_reasons() {
        let user = answers(
            TravelStyle::Adventure,
            BudgetTier::Budget,
            Accommodation::Camping,
        );
        let buddy = buddy_with_interests(&["Hiking", "Hostels", "Camping"]);

        let scored = score_buddy(&buddy, &user, &mut zero_rng());

        assert_eq!(scored.score, 65);
        assert_eq!(scored.reasons.len(), 3);
    }

    #[test]
    fn no_pairing_yields_fallback_reason() {
        let user = answers(
            TravelStyle::Nightlife,
            BudgetTier::MidRange,
            Accommodation::Airbnb,
        );
        let buddy = buddy_with_interests(&["Knitting"]);

        let scored = score_buddy(&buddy, &user, &mut zero_rng());

        assert_eq!(scored.score, 0);
        assert_eq!(scored.reasons, vec!["Compatible travel personalities"]);
    }

    #[test]
    fn buddy_scores_stay_within_bounds_over_the_catalog() {
        let catalog = Catalog::builtin();
        let styles = [
            TravelStyle::Adventure,
            TravelStyle::Culture,
            TravelStyle::Relaxation,
            TravelStyle::Nightlife,
        ];
        let budgets = [
            BudgetTier::Budget,
            BudgetTier::MidRange,
            BudgetTier::Luxury,
            BudgetTier::Flexible,
        ];
        let accommodations = [
            Accommodation::Hostel,
            Accommodation::Hotel,
            Accommodation::Airbnb,
            Accommodation::Camping,
        ];

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for style in styles {
            for budget in budgets {
                for accommodation in accommodations {
                    let user = answers(style, budget, accommodation);
                    for buddy in catalog.buddies() {
                        let scored = score_buddy(buddy, &user, &mut rng);
                        assert!(scored.score <= 98);
                        assert!(!scored.reasons.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn destination_worked_example_scores_85_and_is_perfect() {
        let user = QuizAnswers {
            travel_style: TravelStyle::Adventure,
            budget: BudgetTier::Budget,
            accommodation: Accommodation::Camping,
            group_size: GroupSize::Small,
            destination_type: DestinationKind::Mountains,
        };
        let buddy = buddy_with_interests(&["Hiking"]);
        let dest = destination(
            1,
            &[TravelStyle::Adventure],
            &[Accommodation::Camping],
            &[GroupSize::Small],
            &[DestinationKind::Mountains],
            &["Mountains"],
        );

        // 15 style + 10 inferred + 20 budget + 10 accommodation + 15 group
        // + 15 type = 85; no buddy accommodation pairing, no tag overlap
        // ("hiking" is not a substring of "mountains").
        let score = score_destination(&dest, &user, &buddy);
        assert_eq!(score, 85);
        assert!(is_perfect_match(score));
    }

    #[test]
    fn perfect_match_boundary_is_inclusive_at_80() {
        assert!(is_perfect_match(80));
        assert!(!is_perfect_match(79));
    }

    #[test]
    fn destination_scoring_exact_80_is_perfect() {
        // 15 style + 20 budget + 10 accommodation + 15 group + 15 type
        // + 5 tag overlap = 80; the buddy interests infer no style.
        let user = QuizAnswers {
            travel_style: TravelStyle::Culture,
            budget: BudgetTier::MidRange,
            accommodation: Accommodation::Hotel,
            group_size: GroupSize::Small,
            destination_type: DestinationKind::Cities,
        };
        let buddy = buddy_with_interests(&["Shopping"]);
        let dest = destination(
            2,
            &[TravelStyle::Culture],
            &[Accommodation::Hotel, Accommodation::Airbnb],
            &[GroupSize::Small],
            &[DestinationKind::Cities],
            &["Shopping", "Heritage"],
        );

        let score = score_destination(&dest, &user, &buddy);
        assert_eq!(score, 80);
        assert!(is_perfect_match(score));
    }

    #[test]
    fn tag_overlap_bonus_is_capped_at_10() {
        let user = QuizAnswers {
            travel_style: TravelStyle::Nightlife,
            budget: BudgetTier::Luxury,
            accommodation: Accommodation::Airbnb,
            group_size: GroupSize::Large,
            destination_type: DestinationKind::Beach,
        };
        // Three overlapping interests would be 15 points uncapped.
        let buddy = buddy_with_interests(&["Beach", "Food", "Culture"]);
        let dest = destination(
            1,
            &[],
            &[],
            &[],
            &[],
            &["Beach Parties", "Street Food", "Culture"],
        );

        // Only the capped tag bonus applies; budget distance |1-3| gives 0.
        assert_eq!(score_destination(&dest, &user, &buddy), 10);
    }

    #[test]
    fn destination_scores_stay_within_bounds_over_the_catalog() {
        let catalog = Catalog::builtin();
        let user = QuizAnswers {
            travel_style: TravelStyle::Adventure,
            budget: BudgetTier::Budget,
            accommodation: Accommodation::Camping,
            group_size: GroupSize::Small,
            destination_type: DestinationKind::Mountains,
        };
        for buddy in catalog.buddies() {
            for dest in catalog.destinations() {
                assert!(score_destination(dest, &user, buddy) <= 100);
            }
        }
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let catalog = Catalog::builtin();
        let user = answers(
            TravelStyle::Adventure,
            BudgetTier::Budget,
            Accommodation::Camping,
        );

        let ranked = rank_buddies(catalog.buddies(), &user, &mut zero_rng());
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        // With a zero variety bonus the buddies with no pairing all score 0
        // and must keep their catalog order.
        let zeros: Vec<&str> = ranked
            .iter()
            .filter(|scored| scored.score == 0)
            .map(|scored| scored.buddy.name.as_str())
            .collect();
        let catalog_order: Vec<&str> = catalog
            .buddies()
            .iter()
            .filter(|buddy| {
                ranked
                    .iter()
                    .any(|scored| scored.score == 0 && scored.buddy.id == buddy.id)
            })
            .map(|buddy| buddy.name.as_str())
            .collect();
        assert_eq!(zeros, catalog_order);

        let buddy = &catalog.buddies()[0];
        let destinations = rank_destinations(catalog.destinations(), &user, buddy);
        for pair in destinations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

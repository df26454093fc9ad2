use uuid::Uuid;

use crate::models::buddy::Buddy;
use crate::models::destination::Destination;
use crate::models::quiz::{Accommodation, DestinationKind, GroupSize, TravelStyle};

/// Read-only candidate data. Safe to share without coordination; scoring
/// reads it, nothing mutates it.
pub struct Catalog {
    buddies: Vec<Buddy>,
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            buddies: builtin_buddies(),
            destinations: builtin_destinations(),
        }
    }

    pub fn buddies(&self) -> &[Buddy] {
        &self.buddies
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn buddy(&self, id: Uuid) -> Option<&Buddy> {
        self.buddies.iter().find(|buddy| buddy.id == id)
    }

    pub fn destination(&self, id: Uuid) -> Option<&Destination> {
        self.destinations.iter().find(|destination| destination.id == id)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn buddy(
    seed: u128,
    name: &str,
    age: u8,
    location: &str,
    bio: &str,
    interests: &[&str],
    email: &str,
) -> Buddy {
    Buddy {
        id: Uuid::from_u128(seed),
        name: name.to_string(),
        age,
        location: location.to_string(),
        bio: bio.to_string(),
        interests: strings(interests),
        email: email.to_string(),
    }
}

fn builtin_buddies() -> Vec<Buddy> {
    vec![
        buddy(
            0xb001,
            "Sarah Chen",
            24,
            "San Francisco, CA",
            "Adventure seeker and culture enthusiast who loves exploring hidden gems and trying local cuisines!",
            &["Photography", "Hiking", "Food Tours", "Museums"],
            "sarah.chen@email.com",
        ),
        buddy(
            0xb002,
            "Alex Rivera",
            26,
            "Austin, TX",
            "Budget traveler and backpacker who believes the best adventures come from spontaneous decisions.",
            &["Backpacking", "Hostels", "Street Food", "Local Music"],
            "alex.rivera@email.com",
        ),
        buddy(
            0xb003,
            "Emma Thompson",
            28,
            "New York, NY",
            "Luxury traveler who enjoys fine dining, spa retreats, and creating Instagram-worthy memories.",
            &["Luxury Hotels", "Fine Dining", "Shopping", "Spas"],
            "emma.thompson@email.com",
        ),
        buddy(
            0xb004,
            "Jake Martinez",
            23,
            "Miami, FL",
            "Nightlife enthusiast and party lover who knows the best clubs in every city!",
            &["Nightlife", "Beach Parties", "Festivals", "Dancing"],
            "jake.martinez@email.com",
        ),
        buddy(
            0xb005,
            "Maya Patel",
            25,
            "Seattle, WA",
            "Nature lover and outdoor enthusiast who prefers camping under the stars to city hotels.",
            &["Camping", "Rock Climbing", "National Parks", "Stargazing"],
            "maya.patel@email.com",
        ),
    ]
}

struct DestinationSpec<'a> {
    seed: u128,
    name: &'a str,
    description: &'a str,
    approximate_cost: &'a str,
    cost_tier: u8,
    duration: &'a str,
    group_sizes: &'a [GroupSize],
    trip_highlights: &'a [&'a str],
    tags: &'a [&'a str],
    rating: f64,
    travel_styles: &'a [TravelStyle],
    accommodation_types: &'a [Accommodation],
    destination_types: &'a [DestinationKind],
}

impl DestinationSpec<'_> {
    fn build(&self) -> Destination {
        Destination {
            id: Uuid::from_u128(self.seed),
            name: self.name.to_string(),
            description: self.description.to_string(),
            approximate_cost: self.approximate_cost.to_string(),
            cost_tier: self.cost_tier,
            duration: self.duration.to_string(),
            group_sizes: self.group_sizes.to_vec(),
            trip_highlights: strings(self.trip_highlights),
            tags: strings(self.tags),
            rating: self.rating,
            travel_styles: self.travel_styles.to_vec(),
            accommodation_types: self.accommodation_types.to_vec(),
            destination_types: self.destination_types.to_vec(),
        }
    }
}

fn builtin_destinations() -> Vec<Destination> {
    use Accommodation::{Airbnb, Camping, Hostel, Hotel};
    use DestinationKind::{Beach, Cities, Mountains, Nature};
    use GroupSize::{Large, Medium, Small, Solo};
    use TravelStyle::{Adventure, Culture, Nightlife, Relaxation};

    let specs = [
        DestinationSpec {
            seed: 0xd001,
            name: "Goa",
            description: "The beach paradise of India, famous for its Portuguese heritage, stunning coastline, vibrant nightlife, and laid-back vibe.",
            approximate_cost: "₹15,000 - ₹25,000",
            cost_tier: 2,
            duration: "4-5 Days",
            group_sizes: &[Solo, Small, Medium, Large],
            trip_highlights: &["Beach hopping", "Water sports", "Beach parties", "Portuguese forts", "Seafood delicacies"],
            tags: &["Beach", "Nightlife", "Adventure", "Culture", "Food"],
            rating: 4.7,
            travel_styles: &[Relaxation, Nightlife, Adventure],
            accommodation_types: &[Hostel, Hotel, Airbnb],
            destination_types: &[Beach],
        },
        DestinationSpec {
            seed: 0xd002,
            name: "Manali",
            description: "A high-altitude Himalayan resort town famous for trekking, skiing, and stunning mountain views.",
            approximate_cost: "₹20,000 - ₹35,000",
            cost_tier: 2,
            duration: "5-6 Days",
            group_sizes: &[Solo, Small, Medium],
            trip_highlights: &["Trekking", "Paragliding", "Snow activities", "Camping", "Mountain biking"],
            tags: &["Mountains", "Adventure", "Nature", "Trekking", "Camping"],
            rating: 4.8,
            travel_styles: &[Adventure],
            accommodation_types: &[Hotel, Camping, Airbnb],
            destination_types: &[Mountains, Nature],
        },
        DestinationSpec {
            seed: 0xd003,
            name: "Jaipur",
            description: "The Pink City of India, rich in royal heritage, magnificent forts, palaces, and vibrant bazaars.",
            approximate_cost: "₹12,000 - ₹22,000",
            cost_tier: 2,
            duration: "3-4 Days",
            group_sizes: &[Solo, Small, Medium, Large],
            trip_highlights: &["Palace tours", "Heritage walks", "Shopping in bazaars", "Rajasthani cuisine", "Cultural shows"],
            tags: &["Culture", "Heritage", "Cities", "Shopping", "Food"],
            rating: 4.6,
            travel_styles: &[Culture],
            accommodation_types: &[Hotel, Airbnb],
            destination_types: &[Cities],
        },
        DestinationSpec {
            seed: 0xd004,
            name: "Rishikesh",
            description: "The Yoga Capital of the World, nestled in the Himalayas beside the Ganges.",
            approximate_cost: "₹10,000 - ₹20,000",
            cost_tier: 1,
            duration: "3-4 Days",
            group_sizes: &[Solo, Small, Medium],
            trip_highlights: &["River rafting", "Bungee jumping", "Yoga retreats", "Camping by Ganges", "Trekking"],
            tags: &["Adventure", "Nature", "Relaxation", "Camping", "Mountains"],
            rating: 4.7,
            travel_styles: &[Adventure, Relaxation],
            accommodation_types: &[Hostel, Camping, Hotel],
            destination_types: &[Mountains, Nature],
        },
        DestinationSpec {
            seed: 0xd005,
            name: "Kerala Backwaters",
            description: "A network of tranquil lagoons, lakes, and canals lined with palm trees. Houseboat cruises, Ayurveda, and serene natural beauty.",
            approximate_cost: "₹25,000 - ₹40,000",
            cost_tier: 3,
            duration: "4-5 Days",
            group_sizes: &[Small, Medium],
            trip_highlights: &["Houseboat cruise", "Ayurvedic spa", "Village tours", "Seafood delicacies", "Beach relaxation"],
            tags: &["Nature", "Relaxation", "Beach", "Luxury", "Culture"],
            rating: 4.9,
            travel_styles: &[Relaxation],
            accommodation_types: &[Hotel, Airbnb],
            destination_types: &[Nature, Beach],
        },
        DestinationSpec {
            seed: 0xd006,
            name: "Ladakh",
            description: "The Land of High Passes, offering dramatic landscapes, Buddhist monasteries, and thrilling road trips.",
            approximate_cost: "₹35,000 - ₹50,000",
            cost_tier: 3,
            duration: "6-7 Days",
            group_sizes: &[Small, Medium],
            trip_highlights: &["Bike trips", "Lake camping", "Monastery visits", "High-altitude trekking", "Stargazing"],
            tags: &["Adventure", "Mountains", "Nature", "Camping", "Trekking"],
            rating: 4.9,
            travel_styles: &[Adventure],
            accommodation_types: &[Hotel, Camping],
            destination_types: &[Mountains, Nature],
        },
        DestinationSpec {
            seed: 0xd007,
            name: "Udaipur",
            description: "The City of Lakes, known for its romantic palaces, lakeside views, and regal heritage.",
            approximate_cost: "₹18,000 - ₹35,000",
            cost_tier: 3,
            duration: "3-4 Days",
            group_sizes: &[Solo, Small, Medium],
            trip_highlights: &["Palace tours", "Boat rides", "Rooftop dining", "Heritage hotels", "Shopping"],
            tags: &["Culture", "Luxury", "Heritage", "Cities", "Relaxation"],
            rating: 4.8,
            travel_styles: &[Culture, Relaxation],
            accommodation_types: &[Hotel],
            destination_types: &[Cities],
        },
        DestinationSpec {
            seed: 0xd008,
            name: "Andaman & Nicobar Islands",
            description: "Tropical paradise with pristine beaches, coral reefs, and crystal-clear waters.",
            approximate_cost: "₹35,000 - ₹55,000",
            cost_tier: 3,
            duration: "5-6 Days",
            group_sizes: &[Small, Medium],
            trip_highlights: &["Scuba diving", "Snorkeling", "Beach hopping", "Water sports", "Island camping"],
            tags: &["Beach", "Adventure", "Nature", "Luxury", "Islands"],
            rating: 4.8,
            travel_styles: &[Adventure, Relaxation],
            accommodation_types: &[Hotel, Airbnb],
            destination_types: &[Beach, Nature],
        },
        DestinationSpec {
            seed: 0xd009,
            name: "Varanasi",
            description: "The spiritual capital of India, one of the oldest living cities. Ancient rituals, ghats, temples, and profound spirituality.",
            approximate_cost: "₹10,000 - ₹18,000",
            cost_tier: 1,
            duration: "2-3 Days",
            group_sizes: &[Solo, Small, Medium],
            trip_highlights: &["Boat rides at sunrise", "Temple visits", "Cultural performances", "Food tours", "Photography"],
            tags: &["Culture", "Heritage", "Cities", "Food", "Spiritual"],
            rating: 4.5,
            travel_styles: &[Culture],
            accommodation_types: &[Hostel, Hotel],
            destination_types: &[Cities],
        },
        DestinationSpec {
            seed: 0xd00a,
            name: "Hampi",
            description: "Ancient ruins of the Vijayanagara Empire, a UNESCO World Heritage Site.",
            approximate_cost: "₹12,000 - ₹20,000",
            cost_tier: 1,
            duration: "2-3 Days",
            group_sizes: &[Solo, Small, Medium],
            trip_highlights: &["Temple exploration", "Boulder climbing", "Sunset views", "Heritage walks", "Photography"],
            tags: &["Culture", "Heritage", "Nature", "Adventure", "Budget"],
            rating: 4.7,
            travel_styles: &[Culture, Adventure],
            accommodation_types: &[Hostel, Hotel],
            destination_types: &[Nature],
        },
        DestinationSpec {
            seed: 0xd00b,
            name: "Mumbai",
            description: "The City of Dreams, India's financial capital with Bollywood glamour, colonial architecture, and vibrant nightlife.",
            approximate_cost: "₹15,000 - ₹30,000",
            cost_tier: 2,
            duration: "3-4 Days",
            group_sizes: &[Solo, Small, Medium, Large],
            trip_highlights: &["City tours", "Food walks", "Nightlife", "Shopping", "Beach visits"],
            tags: &["Cities", "Nightlife", "Food", "Culture", "Beach"],
            rating: 4.5,
            travel_styles: &[Nightlife, Culture],
            accommodation_types: &[Hostel, Hotel, Airbnb],
            destination_types: &[Cities, Beach],
        },
        DestinationSpec {
            seed: 0xd00c,
            name: "Spiti Valley",
            description: "A cold desert mountain valley in the Himalayas, known for its stark beauty, ancient monasteries, and off-beat adventure.",
            approximate_cost: "₹30,000 - ₹45,000",
            cost_tier: 2,
            duration: "7-8 Days",
            group_sizes: &[Small, Medium],
            trip_highlights: &["High-altitude trekking", "Camping", "Monastery visits", "Village homestays", "Stargazing"],
            tags: &["Adventure", "Mountains", "Nature", "Camping", "Offbeat"],
            rating: 4.9,
            travel_styles: &[Adventure],
            accommodation_types: &[Camping, Hotel],
            destination_types: &[Mountains, Nature],
        },
    ];

    specs.iter().map(DestinationSpec::build).collect()
}

#[cfg(test)]
mod tests {
    use super::Catalog;

    #[test]
    fn builtin_catalog_is_populated() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.buddies().len(), 5);
        assert_eq!(catalog.destinations().len(), 12);
    }

    #[test]
    fn lookups_by_id_round_trip() {
        let catalog = Catalog::builtin();
        let buddy = &catalog.buddies()[0];
        assert_eq!(catalog.buddy(buddy.id).unwrap().name, buddy.name);

        let destination = &catalog.destinations()[0];
        assert_eq!(catalog.destination(destination.id).unwrap().name, destination.name);
    }

    #[test]
    fn cost_tiers_are_valid_categories() {
        let catalog = Catalog::builtin();
        assert!(catalog
            .destinations()
            .iter()
            .all(|destination| (1..=3).contains(&destination.cost_tier)));
    }
}

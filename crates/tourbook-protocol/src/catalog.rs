//! Bookable destinations known to the client without asking the backend

use tourbook_types::{Destination, DifficultyLevel};

/// A destination choice on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationOption {
    /// Value sent as `destination`
    pub slug: &'static str,
    /// Text shown to the visitor
    pub label: &'static str,
}

/// Destinations offered by the booking form
pub const DESTINATION_OPTIONS: [DestinationOption; 6] = [
    DestinationOption {
        slug: "maasai-mara-safari",
        label: "Maasai Mara Safari",
    },
    DestinationOption {
        slug: "mount-kenya-expedition",
        label: "Mount Kenya Expedition",
    },
    DestinationOption {
        slug: "diani-beach-coastal",
        label: "Diani Beach",
    },
    DestinationOption {
        slug: "hells-gate-national-park",
        label: "Hell's Gate National Park",
    },
    DestinationOption {
        slug: "amboseli-national-park",
        label: "Amboseli National Park",
    },
    DestinationOption {
        slug: "lake-nakuru",
        label: "Lake Nakuru",
    },
];

impl DestinationOption {
    /// Look up a form option by slug
    #[must_use]
    pub fn find(slug: &str) -> Option<Self> {
        DESTINATION_OPTIONS
            .into_iter()
            .find(|option| option.slug == slug)
    }
}

struct FallbackEntry {
    slug: &'static str,
    name: &'static str,
    image: &'static str,
    description: &'static str,
    duration: &'static str,
    highlights: &'static [&'static str],
    difficulty: DifficultyLevel,
}

const FALLBACK: [FallbackEntry; 6] = [
    FallbackEntry {
        slug: "maasai-mara-safari",
        name: "Maasai Mara Safari",
        image: "https://images.unsplash.com/photo-1516426122078-c23e76319801?w=400",
        description: "Experience the Great Migration and the Big Five on the open savannah.",
        duration: "3 days",
        highlights: &["Big Five", "Great Migration", "Maasai Culture"],
        difficulty: DifficultyLevel::Easy,
    },
    FallbackEntry {
        slug: "mount-kenya-expedition",
        name: "Mount Kenya Expedition",
        image: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400",
        description: "Conquer Africa's second-highest peak through forest, moorland and glacier.",
        duration: "5 days",
        highlights: &["Mountain Climbing", "Alpine Lakes", "Rare Wildlife"],
        difficulty: DifficultyLevel::Challenging,
    },
    FallbackEntry {
        slug: "diani-beach-coastal",
        name: "Diani Beach",
        image: "https://images.unsplash.com/photo-1589979481223-deb893043163?w=400",
        description: "White sand, coral reefs and Swahili coastal cuisine.",
        duration: "4 days",
        highlights: &["Snorkeling", "Colobus Monkeys", "Beach Resorts"],
        difficulty: DifficultyLevel::Easy,
    },
    FallbackEntry {
        slug: "hells-gate-national-park",
        name: "Hell's Gate National Park",
        image: "https://images.unsplash.com/photo-1547970810-dc1eac37d174?w=400",
        description: "Cycle among zebra and giraffe, then hike the dramatic Lower Gorge.",
        duration: "1 day",
        highlights: &["Cycling Safari", "Gorge Hike", "Rock Climbing"],
        difficulty: DifficultyLevel::Moderate,
    },
    FallbackEntry {
        slug: "amboseli-national-park",
        name: "Amboseli National Park",
        image: "https://images.unsplash.com/photo-1535941339077-2dd1c7963098?w=400",
        description: "Large elephant herds beneath the snows of Kilimanjaro.",
        duration: "2 days",
        highlights: &["Elephants", "Kilimanjaro Views", "Swamps"],
        difficulty: DifficultyLevel::Easy,
    },
    FallbackEntry {
        slug: "lake-nakuru",
        name: "Lake Nakuru",
        image: "https://images.unsplash.com/photo-1612892483236-52d32a0e0ac1?w=400",
        description: "Flamingo shores and a rhino sanctuary in the Rift Valley.",
        duration: "2 days",
        highlights: &["Flamingos", "Rhino Sanctuary", "Baboon Cliff"],
        difficulty: DifficultyLevel::Easy,
    },
];

/// Destinations shown when the backend cannot be reached
#[must_use]
pub fn fallback_destinations() -> Vec<Destination> {
    FALLBACK
        .iter()
        .zip(1_i64..)
        .map(|(entry, id)| Destination {
            id,
            name: entry.name.to_string(),
            slug: entry.slug.to_string(),
            image_url: Some(entry.image.to_string()),
            description: Some(entry.description.to_string()),
            duration: Some(entry.duration.to_string()),
            highlights: entry.highlights.iter().map(ToString::to_string).collect(),
            price_range: None,
            difficulty_level: Some(entry.difficulty),
            best_time_to_visit: None,
            is_featured: id <= 2,
            view_count: 0,
            created_at: None,
        })
        .collect()
}

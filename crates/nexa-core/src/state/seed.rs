//! Built-in demo data used for the default state.

use crate::profile::{PrivacySettings, Profile};

const PHOTO_BASE: &str = "https://picsum.photos/seed";

fn photo(seed: &str) -> String {
    format!("{PHOTO_BASE}/{seed}/600/800")
}

fn candidate(
    id: &str,
    name: &str,
    headline: &str,
    city: &str,
    sector: &str,
    bio: &str,
    tags: &[&str],
) -> Profile {
    // Photo seeds follow the numeric part of the id: u101 -> 101 and 201.
    let number: u32 = id.trim_start_matches('u').parse().unwrap_or(0);
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        headline: headline.to_string(),
        city: city.to_string(),
        sector: sector.to_string(),
        bio: bio.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        photos: vec![photo(&number.to_string()), photo(&(number + 100).to_string())],
        privacy: None,
    }
}

/// The signed-in user's starting profile.
pub fn demo_self_profile() -> Profile {
    Profile {
        id: "me-001".to_string(),
        name: "Emir".to_string(),
        headline: "Product Designer".to_string(),
        city: "Istanbul".to_string(),
        sector: "Tech".to_string(),
        bio: "Curious, coffee & galleries. Open to collabs.".to_string(),
        tags: vec![
            "Expanding my circle".to_string(),
            "Open to collaborations".to_string(),
        ],
        photos: vec![photo("me1"), photo("me2")],
        privacy: Some(PrivacySettings::default()),
    }
}

/// The demo candidate pool, in presentation order.
pub fn demo_candidate_pool() -> Vec<Profile> {
    vec![
        candidate(
            "u101",
            "Aylin Yılmaz",
            "Software Engineer @ Nova",
            "Istanbul",
            "Tech",
            "Into art, AI, and coffee tastings.",
            &["Expanding my circle", "Open to collaborations", "New experiences"],
        ),
        candidate(
            "u102",
            "Kerem Arslan",
            "VC Analyst @ Atlas",
            "London",
            "Finance",
            "Early-stage, fintech, and tennis.",
            &["Expanding my circle", "New experiences"],
        ),
        candidate(
            "u103",
            "Lara Demir",
            "Art Director @ Lumen",
            "Berlin",
            "Media",
            "Galleries, weekend markets, film photography.",
            &["Open to collaborations", "New experiences"],
        ),
        candidate(
            "u104",
            "Mert Kaya",
            "Founder @ Echo",
            "Istanbul",
            "Tech",
            "Building SaaS, running, third-wave coffee.",
            &["Expanding my circle", "Open to collaborations"],
        ),
        candidate(
            "u105",
            "Selin Aydın",
            "Growth Lead @ Nimbus",
            "NYC",
            "Media",
            "Performance, PLG, and ramen maps.",
            &["New experiences"],
        ),
        candidate(
            "u106",
            "Cem Ergin",
            "Product Manager @ Atlas",
            "London",
            "Tech",
            "Climbing, product strategy, podcasts.",
            &["Open to collaborations"],
        ),
        candidate(
            "u107",
            "Aslı Koç",
            "Fashion Buyer",
            "Istanbul",
            "Fashion",
            "Textiles, color stories, museum passes.",
            &["Expanding my circle"],
        ),
        candidate(
            "u108",
            "Deniz Şahin",
            "Game Designer",
            "Berlin",
            "Gaming",
            "Indie titles, board games, espresso shots.",
            &["Open to collaborations", "New experiences"],
        ),
        candidate(
            "u109",
            "Baran Uzun",
            "Data Scientist @ Pixel",
            "Ankara",
            "Tech",
            "ML ops, jazz vinyl, city walks.",
            &["Expanding my circle"],
        ),
        candidate(
            "u110",
            "Ece Öztürk",
            "UX Researcher",
            "London",
            "Tech",
            "Field studies, plants, and croissants.",
            &["New experiences", "Open to collaborations"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_displayable_and_unique() {
        let pool = demo_candidate_pool();
        let mut ids: Vec<&str> = pool.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), pool.len());
        for profile in &pool {
            profile.validate().unwrap();
        }
        assert_eq!(
            pool[0].photos,
            vec![
                "https://picsum.photos/seed/101/600/800",
                "https://picsum.photos/seed/201/600/800"
            ]
        );
    }

    #[test]
    fn test_self_profile_is_valid() {
        demo_self_profile().validate().unwrap();
    }
}

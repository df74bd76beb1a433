use nexa_core::matching::Match;
use nexa_core::messaging::Message;
use nexa_core::profile::Profile;

/// One-line profile summary.
pub fn profile_line(profile: &Profile) -> String {
    format!(
        "{} {} - {} ({}, {})",
        profile.id, profile.name, profile.headline, profile.city, profile.sector
    )
}

/// Multi-line profile card.
pub fn print_profile(profile: &Profile) {
    println!("{}", profile_line(profile));
    if !profile.bio.is_empty() {
        println!("  {}", profile.bio);
    }
    if !profile.tags.is_empty() {
        println!("  tags: {}", profile.tags.join(", "));
    }
    if let Some(cover) = profile.primary_photo() {
        println!("  cover: {cover}");
    }
    for (index, photo) in profile.photos.iter().enumerate().skip(1) {
        println!("  photo[{index}]: {photo}");
    }
}

pub fn match_line(matched: &Match, profile: Option<&Profile>) -> String {
    let name = profile.map_or("(unknown profile)", |p| p.name.as_str());
    format!("{} {} [{}]", matched.id, name, matched.connection_type)
}

pub fn message_line(message: &Message, self_id: &str) -> String {
    let who = if message.is_from(self_id) { "you" } else { message.sender_id.as_str() };
    format!(
        "[{}] {}: {}",
        message.created_at.format("%Y-%m-%d %H:%M"),
        who,
        message.text
    )
}

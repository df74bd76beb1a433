use anyhow::Result;
use nexa_application::NexaApp;
use nexa_core::deck::FilterAxis;
use nexa_core::matching::Decision;

use super::utils::{match_line, print_profile, profile_line};

pub fn next(app: &NexaApp) {
    match app.swipe.current_candidate() {
        Some(profile) => print_profile(&profile),
        None if !app.store.read(|s| s.is_approved()) => {
            println!("Browsing opens once your application is approved.")
        }
        None => println!("No more profiles. Try clearing filters or resetting the deck."),
    }
}

pub fn decide(app: &NexaApp, decision: Decision, profile_id: Option<&str>) -> Result<()> {
    let outcome = match profile_id {
        Some(id) => app.swipe.decide_on(id, decision)?,
        None => app.swipe.decide(decision)?,
    };

    println!("{:?}: {}", outcome.decision, profile_line(&outcome.profile));
    if let Some(matched) = &outcome.new_match {
        println!("It's a match! {}", match_line(matched, Some(&outcome.profile)));
    }
    Ok(())
}

pub fn explore(app: &NexaApp) {
    let profiles = app.swipe.explore();
    if profiles.is_empty() {
        println!("Nothing to explore.");
    }
    let state = app.store.current();
    for profile in profiles {
        let mark = if state.liked_ids.contains(&profile.id) {
            "+"
        } else if state.disliked_ids.contains(&profile.id) {
            "-"
        } else {
            " "
        };
        println!("{mark} {}", profile_line(&profile));
    }
}

pub fn set_filter(app: &NexaApp, axis: FilterAxis, value: &str) -> Result<()> {
    app.swipe.set_filter(axis, value)?;
    println!("{} deck profiles left", app.swipe.available().len());
    Ok(())
}

pub fn clear_filters(app: &NexaApp) {
    app.swipe.clear_filters();
    println!("Filters cleared");
}

pub fn filter_options(app: &NexaApp, axis: FilterAxis) {
    for option in app.swipe.filter_options(axis) {
        println!("{option}");
    }
}

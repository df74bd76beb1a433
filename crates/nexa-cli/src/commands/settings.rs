use anyhow::Result;
use nexa_application::NexaApp;
use nexa_core::deck::available_profiles;
use nexa_infrastructure::ConfigService;

pub fn init(config_service: &ConfigService) -> Result<()> {
    if config_service.write_default_if_missing()? {
        println!("Wrote {}", config_service.path().display());
    } else {
        println!("{} already exists", config_service.path().display());
    }
    Ok(())
}

pub fn status(app: &NexaApp, json: bool) -> Result<()> {
    let state = app.store.current();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let auth = match (&state.auth.identity, &state.auth.provider) {
        (Some(identity), Some(provider)) if state.auth.is_signed_in => {
            format!("signed in as {identity} via {provider}")
        }
        _ if state.auth.is_signed_in => "signed in".to_string(),
        _ => "signed out".to_string(),
    };
    println!("account:   {auth}, application {}", state.user_status);
    println!("demo mode: {}", if state.demo_mode { "on" } else { "off" });
    println!(
        "filters:   city={} sector={}",
        state.filters.city, state.filters.sector
    );
    println!(
        "deck:      {} left, {} liked, {} passed",
        available_profiles(&state).len(),
        state.liked_ids.len(),
        state.disliked_ids.len()
    );
    println!(
        "matches:   {} (selected: {})",
        state.matches.len(),
        state.selected_match_id.as_deref().unwrap_or("none")
    );
    Ok(())
}

pub fn demo(app: &NexaApp, enabled: bool) {
    app.settings.set_demo_mode(enabled);
    println!("Demo mode {}", if enabled { "on" } else { "off" });
}

pub fn seed(app: &NexaApp) {
    let state = app.settings.seed_demo_data();
    println!("Demo data restored: {} profiles", state.candidate_pool.len());
}

pub fn reset_deck(app: &NexaApp) {
    app.settings.reset_deck();
    println!("Deck reset");
}

pub fn reset_matches(app: &NexaApp) {
    app.settings.reset_matches();
    println!("Matches reset");
}

pub async fn factory_reset(app: &NexaApp) -> Result<()> {
    app.settings.factory_reset().await?;
    println!("All data cleared");
    Ok(())
}

use anyhow::{Result, anyhow};
use nexa_application::NexaApp;

use super::utils::{match_line, message_line};

pub fn matches(app: &NexaApp) {
    let conversations = app.messaging.conversations();
    if conversations.is_empty() {
        println!("No matches yet.");
    }
    for conversation in conversations {
        let marker = if conversation.selected { "*" } else { " " };
        println!(
            "{marker} {}",
            match_line(&conversation.matched, conversation.profile.as_ref())
        );
        if let Some(last) = &conversation.last_message {
            println!("    {}", last.text);
        }
    }
}

pub fn select(app: &NexaApp, match_id: &str) -> Result<()> {
    app.messaging.select(match_id)?;
    println!("Selected {match_id}");
    Ok(())
}

pub fn send(app: &NexaApp, text: &str, match_id: Option<&str>) -> Result<()> {
    let message = match match_id {
        Some(id) => app.messaging.send_to(id, text)?,
        None => app.messaging.send(text)?,
    };
    let self_id = app.profile.me().id;
    println!("{}", message_line(&message, &self_id));
    Ok(())
}

pub fn thread(app: &NexaApp, match_id: Option<&str>) -> Result<()> {
    let match_id = match match_id {
        Some(id) => id.to_string(),
        None => app
            .messaging
            .selected()
            .map(|m| m.id)
            .ok_or_else(|| anyhow!("No conversation selected; pass a match id"))?,
    };

    let profile = app.messaging.matched_profile(&match_id);
    let matched = app
        .store
        .read(|s| s.find_match(&match_id).cloned())
        .ok_or_else(|| anyhow!("Unknown match '{match_id}'"))?;
    println!("{}", match_line(&matched, profile.as_ref()));

    let self_id = app.profile.me().id;
    let messages = app.messaging.thread(&match_id);
    if messages.is_empty() {
        println!("  (no messages yet)");
    }
    for message in messages {
        println!("  {}", message_line(&message, &self_id));
    }
    Ok(())
}

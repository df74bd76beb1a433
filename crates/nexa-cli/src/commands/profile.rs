use anyhow::Result;
use nexa_application::NexaApp;
use nexa_core::profile::Profile;

use super::utils::print_profile;

/// Fields given on the command line; `None` keeps the current value.
pub struct FieldEdits {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub city: Option<String>,
    pub sector: Option<String>,
    pub bio: Option<String>,
}

pub fn show(app: &NexaApp) {
    let me = app.profile.me();
    print_profile(&me);
    let privacy = me.effective_privacy();
    println!(
        "  public={} visible_by_city={} visible_by_sector={}",
        privacy.public, privacy.visible_by_city, privacy.visible_by_sector
    );
}

pub fn edit(app: &NexaApp, edits: FieldEdits) -> Result<()> {
    let me = app.profile.edit(|form| {
        let FieldEdits {
            name,
            headline,
            city,
            sector,
            bio,
        } = edits;
        for (slot, value) in [
            (&mut form.name, name),
            (&mut form.headline, headline),
            (&mut form.city, city),
            (&mut form.sector, sector),
            (&mut form.bio, bio),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    })?;
    print_profile(&me);
    Ok(())
}

pub fn add_tag(app: &NexaApp, tag: &str) -> Result<()> {
    print_tags(&app.profile.add_tag(tag)?);
    Ok(())
}

pub fn remove_tag(app: &NexaApp, tag: &str) {
    print_tags(&app.profile.remove_tag(tag));
}

pub fn add_photo(app: &NexaApp, url: &str) -> Result<()> {
    print_profile(&app.profile.add_photo(url)?);
    Ok(())
}

pub fn remove_photo(app: &NexaApp, index: usize) -> Result<()> {
    print_profile(&app.profile.remove_photo(index)?);
    Ok(())
}

pub fn privacy(
    app: &NexaApp,
    public: Option<bool>,
    visible_by_city: Option<bool>,
    visible_by_sector: Option<bool>,
) {
    let mut privacy = app.profile.me().effective_privacy();
    if let Some(value) = public {
        privacy.public = value;
    }
    if let Some(value) = visible_by_city {
        privacy.visible_by_city = value;
    }
    if let Some(value) = visible_by_sector {
        privacy.visible_by_sector = value;
    }
    app.profile.set_privacy(privacy);
    show(app);
}

fn print_tags(me: &Profile) {
    println!("tags: {}", me.tags.join(", "));
}

use nexa_application::NexaApp;
use nexa_core::state::{SignInEvent, UserStatus};

pub fn sign_in(app: &NexaApp, provider: &str, identity: &str) {
    let state = app.account.on_sign_in(&SignInEvent {
        is_signed_in: true,
        provider: provider.to_string(),
        identity: identity.to_string(),
    });
    println!(
        "Signed in as {identity} via {provider}; application {}",
        state.user_status
    );
}

pub fn sign_out(app: &NexaApp) {
    app.account.sign_out();
    println!("Signed out");
}

pub fn set_status(app: &NexaApp, status: UserStatus) {
    app.account.set_status(status);
    println!("Application {status}");
}

use studio_client::{Navigator, Notifier, LOGIN_PATH};
use tracing::debug;

pub(crate) struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: &str) {
        debug!(location = %location, "navigating");
        if location == LOGIN_PATH {
            eprintln!("Signed out. Run `studio login` to sign in again.");
        }
    }
}

pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

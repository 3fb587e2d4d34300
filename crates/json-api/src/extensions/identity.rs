//! Authenticated identity depot helpers.

use salvo::prelude::{Depot, StatusError};

const USERNAME_KEY: &str = "ampera.username";

/// Accessors for the username the auth middleware resolved.
pub(crate) trait IdentityExt {
    fn insert_username(&mut self, username: String);

    fn username_or_401(&self) -> Result<&str, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_username(&mut self, username: String) {
        self.insert(USERNAME_KEY, username);
    }

    fn username_or_401(&self) -> Result<&str, StatusError> {
        self.get::<String>(USERNAME_KEY)
            .map(String::as_str)
            .map_err(|_ignored| {
                StatusError::unauthorized().brief("Missing authenticated user")
            })
    }
}

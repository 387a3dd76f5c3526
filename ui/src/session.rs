//! The access token and cached user, as left in `localStorage` by whoever
//! signed the user in.

use payloads::responses::UserProfile;
use web_sys::Storage;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Where to send users whose session is gone. `LOGIN_URL` at build time,
/// else the built-in login page.
pub fn login_url() -> Option<&'static str> {
    option_env!("LOGIN_URL")
}

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}

pub fn set_token(token: &str) {
    if let Some(storage) = storage()
        && let Err(e) = storage.set_item(TOKEN_KEY, token.trim())
    {
        tracing::warn!("could not store token: {e:?}");
    }
}

/// The profile cached from the last successful fetch, shown while the
/// fresh one loads.
pub fn cached_user() -> Option<UserProfile> {
    let raw = storage()?.get_item(USER_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("ignoring cached user: {e}");
            None
        }
    }
}

pub fn cache_user(user: &UserProfile) {
    let Some(storage) = storage() else { return };
    match serde_json::to_string(user) {
        Ok(raw) => {
            let _ = storage.set_item(USER_KEY, &raw);
        }
        Err(e) => tracing::warn!("could not cache user: {e}"),
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

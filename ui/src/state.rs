use payloads::responses::UserProfile;
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default, Debug)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(UserProfile),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    /// Managed by use_profile.
    pub auth_state: AuthState,
}

impl State {
    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.auth_state {
            AuthState::LoggedIn(profile) => Some(profile),
            AuthState::LoggedOut | AuthState::Unknown => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn login(&mut self, profile: UserProfile) {
        self.auth_state = AuthState::LoggedIn(profile);
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}

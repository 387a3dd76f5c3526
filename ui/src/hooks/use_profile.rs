use forms::Feedback;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use super::redirect_to_login;
use crate::{AuthState, State, get_api_client, session};

/// Load the signed-in user into the store once per app start.
///
/// The cached copy from `localStorage` is shown straight away. A 401 ends
/// the session: storage is cleared and the user is sent to sign in. Other
/// failures keep whatever is already shown.
#[hook]
pub fn use_profile() {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator().unwrap();

    use_effect_with((), move |_| {
        if session::token().is_none() {
            dispatch.reduce_mut(State::logout);
            return;
        }
        if let Some(user) = session::cached_user() {
            dispatch.reduce_mut(|state| state.login(user));
        }

        yew::platform::spawn_local(async move {
            let api_client = get_api_client();
            match api_client.get_profile().await {
                Ok(profile) => {
                    session::cache_user(&profile);
                    dispatch.reduce_mut(|state| state.login(profile));
                }
                Err(e) => match Feedback::from_error(&e) {
                    Feedback::SessionExpired => {
                        tracing::info!("session expired");
                        session::clear();
                        dispatch.reduce_mut(State::logout);
                        redirect_to_login(&navigator);
                    }
                    _ => {
                        tracing::warn!("failed to load profile: {e}");
                        dispatch.reduce_mut(|state| {
                            if state.auth_state == AuthState::Unknown {
                                state.logout();
                            }
                        });
                    }
                },
            }
        });
    });
}

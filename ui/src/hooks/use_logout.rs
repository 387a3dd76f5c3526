use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State, get_api_client, session};

/// Send the user to sign in again: `LOGIN_URL` when one is configured,
/// else the built-in login page.
pub fn redirect_to_login(navigator: &Navigator) {
    match session::login_url() {
        Some(url) => {
            if let Some(window) = web_sys::window()
                && let Err(e) = window.location().set_href(url)
            {
                tracing::error!("could not leave for {url}: {e:?}");
            }
        }
        None => navigator.push(&Route::Login),
    }
}

#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator().unwrap();

    Callback::from(move |_| {
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();

        yew::platform::spawn_local(async move {
            let api_client = get_api_client();
            // the local session goes either way
            if let Err(e) = api_client.logout().await {
                tracing::warn!("logout request failed: {e}");
            }
            session::clear();
            dispatch.reduce_mut(State::logout);
            redirect_to_login(&navigator);
        });
    })
}

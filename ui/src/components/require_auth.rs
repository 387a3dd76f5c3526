use payloads::responses::UserProfile;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, Route, State};

/// Renders `render` with the signed-in user, a spinner while the profile
/// is loading, or a pointer to the login page once it is known there is no
/// session.
#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub render: Callback<UserProfile, Html>,
}

#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let (state, _) = use_store::<State>();

    match &state.auth_state {
        AuthState::LoggedIn(profile) => props.render.emit(profile.clone()),
        AuthState::Unknown => html! {
            <div class="text-center py-8">
                <div class="inline-block animate-spin rounded-full h-8 w-8
                            border-2 border-neutral-900 border-t-transparent">
                </div>
            </div>
        },
        AuthState::LoggedOut => html! {
            <div class="text-center py-12 space-y-2">
                <p>{"You need to sign in to see this page."}</p>
                <Link<Route>
                    to={Route::Login}
                    classes="font-medium underline"
                >
                    {"Sign in"}
                </Link<Route>>
            </div>
        },
    }
}

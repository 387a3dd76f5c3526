use forms::Feedback;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{
    Route, get_api_client,
    hooks::use_title,
    session::{self, login_url},
    state::State,
};

/// Signing in happens elsewhere. With `LOGIN_URL` set this page only
/// forwards there; otherwise it takes a token pasted by hand, which is
/// what the dev server expects.
#[function_component]
pub fn LoginPage() -> Html {
    use_title("Sign in");
    let navigator = use_navigator().unwrap();
    let (state, dispatch) = use_store::<State>();
    let token_input = use_node_ref();
    let error = use_state(|| None::<String>);
    let is_checking = use_state(|| false);

    {
        let navigator = navigator.clone();
        use_effect_with(state.is_authenticated(), move |is_auth| {
            if *is_auth {
                navigator.push(&Route::Dashboard);
            } else if let Some(url) = login_url() {
                let window = web_sys::window().unwrap();
                if let Err(e) = window.location().set_href(url) {
                    tracing::warn!("could not open login page: {e:?}");
                }
            }
        });
    }

    let onsubmit = {
        let token_input = token_input.clone();
        let error = error.clone();
        let is_checking = is_checking.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = token_input.cast::<HtmlInputElement>() else {
                return;
            };
            let token = input.value();
            if token.trim().is_empty() {
                error.set(Some("Paste an access token".into()));
                return;
            }
            session::set_token(&token);
            error.set(None);
            is_checking.set(true);

            let dispatch = dispatch.clone();
            let error = error.clone();
            let is_checking = is_checking.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().get_profile().await {
                    Ok(profile) => {
                        session::cache_user(&profile);
                        dispatch.reduce_mut(|state| state.login(profile));
                        navigator.push(&Route::Dashboard);
                    }
                    Err(e) => {
                        session::clear();
                        let message = match Feedback::from_error(&e) {
                            Feedback::SessionExpired => {
                                "That token was not accepted".to_string()
                            }
                            _ => e.to_string(),
                        };
                        error.set(Some(message));
                    }
                }
                is_checking.set(false);
            });
        })
    };

    if login_url().is_some() {
        return html! {
            <p class="text-center text-neutral-600">
                {"Taking you to the sign in page..."}
            </p>
        };
    }

    html! {
        <form {onsubmit} class="max-w-md mx-auto space-y-4">
            <h1 class="text-2xl font-bold">{"Sign in"}</h1>
            <label class="block">
                <span class="block text-sm font-medium mb-1">
                    {"Access token"}
                </span>
                <input
                    ref={token_input}
                    type="password"
                    class="w-full px-3 py-2 text-sm border rounded-md
                           border-neutral-300 dark:border-neutral-600
                           bg-white dark:bg-neutral-700"
                />
            </label>
            if let Some(message) = &*error {
                <p class="text-sm text-red-600 dark:text-red-400">
                    {message}
                </p>
            }
            <button
                type="submit"
                disabled={*is_checking}
                class="px-4 py-2 text-sm font-medium text-white
                       bg-neutral-900 rounded-md disabled:opacity-50"
            >
                {if *is_checking { "Checking..." } else { "Sign in" }}
            </button>
        </form>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{
    Route, State,
    hooks::{use_logout, use_profile},
};

#[function_component]
pub fn Navbar() -> Html {
    use_profile();
    let (state, _) = use_store::<State>();
    let logout = use_logout();

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b
                       border-neutral-200 dark:border-neutral-700">
            <div class="max-w-6xl mx-auto px-4 sm:px-6 lg:px-8 flex
                        justify-between items-center h-16">
                <Link<Route> to={Route::Dashboard}
                             classes="text-xl font-semibold">
                    {"Host portal"}
                </Link<Route>>
                if let Some(profile) = state.profile() {
                    <div class="flex items-center gap-4 text-sm">
                        <Link<Route> to={Route::Profile}
                                     classes="hover:underline">
                            {profile.display_name()}
                        </Link<Route>>
                        <button
                            onclick={logout}
                            class="px-3 py-1 rounded-md border
                                   border-neutral-300 dark:border-neutral-600
                                   hover:bg-neutral-50
                                   dark:hover:bg-neutral-700"
                        >
                            {"Log out"}
                        </button>
                    </div>
                }
            </div>
        </header>
    }
}

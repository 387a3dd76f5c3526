use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, hooks::use_title};

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Not found");

    html! {
        <div class="text-center space-y-2">
            <h1 class="text-4xl font-bold">{"404"}</h1>
            <p class="text-neutral-600 dark:text-neutral-300">
                {"Page not found"}
            </p>
            <Link<Route> to={Route::Dashboard} classes="underline text-sm">
                {"Back to your houses"}
            </Link<Route>>
        </div>
    }
}

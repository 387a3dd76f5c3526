use payloads::responses::UserProfile;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, components::RequireAuth, hooks::use_title};

#[function_component]
pub fn DashboardPage() -> Html {
    use_title("Your houses");
    let render = Callback::from(|profile: UserProfile| {
        html! { <DashboardInner {profile} /> }
    });

    html! { <RequireAuth {render} /> }
}

#[derive(Properties, PartialEq)]
struct DashboardInnerProps {
    profile: UserProfile,
}

#[function_component]
fn DashboardInner(props: &DashboardInnerProps) -> Html {
    let navigator = use_navigator().unwrap();
    let house_input = use_node_ref();

    let onsubmit = {
        let house_input = house_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = house_input.cast::<HtmlInputElement>() else {
                return;
            };
            let id = input.value().trim().to_string();
            if !id.is_empty() {
                navigator.push(&Route::EditHouse { id });
            }
        })
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">
                {format!("Hello, {}", props.profile.display_name())}
            </h1>
            if !props.profile.is_vendor {
                <div class="p-4 rounded-md bg-amber-50 dark:bg-amber-900/20
                            border border-amber-200 dark:border-amber-700
                            text-sm">
                    {"Add your payout details before listing a house. "}
                    <Link<Route> to={Route::Profile} classes="underline">
                        {"Complete your profile"}
                    </Link<Route>>
                </div>
            }
            <form {onsubmit} class="flex gap-2 items-end max-w-xl">
                <label class="flex-1">
                    <span class="block text-sm font-medium mb-1">
                        {"Open a house by its id"}
                    </span>
                    <input
                        ref={house_input}
                        type="text"
                        class="w-full px-3 py-2 text-sm border rounded-md
                               border-neutral-300 dark:border-neutral-600
                               bg-white dark:bg-neutral-700"
                    />
                </label>
                <button
                    type="submit"
                    class="px-4 py-2 text-sm font-medium text-white
                           bg-neutral-900 rounded-md"
                >
                    {"Edit"}
                </button>
            </form>
        </div>
    }
}

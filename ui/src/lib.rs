use payloads::{APIClient, HouseId};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod sections;
mod session;
mod state;

pub use state::{AuthState, State};

use components::{Navbar, ToastContainer};
use contexts::toast::ToastProvider;
use pages::{
    DashboardPage, EditHousePage, LoginPage, NotFoundPage, ProfilePage,
};

/// Base address of the house service. Set `BACKEND_URL` at build time to
/// point somewhere other than the page's own origin.
pub fn backend_url() -> String {
    option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            let window = web_sys::window().unwrap();
            window.location().origin().unwrap()
        })
}

/// A client carrying whatever token the login page left in storage.
pub fn get_api_client() -> APIClient {
    APIClient::new(backend_url(), session::token())
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());

    html! {
        <BrowserRouter>
            <ToastProvider>
                <div class="min-h-screen bg-neutral-50 dark:bg-neutral-900
                            text-neutral-900 dark:text-neutral-100">
                    <Navbar />
                    <ToastContainer />
                    <Switch<Route> render={switch} />
                </div>
            </ToastProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/house/:id/edit")]
    EditHouse { id: String },
    #[at("/house/:id/edit/:section")]
    EditHouseSection { id: String, section: String },
    #[at("/profile")]
    Profile,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let page = match routes {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::EditHouse { id } => html! {
            <EditHousePage house_id={HouseId(id)} />
        },
        Route::EditHouseSection { id, section } => html! {
            <EditHousePage house_id={HouseId(id)} section={Some(section)} />
        },
        Route::Profile => html! { <ProfilePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    html! {
        <main class="max-w-6xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {page}
        </main>
    }
}

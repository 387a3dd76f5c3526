use forms::CancelOnDrop;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::FetchState;

/// What [`use_fetch`] hands back. `data` keeps the last good result
/// while a refetch is in flight.
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

/// Fetch on mount and again whenever `deps` change.
///
/// Only the latest request may land: starting a new one, or unmounting,
/// cancels the one in flight so its result is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let cities = use_fetch(province_id, |province_id| async move {
///     get_api_client()
///         .cities(province_id)
///         .await
///         .map_err(|e| e.to_string())
/// });
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let in_flight = use_mut_ref(|| None::<CancelOnDrop>);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, deps: &D| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();

            let owner = CancelOnDrop::new();
            let token = owner.token();
            // replacing the owner cancels the previous request
            *in_flight.borrow_mut() = Some(owner);

            let pending = fetch_fn(deps.clone());
            is_loading.set(true);
            error.set(None);

            yew::platform::spawn_local(async move {
                let Some(result) = token.run(pending).await else {
                    return;
                };
                match result {
                    Ok(result) => data.set(FetchState::Fetched(result)),
                    Err(e) => error.set(Some(e)),
                }
                is_loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| refetch.emit(()));
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}

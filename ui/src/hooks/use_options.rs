use forms::{OptionLists, options::fetch_options};
use payloads::OptionCategory;
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

/// The reference lists a form needs, fetched concurrently on mount. Lists
/// that fail come back empty with their error recorded in
/// [`OptionLists::errors`].
#[hook]
pub fn use_options(
    categories: &'static [OptionCategory],
) -> FetchHookReturn<OptionLists> {
    use_fetch(categories, |categories| async move {
        let client = get_api_client();
        Ok(fetch_options(&client, categories).await)
    })
}

use futures::future::join_all;
use payloads::{APIClient, OptionCategory, responses::ReferenceOption};
use std::collections::BTreeMap;

/// Reference lists fetched for one section form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionLists {
    lists: BTreeMap<OptionCategory, Vec<ReferenceOption>>,
    /// One message per list that failed to load.
    pub errors: Vec<String>,
}

impl OptionLists {
    /// The list for `category`, empty if it failed or was not requested.
    pub fn get(&self, category: OptionCategory) -> &[ReferenceOption] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(
        &mut self,
        category: OptionCategory,
        options: Vec<ReferenceOption>,
    ) {
        self.lists.insert(category, options);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Display label for an option key, falling back to the key itself.
    pub fn label<'a>(
        &'a self,
        category: OptionCategory,
        key: &'a str,
    ) -> &'a str {
        self.get(category)
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.label.as_str())
            .unwrap_or(key)
    }
}

/// Fetch every list concurrently. A failed list stays empty and its error
/// is recorded; the others are still returned.
pub async fn fetch_options(
    client: &APIClient,
    categories: &[OptionCategory],
) -> OptionLists {
    let results = join_all(
        categories
            .iter()
            .map(|category| client.reference_options(*category)),
    )
    .await;

    let mut lists = OptionLists::default();
    for (category, result) in categories.iter().zip(results) {
        match result {
            Ok(options) => lists.insert(*category, options),
            Err(e) => {
                tracing::warn!(%category, "failed to load options: {e}");
                lists.insert(*category, Vec::new());
                lists.errors.push(e.to_string());
            }
        }
    }
    lists
}

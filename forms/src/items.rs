//! Repeated sub-entities (rooms, images) with per-item request status.
//!
//! Items added in the browser live only locally until their first save
//! assigns a server id. Each (item, action) pair carries its own status so
//! a pending delete on one item never blocks a save on another.

use payloads::ClientError;
use std::collections::BTreeMap;
use std::future::Future;

/// Client-side identity of an item, stable across saves. Server ids are
/// tracked separately since new items do not have one yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemAction {
    Save,
    Delete,
    MakeMain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemStatus {
    #[default]
    Idle,
    Pending,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T, Id> {
    pub key: ItemKey,
    /// Set once the server knows about the item.
    pub id: Option<Id>,
    pub value: T,
}

/// What confirming a delete requires from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<Id> {
    /// Never saved; already removed, no request needed.
    Local,
    /// Issue exactly one DELETE for `id`, then report back through
    /// [`ItemList::finish_remove`].
    Remote { key: ItemKey, id: Id },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemList<T, Id> {
    entries: Vec<Entry<T, Id>>,
    statuses: BTreeMap<(ItemKey, ItemAction), ItemStatus>,
    confirming: Option<ItemKey>,
    next_key: u64,
}

impl<T, Id> Default for ItemList<T, Id> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            statuses: BTreeMap::new(),
            confirming: None,
            next_key: 0,
        }
    }
}

impl<T, Id: Clone> ItemList<T, Id> {
    pub fn from_persisted(items: impl IntoIterator<Item = (Id, T)>) -> Self {
        let mut list = Self::default();
        for (id, value) in items {
            let key = list.allocate_key();
            list.entries.push(Entry {
                key,
                id: Some(id),
                value,
            });
        }
        list
    }

    fn allocate_key(&mut self) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Append an item that only exists locally.
    pub fn push_local(&mut self, value: T) -> ItemKey {
        let key = self.allocate_key();
        self.entries.push(Entry {
            key,
            id: None,
            value,
        });
        key
    }

    pub fn get(&self, key: ItemKey) -> Option<&Entry<T, Id>> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T, Id>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self, key: ItemKey, action: ItemAction) -> ItemStatus {
        self.statuses
            .get(&(key, action))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_pending(&self, key: ItemKey) -> bool {
        self.statuses
            .iter()
            .any(|((k, _), s)| *k == key && *s == ItemStatus::Pending)
    }

    /// Mark an action as in flight. Returns false if that same action is
    /// already pending for the item, in which case nothing should be sent.
    pub fn begin_action(&mut self, key: ItemKey, action: ItemAction) -> bool {
        if self.status(key, action) == ItemStatus::Pending {
            return false;
        }
        self.statuses.insert((key, action), ItemStatus::Pending);
        true
    }

    pub fn finish_action(
        &mut self,
        key: ItemKey,
        action: ItemAction,
        result: Result<(), String>,
    ) {
        let status = match result {
            Ok(()) => ItemStatus::Idle,
            Err(message) => ItemStatus::Error(message),
        };
        self.statuses.insert((key, action), status);
    }

    /// Record the id the server assigned on first save.
    pub fn mark_saved(&mut self, key: ItemKey, id: Id) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.id = Some(id);
        }
    }

    /// First step of a delete: ask for confirmation.
    pub fn request_remove(&mut self, key: ItemKey) {
        if self.get(key).is_some() {
            self.confirming = Some(key);
        }
    }

    pub fn cancel_remove(&mut self) {
        self.confirming = None;
    }

    pub fn confirming(&self) -> Option<ItemKey> {
        self.confirming
    }

    /// Second step of a delete. Local items are removed here and then;
    /// persisted ones are marked pending and handed back for the request.
    pub fn confirm_remove(&mut self) -> Option<Removal<Id>> {
        let key = self.confirming.take()?;
        let entry = self.get(key)?;
        match entry.id.clone() {
            None => {
                self.remove(key);
                Some(Removal::Local)
            }
            Some(id) => {
                if !self.begin_action(key, ItemAction::Delete) {
                    return None;
                }
                Some(Removal::Remote { key, id })
            }
        }
    }

    /// Apply the DELETE response. The item only goes away on success.
    pub fn finish_remove(&mut self, key: ItemKey, result: Result<(), String>) {
        match result {
            Ok(()) => self.remove(key),
            Err(message) => self.finish_action(
                key,
                ItemAction::Delete,
                Err(message),
            ),
        }
    }

    fn remove(&mut self, key: ItemKey) {
        self.entries.retain(|e| e.key != key);
        self.statuses.retain(|(k, _), _| *k != key);
    }
}

/// Confirm the pending delete on `list` and, for persisted items, run
/// `delete` once with the server id.
pub async fn remove_confirmed<T, Id, F, Fut>(
    list: &mut ItemList<T, Id>,
    delete: F,
) -> Result<(), ClientError>
where
    Id: Clone,
    F: FnOnce(Id) -> Fut,
    Fut: Future<Output = Result<(), ClientError>>,
{
    match list.confirm_remove() {
        None | Some(Removal::Local) => Ok(()),
        Some(Removal::Remote { key, id }) => {
            let result = delete(id).await;
            list.finish_remove(
                key,
                result.as_ref().map(|_| ()).map_err(ToString::to_string),
            );
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ItemList<&'static str, i64> {
        ItemList::from_persisted([(10, "a"), (11, "b")])
    }

    #[test]
    fn local_items_are_removed_without_a_request() {
        let mut items = list();
        let key = items.push_local("new");
        items.request_remove(key);
        assert_eq!(items.confirm_remove(), Some(Removal::Local));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn persisted_items_wait_for_the_response() {
        let mut items = list();
        let key = items.iter().next().unwrap().key;
        items.request_remove(key);
        assert_eq!(
            items.confirm_remove(),
            Some(Removal::Remote { key, id: 10 })
        );
        assert_eq!(items.status(key, ItemAction::Delete), ItemStatus::Pending);
        assert_eq!(items.len(), 2);

        items.finish_remove(key, Err("boom".into()));
        assert_eq!(items.len(), 2);
        assert_eq!(
            items.status(key, ItemAction::Delete),
            ItemStatus::Error("boom".into())
        );

        items.request_remove(key);
        assert!(items.confirm_remove().is_some());
        items.finish_remove(key, Ok(()));
        assert_eq!(items.len(), 1);
        assert!(items.get(key).is_none());
    }

    #[test]
    fn confirm_without_request_does_nothing() {
        let mut items = list();
        assert_eq!(items.confirm_remove(), None);
        let key = items.iter().next().unwrap().key;
        items.request_remove(key);
        items.cancel_remove();
        assert_eq!(items.confirm_remove(), None);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn statuses_are_independent_per_item_and_action() {
        let mut items = list();
        let keys: Vec<_> = items.iter().map(|e| e.key).collect();
        assert!(items.begin_action(keys[0], ItemAction::Delete));
        assert!(!items.begin_action(keys[0], ItemAction::Delete));
        assert!(items.begin_action(keys[0], ItemAction::MakeMain));
        assert!(items.begin_action(keys[1], ItemAction::Delete));
        assert!(!items.is_pending(ItemKey(99)));
        items.finish_action(keys[0], ItemAction::MakeMain, Ok(()));
        assert_eq!(
            items.status(keys[0], ItemAction::MakeMain),
            ItemStatus::Idle
        );
        assert_eq!(
            items.status(keys[0], ItemAction::Delete),
            ItemStatus::Pending
        );
    }

    #[test]
    fn first_save_assigns_the_id() {
        let mut items = list();
        let key = items.push_local("new");
        assert_eq!(items.get(key).unwrap().id, None);
        items.mark_saved(key, 12);
        assert_eq!(items.get(key).unwrap().id, Some(12));
    }
}

use payloads::responses::ReferenceOption;
use std::collections::BTreeSet;

/// A set of selected option keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric difference with `{key}`: toggling twice is a no-op.
    pub fn toggle(&mut self, key: &str) {
        if !self.0.remove(key) {
            self.0.insert(key.to_string());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in a stable order, ready to send.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// One row per option with its checked state. Every option gets a
    /// definite value.
    pub fn checklist<'a>(
        &'a self,
        options: &'a [ReferenceOption],
    ) -> impl Iterator<Item = (&'a ReferenceOption, bool)> + 'a {
        options.iter().map(|option| (option, self.contains(&option.key)))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(key: &str) -> ReferenceOption {
        ReferenceOption {
            key: key.into(),
            label: key.to_uppercase(),
            fields: vec![],
        }
    }

    #[test]
    fn toggle_twice_restores_the_set() {
        let original: TagSet = ["sea", "forest"].into_iter().collect();
        for key in ["sea", "mountain", ""] {
            let mut tags = original.clone();
            tags.toggle(key);
            assert_ne!(tags, original);
            tags.toggle(key);
            assert_eq!(tags, original);
        }
    }

    #[test]
    fn checklist_covers_every_option() {
        let tags: TagSet = ["sea"].into_iter().collect();
        let options = vec![option("sea"), option("forest")];
        let rows: Vec<_> = tags
            .checklist(&options)
            .map(|(o, checked)| (o.key.as_str(), checked))
            .collect();
        assert_eq!(rows, vec![("sea", true), ("forest", false)]);
    }
}

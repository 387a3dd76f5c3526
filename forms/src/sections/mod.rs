//! One module per section of the house editor.
//!
//! Single-submit sections implement [`SectionForm`]. Rooms, images and
//! pricing have several independent writes and expose their own plans.

pub mod address;
pub mod environment;
pub mod facilities;
pub mod general;
pub mod images;
pub mod location;
pub mod pricing;
pub mod reservation;
pub mod rooms;
pub mod sanitaries;
pub mod stay_rules;

use payloads::{OptionCategory, responses::House};

use crate::{options::OptionLists, status::FormErrors, workflow::Submission};

pub trait SectionForm: Clone + PartialEq + Sized {
    /// Reference lists to fetch before the form is ready.
    const OPTIONS: &'static [OptionCategory];

    /// Initial edit state from the snapshot and the loaded lists.
    fn seed(house: &House, options: &OptionLists) -> Self;

    /// Body to send, or the errors that keep it from being sent.
    fn submission(&self) -> Result<Submission, FormErrors>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use payloads::{
        FieldKind,
        responses::{House, OptionField, ReferenceOption},
    };

    pub fn house() -> House {
        serde_json::from_value(serde_json::json!({ "uuid": "house-1" }))
            .unwrap()
    }

    pub fn option(key: &str) -> ReferenceOption {
        ReferenceOption {
            key: key.into(),
            label: key.to_uppercase(),
            fields: vec![],
        }
    }

    pub fn option_with_fields(
        key: &str,
        fields: &[(&str, &str, FieldKind)],
    ) -> ReferenceOption {
        ReferenceOption {
            key: key.into(),
            label: key.to_uppercase(),
            fields: fields
                .iter()
                .map(|(key, title, kind)| OptionField {
                    key: (*key).into(),
                    title: (*title).into(),
                    kind: *kind,
                })
                .collect(),
        }
    }
}

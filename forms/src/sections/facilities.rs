//! Facilities: a checklist where each facility type may declare its own
//! fields (a toggle, a count, a note).

use payloads::{
    FacilityValue, FieldValue, OptionCategory,
    requests::FacilitiesUpdate,
    responses::{House, OptionField, ReferenceOption},
};
use std::collections::BTreeMap;

use super::SectionForm;
use crate::{
    options::OptionLists,
    seed::{FieldState, find_value, seed_field},
    status::FormErrors,
    tags::TagSet,
    workflow::Submission,
};

/// (facility type key, field key)
type FieldKey = (String, String);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilitiesForm {
    catalog: Vec<ReferenceOption>,
    selected: TagSet,
    fields: BTreeMap<FieldKey, FieldState>,
    /// Stored facilities whose type is missing from the catalog. Sent back
    /// untouched.
    unknown: Vec<FacilityValue>,
}

/// One facility type as rendered.
pub struct FacilityRow<'a> {
    pub option: &'a ReferenceOption,
    pub selected: bool,
    pub fields: Vec<(&'a OptionField, &'a FieldState)>,
}

impl FacilitiesForm {
    pub fn rows(&self) -> impl Iterator<Item = FacilityRow<'_>> {
        self.catalog.iter().map(|option| FacilityRow {
            option,
            selected: self.selected.contains(&option.key),
            fields: option
                .fields
                .iter()
                .filter_map(|field| {
                    self.fields
                        .get(&(option.key.clone(), field.key.clone()))
                        .map(|state| (field, state))
                })
                .collect(),
        })
    }

    pub fn is_selected(&self, type_key: &str) -> bool {
        self.selected.contains(type_key)
    }

    pub fn toggle(&mut self, type_key: &str) {
        self.selected.toggle(type_key);
    }

    pub fn field(
        &self,
        type_key: &str,
        field_key: &str,
    ) -> Option<&FieldState> {
        self.fields.get(&(type_key.to_string(), field_key.to_string()))
    }

    /// Text or numeric input for a nested field.
    pub fn set_field(&mut self, type_key: &str, field_key: &str, input: &str) {
        if let Some(state) = self.field_mut(type_key, field_key) {
            state.set_text(input);
        }
    }

    pub fn set_field_toggle(
        &mut self,
        type_key: &str,
        field_key: &str,
        checked: bool,
    ) {
        if let Some(state) = self.field_mut(type_key, field_key) {
            state.set_toggle(checked);
        }
    }

    fn field_mut(
        &mut self,
        type_key: &str,
        field_key: &str,
    ) -> Option<&mut FieldState> {
        self.fields
            .get_mut(&(type_key.to_string(), field_key.to_string()))
    }

    pub fn can_submit(&self) -> bool {
        !self.catalog.is_empty()
    }
}

impl SectionForm for FacilitiesForm {
    const OPTIONS: &'static [OptionCategory] = &[OptionCategory::Facility];

    fn seed(house: &House, options: &OptionLists) -> Self {
        let catalog = options.get(OptionCategory::Facility).to_vec();
        let stored = |key: &str| {
            house.facilities.iter().find(|f| f.type_key == key)
        };

        let mut fields = BTreeMap::new();
        for option in &catalog {
            let existing = stored(&option.key)
                .map(|f| f.fields.as_slice())
                .unwrap_or(&[]);
            for field in &option.fields {
                fields.insert(
                    (option.key.clone(), field.key.clone()),
                    seed_field(field, find_value(field, existing)),
                );
            }
        }

        let selected = catalog
            .iter()
            .filter(|option| stored(&option.key).is_some())
            .map(|option| option.key.clone())
            .collect();
        let unknown = house
            .facilities
            .iter()
            .filter(|f| !catalog.iter().any(|o| o.key == f.type_key))
            .cloned()
            .collect();

        Self {
            catalog,
            selected,
            fields,
            unknown,
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        if !self.can_submit() {
            let mut errors = FormErrors::default();
            errors.set_general("The facility list could not be loaded");
            return Err(errors);
        }

        let mut facilities: Vec<FacilityValue> = self
            .catalog
            .iter()
            .filter(|option| self.selected.contains(&option.key))
            .map(|option| FacilityValue {
                type_key: option.key.clone(),
                fields: option
                    .fields
                    .iter()
                    .filter_map(|field| {
                        let state = self
                            .fields
                            .get(&(option.key.clone(), field.key.clone()))?;
                        Some(FieldValue {
                            key: Some(field.key.clone()),
                            title: field.title.clone(),
                            value: state.to_input(),
                        })
                    })
                    .collect(),
            })
            .collect();
        facilities.extend(self.unknown.iter().cloned());

        Ok(Submission::Facilities(FacilitiesUpdate { facilities }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;
    use payloads::{FieldInput, FieldKind};

    fn options() -> OptionLists {
        let mut lists = OptionLists::default();
        lists.insert(
            OptionCategory::Facility,
            vec![
                fixtures::option_with_fields(
                    "pool",
                    &[
                        ("heated", "Heated", FieldKind::Toggle),
                        ("length", "Length", FieldKind::Numeric),
                    ],
                ),
                fixtures::option_with_fields(
                    "parking",
                    &[("spaces", "Spaces", FieldKind::Numeric)],
                ),
            ],
        );
        lists
    }

    fn house_with_pool() -> House {
        let mut house = fixtures::house();
        house.facilities = vec![
            FacilityValue {
                type_key: "pool".into(),
                fields: vec![FieldValue {
                    key: None,
                    title: "Heated ".into(),
                    value: FieldInput::Toggle(true),
                }],
            },
            FacilityValue {
                type_key: "sauna".into(),
                fields: vec![],
            },
        ];
        house
    }

    #[test]
    fn every_declared_field_is_seeded() {
        let form = FacilitiesForm::seed(&house_with_pool(), &options());
        assert!(form.is_selected("pool"));
        assert!(!form.is_selected("parking"));
        assert_eq!(
            form.field("pool", "heated"),
            Some(&FieldState::Toggle(true))
        );
        assert_eq!(
            form.field("pool", "length"),
            Some(&FieldState::Numeric(String::new()))
        );
        assert_eq!(
            form.field("parking", "spaces"),
            Some(&FieldState::Numeric(String::new()))
        );
        for row in form.rows() {
            assert_eq!(row.fields.len(), row.option.fields.len());
        }
    }

    #[test]
    fn submits_selected_facilities_and_keeps_unknown_ones() {
        let mut form = FacilitiesForm::seed(&house_with_pool(), &options());
        form.toggle("parking");
        form.set_field("parking", "spaces", "1/000");
        let Ok(Submission::Facilities(body)) = form.submission() else {
            panic!("expected a facilities update");
        };
        let keys: Vec<_> =
            body.facilities.iter().map(|f| f.type_key.as_str()).collect();
        assert_eq!(keys, vec!["pool", "parking", "sauna"]);
        let spaces = &body.facilities[1].fields[0];
        assert_eq!(spaces.key.as_deref(), Some("spaces"));
        assert_eq!(spaces.value, FieldInput::Text("1000".into()));
    }

    #[test]
    fn missing_catalog_blocks_submit() {
        let form =
            FacilitiesForm::seed(&house_with_pool(), &OptionLists::default());
        assert!(!form.can_submit());
        assert!(form.submission().is_err());
    }
}

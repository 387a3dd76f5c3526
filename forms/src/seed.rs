//! Initial values for dynamic fields.
//!
//! [`seed_field`] is the single place that decides what an input starts
//! with, given the field declaration from a reference option and whatever
//! the house already stores for it.

use payloads::{FieldInput, FieldKind, FieldValue, responses::OptionField};

use crate::format::{format_thousands, strip_separators};

/// Edit state of one dynamic field. Always has a concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Toggle(bool),
    Text(String),
    /// Digits without separators.
    Numeric(String),
}

impl FieldState {
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Toggle => Self::Toggle(false),
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Numeric => Self::Numeric(String::new()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Toggle(_) => FieldKind::Toggle,
            Self::Text(_) => FieldKind::Text,
            Self::Numeric(_) => FieldKind::Numeric,
        }
    }

    /// Replace the value from raw input, keeping the field's kind.
    pub fn set_text(&mut self, input: &str) {
        match self {
            Self::Toggle(b) => *b = !input.is_empty(),
            Self::Text(s) => *s = input.to_string(),
            Self::Numeric(s) => *s = strip_separators(input),
        }
    }

    pub fn set_toggle(&mut self, checked: bool) {
        if let Self::Toggle(b) = self {
            *b = checked;
        }
    }

    /// What the input shows. Numbers are grouped.
    pub fn display(&self) -> String {
        match self {
            Self::Toggle(b) => b.to_string(),
            Self::Text(s) => s.clone(),
            Self::Numeric(s) => format_thousands(s),
        }
    }

    /// Wire value. Numbers are sent without separators.
    pub fn to_input(&self) -> FieldInput {
        match self {
            Self::Toggle(b) => FieldInput::Toggle(*b),
            Self::Text(s) => FieldInput::Text(s.clone()),
            Self::Numeric(s) => FieldInput::Text(strip_separators(s)),
        }
    }
}

/// Find the stored value for a declared field.
///
/// Values carrying a key match on the key. Legacy values without one fall
/// back to comparing trimmed titles, which breaks if a label is renamed on
/// the service.
pub fn find_value<'a>(
    field: &OptionField,
    values: &'a [FieldValue],
) -> Option<&'a FieldValue> {
    values
        .iter()
        .find(|v| v.key.as_deref() == Some(field.key.as_str()))
        .or_else(|| {
            values.iter().find(|v| {
                v.key.is_none() && v.title.trim() == field.title.trim()
            })
        })
}

/// Map (declared field, stored value) to the initial edit state.
pub fn seed_field(
    field: &OptionField,
    existing: Option<&FieldValue>,
) -> FieldState {
    let Some(existing) = existing else {
        return FieldState::empty(field.kind);
    };
    match field.kind {
        FieldKind::Toggle => FieldState::Toggle(existing.value.as_bool()),
        FieldKind::Text => FieldState::Text(existing.value.as_text().into()),
        FieldKind::Numeric => {
            FieldState::Numeric(strip_separators(existing.value.as_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, title: &str, kind: FieldKind) -> OptionField {
        OptionField {
            key: key.into(),
            title: title.into(),
            kind,
        }
    }

    fn value(key: Option<&str>, title: &str, value: FieldInput) -> FieldValue {
        FieldValue {
            key: key.map(Into::into),
            title: title.into(),
            value,
        }
    }

    #[test]
    fn unmatched_fields_get_empty_values_by_kind() {
        for (kind, expected) in [
            (FieldKind::Toggle, FieldState::Toggle(false)),
            (FieldKind::Text, FieldState::Text(String::new())),
            (FieldKind::Numeric, FieldState::Numeric(String::new())),
        ] {
            assert_eq!(seed_field(&field("k", "K", kind), None), expected);
        }
    }

    #[test]
    fn matches_by_key_before_title() {
        let declared = field("area", "Area", FieldKind::Numeric);
        let values = vec![
            value(None, "Area", FieldInput::Text("10".into())),
            value(Some("area"), "Old label", FieldInput::Text("1/200".into())),
        ];
        let found = find_value(&declared, &values).unwrap();
        assert_eq!(found.title, "Old label");
        assert_eq!(
            seed_field(&declared, Some(found)),
            FieldState::Numeric("1200".into())
        );
    }

    #[test]
    fn legacy_values_match_on_trimmed_title() {
        let declared = field("heated", " Heated ", FieldKind::Toggle);
        let values = vec![value(None, "Heated  ", FieldInput::Toggle(true))];
        let found = find_value(&declared, &values);
        assert_eq!(seed_field(&declared, found), FieldState::Toggle(true));
    }

    #[test]
    fn numeric_display_and_wire_values() {
        let mut state = FieldState::empty(FieldKind::Numeric);
        state.set_text("25/000");
        assert_eq!(state.display(), "25/000");
        assert_eq!(state.to_input(), FieldInput::Text("25000".into()));
    }
}

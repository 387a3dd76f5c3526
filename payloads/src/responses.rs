use crate::{
    Address, CityId, Environment, FacilityValue, FieldKind, HouseId, Location,
    MediaId, PriceHandleBy, ProvinceId, ReservationRules, RoomId, RuleStatus,
    SeasonPrices,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The signed-in user, as returned by `GET /client/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
    pub national_code: Option<String>,
    #[serde(default)]
    pub is_vendor: bool,
}

impl UserProfile {
    /// Full name if any part of it is set, else the mobile number.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.mobile.clone()
        } else {
            name
        }
    }
}

/// A complete house snapshot. Sections only ever read this; changes go
/// through a write followed by a fresh `GET`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub uuid: HouseId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub location: Location,
    pub land_size: Option<String>,
    pub building_size: Option<String>,
    /// Key of the structure type option.
    pub structure_type: Option<String>,
    /// Key of the privacy option.
    pub privacy: Option<String>,
    /// Rented room by room rather than as a whole.
    #[serde(default)]
    pub is_rent_room: bool,
    #[serde(default)]
    pub price_handle_by: PriceHandleBy,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub facilities: Vec<FacilityValue>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub sanitaries: Vec<String>,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleStatus>,
    #[serde(default)]
    pub prices: SeasonPrices,
    #[serde(default)]
    pub reservation: ReservationRules,
    #[serde(default)]
    pub medias: Vec<Media>,
}

impl House {
    pub fn has_living_room(&self) -> bool {
        self.rooms.iter().any(|room| room.is_living_room)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub uuid: RoomId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub single_beds: u32,
    #[serde(default)]
    pub double_beds: u32,
    #[serde(default)]
    pub sofa_beds: u32,
    #[serde(default)]
    pub floor_mattresses: u32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub air_conditions: Vec<String>,
    #[serde(default)]
    pub is_master: bool,
    #[serde(default)]
    pub is_living_room: bool,
    pub prices: Option<SeasonPrices>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub is_main: bool,
}

/// A dynamic field declared by a reference option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionField {
    /// Stable identifier agreed with the service.
    pub key: String,
    /// Display title. Also used to match legacy values without a key.
    pub title: String,
    pub kind: FieldKind,
}

/// A selectable item from a lookup list. Never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub fields: Vec<OptionField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
}

/// Per-field validation messages from a 422 response.
///
/// The wire shape is `{"errors": {"fields": {"<field>": ["msg", ...]}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// The first message reported for a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Every message, in field order.
    pub fn flatten(&self) -> Vec<String> {
        self.0.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationEnvelope {
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl From<ValidationEnvelope> for FieldErrors {
    fn from(envelope: ValidationEnvelope) -> Self {
        FieldErrors(envelope.errors.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_from_envelope() {
        let body = r#"{"errors":{"fields":{
            "capacity":["too low","must be a number"],
            "check_in":["required"]
        }}}"#;
        let envelope: ValidationEnvelope = serde_json::from_str(body).unwrap();
        let errors = FieldErrors::from(envelope);
        assert_eq!(errors.first("capacity"), Some("too low"));
        assert_eq!(errors.first("check_in"), Some("required"));
        assert_eq!(errors.first("max_capacity"), None);
        assert_eq!(
            errors.flatten(),
            vec!["too low", "must be a number", "required"]
        );
    }

    #[test]
    fn display_name_falls_back_to_mobile() {
        let mut profile = UserProfile {
            first_name: Some(" ".into()),
            last_name: None,
            mobile: "09120000000".into(),
            email: None,
            national_code: None,
            is_vendor: false,
        };
        assert_eq!(profile.display_name(), "09120000000");
        profile.first_name = Some("Sara".into());
        profile.last_name = Some("Ahmadi".into());
        assert_eq!(profile.display_name(), "Sara Ahmadi");
    }

    #[test]
    fn house_tolerates_missing_sections() {
        let house: House =
            serde_json::from_str(r#"{"uuid":"abc","is_rent_room":true}"#)
                .unwrap();
        assert_eq!(house.uuid, HouseId("abc".into()));
        assert!(house.is_rent_room);
        assert!(house.rooms.is_empty());
        assert_eq!(house.price_handle_by, PriceHandleBy::PerNight);
    }
}

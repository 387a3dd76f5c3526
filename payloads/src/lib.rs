pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use reqwest::StatusCode;
pub use responses::FieldErrors;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque key of a house. Assigned by the server and never changed by the
/// client once loaded.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Display,
)]
#[serde(transparent)]
pub struct HouseId(pub String);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Display,
)]
#[serde(transparent)]
pub struct RoomId(pub String);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
#[serde(transparent)]
pub struct MediaId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
#[serde(transparent)]
pub struct ProvinceId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
#[serde(transparent)]
pub struct CityId(pub i64);

/// How nightly prices are interpreted by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceHandleBy {
    /// One price per night; extra-person prices do not apply.
    #[default]
    PerNight,
    /// Base price per night plus a charge for each extra guest.
    PerPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Allowed,
    Forbidden,
    Conditional,
}

impl RuleStatus {
    pub const ALL: [RuleStatus; 3] =
        [Self::Allowed, Self::Forbidden, Self::Conditional];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Allowed => "Allowed",
            Self::Forbidden => "Not allowed",
            Self::Conditional => "With conditions",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[display("spring")]
    Spring,
    #[display("summer")]
    Summer,
    #[display("autumn")]
    Autumn,
    #[display("winter")]
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] =
        [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];
}

/// The week starts on Saturday for the service's weekend conventions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[display("saturday")]
    Saturday,
    #[display("sunday")]
    Sunday,
    #[display("monday")]
    Monday,
    #[display("tuesday")]
    Tuesday,
    #[display("wednesday")]
    Wednesday,
    #[display("thursday")]
    Thursday,
    #[display("friday")]
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Saturday,
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];
}

/// The lookup lists served under `/assets/types/{category}/detail`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize, Display,
)]
pub enum OptionCategory {
    #[display("facility")]
    Facility,
    #[display("view")]
    View,
    #[display("texture")]
    Texture,
    #[display("access_route")]
    AccessRoute,
    #[display("neighbour")]
    NeighbourType,
    #[display("structure")]
    Structure,
    #[display("privacy")]
    Privacy,
    #[display("rule")]
    Rule,
    #[display("sanitary")]
    Sanitary,
    #[display("room_facility")]
    RoomFacility,
    #[display("air_condition")]
    AirCondition,
    #[display("weekend")]
    Weekend,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 12] = [
        Self::Facility,
        Self::View,
        Self::Texture,
        Self::AccessRoute,
        Self::NeighbourType,
        Self::Structure,
        Self::Privacy,
        Self::Rule,
        Self::Sanitary,
        Self::RoomFacility,
        Self::AirCondition,
        Self::Weekend,
    ];
}

/// Input type of a dynamic field declared on a reference option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Toggle,
    Text,
    Numeric,
}

/// A value held by a dynamic field. Numeric fields are carried as digit
/// strings, the same as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Toggle(bool),
    Text(String),
}

impl FieldInput {
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Toggle(b) => *b,
            Self::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Toggle(_) => "",
            Self::Text(s) => s,
        }
    }
}

/// A dynamic field value stored on the house.
///
/// Older records identify the field only by its display title; `key` is
/// absent for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    pub value: FieldInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityValue {
    pub type_key: String,
    #[serde(default)]
    pub fields: Vec<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub alley: String,
    #[serde(default)]
    pub plaque: String,
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub province_id: Option<ProvinceId>,
    pub city_id: Option<CityId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub textures: Vec<String>,
    #[serde(default)]
    pub views: Vec<String>,
    pub neighbour_type: Option<String>,
    #[serde(default)]
    pub access_routes: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub neighbourhood_description: String,
}

/// Amounts for one season, as digit strings without separators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPrice {
    pub normal: Option<String>,
    pub weekend: Option<String>,
    pub holiday: Option<String>,
    pub peak: Option<String>,
    pub extra_person: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPrices {
    #[serde(default)]
    pub spring: SeasonPrice,
    #[serde(default)]
    pub summer: SeasonPrice,
    #[serde(default)]
    pub autumn: SeasonPrice,
    #[serde(default)]
    pub winter: SeasonPrice,
}

impl SeasonPrices {
    pub fn season(&self, season: Season) -> &SeasonPrice {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        }
    }

    pub fn season_mut(&mut self, season: Season) -> &mut SeasonPrice {
        match season {
            Season::Spring => &mut self.spring,
            Season::Summer => &mut self.summer,
            Season::Autumn => &mut self.autumn,
            Season::Winter => &mut self.winter,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRules {
    pub min_stay: Option<String>,
    pub max_stay: Option<String>,
    pub weekly_discount: Option<String>,
    pub monthly_discount: Option<String>,
    pub capacity: Option<String>,
    pub max_capacity: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    /// Key of the weekend convention option.
    pub weekend: Option<String>,
    #[serde(default)]
    pub weekday_min_stay: BTreeMap<Weekday, String>,
}

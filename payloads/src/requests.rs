use crate::{
    CityId, FacilityValue, PriceHandleBy, ProvinceId, RuleStatus, SeasonPrice,
    Weekday,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value sent for every extra-person price while prices are handled per
/// night.
pub const EXTRA_PERSON_SENTINEL: &str = "0";

pub const MAX_MEDIA_SIZE: usize = 5 * 1024 * 1024;

/// Wraps a body for endpoints that take a `POST` with a method override
/// field instead of a real `PUT`.
#[derive(Debug, Serialize)]
pub struct MethodOverride<'a, T> {
    #[serde(rename = "_method")]
    pub method: &'static str,
    #[serde(flatten)]
    pub body: &'a T,
}

impl<'a, T> MethodOverride<'a, T> {
    pub fn put(body: &'a T) -> Self {
        Self { method: "PUT", body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub address: String,
    pub street: String,
    pub alley: String,
    pub plaque: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub province_id: Option<ProvinceId>,
    pub city_id: Option<CityId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralUpdate {
    pub name: String,
    pub land_size: String,
    pub building_size: String,
    pub structure_type: Option<String>,
    pub privacy: Option<String>,
    pub is_rent_room: bool,
    pub price_handle_by: PriceHandleBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentUpdate {
    pub textures: Vec<String>,
    pub views: Vec<String>,
    pub neighbour_type: Option<String>,
    pub access_routes: Vec<String>,
    pub description: String,
    pub neighbourhood_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitiesUpdate {
    pub facilities: Vec<FacilityValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitariesUpdate {
    pub sanitaries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesUpdate {
    pub rules: BTreeMap<String, RuleStatus>,
}

/// Seasonal prices as the flat body the service expects, e.g.
/// `normal_spring`, `extra_person_winter`. Amounts carry no separators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub normal_spring: String,
    pub weekend_spring: String,
    pub holiday_spring: String,
    pub peak_spring: String,
    pub extra_person_spring: String,
    pub normal_summer: String,
    pub weekend_summer: String,
    pub holiday_summer: String,
    pub peak_summer: String,
    pub extra_person_summer: String,
    pub normal_autumn: String,
    pub weekend_autumn: String,
    pub holiday_autumn: String,
    pub peak_autumn: String,
    pub extra_person_autumn: String,
    pub normal_winter: String,
    pub weekend_winter: String,
    pub holiday_winter: String,
    pub peak_winter: String,
    pub extra_person_winter: String,
}

impl PriceUpdate {
    /// Flattens seasonal amounts; missing amounts are sent empty.
    pub fn from_seasons(
        spring: &SeasonPrice,
        summer: &SeasonPrice,
        autumn: &SeasonPrice,
        winter: &SeasonPrice,
    ) -> Self {
        let amount = |a: &Option<String>| a.clone().unwrap_or_default();
        Self {
            normal_spring: amount(&spring.normal),
            weekend_spring: amount(&spring.weekend),
            holiday_spring: amount(&spring.holiday),
            peak_spring: amount(&spring.peak),
            extra_person_spring: amount(&spring.extra_person),
            normal_summer: amount(&summer.normal),
            weekend_summer: amount(&summer.weekend),
            holiday_summer: amount(&summer.holiday),
            peak_summer: amount(&summer.peak),
            extra_person_summer: amount(&summer.extra_person),
            normal_autumn: amount(&autumn.normal),
            weekend_autumn: amount(&autumn.weekend),
            holiday_autumn: amount(&autumn.holiday),
            peak_autumn: amount(&autumn.peak),
            extra_person_autumn: amount(&autumn.extra_person),
            normal_winter: amount(&winter.normal),
            weekend_winter: amount(&winter.weekend),
            holiday_winter: amount(&winter.holiday),
            peak_winter: amount(&winter.peak),
            extra_person_winter: amount(&winter.extra_person),
        }
    }

    /// Overwrites the four seasonal extra-person amounts.
    pub fn set_extra_person(&mut self, amount: &str) {
        self.extra_person_spring = amount.to_string();
        self.extra_person_summer = amount.to_string();
        self.extra_person_autumn = amount.to_string();
        self.extra_person_winter = amount.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub min_stay: String,
    pub max_stay: String,
    pub weekly_discount: String,
    pub monthly_discount: String,
    pub capacity: String,
    pub max_capacity: String,
    pub check_in: String,
    pub check_out: String,
    pub weekend: Option<String>,
    pub weekday_min_stay: BTreeMap<Weekday, String>,
}

/// Partial update of the house root. Each variant is the body of one
/// section's save.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HouseUpdate {
    Address(AddressUpdate),
    Location(LocationUpdate),
    General(GeneralUpdate),
    Environment(EnvironmentUpdate),
    Sanitaries(SanitariesUpdate),
    Rules(RulesUpdate),
    Prices(PriceUpdate),
    Reservation(ReservationUpdate),
}

/// Create/update body for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub name: String,
    pub single_beds: u32,
    pub double_beds: u32,
    pub sofa_beds: u32,
    pub floor_mattresses: u32,
    pub facilities: Vec<String>,
    pub air_conditions: Vec<String>,
    pub is_master: bool,
    pub is_living_room: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Multipart body for creating or updating a media item. The file is
/// required on create and optional on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub title: String,
    pub is_main: bool,
    pub file: Option<MediaFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub national_code: String,
    pub sheba: String,
}

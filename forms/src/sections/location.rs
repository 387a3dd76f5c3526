use payloads::{
    CityId, OptionCategory, ProvinceId,
    requests::{HouseUpdate, LocationUpdate},
    responses::House,
};

use super::SectionForm;
use crate::{options::OptionLists, status::FormErrors, workflow::Submission};

/// Province, city and map point. Provinces and cities are separate lookups
/// rather than reference option lists; the city list depends on the
/// selected province.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    province_id: Option<ProvinceId>,
    city_id: Option<CityId>,
    latitude: String,
    longitude: String,
}

impl LocationForm {
    pub fn province_id(&self) -> Option<ProvinceId> {
        self.province_id
    }

    pub fn city_id(&self) -> Option<CityId> {
        self.city_id
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    /// Returns true when the province changed, meaning the city was cleared
    /// and the city list has to be fetched again.
    pub fn set_province(&mut self, province_id: Option<ProvinceId>) -> bool {
        if self.province_id == province_id {
            return false;
        }
        self.province_id = province_id;
        self.city_id = None;
        true
    }

    pub fn set_city(&mut self, city_id: Option<CityId>) {
        self.city_id = city_id;
    }

    pub fn set_latitude(&mut self, value: &str) {
        self.latitude = value.trim().to_string();
    }

    pub fn set_longitude(&mut self, value: &str) {
        self.longitude = value.trim().to_string();
    }

    /// A point picked on the map.
    pub fn set_point(&mut self, latitude: f64, longitude: f64) {
        self.latitude = latitude.to_string();
        self.longitude = longitude.to_string();
    }
}

fn parse_coordinate(
    value: &str,
    limit: f64,
    field: &str,
    errors: &mut FormErrors,
) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Some(v),
        _ => {
            errors.set(
                field,
                format!("Must be a number between -{limit} and {limit}"),
            );
            None
        }
    }
}

impl SectionForm for LocationForm {
    const OPTIONS: &'static [OptionCategory] = &[];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        let location = &house.location;
        Self {
            province_id: location.province_id,
            city_id: location.city_id,
            latitude: location
                .latitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            longitude: location
                .longitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        let mut errors = FormErrors::default();
        let latitude =
            parse_coordinate(&self.latitude, 90.0, "latitude", &mut errors);
        let longitude =
            parse_coordinate(&self.longitude, 180.0, "longitude", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Submission::HouseOverride(HouseUpdate::Location(LocationUpdate {
            province_id: self.province_id,
            city_id: self.city_id,
            latitude,
            longitude,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn changing_province_clears_city() {
        let mut house = fixtures::house();
        house.location.province_id = Some(ProvinceId(8));
        house.location.city_id = Some(CityId(301));
        let mut form = LocationForm::seed(&house, &OptionLists::default());

        assert!(!form.set_province(Some(ProvinceId(8))));
        assert_eq!(form.city_id(), Some(CityId(301)));
        assert!(form.set_province(Some(ProvinceId(3))));
        assert_eq!(form.city_id(), None);
    }

    #[test]
    fn coordinates_are_parsed_on_submit() {
        let mut form = LocationForm::default();
        form.set_point(35.7, 51.4);
        let Ok(Submission::HouseOverride(HouseUpdate::Location(body))) =
            form.submission()
        else {
            panic!("expected a location override");
        };
        assert_eq!(body.latitude, Some(35.7));
        assert_eq!(body.longitude, Some(51.4));

        form.set_latitude("north");
        form.set_longitude("200");
        let errors = form.submission().unwrap_err();
        assert!(errors.get("latitude").is_some());
        assert!(errors.get("longitude").is_some());
    }

    #[test]
    fn empty_coordinates_are_sent_as_null() {
        let form = LocationForm::default();
        let Ok(Submission::HouseOverride(HouseUpdate::Location(body))) =
            form.submission()
        else {
            panic!("expected a location override");
        };
        assert_eq!(body.latitude, None);
    }
}

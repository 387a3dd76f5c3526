use payloads::{
    OptionCategory, PriceHandleBy,
    requests::{GeneralUpdate, HouseUpdate},
    responses::House,
};

use super::SectionForm;
use crate::{
    format::{decimal_only, format_thousands, strip_separators},
    options::OptionLists,
    status::FormErrors,
    workflow::Submission,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralForm {
    pub name: String,
    land_size: String,
    building_size: String,
    pub structure_type: Option<String>,
    pub privacy: Option<String>,
    pub is_rent_room: bool,
    pub price_handle_by: PriceHandleBy,
}

impl GeneralForm {
    /// Square meters, grouped for display.
    pub fn land_size(&self) -> String {
        format_thousands(&self.land_size)
    }

    pub fn building_size(&self) -> String {
        format_thousands(&self.building_size)
    }

    pub fn set_land_size(&mut self, input: &str) {
        self.land_size = decimal_only(input);
    }

    pub fn set_building_size(&mut self, input: &str) {
        self.building_size = decimal_only(input);
    }

    /// Empty selects clear the choice.
    pub fn set_structure_type(&mut self, key: &str) {
        self.structure_type = non_empty(key);
    }

    pub fn set_privacy(&mut self, key: &str) {
        self.privacy = non_empty(key);
    }
}

fn non_empty(key: &str) -> Option<String> {
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

impl SectionForm for GeneralForm {
    const OPTIONS: &'static [OptionCategory] =
        &[OptionCategory::Structure, OptionCategory::Privacy];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        Self {
            name: house.name.clone(),
            land_size: strip_separators(
                house.land_size.as_deref().unwrap_or(""),
            ),
            building_size: strip_separators(
                house.building_size.as_deref().unwrap_or(""),
            ),
            structure_type: house.structure_type.clone(),
            privacy: house.privacy.clone(),
            is_rent_room: house.is_rent_room,
            price_handle_by: house.price_handle_by,
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.set("name", "Name is required");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Submission::House(HouseUpdate::General(GeneralUpdate {
            name: self.name.trim().to_string(),
            land_size: self.land_size.clone(),
            building_size: self.building_size.clone(),
            structure_type: self.structure_type.clone(),
            privacy: self.privacy.clone(),
            is_rent_room: self.is_rent_room,
            price_handle_by: self.price_handle_by,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn sizes_display_grouped_and_send_bare() {
        let mut house = fixtures::house();
        house.name = "Cottage".into();
        house.land_size = Some("1200".into());
        let mut form = GeneralForm::seed(&house, &OptionLists::default());
        assert_eq!(form.land_size(), "1/200");

        form.set_building_size("2/500");
        form.price_handle_by = PriceHandleBy::PerPerson;
        let Ok(Submission::House(HouseUpdate::General(body))) =
            form.submission()
        else {
            panic!("expected a general update");
        };
        assert_eq!(body.land_size, "1200");
        assert_eq!(body.building_size, "2500");
        assert_eq!(body.price_handle_by, PriceHandleBy::PerPerson);
    }

    #[test]
    fn fractional_sizes_are_sent_back_unchanged() {
        let mut house = fixtures::house();
        house.name = "Cottage".into();
        house.land_size = Some("250.5".into());
        house.building_size = Some("1200.25".into());
        let mut form = GeneralForm::seed(&house, &OptionLists::default());
        assert_eq!(form.land_size(), "250.5");
        assert_eq!(form.building_size(), "1/200.25");

        let Ok(Submission::House(HouseUpdate::General(body))) =
            form.submission()
        else {
            panic!("expected a general update");
        };
        assert_eq!(body.land_size, "250.5");
        assert_eq!(body.building_size, "1200.25");

        form.set_land_size("1/300.75");
        let Ok(Submission::House(HouseUpdate::General(body))) =
            form.submission()
        else {
            panic!("expected a general update");
        };
        assert_eq!(body.land_size, "1300.75");
    }

    #[test]
    fn clearing_a_select_sends_null() {
        let mut form = GeneralForm {
            name: "Cottage".into(),
            ..Default::default()
        };
        form.set_structure_type("villa");
        form.set_structure_type("");
        assert_eq!(form.structure_type, None);
    }
}

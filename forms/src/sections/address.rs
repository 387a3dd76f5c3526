use payloads::{
    OptionCategory,
    requests::{AddressUpdate, HouseUpdate},
    responses::House,
};

use super::SectionForm;
use crate::{
    format::digits_only, options::OptionLists, status::FormErrors,
    workflow::Submission,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Address,
    Street,
    Alley,
    Plaque,
    PostalCode,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        Self::Address,
        Self::Street,
        Self::Alley,
        Self::Plaque,
        Self::PostalCode,
    ];

    /// Name used on the wire and in validation errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Street => "street",
            Self::Alley => "alley",
            Self::Plaque => "plaque",
            Self::PostalCode => "postal_code",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Street => "Street",
            Self::Alley => "Alley",
            Self::Plaque => "Plaque",
            Self::PostalCode => "Postal code",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    address: String,
    street: String,
    alley: String,
    plaque: String,
    postal_code: String,
}

impl AddressForm {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Address => &self.address,
            AddressField::Street => &self.street,
            AddressField::Alley => &self.alley,
            AddressField::Plaque => &self.plaque,
            AddressField::PostalCode => &self.postal_code,
        }
    }

    pub fn set(&mut self, field: AddressField, value: &str) {
        match field {
            AddressField::Address => self.address = value.to_string(),
            AddressField::Street => self.street = value.to_string(),
            AddressField::Alley => self.alley = value.to_string(),
            AddressField::Plaque => self.plaque = value.to_string(),
            AddressField::PostalCode => self.postal_code = digits_only(value),
        }
    }
}

impl SectionForm for AddressForm {
    const OPTIONS: &'static [OptionCategory] = &[];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        let address = &house.address;
        Self {
            address: address.address.clone(),
            street: address.street.clone(),
            alley: address.alley.clone(),
            plaque: address.plaque.clone(),
            postal_code: address.postal_code.clone(),
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        let mut errors = FormErrors::default();
        if self.address.trim().is_empty() {
            errors.set(AddressField::Address.name(), "Address is required");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Submission::HouseOverride(HouseUpdate::Address(AddressUpdate {
            address: self.address.trim().to_string(),
            street: self.street.trim().to_string(),
            alley: self.alley.trim().to_string(),
            plaque: self.plaque.trim().to_string(),
            postal_code: self.postal_code.clone(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn seeds_from_house_and_sends_with_method_override() {
        let mut house = fixtures::house();
        house.address.address = "12 Elm Road".into();
        house.address.postal_code = "1234567890".into();
        let mut form = AddressForm::seed(&house, &OptionLists::default());
        assert_eq!(form.get(AddressField::PostalCode), "1234567890");

        form.set(AddressField::Street, " Pine ");
        form.set(AddressField::PostalCode, "12-34");
        let Ok(Submission::HouseOverride(HouseUpdate::Address(body))) =
            form.submission()
        else {
            panic!("expected an address override");
        };
        assert_eq!(body.street, "Pine");
        assert_eq!(body.postal_code, "1234");
    }

    #[test]
    fn empty_address_is_rejected_locally() {
        let form = AddressForm::default();
        let errors = form.submission().unwrap_err();
        assert_eq!(errors.get("address"), Some("Address is required"));
    }
}

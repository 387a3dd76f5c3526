//! The vendor details form on the profile page.

use payloads::{requests::VendorProfile, responses::UserProfile};

use crate::{format::digits_only, status::FormErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorField {
    FirstName,
    LastName,
    Email,
    NationalCode,
    Sheba,
}

impl VendorField {
    pub const ALL: [VendorField; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::NationalCode,
        Self::Sheba,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::NationalCode => "national_code",
            Self::Sheba => "sheba",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::NationalCode => "National code",
            Self::Sheba => "Bank account (IBAN)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorForm {
    first_name: String,
    last_name: String,
    email: String,
    national_code: String,
    sheba: String,
}

impl VendorForm {
    /// The account number is never returned by the service, so it always
    /// starts empty.
    pub fn seed(profile: &UserProfile) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            first_name: text(&profile.first_name),
            last_name: text(&profile.last_name),
            email: text(&profile.email),
            national_code: text(&profile.national_code),
            sheba: String::new(),
        }
    }

    pub fn get(&self, field: VendorField) -> &str {
        match field {
            VendorField::FirstName => &self.first_name,
            VendorField::LastName => &self.last_name,
            VendorField::Email => &self.email,
            VendorField::NationalCode => &self.national_code,
            VendorField::Sheba => &self.sheba,
        }
    }

    pub fn set(&mut self, field: VendorField, input: &str) {
        match field {
            VendorField::FirstName => self.first_name = input.to_string(),
            VendorField::LastName => self.last_name = input.to_string(),
            VendorField::Email => self.email = input.trim().to_string(),
            VendorField::NationalCode => {
                self.national_code = digits_only(input)
            }
            VendorField::Sheba => {
                self.sheba = input
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_uppercase()
            }
        }
    }

    pub fn submission(&self) -> Result<VendorProfile, FormErrors> {
        let mut errors = FormErrors::default();
        for field in [VendorField::FirstName, VendorField::LastName] {
            if self.get(field).trim().is_empty() {
                let message = format!("{} is required", field.label());
                errors.set(field.name(), message);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(VendorProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.clone(),
            national_code: self.national_code.clone(),
            sheba: self.sheba.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            first_name: Some("Sara".into()),
            last_name: None,
            mobile: "09120000000".into(),
            email: None,
            national_code: Some("0012345678".into()),
            is_vendor: false,
        }
    }

    #[test]
    fn names_are_required() {
        let form = VendorForm::seed(&profile());
        let errors = form.submission().unwrap_err();
        assert_eq!(errors.get("first_name"), None);
        assert_eq!(errors.get("last_name"), Some("Last name is required"));
    }

    #[test]
    fn inputs_are_normalised() {
        let mut form = VendorForm::seed(&profile());
        form.set(VendorField::LastName, "Ahmadi");
        form.set(VendorField::NationalCode, "001-234-5678");
        form.set(VendorField::Sheba, "ir06 0170 0000");
        let body = form.submission().unwrap();
        assert_eq!(body.national_code, "0012345678");
        assert_eq!(body.sheba, "IR0601700000");
        assert_eq!(body.first_name, "Sara");
    }
}

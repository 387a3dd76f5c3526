use payloads::{
    OptionCategory, Weekday,
    requests::{HouseUpdate, ReservationUpdate},
    responses::House,
};
use std::collections::BTreeMap;

use super::SectionForm;
use crate::{
    format::{decimal_only, format_thousands},
    options::OptionLists,
    status::FormErrors,
    workflow::Submission,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationField {
    MinStay,
    MaxStay,
    WeeklyDiscount,
    MonthlyDiscount,
    Capacity,
    MaxCapacity,
    CheckIn,
    CheckOut,
    WeekdayMinStay(Weekday),
}

impl ReservationField {
    pub const SCALARS: [ReservationField; 8] = [
        Self::MinStay,
        Self::MaxStay,
        Self::WeeklyDiscount,
        Self::MonthlyDiscount,
        Self::Capacity,
        Self::MaxCapacity,
        Self::CheckIn,
        Self::CheckOut,
    ];

    /// Name as reported in validation errors.
    pub fn name(&self) -> String {
        match self {
            Self::MinStay => "min_stay".into(),
            Self::MaxStay => "max_stay".into(),
            Self::WeeklyDiscount => "weekly_discount".into(),
            Self::MonthlyDiscount => "monthly_discount".into(),
            Self::Capacity => "capacity".into(),
            Self::MaxCapacity => "max_capacity".into(),
            Self::CheckIn => "check_in".into(),
            Self::CheckOut => "check_out".into(),
            Self::WeekdayMinStay(day) => format!("weekday_min_stay.{day}"),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::MinStay => "Minimum stay (nights)".into(),
            Self::MaxStay => "Maximum stay (nights)".into(),
            Self::WeeklyDiscount => "Weekly discount (%)".into(),
            Self::MonthlyDiscount => "Monthly discount (%)".into(),
            Self::Capacity => "Standard capacity".into(),
            Self::MaxCapacity => "Maximum capacity".into(),
            Self::CheckIn => "Check-in time".into(),
            Self::CheckOut => "Check-out time".into(),
            Self::WeekdayMinStay(day) => format!("Minimum stay from {day}"),
        }
    }

    /// Times are free text; everything else is numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::CheckIn | Self::CheckOut)
    }

    /// Discounts are percentages and may be fractional. Stays and
    /// capacities count nights and guests.
    fn is_percentage(&self) -> bool {
        matches!(self, Self::WeeklyDiscount | Self::MonthlyDiscount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    min_stay: String,
    max_stay: String,
    weekly_discount: String,
    monthly_discount: String,
    capacity: String,
    max_capacity: String,
    check_in: String,
    check_out: String,
    pub weekend: Option<String>,
    weekday_min_stay: BTreeMap<Weekday, String>,
}

impl ReservationForm {
    pub fn get(&self, field: ReservationField) -> &str {
        match field {
            ReservationField::WeekdayMinStay(day) => self
                .weekday_min_stay
                .get(&day)
                .map(String::as_str)
                .unwrap_or(""),
            scalar => self.scalar(scalar),
        }
    }

    /// What the input shows: numbers grouped, times as typed.
    pub fn display(&self, field: ReservationField) -> String {
        let value = self.get(field);
        if field.is_numeric() {
            format_thousands(value)
        } else {
            value.to_string()
        }
    }

    fn scalar(&self, field: ReservationField) -> &str {
        match field {
            ReservationField::MinStay => &self.min_stay,
            ReservationField::MaxStay => &self.max_stay,
            ReservationField::WeeklyDiscount => &self.weekly_discount,
            ReservationField::MonthlyDiscount => &self.monthly_discount,
            ReservationField::Capacity => &self.capacity,
            ReservationField::MaxCapacity => &self.max_capacity,
            ReservationField::CheckIn => &self.check_in,
            ReservationField::CheckOut => &self.check_out,
            ReservationField::WeekdayMinStay(_) => "",
        }
    }

    pub fn set(&mut self, field: ReservationField, input: &str) {
        let value = if field.is_numeric() {
            decimal_only(input)
        } else {
            input.trim().to_string()
        };
        match field {
            ReservationField::MinStay => self.min_stay = value,
            ReservationField::MaxStay => self.max_stay = value,
            ReservationField::WeeklyDiscount => self.weekly_discount = value,
            ReservationField::MonthlyDiscount => self.monthly_discount = value,
            ReservationField::Capacity => self.capacity = value,
            ReservationField::MaxCapacity => self.max_capacity = value,
            ReservationField::CheckIn => self.check_in = value,
            ReservationField::CheckOut => self.check_out = value,
            ReservationField::WeekdayMinStay(day) => {
                self.weekday_min_stay.insert(day, value);
            }
        }
    }

    pub fn set_weekend(&mut self, key: &str) {
        self.weekend = (!key.is_empty()).then(|| key.to_string());
    }

    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        let counts = ReservationField::SCALARS
            .into_iter()
            .chain(Weekday::ALL.map(ReservationField::WeekdayMinStay))
            .filter(|f| f.is_numeric() && !f.is_percentage());
        for field in counts {
            if self.get(field).contains('.') {
                errors.set(field.name(), "Must be a whole number");
            }
        }
        for field in [
            ReservationField::WeeklyDiscount,
            ReservationField::MonthlyDiscount,
        ] {
            if self.get(field).parse::<f64>().is_ok_and(|pct| pct > 100.0) {
                errors.set(field.name(), "Must be at most 100");
            }
        }
        let number = |field| self.get(field).parse::<u32>().ok();
        let below = |low, high| {
            matches!((number(low), number(high)), (Some(l), Some(h)) if h < l)
        };
        if below(ReservationField::MinStay, ReservationField::MaxStay) {
            errors.set(
                ReservationField::MaxStay.name(),
                "Must not be less than the minimum stay",
            );
        }
        if below(ReservationField::Capacity, ReservationField::MaxCapacity) {
            errors.set(
                ReservationField::MaxCapacity.name(),
                "Must not be less than the standard capacity",
            );
        }
        errors
    }
}

impl SectionForm for ReservationForm {
    const OPTIONS: &'static [OptionCategory] = &[OptionCategory::Weekend];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        let rules = &house.reservation;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            min_stay: text(&rules.min_stay),
            max_stay: text(&rules.max_stay),
            weekly_discount: text(&rules.weekly_discount),
            monthly_discount: text(&rules.monthly_discount),
            capacity: text(&rules.capacity),
            max_capacity: text(&rules.max_capacity),
            check_in: text(&rules.check_in),
            check_out: text(&rules.check_out),
            weekend: rules.weekend.clone(),
            weekday_min_stay: Weekday::ALL
                .into_iter()
                .map(|day| {
                    let stored = rules.weekday_min_stay.get(&day);
                    (day, stored.cloned().unwrap_or_default())
                })
                .collect(),
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Submission::House(HouseUpdate::Reservation(ReservationUpdate {
            min_stay: self.min_stay.clone(),
            max_stay: self.max_stay.clone(),
            weekly_discount: self.weekly_discount.clone(),
            monthly_discount: self.monthly_discount.clone(),
            capacity: self.capacity.clone(),
            max_capacity: self.max_capacity.clone(),
            check_in: self.check_in.clone(),
            check_out: self.check_out.clone(),
            weekend: self.weekend.clone(),
            weekday_min_stay: self.weekday_min_stay.clone(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn every_weekday_is_seeded() {
        let mut house = fixtures::house();
        house
            .reservation
            .weekday_min_stay
            .insert(Weekday::Thursday, "2".into());
        let form = ReservationForm::seed(&house, &OptionLists::default());
        for day in Weekday::ALL {
            let expected = if day == Weekday::Thursday { "2" } else { "" };
            let field = ReservationField::WeekdayMinStay(day);
            assert_eq!(form.get(field), expected);
        }
    }

    #[test]
    fn weekday_errors_are_named_per_day() {
        assert_eq!(
            ReservationField::WeekdayMinStay(Weekday::Friday).name(),
            "weekday_min_stay.friday"
        );
    }

    #[test]
    fn numeric_inputs_keep_only_numbers() {
        let mut form = ReservationForm::default();
        form.set(ReservationField::Capacity, "4 people");
        form.set(ReservationField::WeeklyDiscount, "12.5 %");
        assert_eq!(form.get(ReservationField::WeeklyDiscount), "12.5");
        form.set(ReservationField::CheckIn, " 14:00 ");
        assert_eq!(form.get(ReservationField::Capacity), "4");
        assert_eq!(form.get(ReservationField::CheckIn), "14:00");
    }

    #[test]
    fn inconsistent_values_are_caught_before_sending() {
        let mut form = ReservationForm::default();
        form.set(ReservationField::Capacity, "6");
        form.set(ReservationField::MaxCapacity, "4");
        form.set(ReservationField::WeeklyDiscount, "150");
        let errors = form.submission().unwrap_err();
        assert!(errors.get("max_capacity").is_some());
        assert!(errors.get("weekly_discount").is_some());
        assert_eq!(errors.get("capacity"), None);
    }

    #[test]
    fn fractional_discount_is_accepted() {
        let mut form = ReservationForm::default();
        form.set(ReservationField::WeeklyDiscount, "12.5");
        form.set(ReservationField::MonthlyDiscount, "100.5");
        let errors = form.submission().unwrap_err();
        assert_eq!(errors.get("weekly_discount"), None);
        assert_eq!(errors.get("monthly_discount"), Some("Must be at most 100"));

        form.set(ReservationField::MonthlyDiscount, "20");
        let Ok(Submission::House(HouseUpdate::Reservation(body))) =
            form.submission()
        else {
            panic!("expected a reservation update");
        };
        assert_eq!(body.weekly_discount, "12.5");
    }

    #[test]
    fn numbers_display_grouped_and_send_bare() {
        let mut form = ReservationForm::default();
        form.set(ReservationField::MaxStay, "1/000");
        form.set(ReservationField::CheckIn, "14:00");
        assert_eq!(form.get(ReservationField::MaxStay), "1000");
        assert_eq!(form.display(ReservationField::MaxStay), "1/000");
        assert_eq!(form.display(ReservationField::CheckIn), "14:00");

        let Ok(Submission::House(HouseUpdate::Reservation(body))) =
            form.submission()
        else {
            panic!("expected a reservation update");
        };
        assert_eq!(body.max_stay, "1000");
    }

    #[test]
    fn fractional_counts_are_rejected() {
        let mut form = ReservationForm::default();
        form.set(ReservationField::Capacity, "2.5");
        form.set(ReservationField::WeekdayMinStay(Weekday::Friday), "1.5");
        let errors = form.submission().unwrap_err();
        assert_eq!(errors.get("capacity"), Some("Must be a whole number"));
        assert_eq!(
            errors.get("weekday_min_stay.friday"),
            Some("Must be a whole number")
        );
        assert_eq!(errors.get("max_capacity"), None);
    }
}

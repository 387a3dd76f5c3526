//! Seasonal prices, for the whole house or room by room.
//!
//! Amounts are kept as bare digits and grouped only for display. When the
//! house prices per night the extra-person amounts are hidden and always
//! sent as [`EXTRA_PERSON_SENTINEL`].

use payloads::{
    PriceHandleBy, RoomId, Season, SeasonPrice, SeasonPrices,
    requests::{EXTRA_PERSON_SENTINEL, HouseUpdate, PriceUpdate},
    responses::House,
};
use std::collections::BTreeMap;

use crate::{
    format::{decimal_only, format_thousands, strip_separators},
    status::FormErrors,
    workflow::Submission,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceKind {
    Normal,
    Weekend,
    Holiday,
    Peak,
    ExtraPerson,
}

impl PriceKind {
    pub const ALL: [PriceKind; 5] = [
        Self::Normal,
        Self::Weekend,
        Self::Holiday,
        Self::Peak,
        Self::ExtraPerson,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal days",
            Self::Weekend => "Weekends",
            Self::Holiday => "Holidays",
            Self::Peak => "Peak days",
            Self::ExtraPerson => "Extra person",
        }
    }

    /// Prefix of the flat field name, as in `normal_spring`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Weekend => "weekend",
            Self::Holiday => "holiday",
            Self::Peak => "peak",
            Self::ExtraPerson => "extra_person",
        }
    }

    /// Name of the field for one season, as reported in validation errors.
    pub fn field_name(&self, season: Season) -> String {
        format!("{}_{season}", self.prefix())
    }
}

/// A season × kind grid of amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceGrid {
    cells: BTreeMap<(Season, PriceKind), String>,
}

impl PriceGrid {
    pub fn from_prices(prices: &SeasonPrices) -> Self {
        let mut grid = Self::default();
        for season in Season::ALL {
            let stored = prices.season(season);
            for kind in PriceKind::ALL {
                let amount = match kind {
                    PriceKind::Normal => &stored.normal,
                    PriceKind::Weekend => &stored.weekend,
                    PriceKind::Holiday => &stored.holiday,
                    PriceKind::Peak => &stored.peak,
                    PriceKind::ExtraPerson => &stored.extra_person,
                };
                let digits =
                    strip_separators(amount.as_deref().unwrap_or_default());
                grid.cells.insert((season, kind), digits);
            }
        }
        grid
    }

    /// Stored amount, without grouping.
    pub fn get(&self, season: Season, kind: PriceKind) -> &str {
        self.cells
            .get(&(season, kind))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// What the input shows.
    pub fn display(&self, season: Season, kind: PriceKind) -> String {
        format_thousands(self.get(season, kind))
    }

    pub fn set(&mut self, season: Season, kind: PriceKind, input: &str) {
        self.cells.insert((season, kind), decimal_only(input));
    }

    fn season_price(&self, season: Season) -> SeasonPrice {
        let amount = |kind| Some(self.get(season, kind).to_string());
        SeasonPrice {
            normal: amount(PriceKind::Normal),
            weekend: amount(PriceKind::Weekend),
            holiday: amount(PriceKind::Holiday),
            peak: amount(PriceKind::Peak),
            extra_person: amount(PriceKind::ExtraPerson),
        }
    }

    /// The flat body, with extra-person amounts forced to the sentinel when
    /// prices are per night.
    pub fn to_update(&self, handle_by: PriceHandleBy) -> PriceUpdate {
        let mut update = PriceUpdate::from_seasons(
            &self.season_price(Season::Spring),
            &self.season_price(Season::Summer),
            &self.season_price(Season::Autumn),
            &self.season_price(Season::Winter),
        );
        if handle_by == PriceHandleBy::PerNight {
            update.set_extra_person(EXTRA_PERSON_SENTINEL);
        }
        update
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPriceGrid {
    pub room_id: RoomId,
    pub name: String,
    pub grid: PriceGrid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingForm {
    pub price_handle_by: PriceHandleBy,
    pub is_rent_room: bool,
    pub house: PriceGrid,
    pub rooms: Vec<RoomPriceGrid>,
}

impl PricingForm {
    pub fn seed(house: &House) -> Self {
        Self {
            price_handle_by: house.price_handle_by,
            is_rent_room: house.is_rent_room,
            house: PriceGrid::from_prices(&house.prices),
            rooms: house
                .rooms
                .iter()
                .map(|room| RoomPriceGrid {
                    room_id: room.uuid.clone(),
                    name: room.name.clone(),
                    grid: PriceGrid::from_prices(
                        &room.prices.clone().unwrap_or_default(),
                    ),
                })
                .collect(),
        }
    }

    pub fn extra_person_visible(&self) -> bool {
        self.price_handle_by == PriceHandleBy::PerPerson
    }

    /// Kinds to render as inputs.
    pub fn visible_kinds(&self) -> impl Iterator<Item = PriceKind> + '_ {
        PriceKind::ALL.into_iter().filter(|kind| {
            *kind != PriceKind::ExtraPerson || self.extra_person_visible()
        })
    }

    pub fn room_mut(&mut self, room_id: &RoomId) -> Option<&mut PriceGrid> {
        self.rooms
            .iter_mut()
            .find(|r| &r.room_id == room_id)
            .map(|r| &mut r.grid)
    }

    /// The whole-house save. Not used when renting by room.
    pub fn house_submission(&self) -> Submission {
        Submission::House(HouseUpdate::Prices(
            self.house.to_update(self.price_handle_by),
        ))
    }

    /// The save for one room; each room submits on its own.
    pub fn room_submission(
        &self,
        room_id: &RoomId,
    ) -> Result<Submission, FormErrors> {
        let mut errors = FormErrors::default();
        let Some(room) = self.rooms.iter().find(|r| &r.room_id == room_id)
        else {
            errors.set_general("This room no longer exists");
            return Err(errors);
        };
        Ok(Submission::RoomPrices {
            room_id: room_id.clone(),
            prices: room.grid.to_update(self.price_handle_by),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;
    use payloads::responses::Room;

    fn priced_house() -> House {
        let mut house = fixtures::house();
        for season in Season::ALL {
            let price = house.prices.season_mut(season);
            price.normal = Some("100000".into());
            price.extra_person = Some("20000".into());
        }
        house.prices.spring.normal = Some("150000".into());
        house
    }

    #[test]
    fn amounts_display_grouped() {
        let form = PricingForm::seed(&priced_house());
        let house = &form.house;
        assert_eq!(house.display(Season::Spring, PriceKind::Normal), "150/000");
        assert_eq!(house.get(Season::Spring, PriceKind::Normal), "150000");
    }

    #[test]
    fn per_night_always_sends_the_sentinel() {
        let mut form = PricingForm::seed(&priced_house());
        assert!(!form.extra_person_visible());
        assert!(!form.visible_kinds().any(|k| k == PriceKind::ExtraPerson));
        form.house.set(Season::Winter, PriceKind::ExtraPerson, "99/000");

        let Submission::House(HouseUpdate::Prices(body)) =
            form.house_submission()
        else {
            panic!("expected a price update");
        };
        for amount in [
            &body.extra_person_spring,
            &body.extra_person_summer,
            &body.extra_person_autumn,
            &body.extra_person_winter,
        ] {
            assert_eq!(amount, EXTRA_PERSON_SENTINEL);
        }
    }

    #[test]
    fn per_person_keeps_extra_person_amounts() {
        let mut house = priced_house();
        house.price_handle_by = PriceHandleBy::PerPerson;
        let mut form = PricingForm::seed(&house);
        assert!(form.extra_person_visible());
        form.house.set(Season::Summer, PriceKind::ExtraPerson, "25/000");
        let Submission::House(HouseUpdate::Prices(body)) =
            form.house_submission()
        else {
            panic!("expected a price update");
        };
        assert_eq!(body.extra_person_summer, "25000");
        assert_eq!(body.extra_person_spring, "20000");
    }

    #[test]
    fn entered_amounts_are_sent_without_separators() {
        let mut form = PricingForm::seed(&priced_house());
        form.house.set(Season::Spring, PriceKind::Normal, "200/000");
        let Submission::House(HouseUpdate::Prices(body)) =
            form.house_submission()
        else {
            panic!("expected a price update");
        };
        assert_eq!(body.normal_spring, "200000");
    }

    #[test]
    fn fractional_amounts_keep_their_point() {
        let mut house = priced_house();
        house.prices.summer.peak = Some("1250.5".into());
        let mut form = PricingForm::seed(&house);
        assert_eq!(
            form.house.display(Season::Summer, PriceKind::Peak),
            "1/250.5"
        );

        form.house.set(Season::Spring, PriceKind::Normal, "99.5");
        let Submission::House(HouseUpdate::Prices(body)) =
            form.house_submission()
        else {
            panic!("expected a price update");
        };
        assert_eq!(body.normal_spring, "99.5");
        assert_eq!(body.peak_summer, "1250.5");
    }

    #[test]
    fn rooms_submit_independently() {
        let mut house = priced_house();
        house.is_rent_room = true;
        for id in ["r1", "r2"] {
            house.rooms.push(Room {
                uuid: RoomId(id.into()),
                name: id.into(),
                single_beds: 1,
                double_beds: 0,
                sofa_beds: 0,
                floor_mattresses: 0,
                facilities: vec![],
                air_conditions: vec![],
                is_master: false,
                is_living_room: false,
                prices: Some(house.prices.clone()),
            });
        }
        let mut form = PricingForm::seed(&house);
        let r2 = RoomId("r2".into());
        form.room_mut(&r2)
            .unwrap()
            .set(Season::Autumn, PriceKind::Peak, "300000");

        let Ok(Submission::RoomPrices { room_id, prices }) =
            form.room_submission(&r2)
        else {
            panic!("expected room prices");
        };
        assert_eq!(room_id, r2);
        assert_eq!(prices.peak_autumn, "300000");
        assert!(form.room_submission(&RoomId("gone".into())).is_err());
    }
}

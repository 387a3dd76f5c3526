//! Sample data for the mock house service.
//!
//! Used by the integration tests in forms/tests and by dev-server. Two
//! houses are provided:
//! - a whole-house rental priced per night, with a living room already set
//!   up and two photos
//! - a rent-by-room guesthouse priced per person, with per-room prices

use payloads::{
    Address, CityId, Environment, FacilityValue, FieldInput, FieldKind,
    FieldValue, HouseId, Location, MediaId, OptionCategory, PriceHandleBy,
    ProvinceId, ReservationRules, RoomId, RuleStatus, Season, SeasonPrice,
    SeasonPrices, Weekday,
    responses::{
        City, House, Media, OptionField, Province, ReferenceOption, Room,
        UserProfile,
    },
};
use std::collections::BTreeMap;

pub const HOUSE_ID: &str = "3f6c1a52-8d2e-4c6b-9a57-2b1f0e4d7c11";
pub const GUESTHOUSE_ID: &str = "9b0e7d44-1c3a-4f2e-8e61-5d2c7a9f0b38";
pub const LIVING_ROOM_ID: &str = "c2d4e6f8-0a1b-4c3d-8e5f-6a7b8c9d0e1f";
pub const MASTER_ROOM_ID: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";

pub fn house_id() -> HouseId {
    HouseId(HOUSE_ID.into())
}

pub fn guesthouse_id() -> HouseId {
    HouseId(GUESTHOUSE_ID.into())
}

pub fn profile() -> UserProfile {
    UserProfile {
        first_name: Some("Sara".into()),
        last_name: Some("Ahmadi".into()),
        mobile: "09121234567".into(),
        email: Some("sara@example.com".into()),
        national_code: None,
        is_vendor: false,
    }
}

fn season(normal: &str, extra_person: &str) -> SeasonPrice {
    SeasonPrice {
        normal: Some(normal.into()),
        weekend: Some("180000".into()),
        holiday: Some("200000".into()),
        peak: Some("250000".into()),
        extra_person: Some(extra_person.into()),
    }
}

fn prices(spring: &str) -> SeasonPrices {
    SeasonPrices {
        spring: season(spring, "0"),
        summer: season("170000", "0"),
        autumn: season("140000", "0"),
        winter: season("120000", "0"),
    }
}

fn room(id: &str, name: &str) -> Room {
    Room {
        uuid: RoomId(id.into()),
        name: name.into(),
        single_beds: 0,
        double_beds: 1,
        sofa_beds: 0,
        floor_mattresses: 0,
        facilities: vec!["tv".into()],
        air_conditions: vec!["split".into()],
        is_master: false,
        is_living_room: false,
        prices: None,
    }
}

/// Whole-house rental, per night, spring normal price `150000`.
pub fn house() -> House {
    let mut master = room(MASTER_ROOM_ID, "Master bedroom");
    master.is_master = true;
    let mut living = room(LIVING_ROOM_ID, "Living room");
    living.double_beds = 0;
    living.sofa_beds = 2;
    living.is_living_room = true;

    House {
        uuid: house_id(),
        name: "Cedar Cottage".into(),
        address: Address {
            address: "Forest road, after the old mill".into(),
            street: "Cedar".into(),
            alley: "Third".into(),
            plaque: "14".into(),
            postal_code: "4691735411".into(),
        },
        location: Location {
            province_id: Some(ProvinceId(27)),
            city_id: Some(CityId(2701)),
            latitude: Some(36.6566),
            longitude: Some(51.4186),
        },
        land_size: Some("1200".into()),
        building_size: Some("180".into()),
        structure_type: Some("villa".into()),
        privacy: Some("private".into()),
        is_rent_room: false,
        price_handle_by: PriceHandleBy::PerNight,
        environment: Environment {
            textures: vec!["rural".into()],
            views: vec!["forest".into(), "mountain".into()],
            neighbour_type: Some("local".into()),
            access_routes: vec!["asphalt".into()],
            description: "Quiet cottage at the edge of the forest.".into(),
            neighbourhood_description: "A small village with a bakery."
                .into(),
        },
        facilities: vec![
            FacilityValue {
                type_key: "pool".into(),
                // stored before fields had keys
                fields: vec![FieldValue {
                    key: None,
                    title: "Heated".into(),
                    value: FieldInput::Toggle(true),
                }],
            },
            FacilityValue {
                type_key: "parking".into(),
                fields: vec![FieldValue {
                    key: Some("spaces".into()),
                    title: "Spaces".into(),
                    value: FieldInput::Text("2".into()),
                }],
            },
        ],
        rooms: vec![master, living],
        sanitaries: vec!["shower".into(), "western_toilet".into()],
        rules: BTreeMap::from([
            ("pets".into(), RuleStatus::Conditional),
            ("smoking".into(), RuleStatus::Forbidden),
        ]),
        prices: prices("150000"),
        reservation: ReservationRules {
            min_stay: Some("1".into()),
            max_stay: Some("14".into()),
            weekly_discount: Some("10".into()),
            monthly_discount: Some("20".into()),
            capacity: Some("4".into()),
            max_capacity: Some("6".into()),
            check_in: Some("14:00".into()),
            check_out: Some("12:00".into()),
            weekend: Some("thu_fri".into()),
            weekday_min_stay: BTreeMap::from([(
                Weekday::Thursday,
                "2".into(),
            )]),
        },
        medias: vec![
            Media {
                id: MediaId(1),
                title: Some("Front porch".into()),
                url: format!("/storage/houses/{HOUSE_ID}/1-porch.jpg"),
                is_main: true,
            },
            Media {
                id: MediaId(2),
                title: Some("Garden".into()),
                url: format!("/storage/houses/{HOUSE_ID}/2-garden.jpg"),
                is_main: false,
            },
        ],
    }
}

/// Rent-by-room guesthouse priced per person.
pub fn guesthouse() -> House {
    let rooms = [
        ("blue", "Blue room", "90000"),
        ("green", "Green room", "95000"),
    ]
    .into_iter()
    .map(|(id, name, spring)| {
        let mut r = room(id, name);
        let mut room_prices = prices(spring);
        for s in Season::ALL {
            room_prices.season_mut(s).extra_person = Some("30000".into());
        }
        r.prices = Some(room_prices);
        r
    })
    .collect();

    House {
        uuid: guesthouse_id(),
        name: "Harbour Guesthouse".into(),
        address: Address::default(),
        location: Location::default(),
        land_size: None,
        building_size: None,
        structure_type: Some("apartment".into()),
        privacy: Some("shared".into()),
        is_rent_room: true,
        price_handle_by: PriceHandleBy::PerPerson,
        environment: Environment::default(),
        facilities: Vec::new(),
        rooms,
        sanitaries: Vec::new(),
        rules: BTreeMap::new(),
        prices: SeasonPrices::default(),
        reservation: ReservationRules::default(),
        medias: Vec::new(),
    }
}

fn option(key: &str, label: &str) -> ReferenceOption {
    ReferenceOption {
        key: key.into(),
        label: label.into(),
        fields: Vec::new(),
    }
}

fn field(key: &str, title: &str, kind: FieldKind) -> OptionField {
    OptionField {
        key: key.into(),
        title: title.into(),
        kind,
    }
}

/// The lookup list served for `category`.
pub fn reference_options(category: OptionCategory) -> Vec<ReferenceOption> {
    let pairs: &[(&str, &str)] = match category {
        OptionCategory::Facility => {
            let mut pool = option("pool", "Swimming pool");
            pool.fields = vec![
                field("heated", "Heated", FieldKind::Toggle),
                field("length", "Length (m)", FieldKind::Numeric),
            ];
            let mut parking = option("parking", "Parking");
            parking.fields = vec![
                field("spaces", "Spaces", FieldKind::Numeric),
                field("covered", "Covered", FieldKind::Toggle),
            ];
            let mut bbq = option("bbq", "Barbecue");
            bbq.fields = vec![field("note", "Note", FieldKind::Text)];
            return vec![pool, parking, bbq, option("wifi", "Wi-Fi")];
        }
        OptionCategory::View => &[
            ("sea", "Sea"),
            ("forest", "Forest"),
            ("mountain", "Mountain"),
            ("city", "City"),
        ],
        OptionCategory::Texture => {
            &[("rural", "Rural"), ("urban", "Urban"), ("coastal", "Coastal")]
        }
        OptionCategory::AccessRoute => &[
            ("asphalt", "Asphalt"),
            ("dirt", "Dirt road"),
            ("gravel", "Gravel"),
        ],
        OptionCategory::NeighbourType => {
            &[("local", "Locals"), ("villas", "Holiday villas")]
        }
        OptionCategory::Structure => &[
            ("villa", "Villa"),
            ("apartment", "Apartment"),
            ("cottage", "Cottage"),
        ],
        OptionCategory::Privacy => {
            &[("private", "Private"), ("shared", "Shared yard")]
        }
        OptionCategory::Rule => &[
            ("pets", "Pets"),
            ("smoking", "Smoking"),
            ("party", "Parties"),
        ],
        OptionCategory::Sanitary => &[
            ("shower", "Shower"),
            ("western_toilet", "Western toilet"),
            ("bathtub", "Bathtub"),
        ],
        OptionCategory::RoomFacility => &[
            ("tv", "TV"),
            ("wardrobe", "Wardrobe"),
            ("desk", "Desk"),
        ],
        OptionCategory::AirCondition => {
            &[("split", "Split unit"), ("fan", "Ceiling fan")]
        }
        OptionCategory::Weekend => &[
            ("thu_fri", "Thursday and Friday"),
            ("fri_sat", "Friday and Saturday"),
            ("sat_sun", "Saturday and Sunday"),
        ],
    };
    pairs
        .iter()
        .map(|(key, label)| option(key, label))
        .collect()
}

pub fn provinces() -> Vec<Province> {
    vec![
        Province {
            id: ProvinceId(8),
            name: "Tehran".into(),
        },
        Province {
            id: ProvinceId(27),
            name: "Mazandaran".into(),
        },
    ]
}

pub fn cities(province_id: ProvinceId) -> Vec<City> {
    let cities: &[(i64, &str)] = match province_id.0 {
        8 => &[(801, "Tehran"), (802, "Shemiranat")],
        27 => &[(2701, "Chalus"), (2702, "Ramsar"), (2703, "Nowshahr")],
        _ => &[],
    };
    cities
        .iter()
        .map(|(id, name)| City {
            id: CityId(*id),
            name: (*name).into(),
        })
        .collect()
}

/// Log what the dev server was seeded with.
pub fn print_summary() {
    tracing::info!("📊 Seeded houses:");
    for house in [house(), guesthouse()] {
        tracing::info!(
            "   🏠 {} ({} rooms, {} photos): /house/{}/edit",
            house.name,
            house.rooms.len(),
            house.medias.len(),
            house.uuid
        );
    }
}

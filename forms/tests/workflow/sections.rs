use forms::{
    FormErrors, SectionForm,
    options::fetch_options,
    sections::{
        address::{AddressField, AddressForm},
        facilities::FacilitiesForm,
        general::GeneralForm,
        location::LocationForm,
        reservation::{ReservationField, ReservationForm},
        stay_rules::StayRulesForm,
    },
    workflow::{self, SubmitError},
};
use payloads::{ClientError, FieldInput, ProvinceId, RuleStatus};
use test_helpers::{house_path, mock, spawn_app};

#[tokio::test]
async fn address_is_sent_with_a_method_override() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = AddressForm::seed(&house, &Default::default());
    form.set(AddressField::Street, "Oak");
    form.set(AddressField::PostalCode, "1234-567890");
    let submission = form.submission().unwrap();
    let house =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await?;

    let path = house_path(&house_id);
    assert_eq!(app.count("PUT", &path), 0);
    let body = app.last_json("POST", &path).unwrap();
    assert_eq!(body["_method"], "PUT");
    assert_eq!(body["street"], "Oak");
    assert_eq!(body["postal_code"], "1234567890");
    assert_eq!(house.address.street, "Oak");
    assert_eq!(house.address.plaque, "14");
    Ok(())
}

#[tokio::test]
async fn capacity_rejection_only_marks_capacity() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let path = house_path(&house_id);
    app.clear_requests();

    let mut form = ReservationForm::seed(&house, &Default::default());
    form.set(ReservationField::Capacity, "0");
    let submission = form.submission().unwrap();
    let error =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await
            .unwrap_err();

    let SubmitError::Write(ClientError::Validation(fields)) = &error else {
        panic!("expected a validation error, got {error:?}");
    };
    let mut errors = FormErrors::default();
    errors.set("check_in", "shown before the submit");
    errors.apply_validation(fields);
    assert_eq!(errors.get("capacity"), Some("too low"));
    assert_eq!(errors.get("max_capacity"), None);
    assert_eq!(errors.get("check_in"), Some("shown before the submit"));

    // nothing was stored and no refresh was made
    assert_eq!(app.count("GET", &path), 0);
    let stored = app.house(&house_id).unwrap();
    assert_eq!(stored.reservation.capacity.as_deref(), Some("4"));
    Ok(())
}

#[tokio::test]
async fn reservation_errors_are_caught_before_sending() -> anyhow::Result<()>
{
    let app = spawn_app().await;
    let house = workflow::load(&app.client, &mock::house_id()).await?;

    let mut form = ReservationForm::seed(&house, &Default::default());
    form.set(ReservationField::MaxCapacity, "2");
    let errors = form.submission().unwrap_err();
    assert!(errors.get("max_capacity").is_some());
    assert_eq!(app.count("PUT", &house_path(&mock::house_id())), 0);
    Ok(())
}

#[tokio::test]
async fn general_details_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let options = fetch_options(&app.client, GeneralForm::OPTIONS).await;
    assert!(!options.has_errors());

    let mut form = GeneralForm::seed(&house, &options);
    assert_eq!(form.land_size(), "1/200");
    form.name = "Cedar Lodge".into();
    form.set_land_size("1/500");
    form.set_structure_type("cottage");
    let submission = form.submission().unwrap();
    let house =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await?;

    let body = app.last_json("PUT", &house_path(&house_id)).unwrap();
    assert_eq!(body["land_size"], "1500");
    assert_eq!(house.name, "Cedar Lodge");
    assert_eq!(house.structure_type.as_deref(), Some("cottage"));
    assert_eq!(GeneralForm::seed(&house, &options).land_size(), "1/500");
    Ok(())
}

#[tokio::test]
async fn changing_province_reloads_cities() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = LocationForm::seed(&house, &Default::default());
    assert!(form.set_province(Some(ProvinceId(8))));
    assert_eq!(form.city_id(), None);
    let cities = app.client.cities(ProvinceId(8)).await?;
    assert_eq!(cities.len(), 2);
    form.set_city(Some(cities[1].id));

    let submission = form.submission().unwrap();
    let house =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await?;
    assert_eq!(house.location.province_id, Some(ProvinceId(8)));
    assert_eq!(house.location.city_id, Some(cities[1].id));
    assert_eq!(house.location.latitude, Some(36.6566));
    Ok(())
}

#[tokio::test]
async fn legacy_facility_fields_match_by_title() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let options = fetch_options(&app.client, FacilitiesForm::OPTIONS).await;

    let mut form = FacilitiesForm::seed(&house, &options);
    assert!(form.is_selected("pool"));
    assert_eq!(
        form.field("pool", "heated").map(|f| f.to_input()),
        Some(FieldInput::Toggle(true))
    );
    form.toggle("bbq");
    form.set_field("bbq", "note", "Charcoal only");
    let submission = form.submission().unwrap();
    let house =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await?;

    let pool = house
        .facilities
        .iter()
        .find(|f| f.type_key == "pool")
        .unwrap();
    // saved back under its key
    assert_eq!(pool.fields[0].key.as_deref(), Some("heated"));
    assert!(house.facilities.iter().any(|f| f.type_key == "bbq"));
    Ok(())
}

#[tokio::test]
async fn only_answered_rules_are_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let options = fetch_options(&app.client, StayRulesForm::OPTIONS).await;

    let mut form = StayRulesForm::seed(&house, &options);
    assert_eq!(form.unanswered().collect::<Vec<_>>(), vec!["party"]);
    form.set("pets", Some(RuleStatus::Allowed));
    let submission = form.submission().unwrap();
    workflow::submit_and_refresh(&app.client, &house_id, &submission).await?;

    let body = app.last_json("PUT", &house_path(&house_id)).unwrap();
    assert_eq!(body["rules"]["pets"], "Allowed");
    assert!(body["rules"].get("party").is_none());
    Ok(())
}

use forms::{
    sections::pricing::{PriceKind, PricingForm},
    workflow,
};
use payloads::{RoomId, Season};
use test_helpers::{house_path, mock, spawn_app};

#[tokio::test]
async fn edited_price_is_sent_bare_and_reloaded() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = PricingForm::seed(&house);
    let spring = |form: &PricingForm| {
        form.house.display(Season::Spring, PriceKind::Normal)
    };
    assert_eq!(spring(&form), "150/000");
    form.house.set(Season::Spring, PriceKind::Normal, "200000");
    assert_eq!(spring(&form), "200/000");

    let house = workflow::submit_and_refresh(
        &app.client,
        &house_id,
        &form.house_submission(),
    )
    .await?;

    let body = app.last_json("PUT", &house_path(&house_id)).unwrap();
    assert_eq!(body["normal_spring"], "200000");
    assert_eq!(house.prices.spring.normal.as_deref(), Some("200000"));
    assert_eq!(spring(&PricingForm::seed(&house)), "200/000");
    Ok(())
}

#[tokio::test]
async fn per_night_sends_the_extra_person_sentinel() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = PricingForm::seed(&house);
    assert!(!form.extra_person_visible());
    assert!(form.visible_kinds().all(|k| k != PriceKind::ExtraPerson));
    // a stale amount left in the grid must not leak through
    form.house.set(Season::Summer, PriceKind::ExtraPerson, "45000");
    workflow::submit_and_refresh(
        &app.client,
        &house_id,
        &form.house_submission(),
    )
    .await?;

    let body = app.last_json("PUT", &house_path(&house_id)).unwrap();
    for season in Season::ALL {
        let field = PriceKind::ExtraPerson.field_name(season);
        assert_eq!(body[field.as_str()], "0", "{field}");
    }
    Ok(())
}

#[tokio::test]
async fn rooms_are_priced_one_at_a_time() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::guesthouse_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = PricingForm::seed(&house);
    assert!(form.is_rent_room);
    assert!(form.extra_person_visible());
    assert_eq!(form.rooms.len(), 2);

    let blue = RoomId("blue".into());
    let grid = form.room_mut(&blue).unwrap();
    assert_eq!(grid.display(Season::Spring, PriceKind::Normal), "90/000");
    grid.set(Season::Spring, PriceKind::ExtraPerson, "35/000");

    let submission = form.room_submission(&blue).unwrap();
    let house =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await?;

    let room_path = |room: &str| {
        format!("{}/room/{room}/prices", house_path(&house_id))
    };
    let body = app.last_json("PUT", &room_path("blue")).unwrap();
    assert_eq!(body["extra_person_spring"], "35000");
    assert_eq!(app.count("PUT", &room_path("green")), 0);

    let stored = app.client.get_room_prices(&house_id, &blue).await?;
    assert_eq!(stored.spring.extra_person.as_deref(), Some("35000"));
    let room = house.rooms.iter().find(|r| r.uuid == blue).unwrap();
    let prices = room.prices.as_ref().unwrap();
    assert_eq!(prices.spring.extra_person.as_deref(), Some("35000"));
    assert_eq!(prices.summer.extra_person.as_deref(), Some("30000"));

    assert!(form.room_submission(&RoomId("gone".into())).is_err());
    Ok(())
}

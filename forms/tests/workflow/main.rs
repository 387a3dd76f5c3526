mod images;
mod options;
mod pricing;
mod rooms;
mod sections;
mod session;

use forms::{WorkflowAction, WorkflowState, navigator::Section, workflow};
use test_helpers::{house_path, mock, spawn_app};

#[tokio::test]
async fn load_returns_the_seeded_house() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house = workflow::load(&app.client, &mock::house_id()).await?;

    assert_eq!(house.name, "Cedar Cottage");
    assert_eq!(house.rooms.len(), 2);
    assert!(house.has_living_room());

    let state = WorkflowState::new(mock::house_id(), Section::Address)
        .apply(WorkflowAction::Loaded(house));
    assert_eq!(state.revision, 1);
    assert!(!state.should_redirect());
    Ok(())
}

#[tokio::test]
async fn unknown_house_redirects() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let missing = payloads::HouseId("no-such-house".into());
    let error = workflow::load(&app.client, &missing).await.unwrap_err();

    let state = WorkflowState::new(missing, Section::Address)
        .apply(WorkflowAction::LoadFailed(error.to_string()));
    assert!(state.should_redirect());
    assert_eq!(app.count("GET", "client/house/no-such-house"), 1);
    Ok(())
}

#[tokio::test]
async fn refresh_is_requested_after_the_write() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let path = house_path(&house_id);
    let house = workflow::load(&app.client, &house_id).await?;
    app.clear_requests();

    let submission = forms::sections::pricing::PricingForm::seed(&house)
        .house_submission();
    workflow::submit_and_refresh(&app.client, &house_id, &submission).await?;

    let order: Vec<_> = app
        .requests()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(order, vec![format!("PUT {path}"), format!("GET {path}")]);
    Ok(())
}

#[tokio::test]
async fn failed_write_skips_the_refresh() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let path = house_path(&house_id);
    let house = workflow::load(&app.client, &house_id).await?;
    app.clear_requests();
    app.fail_next("PUT", &path, 500, serde_json::json!("boom"));

    let submission = forms::sections::pricing::PricingForm::seed(&house)
        .house_submission();
    let error =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await
            .unwrap_err();

    assert!(error.is_write());
    assert_eq!(app.count("PUT", &path), 1);
    assert_eq!(app.count("GET", &path), 0);
    Ok(())
}

#[tokio::test]
async fn failed_refresh_keeps_the_write() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let path = house_path(&house_id);
    let house = workflow::load(&app.client, &house_id).await?;
    app.fail_next("GET", &path, 503, serde_json::json!("unavailable"));

    let mut form = forms::sections::pricing::PricingForm::seed(&house);
    form.house.set(
        payloads::Season::Winter,
        forms::sections::pricing::PriceKind::Normal,
        "99000",
    );
    let submission = form.house_submission();
    let error =
        workflow::submit_and_refresh(&app.client, &house_id, &submission)
            .await
            .unwrap_err();

    assert!(!error.is_write());
    let stored = app.house(&house_id).unwrap();
    assert_eq!(stored.prices.winter.normal.as_deref(), Some("99000"));

    // the snapshot already shown stays put
    let state = WorkflowState::new(house_id, Section::Pricing)
        .apply(WorkflowAction::Loaded(house))
        .apply(WorkflowAction::LoadFailed(error.to_string()));
    let shown = state.house.unwrap();
    assert_eq!(shown.prices.winter.normal.as_deref(), Some("120000"));
    Ok(())
}

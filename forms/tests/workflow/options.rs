use forms::{
    SectionForm, options::fetch_options,
    sections::environment::EnvironmentForm,
};
use payloads::OptionCategory;
use test_helpers::spawn_app;

#[tokio::test]
async fn failed_list_stays_empty_and_others_load() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next(
        "GET",
        "assets/types/view/detail",
        500,
        serde_json::json!("lookup service down"),
    );

    let options = fetch_options(&app.client, EnvironmentForm::OPTIONS).await;

    assert!(options.has_errors());
    assert_eq!(options.errors.len(), 1);
    assert!(options.get(OptionCategory::View).is_empty());
    assert_eq!(options.get(OptionCategory::Texture).len(), 3);
    assert_eq!(
        options.label(OptionCategory::AccessRoute, "dirt"),
        "Dirt road"
    );
    // every list was asked for exactly once
    for category in EnvironmentForm::OPTIONS {
        let path = format!("assets/types/{category}/detail");
        assert_eq!(app.count("GET", &path), 1, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn lists_are_served_without_a_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let anonymous = app.client_with_token(None);

    let options = fetch_options(&anonymous, &OptionCategory::ALL).await;
    assert!(!options.has_errors());
    assert_eq!(options.get(OptionCategory::Facility).len(), 4);

    let provinces = anonymous.provinces().await?;
    assert_eq!(provinces.len(), 2);
    Ok(())
}

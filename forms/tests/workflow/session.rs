use forms::{
    Feedback, FormErrors,
    profile::{VendorField, VendorForm},
    workflow,
};
use payloads::ClientError;
use test_helpers::{mock, spawn_app};

#[tokio::test]
async fn expired_token_is_reported_as_unauthorized() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let stale = app.client_with_token(Some("expired"));

    let result = workflow::load(&stale, &mock::house_id()).await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(Feedback::from_result(&result), Feedback::SessionExpired);

    let result = stale.get_profile().await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn profile_is_loaded_and_upgraded_to_vendor() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let profile = app.client.get_profile().await?;
    assert_eq!(profile.display_name(), "Sara Ahmadi");
    assert!(!profile.is_vendor);

    let mut form = VendorForm::seed(&profile);
    form.set(VendorField::NationalCode, "12345");
    form.set(VendorField::Sheba, "ir00 0000 0000 0000 0000 0000 00");
    let details = form.submission().expect("names are seeded");
    let error = app.client.update_vendor_profile(&details).await.unwrap_err();
    let Feedback::Invalid(fields) = Feedback::from_error(&error) else {
        panic!("expected a validation failure, got {error:?}");
    };
    let mut errors = FormErrors::default();
    errors.apply_validation(&fields);
    assert!(errors.get("national_code").is_some());
    assert_eq!(errors.get("first_name"), None);

    form.set(VendorField::NationalCode, "001-234-5678");
    let details = form.submission().expect("names are seeded");
    let profile = app.client.update_vendor_profile(&details).await?;
    assert!(profile.is_vendor);
    assert_eq!(profile.national_code.as_deref(), Some("0012345678"));

    app.client.logout().await?;
    assert_eq!(app.count("DELETE", "client/profile/logout"), 1);
    Ok(())
}

#[tokio::test]
async fn unexpected_status_is_a_generic_failure() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next("GET", "client/profile", 201, serde_json::json!({}));

    let result = app.client.get_profile().await;
    test_helpers::assert_status_code(result, payloads::StatusCode::CREATED);
    Ok(())
}

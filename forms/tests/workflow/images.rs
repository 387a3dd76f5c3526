use forms::{
    sections::images::{ImagesForm, make_main, remove_image, save_image},
    workflow,
};
use payloads::requests::MediaFile;
use test_helpers::{house_path, mock, spawn_app};

fn photo(name: &str) -> MediaFile {
    MediaFile {
        file_name: name.into(),
        mime_type: "image/jpeg".into(),
        data: vec![0xff, 0xd8, 0xff, 0xe0, 1, 2, 3],
    }
}

#[tokio::test]
async fn upload_sends_a_multipart_body() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let media_path = format!("{}/media", house_path(&house_id));
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = ImagesForm::seed(&house);

    let key = form.add_image(photo("kitchen.jpg")).unwrap();
    form.set_title(key, "Kitchen");
    let errors = save_image(&app.client, &house_id, &mut form, key).await?;
    assert!(errors.is_none());

    let request = app.last("POST", &media_path).unwrap();
    assert!(
        request
            .content_type
            .as_deref()
            .is_some_and(|c| c.starts_with("multipart/form-data"))
    );
    assert_eq!(request.form_field("title").as_deref(), Some("Kitchen"));
    assert_eq!(request.form_field("is_main").as_deref(), Some("0"));

    let saved = form.items.get(key).unwrap();
    let id = saved.id.unwrap();
    assert!(saved.value.file.is_none());
    let url = saved.value.url.clone().unwrap();
    assert!(url.ends_with(&format!("{id}-kitchen.jpg")), "{url}");
    assert_eq!(app.client.list_media(&house_id).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn make_main_moves_the_flag() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = ImagesForm::seed(&house);

    let garden = form
        .items
        .iter()
        .find(|e| !e.value.is_main)
        .map(|e| e.key)
        .unwrap();
    make_main(&app.client, &house_id, &mut form, garden).await?;
    assert_eq!(form.main_image(), Some(garden));

    // a flag change does not re-send the file
    let path = format!("{}/media/2", house_path(&house_id));
    let request = app.last("PUT", &path).unwrap();
    assert_eq!(request.form_field("is_main").as_deref(), Some("1"));
    assert_eq!(request.form_field("file"), None);

    let medias = app.client.list_media(&house_id).await?;
    let main: Vec<_> = medias.iter().filter(|m| m.is_main).collect();
    assert_eq!(main.len(), 1);
    assert_eq!(main[0].id, payloads::MediaId(2));
    Ok(())
}

#[tokio::test]
async fn unsaved_image_is_dropped_without_a_request() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = ImagesForm::seed(&house);

    let key = form.add_image(photo("draft.jpg")).unwrap();
    form.items.request_remove(key);
    remove_image(&app.client, &house_id, &mut form).await?;
    assert_eq!(form.items.len(), 2);

    let porch = form.items.iter().next().map(|e| e.key).unwrap();
    form.items.request_remove(porch);
    remove_image(&app.client, &house_id, &mut form).await?;
    assert_eq!(form.items.len(), 1);

    let deletes: Vec<_> = app
        .requests()
        .into_iter()
        .filter(|r| r.method == "DELETE")
        .map(|r| r.path)
        .collect();
    assert_eq!(deletes, vec![format!("{}/media/1", house_path(&house_id))]);
    Ok(())
}

#[tokio::test]
async fn server_requires_a_file_on_create() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let upload = payloads::requests::MediaUpload {
        title: "Nothing attached".into(),
        is_main: false,
        file: None,
    };
    let error = app
        .client
        .create_media(&mock::house_id(), &upload)
        .await
        .unwrap_err();
    assert_eq!(
        error.field_errors().and_then(|f| f.first("file")),
        Some("required")
    );
    Ok(())
}

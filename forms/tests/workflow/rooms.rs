use forms::{
    ItemAction, ItemStatus,
    sections::rooms::{BedKind, RoomsForm, remove_room, save_room},
    workflow,
};
use test_helpers::{house_path, mock, spawn_app};

#[tokio::test]
async fn living_room_cannot_be_added_twice() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;

    let mut form = RoomsForm::seed(&house);
    assert!(form.has_living_room());
    assert!(!form.can_add_living_room());
    assert_eq!(form.add_living_room(), None);
    assert_eq!(form.items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn new_room_is_created_then_updated() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let rooms_path = format!("{}/room", house_path(&house_id));
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = RoomsForm::seed(&house);

    let key = form.add_room();
    // no name yet: caught locally
    let errors = save_room(&app.client, &house_id, &mut form, key)
        .await?
        .unwrap();
    assert!(errors.get("name").is_some());
    assert_eq!(app.count("POST", &rooms_path), 0);

    let draft = form.draft_mut(key).unwrap();
    draft.name = "Guest room".into();
    draft.set_beds(BedKind::Single, 2);
    draft.facilities.toggle("desk");
    assert!(save_room(&app.client, &house_id, &mut form, key).await?.is_none());

    let id = form.items.get(key).unwrap().id.clone().unwrap();
    assert_eq!(app.count("POST", &rooms_path), 1);
    assert_eq!(form.items.status(key, ItemAction::Save), ItemStatus::Idle);

    form.draft_mut(key).unwrap().set_beds(BedKind::Double, 1);
    save_room(&app.client, &house_id, &mut form, key).await?;
    let body = app
        .last_json("PUT", &format!("{rooms_path}/{id}"))
        .unwrap();
    assert_eq!(body["double_beds"], 1);
    assert_eq!(body["facilities"], serde_json::json!(["desk"]));
    assert_eq!(app.count("POST", &rooms_path), 1);

    let rooms = app.client.list_rooms(&house_id).await?;
    let stored = rooms.iter().find(|r| r.uuid == id).unwrap();
    assert_eq!(stored.single_beds, 2);
    assert_eq!(stored.double_beds, 1);
    Ok(())
}

#[tokio::test]
async fn only_persisted_rooms_are_deleted_remotely() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = RoomsForm::seed(&house);

    let local = form.add_room();
    form.items.request_remove(local);
    remove_room(&app.client, &house_id, &mut form).await?;
    assert_eq!(form.items.len(), 2);

    let master = form
        .items
        .iter()
        .find(|e| !e.value.is_living_room())
        .map(|e| e.key)
        .unwrap();
    // cancelling sends nothing
    form.items.request_remove(master);
    form.items.cancel_remove();
    remove_room(&app.client, &house_id, &mut form).await?;
    assert_eq!(form.items.len(), 2);

    form.items.request_remove(master);
    remove_room(&app.client, &house_id, &mut form).await?;
    assert_eq!(form.items.len(), 1);

    let room_path =
        format!("{}/room/{}", house_path(&house_id), mock::MASTER_ROOM_ID);
    let deletes = app
        .requests()
        .iter()
        .filter(|r| r.method == "DELETE")
        .count();
    assert_eq!(deletes, 1);
    assert_eq!(app.count("DELETE", &room_path), 1);
    Ok(())
}

#[tokio::test]
async fn failed_delete_keeps_the_room() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let house = workflow::load(&app.client, &house_id).await?;
    let mut form = RoomsForm::seed(&house);
    let room_path =
        format!("{}/room/{}", house_path(&house_id), mock::LIVING_ROOM_ID);
    app.fail_next("DELETE", &room_path, 500, serde_json::json!("locked"));

    let living = form
        .items
        .iter()
        .find(|e| e.value.is_living_room())
        .map(|e| e.key)
        .unwrap();
    form.items.request_remove(living);
    assert!(remove_room(&app.client, &house_id, &mut form).await.is_err());

    assert_eq!(form.items.len(), 2);
    assert!(matches!(
        form.items.status(living, ItemAction::Delete),
        ItemStatus::Error(_)
    ));
    Ok(())
}

#[tokio::test]
async fn server_rejects_a_second_living_room() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let house_id = mock::house_id();
    let details = payloads::requests::RoomDetails {
        name: "Lounge".into(),
        single_beds: 0,
        double_beds: 0,
        sofa_beds: 1,
        floor_mattresses: 0,
        facilities: vec![],
        air_conditions: vec![],
        is_master: false,
        is_living_room: true,
    };
    let error = app.client.create_room(&house_id, &details).await.unwrap_err();
    let fields = error.field_errors().unwrap();
    assert!(fields.first("is_living_room").is_some());
    Ok(())
}

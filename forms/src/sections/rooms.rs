use payloads::{
    APIClient, ClientError, HouseId, OptionCategory, RoomId,
    requests::RoomDetails,
    responses::{House, Room},
};

use crate::{
    items::{ItemAction, ItemKey, ItemList, remove_confirmed},
    status::FormErrors,
    tags::TagSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedKind {
    Single,
    Double,
    Sofa,
    FloorMattress,
}

impl BedKind {
    pub const ALL: [BedKind; 4] =
        [Self::Single, Self::Double, Self::Sofa, Self::FloorMattress];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single beds",
            Self::Double => "Double beds",
            Self::Sofa => "Sofa beds",
            Self::FloorMattress => "Floor mattresses",
        }
    }
}

/// Edit state of one room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    single_beds: u32,
    double_beds: u32,
    sofa_beds: u32,
    floor_mattresses: u32,
    pub facilities: TagSet,
    pub air_conditions: TagSet,
    pub is_master: bool,
    is_living_room: bool,
}

impl RoomDraft {
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            single_beds: room.single_beds,
            double_beds: room.double_beds,
            sofa_beds: room.sofa_beds,
            floor_mattresses: room.floor_mattresses,
            facilities: room.facilities.iter().cloned().collect(),
            air_conditions: room.air_conditions.iter().cloned().collect(),
            is_master: room.is_master,
            is_living_room: room.is_living_room,
        }
    }

    fn living_room() -> Self {
        Self {
            name: "Living room".into(),
            is_living_room: true,
            ..Default::default()
        }
    }

    pub fn is_living_room(&self) -> bool {
        self.is_living_room
    }

    pub fn beds(&self, kind: BedKind) -> u32 {
        match kind {
            BedKind::Single => self.single_beds,
            BedKind::Double => self.double_beds,
            BedKind::Sofa => self.sofa_beds,
            BedKind::FloorMattress => self.floor_mattresses,
        }
    }

    pub fn set_beds(&mut self, kind: BedKind, count: u32) {
        match kind {
            BedKind::Single => self.single_beds = count,
            BedKind::Double => self.double_beds = count,
            BedKind::Sofa => self.sofa_beds = count,
            BedKind::FloorMattress => self.floor_mattresses = count,
        }
    }

    /// Number of guests the beds sleep.
    pub fn sleeps(&self) -> u32 {
        self.single_beds
            + 2 * self.double_beds
            + self.sofa_beds
            + self.floor_mattresses
    }

    pub fn to_details(&self) -> RoomDetails {
        RoomDetails {
            name: self.name.trim().to_string(),
            single_beds: self.single_beds,
            double_beds: self.double_beds,
            sofa_beds: self.sofa_beds,
            floor_mattresses: self.floor_mattresses,
            facilities: self.facilities.to_vec(),
            air_conditions: self.air_conditions.to_vec(),
            is_master: self.is_master,
            is_living_room: self.is_living_room,
        }
    }
}

/// The request a save needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSave {
    Create(RoomDetails),
    Update(RoomId, RoomDetails),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomsForm {
    pub items: ItemList<RoomDraft, RoomId>,
}

impl RoomsForm {
    pub const OPTIONS: &'static [OptionCategory] =
        &[OptionCategory::RoomFacility, OptionCategory::AirCondition];

    pub fn seed(house: &House) -> Self {
        Self {
            items: ItemList::from_persisted(
                house
                    .rooms
                    .iter()
                    .map(|r| (r.uuid.clone(), RoomDraft::from_room(r))),
            ),
        }
    }

    pub fn has_living_room(&self) -> bool {
        self.items.iter().any(|e| e.value.is_living_room)
    }

    /// At most one room may be the living room.
    pub fn can_add_living_room(&self) -> bool {
        !self.has_living_room()
    }

    pub fn add_room(&mut self) -> ItemKey {
        self.items.push_local(RoomDraft::default())
    }

    /// `None` when a living room already exists.
    pub fn add_living_room(&mut self) -> Option<ItemKey> {
        if !self.can_add_living_room() {
            return None;
        }
        Some(self.items.push_local(RoomDraft::living_room()))
    }

    pub fn draft_mut(&mut self, key: ItemKey) -> Option<&mut RoomDraft> {
        self.items.get_mut(key)
    }

    /// What to send to save `key`. Marks the save pending; `None` if the
    /// room is gone or a save is already in flight.
    pub fn begin_save(
        &mut self,
        key: ItemKey,
    ) -> Option<Result<RoomSave, FormErrors>> {
        let entry = self.items.get(key)?;
        if entry.value.name.trim().is_empty() {
            let mut errors = FormErrors::default();
            errors.set("name", "Room name is required");
            return Some(Err(errors));
        }
        let details = entry.value.to_details();
        let save = match &entry.id {
            None => RoomSave::Create(details),
            Some(id) => RoomSave::Update(id.clone(), details),
        };
        if !self.items.begin_action(key, ItemAction::Save) {
            return None;
        }
        Some(Ok(save))
    }

    /// Apply the server's answer. The returned room replaces the draft so
    /// server-side normalisation shows up.
    pub fn finish_save(
        &mut self,
        key: ItemKey,
        result: Result<&Room, &ClientError>,
    ) {
        match result {
            Ok(room) => {
                self.items.mark_saved(key, room.uuid.clone());
                if let Some(draft) = self.items.get_mut(key) {
                    *draft = RoomDraft::from_room(room);
                }
                self.items.finish_action(key, ItemAction::Save, Ok(()));
            }
            Err(e) => self.items.finish_action(
                key,
                ItemAction::Save,
                Err(e.to_string()),
            ),
        }
    }
}

/// Run a planned save against the service.
pub async fn send_save(
    client: &APIClient,
    house_id: &HouseId,
    save: &RoomSave,
) -> Result<Room, ClientError> {
    match save {
        RoomSave::Create(details) => {
            client.create_room(house_id, details).await
        }
        RoomSave::Update(room_id, details) => {
            client.update_room(house_id, room_id, details).await
        }
    }
}

/// Save one room end to end. Local validation errors come back as
/// `Ok(Some(errors))`.
pub async fn save_room(
    client: &APIClient,
    house_id: &HouseId,
    form: &mut RoomsForm,
    key: ItemKey,
) -> Result<Option<FormErrors>, ClientError> {
    let save = match form.begin_save(key) {
        None => return Ok(None),
        Some(Err(errors)) => return Ok(Some(errors)),
        Some(Ok(save)) => save,
    };
    let result = send_save(client, house_id, &save).await;
    form.finish_save(key, result.as_ref());
    result.map(|_| None)
}

/// Delete the room awaiting confirmation.
pub async fn remove_room(
    client: &APIClient,
    house_id: &HouseId,
    form: &mut RoomsForm,
) -> Result<(), ClientError> {
    remove_confirmed(&mut form.items, |room_id| async move {
        client.delete_room(house_id, &room_id).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{items::Removal, sections::fixtures};

    fn room(id: &str, living: bool) -> Room {
        Room {
            uuid: RoomId(id.into()),
            name: id.into(),
            single_beds: 1,
            double_beds: 1,
            sofa_beds: 0,
            floor_mattresses: 2,
            facilities: vec!["tv".into()],
            air_conditions: vec![],
            is_master: false,
            is_living_room: living,
            prices: None,
        }
    }

    #[test]
    fn second_living_room_is_refused() {
        let mut house = fixtures::house();
        house.rooms = vec![room("r1", false), room("lr", true)];
        let mut form = RoomsForm::seed(&house);
        assert!(!form.can_add_living_room());
        assert_eq!(form.add_living_room(), None);
        assert_eq!(form.items.len(), 2);
    }

    #[test]
    fn living_room_can_be_added_once() {
        let mut form = RoomsForm::seed(&fixtures::house());
        assert!(form.add_living_room().is_some());
        assert!(!form.can_add_living_room());
        assert!(form.add_living_room().is_none());
    }

    #[test]
    fn new_rooms_create_and_saved_rooms_update() {
        let mut house = fixtures::house();
        house.rooms = vec![room("r1", false)];
        let mut form = RoomsForm::seed(&house);
        let saved = form.items.iter().next().unwrap().key;
        let fresh = form.add_room();

        assert!(matches!(form.begin_save(fresh), Some(Err(_))));
        form.draft_mut(fresh).unwrap().name = "Guest room".into();
        assert!(matches!(
            form.begin_save(fresh),
            Some(Ok(RoomSave::Create(_)))
        ));
        // same save twice while the first is in flight
        assert_eq!(form.begin_save(fresh), None);

        let Some(Ok(RoomSave::Update(id, details))) = form.begin_save(saved)
        else {
            panic!("expected an update");
        };
        assert_eq!(id, RoomId("r1".into()));
        assert_eq!(details.facilities, vec!["tv"]);
    }

    #[test]
    fn successful_create_records_the_server_id() {
        let mut form = RoomsForm::seed(&fixtures::house());
        let key = form.add_room();
        form.draft_mut(key).unwrap().name = "r9".into();
        form.begin_save(key);
        form.finish_save(key, Ok(&room("r9", false)));
        assert_eq!(form.items.get(key).unwrap().id, Some(RoomId("r9".into())));
        assert_eq!(
            form.items.status(key, ItemAction::Save),
            crate::items::ItemStatus::Idle
        );

        form.items.request_remove(key);
        assert!(matches!(
            form.items.confirm_remove(),
            Some(Removal::Remote { .. })
        ));
    }

    #[test]
    fn sleeps_counts_doubles_twice() {
        let draft = RoomDraft::from_room(&room("r1", false));
        assert_eq!(draft.sleeps(), 5);
    }
}

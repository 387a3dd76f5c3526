//! The house editor's shared state and its write-then-refresh round trip.
//!
//! The snapshot is only ever replaced wholesale by a fresh `GET`; sections
//! never merge their own edits into it.

use payloads::{
    APIClient, ClientError, HouseId, RoomId,
    requests::{FacilitiesUpdate, HouseUpdate, PriceUpdate},
    responses::House,
};
use std::future::Future;

use crate::navigator::Section;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub house_id: HouseId,
    pub house: Option<House>,
    pub active: Section,
    pub load_error: Option<String>,
    /// Bumped on every snapshot replacement so sections can reseed.
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowAction {
    Loaded(House),
    LoadFailed(String),
    Refreshed(House),
    Select(Section),
}

impl WorkflowState {
    pub fn new(house_id: HouseId, active: Section) -> Self {
        Self {
            house_id,
            house: None,
            active,
            load_error: None,
            revision: 0,
        }
    }

    pub fn apply(mut self, action: WorkflowAction) -> Self {
        match action {
            WorkflowAction::Loaded(house)
            | WorkflowAction::Refreshed(house) => {
                if house.uuid != self.house_id {
                    tracing::warn!(
                        expected = %self.house_id,
                        got = %house.uuid,
                        "ignoring snapshot for another house"
                    );
                    return self;
                }
                self.house = Some(house);
                self.load_error = None;
                self.revision += 1;
            }
            WorkflowAction::LoadFailed(message) => {
                // a failed refresh keeps whatever snapshot we already have
                self.load_error = Some(message);
            }
            WorkflowAction::Select(section) => self.active = section,
        }
        self
    }

    /// The first load failed, so there is nothing to edit.
    pub fn should_redirect(&self) -> bool {
        self.house.is_none() && self.load_error.is_some()
    }
}

/// A section's write, routed to the endpoint that section uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// `PUT` on the house root.
    House(HouseUpdate),
    /// `POST` on the house root with a `_method=PUT` override.
    HouseOverride(HouseUpdate),
    Facilities(FacilitiesUpdate),
    RoomPrices { room_id: RoomId, prices: PriceUpdate },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The write itself failed; the snapshot is unchanged.
    #[error(transparent)]
    Write(ClientError),
    /// The write went through but the follow-up `GET` did not.
    #[error("Saved, but reloading the house failed: {0}")]
    Refresh(ClientError),
}

impl SubmitError {
    pub fn client_error(&self) -> &ClientError {
        match self {
            Self::Write(e) | Self::Refresh(e) => e,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

pub async fn load(
    client: &APIClient,
    house_id: &HouseId,
) -> Result<House, ClientError> {
    client.get_house(house_id).await
}

#[tracing::instrument(skip(client, submission))]
pub async fn submit(
    client: &APIClient,
    house_id: &HouseId,
    submission: &Submission,
) -> Result<(), ClientError> {
    match submission {
        Submission::House(update) => {
            client.update_house(house_id, update).await
        }
        Submission::HouseOverride(update) => {
            client.override_house(house_id, update).await
        }
        Submission::Facilities(update) => {
            client.update_facilities(house_id, update).await
        }
        Submission::RoomPrices { room_id, prices } => {
            client.update_room_prices(house_id, room_id, prices).await
        }
    }
}

/// Await `write`, then fetch the house. The `GET` is only issued once the
/// write has answered 200.
pub async fn write_then_refresh<T, W>(
    client: &APIClient,
    house_id: &HouseId,
    write: W,
) -> Result<(T, House), SubmitError>
where
    W: Future<Output = Result<T, ClientError>>,
{
    let written = write.await.map_err(SubmitError::Write)?;
    let house = load(client, house_id).await.map_err(SubmitError::Refresh)?;
    Ok((written, house))
}

pub async fn submit_and_refresh(
    client: &APIClient,
    house_id: &HouseId,
    submission: &Submission,
) -> Result<House, SubmitError> {
    let ((), house) = write_then_refresh(
        client,
        house_id,
        submit(client, house_id, submission),
    )
    .await?;
    Ok(house)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(uuid: &str) -> House {
        serde_json::from_value(serde_json::json!({ "uuid": uuid })).unwrap()
    }

    #[test]
    fn snapshot_is_replaced_and_revision_bumped() {
        let state = WorkflowState::new(HouseId("h1".into()), Section::Address)
            .apply(WorkflowAction::Loaded(house("h1")));
        assert_eq!(state.revision, 1);
        let mut renamed = house("h1");
        renamed.name = "Villa".into();
        let state = state.apply(WorkflowAction::Refreshed(renamed));
        assert_eq!(state.revision, 2);
        assert_eq!(state.house.unwrap().name, "Villa");
    }

    #[test]
    fn snapshot_for_another_house_is_ignored() {
        let state = WorkflowState::new(HouseId("h1".into()), Section::Address)
            .apply(WorkflowAction::Loaded(house("h2")));
        assert!(state.house.is_none());
        assert_eq!(state.revision, 0);
    }

    #[test]
    fn initial_load_failure_redirects_but_refresh_failure_does_not() {
        let state = WorkflowState::new(HouseId("h1".into()), Section::Address);
        assert!(
            state
                .clone()
                .apply(WorkflowAction::LoadFailed("gone".into()))
                .should_redirect()
        );
        let loaded = state
            .apply(WorkflowAction::Loaded(house("h1")))
            .apply(WorkflowAction::LoadFailed("flaky".into()));
        assert!(!loaded.should_redirect());
        assert!(loaded.house.is_some());
    }

    #[test]
    fn selecting_only_changes_the_active_section() {
        let state = WorkflowState::new(HouseId("h1".into()), Section::Address)
            .apply(WorkflowAction::Loaded(house("h1")))
            .apply(WorkflowAction::Select(Section::Pricing));
        assert_eq!(state.active, Section::Pricing);
        assert_eq!(state.revision, 1);
    }
}

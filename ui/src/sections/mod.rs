//! One component per editable part of a house. Only the active section is
//! mounted; each owns its form state and reports fresh snapshots upward
//! through `on_saved`.

mod address;
mod environment;
mod facilities;
mod general;
mod images;
mod location;
mod pricing;
mod reservation;
mod rooms;
mod sanitaries;
mod stay_rules;

use forms::{Section, SectionForm, SubmitError, workflow::load};
use payloads::{HouseId, responses::House};
use std::rc::Rc;
use yew::prelude::*;

use crate::{
    components::SectionCard, contexts::toast::ToastHandle, get_api_client,
    hooks::SectionHandle,
};

pub use address::AddressSection;
pub use environment::EnvironmentSection;
pub use facilities::FacilitiesSection;
pub use general::GeneralSection;
pub use images::ImagesSection;
pub use location::LocationSection;
pub use pricing::PricingSection;
pub use reservation::ReservationSection;
pub use rooms::RoomsSection;
pub use sanitaries::SanitariesSection;
pub use stay_rules::StayRulesSection;

#[derive(Properties, PartialEq, Clone)]
pub struct SectionProps {
    pub house: Rc<House>,
    /// Bumped by the editor each time a new snapshot lands.
    pub revision: u64,
    pub on_saved: Callback<House>,
}

pub fn render_section(section: Section, props: &SectionProps) -> Html {
    let SectionProps {
        house,
        revision,
        on_saved,
    } = props.clone();
    match section {
        Section::Address => {
            html! { <AddressSection {house} {revision} {on_saved} /> }
        }
        Section::Location => {
            html! { <LocationSection {house} {revision} {on_saved} /> }
        }
        Section::General => {
            html! { <GeneralSection {house} {revision} {on_saved} /> }
        }
        Section::Environment => {
            html! { <EnvironmentSection {house} {revision} {on_saved} /> }
        }
        Section::Facilities => {
            html! { <FacilitiesSection {house} {revision} {on_saved} /> }
        }
        Section::Rooms => {
            html! { <RoomsSection {house} {revision} {on_saved} /> }
        }
        Section::Sanitaries => {
            html! { <SanitariesSection {house} {revision} {on_saved} /> }
        }
        Section::StayRules => {
            html! { <StayRulesSection {house} {revision} {on_saved} /> }
        }
        Section::Pricing => {
            html! { <PricingSection {house} {revision} {on_saved} /> }
        }
        Section::Reservation => {
            html! { <ReservationSection {house} {revision} {on_saved} /> }
        }
        Section::Images => {
            html! { <ImagesSection {house} {revision} {on_saved} /> }
        }
    }
}

/// The card around a single-submit section.
fn section_card<F: SectionForm + 'static>(
    section: Section,
    handle: &SectionHandle<F>,
    children: Html,
) -> Html {
    html! {
        <SectionCard
            title={section.title()}
            status={handle.status()}
            errors={handle.errors().clone()}
            option_errors={handle.options().errors.clone()}
            on_submit={Some(handle.submit.clone())}
        >
            {children}
        </SectionCard>
    }
}

/// Fetch the house after an item was written so the editor holds the
/// server's view of it.
async fn reload_house(
    house_id: &HouseId,
    on_saved: &Callback<House>,
    toast: &ToastHandle,
) {
    match load(&get_api_client(), house_id).await {
        Ok(house) => on_saved.emit(house),
        Err(e) => toast.error(SubmitError::Refresh(e).to_string()),
    }
}

use forms::{Section, sections::sanitaries::SanitariesForm};
use payloads::OptionCategory;
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{components::Checklist, hooks::use_section_form};

#[function_component]
pub fn SanitariesSection(props: &SectionProps) -> Html {
    let section = use_section_form::<SanitariesForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let options = section.options().get(OptionCategory::Sanitary).to_vec();
    let on_toggle = section.edit(
        "sanitaries",
        |form: &mut SanitariesForm, key: String| form.sanitaries.toggle(&key),
    );

    section_card(
        Section::Sanitaries,
        &section,
        html! {
            <Checklist
                label="Bathroom and toilet"
                {options}
                tags={section.form().sanitaries.clone()}
                {on_toggle}
            />
        },
    )
}

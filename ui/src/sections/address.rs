use forms::{Section, sections::address::{AddressField, AddressForm}};
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{components::TextInput, hooks::use_section_form};

#[function_component]
pub fn AddressSection(props: &SectionProps) -> Html {
    let section = use_section_form::<AddressForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );

    let fields = AddressField::ALL.into_iter().map(|field| {
        let on_input = section.edit(
            field.name(),
            move |form: &mut AddressForm, value: String| {
                form.set(field, &value)
            },
        );
        html! {
            <TextInput
                label={field.label()}
                value={section.form().get(field).to_string()}
                error={section.error(field.name())}
                numeric={field == AddressField::PostalCode}
                {on_input}
            />
        }
    });

    section_card(
        Section::Address,
        &section,
        html! {
            <div class="grid gap-4 sm:grid-cols-2">
                {for fields}
            </div>
        },
    )
}

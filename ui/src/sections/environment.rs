use forms::{
    Section,
    sections::environment::{EnvironmentForm, EnvironmentTags},
};
use payloads::OptionCategory;
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{
    components::{Checklist, SelectInput, TextArea, fields::option_choices},
    hooks::use_section_form,
};

#[function_component]
pub fn EnvironmentSection(props: &SectionProps) -> Html {
    let section = use_section_form::<EnvironmentForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let form = section.form();
    let options = section.options();

    let checklists = EnvironmentTags::ALL.into_iter().map(|list| {
        let on_toggle = section.edit(
            list.category().to_string(),
            move |form: &mut EnvironmentForm, key: String| {
                form.toggle(list, &key)
            },
        );
        html! {
            <Checklist
                label={list.label()}
                options={options.get(list.category()).to_vec()}
                tags={form.tags(list).clone()}
                {on_toggle}
            />
        }
    });
    let on_neighbours = section.edit(
        "neighbour_type",
        |form: &mut EnvironmentForm, v: String| form.set_neighbour_type(&v),
    );
    let on_description = section.edit(
        "description",
        |form: &mut EnvironmentForm, v: String| form.description = v,
    );
    let on_neighbourhood = section.edit(
        "neighbourhood_description",
        |form: &mut EnvironmentForm, v: String| {
            form.neighbourhood_description = v
        },
    );

    section_card(
        Section::Environment,
        &section,
        html! {
            <>
                {for checklists}
                <SelectInput
                    label="Neighbours"
                    choices={option_choices(
                        options.get(OptionCategory::NeighbourType),
                    )}
                    selected={form.neighbour_type.clone().unwrap_or_default()}
                    error={section.error("neighbour_type")}
                    on_change={on_neighbours}
                />
                <TextArea
                    label="About the house"
                    value={form.description.clone()}
                    error={section.error("description")}
                    on_input={on_description}
                />
                <TextArea
                    label="About the neighbourhood"
                    value={form.neighbourhood_description.clone()}
                    error={section.error("neighbourhood_description")}
                    on_input={on_neighbourhood}
                />
            </>
        },
    )
}

use forms::{Section, sections::general::GeneralForm};
use payloads::{OptionCategory, PriceHandleBy};
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{
    components::{Checkbox, SelectInput, TextInput, fields::option_choices},
    hooks::use_section_form,
};

fn handle_by_choices() -> Vec<(String, String)> {
    vec![
        ("per_night".into(), "Per night".into()),
        ("per_person".into(), "Per night plus extra guests".into()),
    ]
}

fn handle_by_value(handle_by: PriceHandleBy) -> &'static str {
    match handle_by {
        PriceHandleBy::PerNight => "per_night",
        PriceHandleBy::PerPerson => "per_person",
    }
}

#[function_component]
pub fn GeneralSection(props: &SectionProps) -> Html {
    let section = use_section_form::<GeneralForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let form = section.form();
    let options = section.options();

    let on_name = section.edit("name", |form: &mut GeneralForm, v: String| {
        form.name = v;
    });
    let on_land = section.edit(
        "land_size",
        |form: &mut GeneralForm, v: String| form.set_land_size(&v),
    );
    let on_building = section.edit(
        "building_size",
        |form: &mut GeneralForm, v: String| form.set_building_size(&v),
    );
    let on_structure = section.edit(
        "structure_type",
        |form: &mut GeneralForm, v: String| form.set_structure_type(&v),
    );
    let on_privacy = section.edit(
        "privacy",
        |form: &mut GeneralForm, v: String| form.set_privacy(&v),
    );
    let on_rent_room = section.edit(
        "is_rent_room",
        |form: &mut GeneralForm, checked: bool| form.is_rent_room = checked,
    );
    let on_handle_by = section.edit(
        "price_handle_by",
        |form: &mut GeneralForm, v: String| {
            form.price_handle_by = if v == "per_person" {
                PriceHandleBy::PerPerson
            } else {
                PriceHandleBy::PerNight
            };
        },
    );

    section_card(
        Section::General,
        &section,
        html! {
            <div class="grid gap-4 sm:grid-cols-2">
                <div class="sm:col-span-2">
                    <TextInput
                        label="Name"
                        value={form.name.clone()}
                        error={section.error("name")}
                        on_input={on_name}
                    />
                </div>
                <TextInput
                    label="Land size (m²)"
                    value={form.land_size()}
                    error={section.error("land_size")}
                    numeric=true
                    on_input={on_land}
                />
                <TextInput
                    label="Building size (m²)"
                    value={form.building_size()}
                    error={section.error("building_size")}
                    numeric=true
                    on_input={on_building}
                />
                <SelectInput
                    label="Structure"
                    choices={option_choices(
                        options.get(OptionCategory::Structure),
                    )}
                    selected={form.structure_type.clone().unwrap_or_default()}
                    error={section.error("structure_type")}
                    on_change={on_structure}
                />
                <SelectInput
                    label="Privacy"
                    choices={option_choices(
                        options.get(OptionCategory::Privacy),
                    )}
                    selected={form.privacy.clone().unwrap_or_default()}
                    error={section.error("privacy")}
                    on_change={on_privacy}
                />
                <SelectInput
                    label="Prices are set"
                    choices={handle_by_choices()}
                    selected={handle_by_value(form.price_handle_by)}
                    error={section.error("price_handle_by")}
                    on_change={on_handle_by}
                />
                <div class="flex items-end">
                    <Checkbox
                        label="Guests rent individual rooms"
                        checked={form.is_rent_room}
                        on_change={on_rent_room}
                    />
                </div>
            </div>
        },
    )
}

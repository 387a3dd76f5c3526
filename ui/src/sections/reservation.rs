use forms::{
    Section,
    sections::reservation::{ReservationField, ReservationForm},
};
use payloads::{OptionCategory, Weekday};
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{
    components::{SelectInput, TextInput, fields::option_choices},
    hooks::{SectionHandle, use_section_form},
};

fn field_input(
    section: &SectionHandle<ReservationForm>,
    field: ReservationField,
) -> Html {
    let name = field.name();
    let on_input = section.edit(
        name.clone(),
        move |form: &mut ReservationForm, value: String| {
            form.set(field, &value)
        },
    );
    html! {
        <TextInput
            label={field.label()}
            value={section.form().display(field)}
            error={section.error(&name)}
            numeric={field.is_numeric()}
            {on_input}
        />
    }
}

#[function_component]
pub fn ReservationSection(props: &SectionProps) -> Html {
    let section = use_section_form::<ReservationForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let on_weekend = section.edit(
        "weekend",
        |form: &mut ReservationForm, v: String| form.set_weekend(&v),
    );

    section_card(
        Section::Reservation,
        &section,
        html! {
            <>
                <div class="grid gap-4 sm:grid-cols-2">
                    {for ReservationField::SCALARS
                        .into_iter()
                        .map(|field| field_input(&section, field))}
                    <SelectInput
                        label="Weekend days"
                        choices={option_choices(
                            section.options().get(OptionCategory::Weekend),
                        )}
                        selected={section
                            .form()
                            .weekend
                            .clone()
                            .unwrap_or_default()}
                        error={section.error("weekend")}
                        on_change={on_weekend}
                    />
                </div>
                <fieldset>
                    <legend class="text-sm font-medium mb-2">
                        {"Minimum stay by arrival day"}
                    </legend>
                    <div class="grid gap-4 sm:grid-cols-3">
                        {for Weekday::ALL.into_iter().map(|day| {
                            field_input(
                                &section,
                                ReservationField::WeekdayMinStay(day),
                            )
                        })}
                    </div>
                </fieldset>
            </>
        },
    )
}

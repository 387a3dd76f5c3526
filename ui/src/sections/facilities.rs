use forms::{
    Section,
    seed::FieldState,
    sections::facilities::{FacilitiesForm, FacilityRow},
};
use yew::prelude::*;

use super::SectionProps;
use crate::{
    components::{Checkbox, SectionCard, TextInput},
    hooks::{SectionHandle, use_section_form},
};

/// One facility with its nested fields, shown only while it is ticked.
fn facility_row(
    section: &SectionHandle<FacilitiesForm>,
    row: FacilityRow<'_>,
) -> Html {
    let type_key = row.option.key.clone();
    let on_toggle = {
        let type_key = type_key.clone();
        section.edit(
            type_key.clone(),
            move |form: &mut FacilitiesForm, _: bool| form.toggle(&type_key),
        )
    };
    let fields = row.fields.iter().map(|(field, state)| {
        let name = format!("{type_key}.{}", field.key);
        let (type_key, field_key) = (type_key.clone(), field.key.clone());
        match state {
            FieldState::Toggle(checked) => {
                let on_change = section.edit(
                    name,
                    move |form: &mut FacilitiesForm, checked: bool| {
                        form.set_field_toggle(&type_key, &field_key, checked)
                    },
                );
                html! {
                    <Checkbox
                        label={field.title.clone()}
                        checked={*checked}
                        {on_change}
                    />
                }
            }
            FieldState::Text(_) | FieldState::Numeric(_) => {
                let on_input = section.edit(
                    name.clone(),
                    move |form: &mut FacilitiesForm, value: String| {
                        form.set_field(&type_key, &field_key, &value)
                    },
                );
                html! {
                    <TextInput
                        label={field.title.clone()}
                        value={state.display()}
                        numeric={matches!(state, FieldState::Numeric(_))}
                        error={section.error(&name)}
                        {on_input}
                    />
                }
            }
        }
    });

    html! {
        <div class="border-b border-neutral-200 dark:border-neutral-700
                    pb-3 space-y-2">
            <Checkbox
                label={row.option.label.clone()}
                checked={row.selected}
                on_change={on_toggle}
            />
            if row.selected && !row.fields.is_empty() {
                <div class="ml-6 grid gap-3 sm:grid-cols-2">
                    {for fields}
                </div>
            }
        </div>
    }
}

#[function_component]
pub fn FacilitiesSection(props: &SectionProps) -> Html {
    let section = use_section_form::<FacilitiesForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let form = section.form();
    // nothing to send until the catalog is in
    let on_submit = form.can_submit().then(|| section.submit.clone());

    html! {
        <SectionCard
            title={Section::Facilities.title()}
            status={section.status()}
            errors={section.errors().clone()}
            option_errors={section.options().errors.clone()}
            {on_submit}
        >
            <div class="space-y-3">
                {for form.rows().map(|row| facility_row(&section, row))}
            </div>
        </SectionCard>
    }
}

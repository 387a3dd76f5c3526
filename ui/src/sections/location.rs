use forms::{Section, sections::location::LocationForm};
use payloads::{CityId, ProvinceId};
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{
    components::{SelectInput, TextInput},
    get_api_client,
    hooks::{use_fetch, use_section_form},
};

fn parse_id(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[function_component]
pub fn LocationSection(props: &SectionProps) -> Html {
    let section = use_section_form::<LocationForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let form = section.form();

    let provinces = use_fetch((), |_| async move {
        get_api_client().provinces().await.map_err(|e| e.to_string())
    });
    // refetched whenever the chosen province changes
    let cities = use_fetch(form.province_id(), |province_id| async move {
        match province_id {
            Some(id) => {
                get_api_client().cities(id).await.map_err(|e| e.to_string())
            }
            None => Ok(Vec::new()),
        }
    });

    let province_choices: Vec<(String, String)> = provinces
        .data
        .as_ref()
        .map(|list| {
            list.iter()
                .map(|p| (p.id.to_string(), p.name.clone()))
                .collect()
        })
        .unwrap_or_default();
    let city_choices: Vec<(String, String)> = cities
        .data
        .as_ref()
        .map(|list| {
            list.iter()
                .map(|c| (c.id.to_string(), c.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    let on_province = section.edit(
        "province_id",
        |form: &mut LocationForm, v: String| {
            form.set_province(parse_id(&v).map(ProvinceId));
        },
    );
    let on_city = section.edit(
        "city_id",
        |form: &mut LocationForm, v: String| {
            form.set_city(parse_id(&v).map(CityId))
        },
    );
    let on_latitude = section.edit(
        "latitude",
        |form: &mut LocationForm, v: String| form.set_latitude(&v),
    );
    let on_longitude = section.edit(
        "longitude",
        |form: &mut LocationForm, v: String| form.set_longitude(&v),
    );

    let lookup_error = provinces.error.clone().or(cities.error.clone());
    let retry = {
        let provinces = provinces.refetch.clone();
        let cities = cities.refetch.clone();
        Callback::from(move |_: MouseEvent| {
            provinces.emit(());
            cities.emit(());
        })
    };
    let city_placeholder = if form.province_id().is_none() {
        "Choose a province first"
    } else if cities.is_loading {
        "Loading cities..."
    } else {
        "Choose..."
    };

    section_card(
        Section::Location,
        &section,
        html! {
            <div class="grid gap-4 sm:grid-cols-2">
                if let Some(error) = lookup_error {
                    <p class="sm:col-span-2 text-sm text-red-600">
                        {format!("Could not load places: {error} ")}
                        <button
                            type="button"
                            class="underline"
                            onclick={retry}
                        >
                            {"Retry"}
                        </button>
                    </p>
                }
                <SelectInput
                    label="Province"
                    choices={province_choices}
                    selected={form
                        .province_id()
                        .map(|id| id.to_string())
                        .unwrap_or_default()}
                    error={section.error("province_id")}
                    on_change={on_province}
                />
                <SelectInput
                    label="City"
                    choices={city_choices}
                    selected={form
                        .city_id()
                        .map(|id| id.to_string())
                        .unwrap_or_default()}
                    placeholder={city_placeholder}
                    error={section.error("city_id")}
                    on_change={on_city}
                />
                <TextInput
                    label="Latitude"
                    value={form.latitude().to_string()}
                    error={section.error("latitude")}
                    on_input={on_latitude}
                />
                <TextInput
                    label="Longitude"
                    value={form.longitude().to_string()}
                    error={section.error("longitude")}
                    on_input={on_longitude}
                />
            </div>
        },
    )
}


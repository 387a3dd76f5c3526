use forms::{Section, sections::stay_rules::StayRulesForm};
use payloads::{OptionCategory, RuleStatus};
use yew::prelude::*;

use super::{SectionProps, section_card};
use crate::{components::SelectInput, hooks::use_section_form};

/// Select values are indexes into `RuleStatus::ALL`; blank is unanswered.
fn status_choices() -> Vec<(String, String)> {
    RuleStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| (i.to_string(), status.label().to_string()))
        .collect()
}

fn parse_status(value: &str) -> Option<RuleStatus> {
    value
        .parse::<usize>()
        .ok()
        .and_then(|i| RuleStatus::ALL.get(i).copied())
}

#[function_component]
pub fn StayRulesSection(props: &SectionProps) -> Html {
    let section = use_section_form::<StayRulesForm>(
        props.house.clone(),
        props.revision,
        props.on_saved.clone(),
    );
    let rules = section.options().get(OptionCategory::Rule);

    let rows = rules.iter().map(|rule| {
        let selected = section
            .form()
            .status(&rule.key)
            .and_then(|s| RuleStatus::ALL.iter().position(|r| *r == s))
            .map(|i| i.to_string())
            .unwrap_or_default();
        let key = rule.key.clone();
        let on_change = section.edit(
            rule.key.clone(),
            move |form: &mut StayRulesForm, value: String| {
                form.set(&key, parse_status(&value))
            },
        );
        html! {
            <SelectInput
                label={rule.label.clone()}
                choices={status_choices()}
                {selected}
                placeholder="Not answered"
                error={section.error(&rule.key)}
                {on_change}
            />
        }
    });

    section_card(
        Section::StayRules,
        &section,
        html! {
            <div class="grid gap-4 sm:grid-cols-2">
                {for rows}
            </div>
        },
    )
}


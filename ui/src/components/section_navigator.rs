use forms::{NavigatorState, Section, navigator::SECTION_GROUPS};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SectionNavigatorProps {
    pub active: Section,
    pub on_select: Callback<Section>,
}

/// Sections grouped into collapsible categories. Open categories are local
/// to the navigator; the active section comes from the editor.
#[function_component]
pub fn SectionNavigator(props: &SectionNavigatorProps) -> Html {
    let nav = use_state(|| NavigatorState::new(props.active));

    {
        let nav = nav.clone();
        use_effect_with(props.active, move |active| {
            if nav.active() != *active {
                let mut next = (*nav).clone();
                next.sync_active(*active);
                nav.set(next);
            }
        });
    }

    html! {
        <nav class="space-y-2">
            {for SECTION_GROUPS.iter().map(|(category, sections)| {
                let category = *category;
                let open = nav.is_open(category);
                let on_toggle = {
                    let nav = nav.clone();
                    Callback::from(move |_: MouseEvent| {
                        let mut next = (*nav).clone();
                        next.toggle(category);
                        nav.set(next);
                    })
                };
                html! {
                    <div>
                        <button
                            type="button"
                            onclick={on_toggle}
                            class="w-full flex justify-between px-2 py-1
                                   text-sm font-semibold text-neutral-700
                                   dark:text-neutral-300"
                        >
                            {category.title()}
                            <span>{if open { "−" } else { "+" }}</span>
                        </button>
                        if open {
                            <ul class="ml-2 mt-1 space-y-1">
                                {for sections.iter().map(|section| {
                                    leaf(&nav, *section, &props.on_select)
                                })}
                            </ul>
                        }
                    </div>
                }
            })}
        </nav>
    }
}

fn leaf(
    nav: &UseStateHandle<NavigatorState>,
    section: Section,
    on_select: &Callback<Section>,
) -> Html {
    let is_active = nav.active() == section;
    let onclick = {
        let nav = nav.clone();
        let on_select = on_select.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*nav).clone();
            on_select.emit(next.select(section));
            nav.set(next);
        })
    };
    let class = if is_active {
        "w-full text-left px-3 py-1 rounded-md text-sm bg-neutral-900 \
         text-white dark:bg-neutral-100 dark:text-neutral-900"
    } else {
        "w-full text-left px-3 py-1 rounded-md text-sm \
         hover:bg-neutral-100 dark:hover:bg-neutral-700"
    };

    html! {
        <li>
            <button type="button" {onclick} {class}>{section.title()}</button>
        </li>
    }
}

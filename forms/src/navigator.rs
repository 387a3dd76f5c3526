use std::collections::BTreeSet;

/// One editable part of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Section {
    #[default]
    Address,
    Location,
    General,
    Environment,
    Facilities,
    Rooms,
    Sanitaries,
    StayRules,
    Pricing,
    Reservation,
    Images,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Self::Address,
        Self::Location,
        Self::General,
        Self::Environment,
        Self::Facilities,
        Self::Rooms,
        Self::Sanitaries,
        Self::StayRules,
        Self::Pricing,
        Self::Reservation,
        Self::Images,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Location => "Location",
            Self::General => "General info",
            Self::Environment => "Environment",
            Self::Facilities => "Facilities",
            Self::Rooms => "Rooms",
            Self::Sanitaries => "Sanitaries",
            Self::StayRules => "Stay rules",
            Self::Pricing => "Pricing",
            Self::Reservation => "Reservation rules",
            Self::Images => "Images",
        }
    }

    /// Path segment used in the editor's URL.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Location => "location",
            Self::General => "general",
            Self::Environment => "environment",
            Self::Facilities => "facilities",
            Self::Rooms => "rooms",
            Self::Sanitaries => "sanitaries",
            Self::StayRules => "stay-rules",
            Self::Pricing => "pricing",
            Self::Reservation => "reservation",
            Self::Images => "images",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn category(&self) -> Category {
        SECTION_GROUPS
            .iter()
            .find(|(_, sections)| sections.contains(self))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Details)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Location,
    Details,
    Rules,
    Pricing,
    Media,
}

impl Category {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Details => "Details",
            Self::Rules => "Rules",
            Self::Pricing => "Pricing",
            Self::Media => "Media",
        }
    }
}

/// Static grouping shown in the navigator, in display order.
pub const SECTION_GROUPS: [(Category, &[Section]); 5] = [
    (Category::Location, &[Section::Address, Section::Location]),
    (
        Category::Details,
        &[
            Section::General,
            Section::Environment,
            Section::Facilities,
            Section::Rooms,
            Section::Sanitaries,
        ],
    ),
    (Category::Rules, &[Section::StayRules, Section::Reservation]),
    (Category::Pricing, &[Section::Pricing]),
    (Category::Media, &[Section::Images]),
];

/// Which categories are expanded, and the active section.
///
/// Opening a category never closes another. The category holding the active
/// section is always open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    open: BTreeSet<Category>,
    active: Section,
}

impl NavigatorState {
    pub fn new(active: Section) -> Self {
        let mut state = Self {
            open: BTreeSet::new(),
            active,
        };
        state.sync_active(active);
        state
    }

    pub fn toggle(&mut self, category: Category) {
        if !self.open.remove(&category) {
            self.open.insert(category);
        }
    }

    pub fn is_open(&self, category: Category) -> bool {
        self.open.contains(&category)
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// A leaf was clicked. Returns the section for the orchestrator.
    pub fn select(&mut self, section: Section) -> Section {
        self.sync_active(section);
        section
    }

    /// Follow an active section set from outside the navigator.
    pub fn sync_active(&mut self, section: Section) {
        self.active = section;
        self.open.insert(section.category());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_is_grouped_once() {
        let grouped: Vec<Section> = SECTION_GROUPS
            .iter()
            .flat_map(|(_, sections)| sections.iter().copied())
            .collect();
        assert_eq!(grouped.len(), Section::ALL.len());
        for section in Section::ALL {
            assert_eq!(grouped.iter().filter(|s| **s == section).count(), 1);
            assert_eq!(Section::from_slug(section.slug()), Some(section));
        }
    }

    #[test]
    fn categories_open_independently() {
        let mut nav = NavigatorState::new(Section::Address);
        assert!(nav.is_open(Category::Location));
        nav.toggle(Category::Rules);
        assert!(nav.is_open(Category::Location));
        assert!(nav.is_open(Category::Rules));
        nav.toggle(Category::Location);
        assert!(!nav.is_open(Category::Location));
        assert_eq!(nav.active(), Section::Address);
    }

    #[test]
    fn external_selection_forces_its_category_open() {
        let mut nav = NavigatorState::new(Section::Address);
        nav.sync_active(Section::Images);
        assert!(nav.is_open(Category::Media));
        assert_eq!(nav.active(), Section::Images);
        assert_eq!(nav.select(Section::Pricing), Section::Pricing);
        assert!(nav.is_open(Category::Pricing));
    }
}

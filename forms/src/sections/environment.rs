use payloads::{
    OptionCategory,
    requests::{EnvironmentUpdate, HouseUpdate},
    responses::House,
};

use super::SectionForm;
use crate::{
    options::OptionLists, status::FormErrors, tags::TagSet,
    workflow::Submission,
};

/// The multi-select lists of this section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentTags {
    Textures,
    Views,
    AccessRoutes,
}

impl EnvironmentTags {
    pub const ALL: [EnvironmentTags; 3] =
        [Self::Textures, Self::Views, Self::AccessRoutes];

    pub fn category(&self) -> OptionCategory {
        match self {
            Self::Textures => OptionCategory::Texture,
            Self::Views => OptionCategory::View,
            Self::AccessRoutes => OptionCategory::AccessRoute,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Textures => "Area texture",
            Self::Views => "Views",
            Self::AccessRoutes => "Access routes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentForm {
    textures: TagSet,
    views: TagSet,
    access_routes: TagSet,
    pub neighbour_type: Option<String>,
    pub description: String,
    pub neighbourhood_description: String,
}

impl EnvironmentForm {
    pub fn tags(&self, list: EnvironmentTags) -> &TagSet {
        match list {
            EnvironmentTags::Textures => &self.textures,
            EnvironmentTags::Views => &self.views,
            EnvironmentTags::AccessRoutes => &self.access_routes,
        }
    }

    pub fn toggle(&mut self, list: EnvironmentTags, key: &str) {
        match list {
            EnvironmentTags::Textures => self.textures.toggle(key),
            EnvironmentTags::Views => self.views.toggle(key),
            EnvironmentTags::AccessRoutes => self.access_routes.toggle(key),
        }
    }

    pub fn set_neighbour_type(&mut self, key: &str) {
        self.neighbour_type =
            (!key.is_empty()).then(|| key.to_string());
    }
}

impl SectionForm for EnvironmentForm {
    const OPTIONS: &'static [OptionCategory] = &[
        OptionCategory::Texture,
        OptionCategory::View,
        OptionCategory::AccessRoute,
        OptionCategory::NeighbourType,
    ];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        let env = &house.environment;
        Self {
            textures: env.textures.iter().cloned().collect(),
            views: env.views.iter().cloned().collect(),
            access_routes: env.access_routes.iter().cloned().collect(),
            neighbour_type: env.neighbour_type.clone(),
            description: env.description.clone(),
            neighbourhood_description: env.neighbourhood_description.clone(),
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        Ok(Submission::House(HouseUpdate::Environment(EnvironmentUpdate {
            textures: self.textures.to_vec(),
            views: self.views.to_vec(),
            neighbour_type: self.neighbour_type.clone(),
            access_routes: self.access_routes.to_vec(),
            description: self.description.trim().to_string(),
            neighbourhood_description: self
                .neighbourhood_description
                .trim()
                .to_string(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn toggles_are_sent_per_list() {
        let mut house = fixtures::house();
        house.environment.views = vec!["sea".into(), "forest".into()];
        let mut form = EnvironmentForm::seed(&house, &OptionLists::default());
        assert!(form.tags(EnvironmentTags::Views).contains("sea"));

        form.toggle(EnvironmentTags::Views, "sea");
        form.toggle(EnvironmentTags::Textures, "rural");
        let Ok(Submission::House(HouseUpdate::Environment(body))) =
            form.submission()
        else {
            panic!("expected an environment update");
        };
        assert_eq!(body.views, vec!["forest"]);
        assert_eq!(body.textures, vec!["rural"]);
        assert!(body.access_routes.is_empty());
    }
}

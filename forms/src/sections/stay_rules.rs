use payloads::{
    OptionCategory, RuleStatus,
    requests::{HouseUpdate, RulesUpdate},
    responses::House,
};
use std::collections::BTreeMap;

use super::SectionForm;
use crate::{options::OptionLists, status::FormErrors, workflow::Submission};

/// House rules (pets, smoking, parties...). Each rule is either unanswered
/// or has a status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StayRulesForm {
    rules: BTreeMap<String, Option<RuleStatus>>,
}

impl StayRulesForm {
    pub fn status(&self, key: &str) -> Option<RuleStatus> {
        self.rules.get(key).copied().flatten()
    }

    pub fn set(&mut self, key: &str, status: Option<RuleStatus>) {
        self.rules.insert(key.to_string(), status);
    }

    pub fn unanswered(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, status)| status.is_none())
            .map(|(key, _)| key.as_str())
    }
}

impl SectionForm for StayRulesForm {
    const OPTIONS: &'static [OptionCategory] = &[OptionCategory::Rule];

    fn seed(house: &House, options: &OptionLists) -> Self {
        let mut rules: BTreeMap<String, Option<RuleStatus>> = options
            .get(OptionCategory::Rule)
            .iter()
            .map(|option| (option.key.clone(), None))
            .collect();
        for (key, status) in &house.rules {
            rules.insert(key.clone(), Some(*status));
        }
        Self { rules }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        let rules = self
            .rules
            .iter()
            .filter_map(|(key, status)| status.map(|s| (key.clone(), s)))
            .collect();
        Ok(Submission::House(HouseUpdate::Rules(RulesUpdate { rules })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn unanswered_rules_are_left_out() {
        let mut house = fixtures::house();
        house.rules.insert("pets".into(), RuleStatus::Forbidden);
        let mut options = OptionLists::default();
        options.insert(
            OptionCategory::Rule,
            vec![
                fixtures::option("pets"),
                fixtures::option("smoking"),
                fixtures::option("party"),
            ],
        );
        let mut form = StayRulesForm::seed(&house, &options);
        assert_eq!(form.status("pets"), Some(RuleStatus::Forbidden));
        assert_eq!(form.unanswered().count(), 2);

        form.set("smoking", Some(RuleStatus::Conditional));
        let Ok(Submission::House(HouseUpdate::Rules(body))) = form.submission()
        else {
            panic!("expected a rules update");
        };
        assert_eq!(body.rules.len(), 2);
        assert_eq!(body.rules["smoking"], RuleStatus::Conditional);
        assert!(!body.rules.contains_key("party"));
    }
}

use payloads::{
    OptionCategory,
    requests::{HouseUpdate, SanitariesUpdate},
    responses::House,
};

use super::SectionForm;
use crate::{
    options::OptionLists, status::FormErrors, tags::TagSet,
    workflow::Submission,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitariesForm {
    pub sanitaries: TagSet,
}

impl SectionForm for SanitariesForm {
    const OPTIONS: &'static [OptionCategory] = &[OptionCategory::Sanitary];

    fn seed(house: &House, _options: &OptionLists) -> Self {
        Self {
            sanitaries: house.sanitaries.iter().cloned().collect(),
        }
    }

    fn submission(&self) -> Result<Submission, FormErrors> {
        Ok(Submission::House(HouseUpdate::Sanitaries(SanitariesUpdate {
            sanitaries: self.sanitaries.to_vec(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;

    #[test]
    fn every_option_has_a_checked_state() {
        let mut house = fixtures::house();
        house.sanitaries = vec!["shower".into()];
        let mut options = OptionLists::default();
        options.insert(
            OptionCategory::Sanitary,
            vec![fixtures::option("shower"), fixtures::option("toilet")],
        );
        let form = SanitariesForm::seed(&house, &options);
        let rows: Vec<bool> = form
            .sanitaries
            .checklist(options.get(OptionCategory::Sanitary))
            .map(|(_, checked)| checked)
            .collect();
        assert_eq!(rows, vec![true, false]);
    }
}

//! Rule catalogs
//!
//! A catalog is the fixed table of standards for one analyzer configuration.
//! The default is the 2010 ADA Standards (plus MUTCD crosswalk markings);
//! jurisdictions with stricter local codes can supply their own catalog as
//! TOML and run side by side with the default.

use crate::rules::{
    crosswalk::crosswalk_rules, curb_ramp::curb_ramp_rules, sidewalk::sidewalk_rules,
    surface::surface_rules, Rule,
};
use serde::{Deserialize, Serialize};
use shared_types::DetectionClass;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// 2010 ADA Standards for Accessible Design
    pub fn ada_2010() -> Self {
        let mut rules = Vec::new();
        rules.extend(curb_ramp_rules());
        rules.extend(sidewalk_rules());
        rules.extend(crosswalk_rules());
        rules.extend(surface_rules());
        Self::new("ADA 2010", rules)
    }

    /// Rules applicable to a detection class, in catalog order
    pub fn rules_for(&self, class: DetectionClass) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.applies_to == class)
    }

    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.key == key)
    }

    /// Distinct citations covered by this catalog, in catalog order
    pub fn covered_references(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !refs.contains(&rule.reference.as_str()) {
                refs.push(&rule.reference);
            }
        }
        refs
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::ada_2010()
    }
}

use glob::{MatchOptions, Pattern, PatternError};
use serde::{Deserialize, Serialize};

use super::types::TaskGroup;

const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Serialized form of a group rule (`{ pattern = "*clean*", group = "clean" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRuleConfig {
    pub pattern: String,
    pub group: TaskGroup,
}

impl GroupRuleConfig {
    pub fn new(pattern: impl Into<String>, group: TaskGroup) -> Self {
        Self {
            pattern: pattern.into(),
            group,
        }
    }
}

#[derive(Debug, Clone)]
struct GroupRule {
    pattern: Pattern,
    group: TaskGroup,
}

/// Ordered target-name rules; the first matching rule decides the group.
#[derive(Debug, Clone, Default)]
pub struct GroupRules {
    rules: Vec<GroupRule>,
}

impl GroupRules {
    pub fn compile(configs: &[GroupRuleConfig]) -> Result<Self, PatternError> {
        let rules = configs
            .iter()
            .map(|c| {
                Ok(GroupRule {
                    pattern: Pattern::new(&c.pattern)?,
                    group: c.group,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { rules })
    }

    /// Rules shared by the built-in dialects.
    pub fn standard_configs() -> Vec<GroupRuleConfig> {
        vec![
            GroupRuleConfig::new("pre*", TaskGroup::Clean),
            GroupRuleConfig::new("post*", TaskGroup::Clean),
            GroupRuleConfig::new("*rebuild*", TaskGroup::Rebuild),
            GroupRuleConfig::new("*clean*", TaskGroup::Clean),
            GroupRuleConfig::new("*build*", TaskGroup::Build),
        ]
    }

    pub fn standard() -> Self {
        Self::compile(&Self::standard_configs()).unwrap_or_default()
    }

    pub fn classify(&self, name: &str) -> TaskGroup {
        self.rules
            .iter()
            .find(|r| r.pattern.matches_with(name, NAME_MATCH))
            .map(|r| r.group)
            .unwrap_or(TaskGroup::None)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

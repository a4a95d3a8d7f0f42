//! Prompt template overrides from TOML (`[prompts]` section)

use assistant_domain::{ConfigIssue, PromptKind, PromptRegistry};
use serde::{Deserialize, Serialize};

/// Optional template overrides; unset kinds keep the built-in template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    pub direct: Option<String>,
    pub grade: Option<String>,
    pub generate: Option<String>,
    pub rewrite: Option<String>,
}

impl FilePromptsConfig {
    fn overrides(&self) -> [(PromptKind, Option<&String>); 4] {
        [
            (PromptKind::Direct, self.direct.as_ref()),
            (PromptKind::Grade, self.grade.as_ref()),
            (PromptKind::Generate, self.generate.as_ref()),
            (PromptKind::Rewrite, self.rewrite.as_ref()),
        ]
    }

    /// Build the prompt registry with overrides applied
    pub fn to_registry(&self) -> PromptRegistry {
        self.overrides()
            .into_iter()
            .fold(PromptRegistry::default(), |registry, (kind, source)| {
                match source {
                    Some(source) => registry.with_template(kind, source.clone()),
                    None => registry,
                }
            })
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        self.to_registry()
            .validate()
            .iter()
            .map(ConfigIssue::from_template_error)
            .collect()
    }
}

use regex::Regex;

use crate::rules::repository::RuleError;
use crate::utils::validation::compact_model;

/// One catalog spelling convention: a pattern over a target model and the
/// templates that re-render it.
///
/// Templates use `regex` expansion syntax (`${1}`, `${2}`, ...). Expansion is total:
/// a group that did not participate renders as an empty string, so no template can
/// fail at selection time. Separators left dangling by an empty trailing group are
/// trimmed from the rendering.
#[derive(Debug, Clone)]
pub struct FormatRule {
    pattern: Regex,
    templates: Vec<String>,
}

impl FormatRule {
    /// Compile a format rule. Patterns are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPattern` if the pattern does not compile and
    /// `RuleError::NoTemplates` if no template is given.
    pub fn new(pattern: &str, templates: &[&str]) -> Result<Self, RuleError> {
        let compiled =
            Regex::new(&format!("(?i){pattern}")).map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        if templates.is_empty() {
            return Err(RuleError::NoTemplates(pattern.to_string()));
        }

        Ok(Self {
            pattern: compiled,
            templates: templates.iter().map(|t| (*t).to_string()).collect(),
        })
    }

    /// Pattern source without the case-insensitivity flag
    pub fn pattern(&self) -> &str {
        self.pattern
            .as_str()
            .strip_prefix("(?i)")
            .unwrap_or(self.pattern.as_str())
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Render every template against `model`. Empty when the pattern does not match.
    pub fn render(&self, model: &str) -> Vec<String> {
        let Some(caps) = self.pattern.captures(model.trim()) else {
            return Vec::new();
        };

        self.templates
            .iter()
            .map(|template| {
                let mut rendered = String::new();
                caps.expand(template, &mut rendered);
                rendered
                    .trim_end_matches(|c: char| c == '-' || c == '/' || c.is_whitespace())
                    .to_string()
            })
            .filter(|rendered| !rendered.is_empty())
            .collect()
    }
}

/// Render all alternate spellings of `model` across `rules`, in rule then template
/// order, dropping repeats and spellings equal to `model` itself (whitespace- and
/// case-insensitive).
pub fn alternate_spellings(rules: &[FormatRule], model: &str) -> Vec<String> {
    let mut seen = vec![compact_model(model)];
    let mut spellings = Vec::new();

    for rule in rules {
        for rendered in rule.render(model) {
            let key = compact_model(&rendered);
            if !seen.contains(&key) {
                seen.push(key);
                spellings.push(rendered);
            }
        }
    }

    spellings
}

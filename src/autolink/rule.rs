//! Autolink rule definition and compile step.
//!
//! # Responsibilities
//! - Hold the persisted shape of a single rule
//! - Compile the pattern into a ready-to-use regex + expanded template
//! - Provide the display name used for listing and sorting
//!
//! # Design Decisions
//! - Compiled state is never serialized; it is rebuilt on every reload
//! - A rule that is disabled or incomplete stays uncompiled without error
//! - Equality ignores compiled state

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NON_WORD_PREFIX: &str = r"(?P<MattermostNonWordPrefix>(^|\s))";
const NON_WORD_SUFFIX: &str = r"(?P<MattermostNonWordSuffix>$|[\s\.\!\?\,\)])";

/// Errors produced while compiling a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern for link '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// A single pattern → template rule.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Autolink {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Disabled")]
    pub disabled: bool,

    #[serde(rename = "Pattern")]
    pub pattern: String,

    #[serde(rename = "Template")]
    pub template: String,

    /// Teams or `team/channel` pairs the rule is restricted to; empty = everywhere.
    #[serde(rename = "Scope")]
    pub scope: Vec<String>,

    /// Wrap the pattern in `\b` word boundaries.
    #[serde(rename = "WordMatch")]
    pub word_match: bool,

    #[serde(rename = "DisableNonWordPrefix")]
    pub disable_non_word_prefix: bool,

    #[serde(rename = "DisableNonWordSuffix")]
    pub disable_non_word_suffix: bool,

    /// Apply the rule to posts created by bot accounts.
    #[serde(rename = "ProcessBotPosts")]
    pub process_bot_posts: bool,

    #[serde(skip)]
    compiled: Option<CompiledLink>,
}

/// Result of a successful compile.
#[derive(Debug, Clone)]
pub struct CompiledLink {
    pub regex: Regex,
    /// Template with references to the boundary groups added by the compile step.
    pub template: String,
    /// Whether the regex consumes no boundary characters, so replace-all is safe.
    pub can_replace_all: bool,
}

impl Autolink {
    /// Create an enabled rule with the given name, pattern and template.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    /// Name shown in listings; falls back to the pattern for unnamed rules.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.pattern
        } else {
            &self.name
        }
    }

    /// Compile the rule, replacing any previous compiled state.
    ///
    /// On error the rule is left uncompiled.
    pub fn compile(&mut self) -> Result<(), RuleError> {
        self.compiled = None;

        if self.disabled || self.pattern.is_empty() || self.template.is_empty() {
            return Ok(());
        }

        let mut pattern = self.pattern.clone();
        let mut template = self.template.clone();
        let mut can_replace_all = false;

        if self.word_match {
            pattern = format!(r"\b{}\b", pattern);
            can_replace_all = true;
        } else {
            if !self.disable_non_word_prefix {
                pattern = format!("{}{}", NON_WORD_PREFIX, pattern);
                template = format!("${{MattermostNonWordPrefix}}{}", template);
            }
            if !self.disable_non_word_suffix {
                pattern.push_str(NON_WORD_SUFFIX);
                template.push_str("${MattermostNonWordSuffix}");
            }
        }

        let regex = Regex::new(&pattern).map_err(|source| RuleError::InvalidPattern {
            name: self.display_name().to_string(),
            source,
        })?;

        self.compiled = Some(CompiledLink {
            regex,
            template,
            can_replace_all,
        });
        Ok(())
    }

    /// Compiled form, if the last compile produced one.
    pub fn compiled(&self) -> Option<&CompiledLink> {
        self.compiled.as_ref()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }
}

impl PartialEq for Autolink {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.disabled == other.disabled
            && self.pattern == other.pattern
            && self.template == other.template
            && self.scope == other.scope
            && self.word_match == other.word_match
            && self.disable_non_word_prefix == other.disable_non_word_prefix
            && self.disable_non_word_suffix == other.disable_non_word_suffix
            && self.process_bot_posts == other.process_bot_posts
    }
}

impl Eq for Autolink {}

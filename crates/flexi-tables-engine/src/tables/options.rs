//! Table rendering options and extension-level settings.
//!
//! Options are resolved by layering overrides over the defaults:
//! defaults ← extension level ← block level. The result is an immutable
//! [`TableOptions`] computed once per table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Block name used for CSS classes when none is configured.
pub const DEFAULT_BLOCK_NAME: &str = "flexi-table";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to parse table options: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("Table option `blockName` must not be empty")]
    EmptyBlockName,
}

/// HTML shape a table renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Body cells carry a copy of their column title for stacked layouts.
    #[default]
    Cards,
    Unresponsive,
    #[serde(alias = "fixed-titles")]
    FixedTitles,
}

impl RenderMode {
    /// Modifier used in the wrapper's `_type_*` class.
    #[must_use]
    pub fn modifier(self) -> &'static str {
        match self {
            RenderMode::Cards => "cards",
            RenderMode::Unresponsive => "unresponsive",
            RenderMode::FixedTitles => "fixed-titles",
        }
    }
}

/// What a delimiter-shaped row inside a pipe table body does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorRowRule {
    /// Any delimiter-shaped row becomes a separator row.
    #[default]
    AnyDelimiter,
    /// Only a row identical to the table's own delimiter becomes a separator
    /// row; other delimiter-shaped rows are ordinary rows.
    MatchHeaderDelimiter,
    /// A delimiter-shaped row ends the table.
    Terminate,
}

/// Fully resolved options for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub block_name: String,
    pub render_mode: RenderMode,
    /// Extra attributes for the outer wrapper element.
    pub attributes: BTreeMap<String, String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            block_name: DEFAULT_BLOCK_NAME.to_string(),
            render_mode: RenderMode::default(),
            attributes: BTreeMap::new(),
        }
    }
}

impl TableOptions {
    /// Folds `layers` over the defaults, later layers winning.
    ///
    /// Scalars are replaced; attributes merge key by key.
    pub fn resolve<'a>(layers: impl IntoIterator<Item = &'a TableOptionsOverride>) -> Self {
        let mut options = Self::default();
        for layer in layers {
            if let Some(name) = &layer.block_name {
                options.block_name.clone_from(name);
            }
            if let Some(mode) = layer.render_mode {
                options.render_mode = mode;
            }
            options.attributes.extend(
                layer
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        options
    }
}

/// A partial set of options from one configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableOptionsOverride {
    #[serde(default, alias = "block_name", skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,
    #[serde(
        default,
        alias = "type",
        alias = "render_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub render_mode: Option<RenderMode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl TableOptionsOverride {
    /// Parses a block-level JSON object such as `{"renderMode": "unresponsive"}`.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self
            .block_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(OptionsError::EmptyBlockName);
        }
        Ok(())
    }
}

/// Extension-level settings for the table block types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesExtension {
    /// Recognize pipe tables.
    pub pipe: bool,
    /// Recognize grid tables.
    pub grid: bool,
    pub separator_rows: SeparatorRowRule,
    /// Extension-level option overrides, applied before block-level ones.
    pub defaults: TableOptionsOverride,
}

impl Default for TablesExtension {
    fn default() -> Self {
        Self {
            pipe: true,
            grid: true,
            separator_rows: SeparatorRowRule::default(),
            defaults: TableOptionsOverride::default(),
        }
    }
}

impl TablesExtension {
    /// Resolves the options of one table from its block-level override.
    #[must_use]
    pub fn options_for(&self, block: Option<&TableOptionsOverride>) -> TableOptions {
        TableOptions::resolve(std::iter::once(&self.defaults).chain(block))
    }
}

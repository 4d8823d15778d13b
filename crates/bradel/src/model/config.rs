//! Binding configuration.
//!
//! A [`BindingConfig`] can be built in code or loaded from TOML:
//!
//! ```ignore
//! let config = BindingConfig::from_toml_str(r#"
//! style = "plain"
//! estimated_row_height = 52.0
//! "#)?;
//! ```

use serde::{Deserialize, Serialize};

use super::error::{BindingError, Result};

/// Visual style of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// Rows run edge to edge without section spacing.
    Plain,
    /// Sections are visually grouped.
    ///
    /// A grouped list keeps a spacer in the header area when its list-level
    /// header is cleared.
    #[default]
    Grouped,
}

/// Settings for a [`TableBinding`](super::TableBinding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Visual style of the list.
    pub style: ListStyle,
    /// Row height estimate handed to the surface before rows are measured.
    pub estimated_row_height: f32,
    /// Height of the spacer a grouped list shows in place of a cleared header.
    pub grouped_header_spacer_height: f32,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            style: ListStyle::default(),
            estimated_row_height: 44.0,
            grouped_header_spacer_height: 35.0,
        }
    }
}

impl BindingConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| BindingError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| BindingError::InvalidConfig(err.to_string()))
    }

    /// Sets the list style.
    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the estimated row height.
    pub fn with_estimated_row_height(mut self, height: f32) -> Self {
        self.estimated_row_height = height;
        self
    }

    /// Sets the height of the grouped header spacer.
    pub fn with_grouped_header_spacer_height(mut self, height: f32) -> Self {
        self.grouped_header_spacer_height = height;
        self
    }

    /// Returns the section header and footer height estimate for the style.
    pub fn estimated_section_supplement_height(&self) -> f32 {
        match self.style {
            ListStyle::Plain => 22.0,
            ListStyle::Grouped => 10.0,
        }
    }

    fn validate(&self) -> Result<()> {
        let heights = [
            ("estimated_row_height", self.estimated_row_height),
            ("grouped_header_spacer_height", self.grouped_header_spacer_height),
        ];
        for (name, value) in heights {
            if !value.is_finite() || value < 0.0 {
                return Err(BindingError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BindingConfig::new();
        assert_eq!(config.style, ListStyle::Grouped);
        assert_eq!(config.estimated_row_height, 44.0);
        assert_eq!(config.grouped_header_spacer_height, 35.0);
        assert_eq!(config.estimated_section_supplement_height(), 10.0);
        assert_eq!(
            config
                .with_style(ListStyle::Plain)
                .estimated_section_supplement_height(),
            22.0
        );
    }

    #[test]
    fn test_from_toml() {
        let config = BindingConfig::from_toml_str(
            r#"
            style = "plain"
            estimated_row_height = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            BindingConfig::new()
                .with_style(ListStyle::Plain)
                .with_estimated_row_height(60.0)
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(BindingConfig::from_toml_str("").unwrap(), BindingConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = BindingConfig::from_toml_str("style = \"sideways\"").unwrap_err();
        assert!(matches!(err, BindingError::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_height_rejected() {
        let err = BindingConfig::from_toml_str("grouped_header_spacer_height = -1.0").unwrap_err();
        assert_eq!(
            err,
            BindingError::InvalidConfig(
                "grouped_header_spacer_height must be a non-negative number, got -1".into()
            )
        );
    }

    #[test]
    fn test_toml_string_parses_back() {
        let config = BindingConfig::new().with_style(ListStyle::Plain);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("style = \"plain\""));
        assert_eq!(BindingConfig::from_toml_str(&text).unwrap(), config);
    }
}

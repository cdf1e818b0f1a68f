//! Color/style configuration, loaded from a YAML file shaped like the
//! original `config_colors.yml`: classification keyword → table colors,
//! data-type label → color, plus a single arrow color. Classification keys
//! double as the sheet-name prefixes that decide which sheets are tables,
//! so map order matters (first match wins, legend follows config order).

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("failed to read style config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("bad style config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("no color configured for table classification {tag:?}")]
    MissingClassification { tag: String },
    #[error("no color configured for data type {data_type:?}")]
    MissingTypeColor { data_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableStyle {
    #[serde(rename = "BG_COLOR")]
    pub bg_color: String,
    #[serde(rename = "FONT_COLOR")]
    pub font_color: String,
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleConfig {
    #[serde(rename = "TABLE_COLOR")]
    pub table_colors: IndexMap<String, TableStyle>,
    #[serde(rename = "TYPE_COLOR", default)]
    pub type_colors: IndexMap<String, String>,
    #[serde(rename = "ARROW_COLOR", default = "default_arrow_color")]
    pub arrow_color: String,
}

fn default_arrow_color() -> String {
    "black".to_string()
}

impl StyleConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self, StyleError> {
        let text = fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| StyleError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Match a sheet name of the form `"<classification> <table name>"`
    /// against the configured classification keywords, case-insensitively.
    /// Returns the matched classification key and the table name, or `None`
    /// for sheets that are not tables.
    pub fn match_sheet_name<'a>(&'a self, sheet_name: &str) -> Option<(&'a str, String)> {
        for key in self.table_colors.keys() {
            let prefix_len = key.len() + 1;
            if sheet_name.len() > prefix_len
                && sheet_name.is_char_boundary(key.len())
                && sheet_name[..key.len()].eq_ignore_ascii_case(key)
                && sheet_name[key.len()..].starts_with(' ')
            {
                return Some((key.as_str(), sheet_name[prefix_len..].to_string()));
            }
        }
        None
    }

    pub fn table_style(&self, tag: &str) -> Result<&TableStyle, StyleError> {
        self.table_colors
            .get(tag)
            .ok_or_else(|| StyleError::MissingClassification {
                tag: tag.to_string(),
            })
    }

    pub fn type_color(&self, data_type: &str) -> Result<&str, StyleError> {
        self.type_colors
            .get(data_type)
            .map(String::as_str)
            .ok_or_else(|| StyleError::MissingTypeColor {
                data_type: data_type.to_string(),
            })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> StyleConfig {
    StyleConfig::from_yaml_str(
        r##"
TABLE_COLOR:
  TABLE:
    BG_COLOR: "#2d6a9f"
    FONT_COLOR: "#ffffff"
    DESCRIPTION: "Entity table"
  ASSOCIATION:
    BG_COLOR: "#7f9f2d"
    FONT_COLOR: "#ffffff"
    DESCRIPTION: "Association table"
TYPE_COLOR:
  int: "#dce6f0"
  varchar: "#e6f0dc"
  decimal: "#f0dce6"
  timestamp: "#eeeeee"
ARROW_COLOR: "#444444"
"##,
    )
    .unwrap()
}

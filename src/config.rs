use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Option bags looked up in the loader-wide options, in order.
pub const OPTION_BAGS: [&str; 2] = ["ng2TemplateLoader", "angular2TemplateLoader"];

/// Effective configuration for one transform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Keep `templateUrl`/`styleUrls` as key names after inlining.
    pub keep_url: bool,
    pub parse_module: ParseModule,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            keep_url: false,
            parse_module: ParseModule::Typescript,
        }
    }
}

impl PluginConfig {
    /// Built-in defaults, then the loader-wide layer, then the per-call
    /// query layer. Later layers only override the keys they set.
    pub fn resolve(loader: ConfigLayer, query: ConfigLayer) -> Result<Self, ConfigError> {
        let merged = ConfigLayer::builtin().merge(loader).merge(query);
        let defaults = PluginConfig::default();

        let parse_module = match merged.parse_module {
            Some(id) => id.parse()?,
            None => defaults.parse_module,
        };

        Ok(Self {
            keep_url: merged.keep_url.unwrap_or(defaults.keep_url),
            parse_module,
        })
    }
}

/// Dialect the standalone driver parses with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseModule {
    Typescript,
    Babel,
}

impl FromStr for ParseModule {
    type Err = ConfigError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id {
            "typescript" | "ts" | "recast/parsers/typescript" => Ok(ParseModule::Typescript),
            "babel" | "babylon" | "recast/parsers/babel" | "recast/parsers/babylon" => {
                Ok(ParseModule::Babel)
            }
            other => Err(ConfigError::UnknownParser(other.to_string())),
        }
    }
}

/// One partial source of options. Unknown keys are ignored so a loader
/// options object can carry settings meant for other tools.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigLayer {
    pub keep_url: Option<bool>,
    pub parse_module: Option<String>,
}

impl ConfigLayer {
    pub fn builtin() -> Self {
        Self {
            keep_url: None,
            parse_module: Some("typescript".to_string()),
        }
    }

    pub fn merge(self, over: ConfigLayer) -> Self {
        Self {
            keep_url: over.keep_url.or(self.keep_url),
            parse_module: over.parse_module.or(self.parse_module),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        Ok(ConfigLayer::deserialize(value)?)
    }

    /// Pick the first recognized option bag out of loader-wide options.
    pub fn from_loader_options(options: Option<&Value>) -> Result<Self, ConfigError> {
        let bag = options.and_then(|options| {
            OPTION_BAGS
                .iter()
                .find_map(|name| options.get(name).filter(|bag| !bag.is_null()))
        });

        match bag {
            Some(bag) => Self::from_value(bag),
            None => Ok(Self::default()),
        }
    }
}

use crate::{bundle::BundleOptions, stage::Style};
use err_derive::Error;
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Structure every bundler config has to follow.
pub const TEMPLATE: &str = include_str!("../resources/bundle.yml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(display = "Failed to read config file: {}", err)]
    ReadConfigFile { err: io::Error },
    #[error(display = "Failed to parse config: {}", err)]
    ParseConfig { err: serde_yaml::Error },
    #[error(
        display = "The structure of \"{}\" is not valid, please refer to:\n{}",
        path_str,
        template
    )]
    StructureValidation { path_str: String, template: String },
    #[error(
        display = "Unknown style \"{}\", expected \"plain\" or \"terminated\"",
        style
    )]
    InvalidStyle { style: String },
}

#[derive(Debug)]
pub struct Config {
    conf: Value,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let conf_src = match fs::read_to_string(&path) {
            Ok(conf_src) => conf_src,
            Err(err) => {
                return Err(ConfigError::ReadConfigFile { err });
            }
        };

        Config::parse(&conf_src, &path.as_ref().to_string_lossy())
    }

    /// `origin` only shows up in error messages.
    pub fn parse(conf_src: &str, origin: &str) -> Result<Config, ConfigError> {
        let conf = match serde_yaml::from_str(conf_src) {
            Ok(conf) => conf,
            Err(err) => return Err(ConfigError::ParseConfig { err }),
        };

        let template = match serde_yaml::from_str(TEMPLATE) {
            Ok(template) => template,
            Err(err) => panic!("Template is invalid: {}", err),
        };

        if normalize_value(&conf) != normalize_value(&template) {
            Err(ConfigError::StructureValidation {
                path_str: origin.to_owned(),
                template: TEMPLATE.to_owned(),
            })
        } else {
            Ok(Config { conf })
        }
    }

    pub fn style(&self) -> Result<Style, ConfigError> {
        match &self.conf["style"] {
            Value::String(style) => style
                .parse()
                .map_err(|style| ConfigError::InvalidStyle { style }),
            other => Err(ConfigError::InvalidStyle {
                style: format!("{:?}", other),
            }),
        }
    }

    pub fn sorted(&self) -> bool {
        match self.conf["sorted"] {
            Value::Bool(sorted) => sorted,
            _ => false,
        }
    }

    pub fn bundle_options(&self) -> Result<BundleOptions, ConfigError> {
        Ok(BundleOptions {
            style: self.style()?,
            sorted: self.sorted(),
        })
    }
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(_) => Value::Bool(false),
        Value::Number(_) => Value::Number(serde_yaml::Number::from(0)),
        Value::String(_) => Value::String(String::new()),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(normalize_value).collect()),
        // In this case we only normalize the value on the right
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(val1, val2)| (val1.clone(), normalize_value(val2)))
                .collect(),
        ),
    }
}

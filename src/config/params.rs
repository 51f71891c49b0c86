use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Runtime parameters passed to a script.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse from CLI args like "key=value".
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut params = Self::new();
        for arg in args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Error::Config(format!("invalid param '{}', expected key=value", arg))
            })?;
            params.values.insert(key.to_string(), value.to_string());
        }
        Ok(params)
    }
}

/// Parameter definition in a script.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDef {
    /// Whether this parameter is required.
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided.
    pub default: Option<String>,

    /// Description for documentation.
    pub description: Option<String>,
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("valid regex"))
}

/// Substitute `${var}` patterns in a string.
///
/// Unknown placeholders are left untouched so scripts can carry literal
/// `${...}` text that is not a declared parameter.
pub fn substitute(
    template: &str,
    params: &Params,
    defs: &HashMap<String, ParamDef>,
) -> Result<String> {
    let mut missing: Option<String> = None;

    let result = placeholder_re().replace_all(template, |caps: &regex::Captures| {
        let name = &caps[1];
        if let Some(v) = params.get(name) {
            v.to_string()
        } else if let Some(def) = defs.get(name) {
            if let Some(ref default) = def.default {
                default.clone()
            } else if def.required {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            } else {
                String::new()
            }
        } else {
            caps[0].to_string()
        }
    });

    if let Some(name) = missing {
        return Err(Error::Config(format!("missing required parameter: {}", name)));
    }
    Ok(result.into_owned())
}

/// Recursively substitute params in a YAML tree.
pub fn substitute_value(
    value: &mut serde_yaml::Value,
    params: &Params,
    defs: &HashMap<String, ParamDef>,
) -> Result<()> {
    match value {
        serde_yaml::Value::String(s) => {
            *s = substitute(s, params, defs)?;
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, v) in map.iter_mut() {
                substitute_value(v, params, defs)?;
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            for v in seq.iter_mut() {
                substitute_value(v, params, defs)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_simple() {
        let params = Params::new().set("name", "world");
        let defs = HashMap::new();
        let result = substitute("hello ${name}!", &params, &defs).unwrap();
        assert_eq!(result, "hello world!");
    }

    #[test]
    fn test_substitute_multiple() {
        let params = Params::new().set("a", "1").set("b", "2");
        let defs = HashMap::new();
        let result = substitute("${a} + ${b} = 3", &params, &defs).unwrap();
        assert_eq!(result, "1 + 2 = 3");
    }

    #[test]
    fn test_substitute_unknown_left_as_is() {
        let params = Params::new();
        let defs = HashMap::new();
        let result = substitute("echo ${not_declared}", &params, &defs).unwrap();
        assert_eq!(result, "echo ${not_declared}");
    }

    #[test]
    fn test_substitute_default() {
        let params = Params::new();
        let mut defs = HashMap::new();
        defs.insert(
            "name".to_string(),
            ParamDef {
                required: false,
                default: Some("default".to_string()),
                description: None,
            },
        );
        let result = substitute("hello ${name}", &params, &defs).unwrap();
        assert_eq!(result, "hello default");
    }

    #[test]
    fn test_substitute_required_missing() {
        let params = Params::new();
        let mut defs = HashMap::new();
        defs.insert(
            "name".to_string(),
            ParamDef {
                required: true,
                default: None,
                description: None,
            },
        );
        let result = substitute("hello ${name}", &params, &defs);
        assert!(result.is_err());
    }

    #[test]
    fn test_params_from_args() {
        let args = vec!["user=alice".to_string(), "pass=secret".to_string()];
        let params = Params::from_args(&args).unwrap();
        assert_eq!(params.get("user"), Some("alice"));
        assert_eq!(params.get("pass"), Some("secret"));
    }

    #[test]
    fn test_params_from_args_rejects_bare_key() {
        let args = vec!["user".to_string()];
        assert!(Params::from_args(&args).is_err());
    }
}

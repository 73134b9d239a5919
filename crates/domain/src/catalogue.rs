//! Constant catalogue exposed to the UI.
//!
//! The catalogue is a statically declared registry of categories, each a
//! mapping of symbolic name to string value. Values are always strings so
//! only primitives cross the bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::HostConfig;
use crate::endpoint::ServiceEndpoint;
use crate::paths::AppPaths;

/// Category name -> (symbolic name -> string value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantCatalogue(BTreeMap<String, BTreeMap<String, String>>);

impl ConstantCatalogue {
    /// Returns one category.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(name)
    }

    /// Looks up a single value.
    #[must_use]
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.0.get(category)?.get(name).map(String::as_str)
    }

    /// Iterates category names in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inputs every category is derived from.
struct Sources<'a> {
    config: &'a HostConfig,
    paths: &'a AppPaths,
    endpoint: &'a ServiceEndpoint,
}

type Entries = Vec<(&'static str, String)>;

/// Registered categories in declaration order.
const CATEGORIES: &[(&str, fn(&Sources<'_>) -> Entries)] = &[
    ("DEV_INFO", dev_info),
    ("APP_PATHS", app_paths),
    ("ACTIONS", actions),
    ("CONFIG", ui_config),
];

fn dev_info(src: &Sources<'_>) -> Entries {
    let product = &src.config.product;
    vec![
        ("APP_NAME", product.name.clone()),
        ("AUTHOR", product.author.clone()),
        ("COMPANY", product.company.clone()),
        ("APP_VERSION", product.version.clone()),
        ("ADDRESS", product.address.clone()),
        ("EMAIL", product.email.clone()),
    ]
}

fn app_paths(src: &Sources<'_>) -> Entries {
    let paths = src.paths;
    vec![
        ("USERPROFILE", paths.home.display().to_string()),
        ("RUNTIME_PATH", paths.runtime.display().to_string()),
        ("BIN", paths.bin.display().to_string()),
        ("APP_DATA", paths.app_data.display().to_string()),
        ("LOGS", paths.logs.display().to_string()),
    ]
}

fn actions(_: &Sources<'_>) -> Entries {
    Action::ALL
        .iter()
        .map(|a| (a.name(), a.as_str().to_string()))
        .collect()
}

fn ui_config(src: &Sources<'_>) -> Entries {
    vec![
        ("UI_HOST", src.endpoint.host().to_string()),
        ("UI_PORT", src.endpoint.port().to_string()),
        ("UI_URL", src.endpoint.to_string()),
    ]
}

/// Builds the catalogue from the registered categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantRegistry;

impl ConstantRegistry {
    /// Names of every registered category.
    #[must_use]
    pub fn category_names() -> Vec<&'static str> {
        CATEGORIES.iter().map(|(name, _)| *name).collect()
    }

    /// Derives the full catalogue. Pure: same inputs, same output.
    #[must_use]
    pub fn build(
        config: &HostConfig,
        paths: &AppPaths,
        endpoint: &ServiceEndpoint,
    ) -> ConstantCatalogue {
        let sources = Sources {
            config,
            paths,
            endpoint,
        };

        let map = CATEGORIES
            .iter()
            .map(|(category, entries)| {
                let values = entries(&sources)
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect();
                ((*category).to_string(), values)
            })
            .collect();

        ConstantCatalogue(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn build() -> ConstantCatalogue {
        let config = HostConfig::default();
        let paths = AppPaths::from_roots(
            Path::new("/home/ana"),
            Path::new("/data"),
            Path::new("/opt/fcut"),
            "FCut",
        );
        let endpoint = ServiceEndpoint::from_config(&config.server).expect("endpoint");
        ConstantRegistry::build(&config, &paths, &endpoint)
    }

    #[test]
    fn every_registered_category_is_present() {
        let catalogue = build();
        let mut expected = ConstantRegistry::category_names();
        expected.sort_unstable();
        assert_eq!(catalogue.categories().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn values_are_strings() {
        let catalogue = build();
        assert_eq!(catalogue.get("CONFIG", "UI_PORT"), Some("5173"));
        assert_eq!(catalogue.get("CONFIG", "UI_URL"), Some("http://127.0.0.1:5173/"));
        assert_eq!(catalogue.get("ACTIONS", "CutSilence"), Some("cutsilence"));
        assert_eq!(catalogue.get("DEV_INFO", "APP_NAME"), Some("FCut"));
        assert_eq!(catalogue.get("DEV_INFO", "EMAIL"), Some("superyngo@gmail.com"));
        assert!(
            catalogue
                .get("DEV_INFO", "ADDRESS")
                .is_some_and(|a| a.starts_with("6F.-1"))
        );
        assert_eq!(catalogue.get("APP_PATHS", "LOGS"), Some("/data/FCut/Logs"));

        let json = serde_json::to_value(&catalogue).expect("serialize");
        for category in json.as_object().expect("object").values() {
            for value in category.as_object().expect("object").values() {
                assert!(value.is_string());
            }
        }
    }

    #[test]
    fn build_is_idempotent() {
        assert_eq!(build(), build());
    }
}

//! Built-in settings

use serde_yaml::Value;

const DEFAULT_SETTINGS: &str = r"
origin:
  organization: neos
  repositories:
    flow:
      name: flow-development-collection
      packageDirectory: Packages/Framework/
      type: collection
      status: required
    neos:
      name: neos-development-collection
      packageDirectory: Packages/Neos/
      type: collection
      status: optional
contributor:
  accessToken: ''
";

/// Settings every installation starts from
pub fn default_settings() -> Value {
    serde_yaml::from_str(DEFAULT_SETTINGS).expect("built-in settings are valid YAML")
}

//! Settings fixtures.

use wbsforge_config::Settings;

/// YAML settings for the two-by-two instance, with bob capped on apollo.
pub const TWO_BY_TWO_YAML: &str = "\
employees:
  alice: null
  bob:
    apollo: [0.0, 0.5]
projects:
  apollo: 1.0
  gemini: 1.0
";

/// Parses [`TWO_BY_TWO_YAML`].
///
/// # Panics
///
/// Panics if the fixture fails to parse.
pub fn two_by_two_settings() -> Settings {
    Settings::from_yaml_str(TWO_BY_TWO_YAML).expect("fixture settings must parse")
}

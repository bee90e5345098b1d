//! Repository-level defaults read from `<root>/xake.toml`.
use serde::Deserialize;

const fn enabled() -> bool {
    true
}

/// Contents of `xake.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Defaults for `xake link`.
    pub link: LinkSettings,
    /// Defaults for `xake unlink`.
    pub unlink: UnlinkSettings,
    /// Extra blacklist patterns.
    pub filter: FilterSettings,
}

/// `[link]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LinkSettings {
    /// Remove dangling links before linking.
    #[serde(default = "enabled")]
    pub cleanup: bool,
    /// Run cookbook activation hooks.
    #[serde(default = "enabled")]
    pub activate: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            cleanup: true,
            activate: true,
        }
    }
}

/// `[unlink]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UnlinkSettings {
    /// Remove dangling links before unlinking.
    #[serde(default = "enabled")]
    pub cleanup: bool,
    /// Run cookbook deactivation hooks.
    #[serde(default = "enabled")]
    pub deactivate: bool,
}

impl Default for UnlinkSettings {
    fn default() -> Self {
        Self {
            cleanup: true,
            deactivate: true,
        }
    }
}

/// `[filter]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    /// Glob patterns matched against file names, added to the built-in list.
    pub ignore: Vec<String>,
}

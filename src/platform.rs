use std::fmt;

/// Identity that selects which `static/<identity>/` tree is layered over
/// `static/default/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Linux,
    Darwin,
    /// Fallback for every other system; only `static/default/` is used.
    Default,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Identity {
    /// Detect the identity of the running system.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Default
        }
    }

    /// Directory name under `static/`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Default => "default",
        }
    }

    #[must_use]
    pub fn is_linux(self) -> bool {
        self == Self::Linux
    }

    #[must_use]
    pub fn is_darwin(self) -> bool {
        self == Self::Darwin
    }

    /// Identities whose trees are consulted, most specific first.
    ///
    /// `default` is always last and never repeated.
    #[must_use]
    pub fn layers(self) -> Vec<Self> {
        match self {
            Self::Default => vec![Self::Default],
            other => vec![other, Self::Default],
        }
    }
}

//! Command: print version information.

/// Build version: `XAKE_VERSION` from the build script, else the crate version.
pub const VERSION: &str = match option_env!("XAKE_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Print the xake version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("xake {VERSION}");
}

// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("SYNCODE_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// `syncode <version>` as printed by the version command
pub fn long_version() -> String {
    format!("{} {}", PKG_NAME, VERSION)
}

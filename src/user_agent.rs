//! User-Agent header sent by the REST transport.
//!
//! Agents log the User-Agent of API callers, which helps operators tell
//! this client apart from the CLI and other SDKs.

use std::sync::OnceLock;

/// Client name used in the User-Agent string.
const CLIENT_NAME: &str = "consul-acl-rust";

/// Client version from Cargo.toml.
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string.
///
/// Format: `consul-acl-rust/0.1.0 (rust/1.92; linux/x86_64)`
///
/// Computed once and cached.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            CLIENT_NAME,
            CLIENT_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("consul-acl-rust/"));
        assert!(ua.contains("(rust/"));
        assert!(ua.contains(std::env::consts::ARCH));
        assert!(ua.ends_with(')'));
    }

    #[test]
    fn test_user_agent_cached() {
        assert!(std::ptr::eq(user_agent(), user_agent()));
    }
}

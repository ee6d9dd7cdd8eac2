//! Integration tests for the Consul ACL client.
//!
//! These tests run against a live agent with ACLs enabled and bootstrapped.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a dev agent with ACLs enabled and a known management token
//! consul agent -dev -hcl 'acl { enabled = true, default_policy = "deny", tokens { initial_management = "root" } }'
//!
//! # Run integration tests
//! cargo test --features integration-tests --test integration
//!
//! # Run with verbose output
//! cargo test --features integration-tests --test integration -- --nocapture
//! ```
//!
//! # Environment Variables
//!
//! - `CONSUL_HTTP_ADDR`: Agent address (default: `127.0.0.1:8500`)
//! - `CONSUL_HTTP_TOKEN`: Management token (default: `root`)
//! - `K8S_HOST`, `K8S_CA_CERT_FILE`, `K8S_REVIEWER_JWT`, `K8S_LOGIN_JWT`:
//!   enable the identity provider and login scenarios

mod binding_rule_tests;
mod common;
mod identity_provider_tests;
mod login_tests;
mod policy_tests;
mod role_tests;
mod token_tests;

//! kleenref: clean up pasted bibliographic references.
//!
//! This library provides functionality to:
//! - Normalize whitespace and punctuation in reference lines
//! - Count references and enforce the free-tier line ceiling
//! - Load settings from an optional TOML configuration file
//! - Render cleaned references as text or JSON

pub mod clean;
pub mod config;
pub mod output;
pub mod quota;

pub use clean::{count_references, normalize, normalize_block, reference_lines};
pub use config::{load_config, resolve_config, Config};
pub use output::{render, OutputFormat};
pub use quota::{check_input, Entitlement, FreeTier, QuotaError};

/// Messy sample references for trying the tool.
pub const SAMPLE_REFERENCES: &str = "\
Chugh, R.,  &  Ruhi, U.  (2019)  .  Social media in higher education , a literature review
Portman, M.E ,Smith, J. &   Jones, K.2025  .  Impact of science communication on youth .London: Sage";

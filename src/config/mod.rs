//! Configuration: types, default paths, XML loading.
//! Re-exports keep the public surface flat for the binary and tests.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{
    default_config_path, default_log_path, default_outcome_log_path, path_has_symlink_ancestor,
};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml};

/// Editor used when neither config nor $EDITOR says otherwise.
pub const FALLBACK_EDITOR: &str = "vi";

//! Source resolution for tool-call documents

pub mod resolver;

pub use resolver::{
    is_within_resource_dirs, resolve_base64, resolve_path, validate_path_access,
    BASE64_DEFAULT_NAME,
};

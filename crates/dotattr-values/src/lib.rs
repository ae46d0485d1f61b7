//! Typed attribute value engine for DOT documents.
//!
//! This crate implements the per-grammar parsers, the color scheme registry,
//! semantic validators, canonical serializers, the attribute registry with
//! its get/set facade, and the document validation pass.
//!
//! # Example
//! ```
//! use dotattr_dot::NodeDef;
//! use dotattr_values::{get, get_parsed, set, ParsedValue};
//!
//! let mut node = NodeDef::new("a");
//! set(&mut node, "height", "1.5").unwrap();
//! assert_eq!(get(&node, "height"), Some("1.5"));
//! assert_eq!(get_parsed(&node, "height"), Some(ParsedValue::Double(1.5)));
//! assert!(set(&mut node, "height", "0.01").is_err());
//! ```

pub mod accessor;
pub mod colorscheme;
pub mod config;
pub mod context;
pub mod grammar;
pub mod registry;
pub mod serialize;
pub mod validation;
pub mod validators;
pub mod value;

pub use accessor::{get, get_parsed, get_raw, set, set_in_context, set_parsed, unset, AttributeHolder};
pub use colorscheme::{scheme, scheme_names, ColorScheme, Palette, DEFAULT_SCHEME};
pub use config::ValidationConfig;
pub use context::ResolutionContext;
pub use grammar::{Grammar, SyntaxError};
pub use registry::{descriptor, descriptors, descriptors_for, AttributeDescriptor};
pub use serialize::serialize;
pub use validation::{validate, validate_or_raise, validate_with_config, Diagnostic, LintRule, Severity};
pub use validators::{Finding, Limit, Validator};
pub use value::ParsedValue;

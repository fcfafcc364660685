//! fieldcheck - field-oriented data validation with named rules, layered
//! messages and short-circuit control.
//!
//! A [`Field`] pairs a name and a dynamically-typed value
//! (`serde_json::Value`) with an ordered list of rules; a [`Fields`]
//! collection keeps fields in insertion order and validates them as a
//! batch. Rules are addressed by name and resolved through a
//! [`RuleRegistry`]: built-in method rules (`"email"`), constructible
//! class rules (`"numeric"` with bounds), derived aliases (`"integer"`),
//! or caller-registered custom rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldcheck::prelude::*;
//! use serde_json::json;
//!
//! let mut fields = Fields::new();
//! fields.add_field(Field::with_value("email", json!("a@b.com"))
//!     .rule("required")
//!     .rule("email"));
//! fields.add_field(Field::with_value("age", json!(30))
//!     .rule(("numeric", [json!(18), json!(99)])));
//!
//! let report = ValidationEngine::default().validate(&mut fields, false)?;
//! assert!(report.passed);
//! # Ok::<(), fieldcheck::EngineError>(())
//! ```

pub mod context;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod field;
pub mod registry;
pub mod rules;
pub mod validators;

mod value_ext;

// Re-export the working surface
pub use context::ValidationContext;
pub use descriptor::{Params, RuleDescriptor};
pub use engine::{InvalidField, ValidationEngine, ValidationReport};
pub use error::{BoxError, EngineError, EngineResult};
pub use field::{Field, Fields, MessageOverride};
pub use registry::RuleRegistry;
pub use rules::{Outcome, Rule, Severity, Violation};

/// Everything needed to define fields, attach rules and run a pass.
pub mod prelude {
    pub use crate::context::ValidationContext;
    pub use crate::descriptor::{Params, RuleDescriptor};
    pub use crate::engine::{ValidationEngine, ValidationReport};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::field::{Field, Fields, MessageOverride};
    pub use crate::registry::{names, RuleRegistry};
    pub use crate::rules::{Outcome, Rule, Severity, Violation};
    pub use crate::validators::{UniqueHandler, DataKind};
}

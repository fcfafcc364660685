//! Built-in rule implementations.
//!
//! Two families live here:
//!
//! - **Method rules** (`basic`, `patterns`, `sets`, `isbn`): plain routines
//!   the engine dispatches by name, framing their message with the field
//!   name (`"{name} should be a valid email id"`).
//! - **Class rules** (`numeric`, `length`, `date`, `data_type`, `unique`,
//!   `confirmation`): constructible rule objects carrying a
//!   [`MessageSet`](crate::rules::MessageSet) with variant-specific
//!   default messages.

pub mod basic;
pub mod confirmation;
pub mod data_type;
pub mod date;
pub mod isbn;
pub mod length;
pub mod numeric;
pub mod patterns;
pub mod sets;
pub mod unique;

pub use confirmation::Confirmation;
pub use data_type::{DataKind, DataType};
pub use date::Date;
pub use length::Length;
pub use numeric::Numeric;
pub use unique::{Unique, UniqueHandler};

use crate::field::Field;
use crate::rules::Violation;

/// Frames a method-rule message with the field name parameter.
pub(crate) fn named_violation(field: &Field, template: &str) -> Violation {
    Violation::new(template).with_param("name", field.name())
}

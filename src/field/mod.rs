//! The field/value data model: a named value with rules, message overrides
//! and computed validity, plus the ordered collection of such fields.

mod field;
mod fields;

pub use field::{Field, MessageOverride};
pub use fields::Fields;

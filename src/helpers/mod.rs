//! Small shared helpers.
pub(crate) mod string;

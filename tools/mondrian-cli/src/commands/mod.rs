pub mod probe;
pub mod replay;
pub mod validate;

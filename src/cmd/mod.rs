pub mod autofill;
pub mod batch;
pub mod calculate;
pub mod sweep;
pub mod validate;

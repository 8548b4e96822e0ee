mod runtime_error;

pub use runtime_error::RuntimeError;

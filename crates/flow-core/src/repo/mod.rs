mod types;

pub use types::{build_sequence_definition, InMemorySequenceRepository, SequenceDefinition, SequenceRepository};

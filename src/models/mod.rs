pub mod envelope;
pub mod lookup;

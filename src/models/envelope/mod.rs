pub mod envelope;


pub use envelope::{ErrorEnvelope, ProxyResponse};

//! Response types: raw transport responses and normalized envelopes

mod envelope;
mod transport;

pub use envelope::{EnvelopeStatus, ResponseEnvelope};
pub use transport::TransportResponse;

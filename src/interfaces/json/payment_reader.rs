use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::Read;

/// Reads a payment record from a JSON source.
pub struct PaymentReader<R: Read> {
    source: R,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Payment> {
        Ok(serde_json::from_reader(self.source)?)
    }
}

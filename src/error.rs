use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Capacity exhaustion is the only failure the pipeline can report: a
/// rejected operation enqueues nothing, so the queue and the register
/// mirror stay consistent and the caller may simply retry after `poll`
/// has drained some transactions.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[display("transaction queue is full")]
    QueueFull,
}

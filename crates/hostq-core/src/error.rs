use hostq_transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required handle or argument was missing or malformed.
    #[error("invalid argument")]
    InvalidArgument,

    /// Allocation failed while growing a record store. The store keeps its
    /// previous contents and count.
    #[error("out of memory")]
    OutOfMemory,

    /// Driver or transport failure, propagated uninterpreted.
    #[error(transparent)]
    Driver(#[from] TransportError),
}

use hostq_protocol::SubmitCmdbuf;

use crate::error::CoreError;

/// Contract to the external command-stream builder: one segment of a mapped
/// command buffer being written by the host.
///
/// A job owns its segments and at most one of them is open (accepting
/// writes) at a time. `queue` flattens the written range into
/// command-buffer descriptors for the owning job to record; afterwards the
/// segment has no pending bytes. With `force_new_cmdbuf` the builder must
/// start a fresh descriptor for subsequent writes even if the current one
/// has room left -- required when the hardware class changes mid-stream so
/// later commands are tagged with the new class.
pub trait CommandStream {
    /// True if the write cursor has advanced past the segment start since
    /// the last queue.
    fn has_pending(&self) -> bool;

    /// Hand the written range back as command-buffer descriptors. Queueing
    /// an empty segment yields no descriptors and is not an error.
    fn queue(&mut self, force_new_cmdbuf: bool) -> Result<Vec<SubmitCmdbuf>, CoreError>;
}

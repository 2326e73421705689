use bytemuck::bytes_of_mut;
use tracing::debug;

use hostq_protocol::{op, GetExclusiveSyncptArgs, PutExclusiveSyncptArgs, SyncptFlags};
use hostq_transport::DeviceHandle;

use crate::channel::Channel;
use crate::error::CoreError;

/// A syncpoint held exclusively by one channel context, acquired and
/// returned through dedicated driver round trips. Jobs normally use the
/// channel's own syncpoint; exclusive syncpoints serve engines that need a
/// counter no other context touches.
pub struct Syncpoint {
    id: u32,
    value: u32,
    index: u32,
    context: u64,
    device: DeviceHandle,
}

impl Syncpoint {
    /// Acquire an exclusive syncpoint for the channel's context, optionally
    /// reserving a wait base alongside it. Single round trip, no retry.
    pub fn acquire_exclusive(channel: &Channel, with_base: bool) -> Result<Self, CoreError> {
        let mut args = GetExclusiveSyncptArgs {
            context: channel.context(),
            ..Default::default()
        };

        if with_base {
            args.flags |= SyncptFlags::WITH_BASE.bits();
        }

        channel
            .device()
            .write_read(op::GET_EXCLUSIVE_SYNCPT, bytes_of_mut(&mut args))?;

        debug!(
            id = args.id,
            value = args.value,
            index = args.index,
            "acquired exclusive syncpoint"
        );

        Ok(Self {
            id: args.id,
            value: args.value,
            index: args.index,
            context: channel.context(),
            device: channel.device_handle(),
        })
    }

    /// Return the syncpoint to the driver. Consumes the handle; the id is
    /// free for other contexts afterwards.
    pub fn release(self) -> Result<(), CoreError> {
        let mut args = PutExclusiveSyncptArgs {
            context: self.context,
            index: self.index,
            pad: 0,
        };

        self.device
            .write_read(op::PUT_EXCLUSIVE_SYNCPT, bytes_of_mut(&mut args))?;

        debug!(id = self.id, index = self.index, "released exclusive syncpoint");

        Ok(())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Counter value at acquisition time.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Driver-side slot index, needed to release the syncpoint.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Debug for Syncpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Syncpoint")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("index", &self.index)
            .field("context", &self.context)
            .finish()
    }
}

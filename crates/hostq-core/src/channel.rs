use hostq_transport::{DeviceHandle, DriverTransport};

/// An open channel to a hardware engine, carrying the driver context id and
/// the syncpoint the engine increments. Opening and closing channels is the
/// device layer's business; jobs only borrow one for their lifetime.
#[derive(Clone)]
pub struct Channel {
    device: DeviceHandle,
    context: u64,
    syncpt: u32,
}

impl Channel {
    pub fn new(device: DeviceHandle, context: u64, syncpt: u32) -> Self {
        Self {
            device,
            context,
            syncpt,
        }
    }

    pub fn context(&self) -> u64 {
        self.context
    }

    pub fn syncpt(&self) -> u32 {
        self.syncpt
    }

    pub fn device(&self) -> &dyn DriverTransport {
        self.device.as_ref()
    }

    /// Clone the shared transport handle, e.g. for a fence that outlives
    /// the job it came from.
    pub fn device_handle(&self) -> DeviceHandle {
        self.device.clone()
    }
}

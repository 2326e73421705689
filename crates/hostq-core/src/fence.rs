use hostq_transport::DeviceHandle;

/// A target value on a hardware syncpoint, produced by a successful
/// submission. The GPU reaches the value when the job's last increment
/// retires. Fences are independent of the job that produced them.
#[derive(Clone)]
pub struct Fence {
    syncpt: u32,
    value: u32,
    device: DeviceHandle,
}

impl Fence {
    pub(crate) fn new(syncpt: u32, value: u32, device: DeviceHandle) -> Self {
        Self {
            syncpt,
            value,
            device,
        }
    }

    pub fn syncpt(&self) -> u32 {
        self.syncpt
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn device_handle(&self) -> DeviceHandle {
        self.device.clone()
    }
}

impl std::fmt::Debug for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fence")
            .field("syncpt", &self.syncpt)
            .field("value", &self.value)
            .finish()
    }
}

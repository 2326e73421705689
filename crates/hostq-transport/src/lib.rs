pub mod device;
pub mod error;

#[cfg(unix)]
pub use device::DrmDevice;
pub use device::{DeviceHandle, DriverTransport};
pub use error::TransportError;

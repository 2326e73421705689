use std::sync::Arc;

use crate::error::TransportError;

/// Synchronous request/response seam to the kernel driver. One call is one
/// driver command round trip; `args` serves as both the request and the
/// response buffer.
///
/// Implemented by [`DrmDevice`] for real hardware and by test doubles.
pub trait DriverTransport: Send + Sync {
    fn write_read(&self, cmd: u32, args: &mut [u8]) -> Result<(), TransportError>;
}

/// Shared handle to a driver transport. Fences keep one of these so they
/// remain valid after the job that produced them is gone.
pub type DeviceHandle = Arc<dyn DriverTransport>;

const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;
const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;

const DRM_IOCTL_BASE: u32 = b'd' as u32;
const DRM_COMMAND_BASE: u32 = 0x40;

/// Encode `_IOWR('d', DRM_COMMAND_BASE + cmd, size)`.
fn request_code(cmd: u32, size: usize) -> u32 {
    ((IOC_READ | IOC_WRITE) << IOC_DIRSHIFT)
        | (DRM_IOCTL_BASE << IOC_TYPESHIFT)
        | ((DRM_COMMAND_BASE + cmd) << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)
}

/// An open DRM device node.
#[cfg(unix)]
#[derive(Debug)]
pub struct DrmDevice {
    file: std::fs::File,
    path: std::path::PathBuf,
}

#[cfg(unix)]
impl DrmDevice {
    /// Open a DRM device node for driver commands.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, TransportError> {
        let path = path.into();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "opened DRM device");

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(unix)]
impl DriverTransport for DrmDevice {
    fn write_read(&self, cmd: u32, args: &mut [u8]) -> Result<(), TransportError> {
        use std::os::fd::AsRawFd;

        let code = request_code(cmd, args.len());

        loop {
            // SAFETY: `args` is a live writable buffer of exactly the length
            // encoded into the request code, and the fd is owned by `self`.
            let ret = unsafe {
                libc::ioctl(
                    self.file.as_raw_fd(),
                    code as libc::c_ulong,
                    args.as_mut_ptr(),
                )
            };
            if ret == 0 {
                return Ok(());
            }

            let errno = std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(libc::EIO);

            // Restart interrupted commands, like drmIoctl().
            if errno == libc::EINTR || errno == libc::EAGAIN {
                continue;
            }

            return Err(TransportError::Driver(-errno));
        }
    }
}

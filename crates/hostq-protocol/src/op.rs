//! Driver command numbers, offsets from the DRM command base.
//! The transport layer owns the full ioctl encoding; these are the
//! per-driver numbers the kernel dispatches on.

pub const SUBMIT: u32 = 0x08;
pub const GET_EXCLUSIVE_SYNCPT: u32 = 0x0f;
pub const PUT_EXCLUSIVE_SYNCPT: u32 = 0x10;

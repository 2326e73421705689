use bytemuck::{Pod, Zeroable};

bitflags::bitflags! {
    /// Flags for exclusive syncpoint acquisition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyncptFlags: u32 {
        /// Also reserve a wait base for the syncpoint.
        const WITH_BASE = 1 << 0;
    }
}

/// Acquire an exclusive syncpoint for a channel context.
/// `id`, `value` and `index` are written back by the kernel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GetExclusiveSyncptArgs {
    pub context: u64,
    pub flags: u32,
    pub id: u32,
    pub value: u32,
    pub index: u32,
}

/// Return an exclusive syncpoint previously acquired for a context.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PutExclusiveSyncptArgs {
    pub context: u64,
    pub index: u32,
    pub pad: u32,
}

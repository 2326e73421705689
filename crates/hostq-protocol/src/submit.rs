use bytemuck::{Pod, Zeroable};

bitflags::bitflags! {
    /// Usage flags for a buffer object referenced by a submission.
    /// Flags accumulate: a BO referenced both as a command buffer and as a
    /// written data buffer carries both bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SubmitBoFlags: u32 {
        /// Kernel may treat the BO as written (madvise hint).
        const WRITE_MADV = 1 << 0;
        /// BO holds command words and goes through the stream validator.
        const IS_CMDBUF  = 1 << 1;
    }
}

/// One syncpoint descriptor of a submission: the counter the job increments
/// and how many increments the command stream performs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SubmitSyncpt {
    pub id: u32,
    pub incrs: u32,
}

/// Buffer-object table entry. The position of an entry in the table is the
/// index other records use to refer to it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SubmitBo {
    pub handle: u32,
    pub flags: u32,
}

/// Command-buffer descriptor: a word range inside a BO from the table.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SubmitCmdbuf {
    /// Index into the submission's BO table.
    pub index: u32,
    /// Byte offset of the first command word.
    pub offset: u32,
    /// Number of command words.
    pub words: u32,
    pub pad: u32,
}

/// Relocation: patch an address slot inside a command buffer with the
/// runtime location of a target BO.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SubmitReloc {
    /// BO table index of the command buffer being patched.
    pub cmdbuf_index: u32,
    /// Byte offset of the address slot within the command buffer.
    pub cmdbuf_offset: u32,
    /// BO table index of the relocation target.
    pub target_index: u32,
    /// Byte offset added to the target's base address.
    pub target_offset: u32,
    /// Right-shift applied to the patched address.
    pub shift: u32,
    pub pad: u32,
}

/// Wait-check: the kernel validates or inserts a syncpoint wait at the
/// given stream position before execution.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SubmitWaitchk {
    /// BO table index of the command buffer containing the wait.
    pub index: u32,
    /// Byte offset of the wait instruction.
    pub offset: u32,
    pub syncpt: u32,
    pub thresh: u32,
}

/// Submission request. Array fields carry userspace addresses of the
/// parallel record arrays; a zero count carries a null address. The kernel
/// writes the fence value of the job's syncpoint into `fence`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct SubmitArgs {
    pub context: u64,
    pub num_syncpts: u32,
    pub num_bos: u32,
    pub num_cmdbufs: u32,
    pub num_relocs: u32,
    pub num_waitchks: u32,
    /// Job timeout, in driver-defined units.
    pub timeout: u32,
    pub syncpts: u64,
    pub bos: u64,
    pub cmdbufs: u64,
    pub relocs: u64,
    pub waitchks: u64,
    /// Out: fence value on the job's syncpoint.
    pub fence: u32,
    pub pad: u32,
}

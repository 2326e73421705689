use bytemuck::bytes_of_mut;
use tracing::debug;

use hostq_protocol::{
    op, SubmitArgs, SubmitBo, SubmitBoFlags, SubmitCmdbuf, SubmitReloc, SubmitSyncpt,
    SubmitWaitchk,
};

use crate::channel::Channel;
use crate::error::CoreError;
use crate::fence::Fence;
use crate::store::RecordStore;
use crate::stream::CommandStream;

/// Kernel-side job timeout, in driver-defined units.
const SUBMIT_TIMEOUT: u32 = 1000;

/// A unit of GPU work under construction: command buffers, buffer-object
/// references, relocations and wait-checks, fenced by one syncpoint.
///
/// A job is built and submitted by a single owner. There is no internal
/// locking; callers that share a job across threads must serialize access
/// themselves.
pub struct Job<'a, S: CommandStream> {
    channel: &'a Channel,
    syncpt: u32,
    increments: u32,
    current_class: u32,
    waitchks: RecordStore<SubmitWaitchk>,
    relocs: RecordStore<SubmitReloc>,
    cmdbufs: RecordStore<SubmitCmdbuf>,
    bos: RecordStore<SubmitBo>,
    streams: Vec<S>,
    /// Index into `streams` of the segment currently accepting writes.
    open: Option<usize>,
}

impl<'a, S: CommandStream> Job<'a, S> {
    /// Create an empty job fenced by the channel's syncpoint.
    pub fn new(channel: &'a Channel) -> Self {
        Self {
            channel,
            syncpt: channel.syncpt(),
            increments: 0,
            current_class: 0,
            waitchks: RecordStore::new(),
            relocs: RecordStore::new(),
            cmdbufs: RecordStore::new(),
            bos: RecordStore::new(),
            streams: Vec::new(),
            open: None,
        }
    }

    pub fn syncpt(&self) -> u32 {
        self.syncpt
    }

    pub fn current_class(&self) -> u32 {
        self.current_class
    }

    pub fn increments(&self) -> u32 {
        self.increments
    }

    /// Account syncpoint increments emitted into the command stream. The
    /// accumulated total is reported to the kernel with the submission.
    pub fn add_increments(&mut self, incrs: u32) {
        self.increments += incrs;
    }

    pub fn add_waitchk(&mut self, waitchk: SubmitWaitchk) -> Result<usize, CoreError> {
        self.waitchks.append(waitchk)
    }

    pub fn add_reloc(&mut self, reloc: SubmitReloc) -> Result<usize, CoreError> {
        self.relocs.append(reloc)
    }

    pub fn add_cmdbuf(&mut self, cmdbuf: SubmitCmdbuf) -> Result<usize, CoreError> {
        self.cmdbufs.append(cmdbuf)
    }

    /// Reference a buffer object from this job, returning its position in
    /// the BO table. Records that point at a BO do so by this index, so it
    /// must be obtained before recording them.
    ///
    /// Duplicates are squashed: re-adding a handle ORs the new usage flags
    /// into the existing entry and returns its original index. Callers must
    /// use the returned index, not the call order.
    pub fn add_bo(&mut self, handle: u32, cmdbuf: bool, write: bool) -> Result<usize, CoreError> {
        let mut flags = SubmitBoFlags::empty();

        if write {
            flags |= SubmitBoFlags::WRITE_MADV;
        }

        if cmdbuf {
            flags |= SubmitBoFlags::IS_CMDBUF;
        }

        for (index, bo) in self.bos.iter_mut().enumerate() {
            if bo.handle == handle {
                bo.flags |= flags.bits();
                return Ok(index);
            }
        }

        self.bos.append(SubmitBo {
            handle,
            flags: flags.bits(),
        })
    }

    /// Attach a command-stream segment and make it the job's write target.
    /// A previously open segment is queued first; the job owns every
    /// segment ever attached until it is dropped.
    pub fn begin_stream(&mut self, stream: S) -> Result<&mut S, CoreError> {
        self.queue_open(false)?;
        self.open = None;

        self.streams.push(stream);
        let index = self.streams.len() - 1;
        self.open = Some(index);

        Ok(&mut self.streams[index])
    }

    /// The segment currently accepting writes, if any.
    pub fn open_stream_mut(&mut self) -> Option<&mut S> {
        self.open.map(|index| &mut self.streams[index])
    }

    pub fn has_open_stream(&self) -> bool {
        self.open.is_some()
    }

    /// Switch the hardware class subsequent commands are tagged with. A
    /// dirty open segment is queued with a forced descriptor boundary so
    /// earlier commands keep their class; the segment stays open and an
    /// untouched one costs no driver traffic.
    pub fn set_class(&mut self, class_id: u32) -> Result<(), CoreError> {
        if let Some(index) = self.open {
            if self.streams[index].has_pending() {
                self.queue_segment(index, true)?;
            }
        }

        self.current_class = class_id;

        Ok(())
    }

    /// Queue the open segment and hand the job to the kernel as one atomic
    /// request. On success the returned fence carries the syncpoint value
    /// the job signals at completion.
    ///
    /// Record stores are not cleared by a submission, successful or not: a
    /// failed submit loses nothing, and a repeated submit without clearing
    /// resends the accumulated records. If queueing the open segment fails
    /// the segment stays open and nothing is sent.
    pub fn submit(&mut self) -> Result<Fence, CoreError> {
        self.queue_open(false)?;
        self.open = None;

        let syncpts = [SubmitSyncpt {
            id: self.syncpt,
            incrs: self.increments,
        }];

        let mut args = SubmitArgs {
            context: self.channel.context(),
            num_syncpts: syncpts.len() as u32,
            num_bos: self.bos.len() as u32,
            num_cmdbufs: self.cmdbufs.len() as u32,
            num_relocs: self.relocs.len() as u32,
            num_waitchks: self.waitchks.len() as u32,
            timeout: SUBMIT_TIMEOUT,
            syncpts: array_addr(&syncpts),
            bos: array_addr(self.bos.as_slice()),
            cmdbufs: array_addr(self.cmdbufs.as_slice()),
            relocs: array_addr(self.relocs.as_slice()),
            waitchks: array_addr(self.waitchks.as_slice()),
            fence: 0,
            pad: 0,
        };

        debug!(
            context = args.context,
            bos = args.num_bos,
            cmdbufs = args.num_cmdbufs,
            relocs = args.num_relocs,
            waitchks = args.num_waitchks,
            incrs = self.increments,
            "submitting job"
        );

        self.channel
            .device()
            .write_read(op::SUBMIT, bytes_of_mut(&mut args))?;

        Ok(Fence::new(
            self.syncpt,
            args.fence,
            self.channel.device_handle(),
        ))
    }

    pub fn num_waitchks(&self) -> usize {
        self.waitchks.len()
    }

    pub fn num_relocs(&self) -> usize {
        self.relocs.len()
    }

    pub fn num_cmdbufs(&self) -> usize {
        self.cmdbufs.len()
    }

    pub fn num_bos(&self) -> usize {
        self.bos.len()
    }

    pub fn bos(&self) -> &[SubmitBo] {
        self.bos.as_slice()
    }

    pub fn cmdbufs(&self) -> &[SubmitCmdbuf] {
        self.cmdbufs.as_slice()
    }

    fn queue_segment(&mut self, index: usize, force_new_cmdbuf: bool) -> Result<(), CoreError> {
        let descriptors = self.streams[index].queue(force_new_cmdbuf)?;

        for cmdbuf in descriptors {
            self.cmdbufs.append(cmdbuf)?;
        }

        Ok(())
    }

    fn queue_open(&mut self, force_new_cmdbuf: bool) -> Result<(), CoreError> {
        match self.open {
            Some(index) => self.queue_segment(index, force_new_cmdbuf),
            None => Ok(()),
        }
    }
}

/// Userspace address of a record array, as the kernel expects it. A zero
/// count carries a null address.
fn array_addr<T>(records: &[T]) -> u64 {
    if records.is_empty() {
        0
    } else {
        records.as_ptr() as usize as u64
    }
}

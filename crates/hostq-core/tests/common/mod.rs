#![allow(dead_code)]

//! Test doubles shared by the integration tests: a recording driver
//! transport and a scripted command-stream segment.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hostq_core::{Channel, CommandStream, CoreError};
use hostq_protocol::{
    op, GetExclusiveSyncptArgs, PutExclusiveSyncptArgs, SubmitArgs, SubmitBo, SubmitCmdbuf,
    SubmitSyncpt,
};
use hostq_transport::{DeviceHandle, DriverTransport, TransportError};

/// What a submit request looked like by the time it reached the "kernel".
#[derive(Debug, Clone)]
pub struct SubmitSnapshot {
    pub context: u64,
    pub timeout: u32,
    pub syncpts: Vec<SubmitSyncpt>,
    pub bos: Vec<SubmitBo>,
    pub cmdbufs: Vec<SubmitCmdbuf>,
    pub num_relocs: u32,
    pub num_waitchks: u32,
}

#[derive(Default)]
pub struct MockDevice {
    /// Opcode of every command received, in order.
    pub calls: Mutex<Vec<u32>>,
    pub submits: Mutex<Vec<SubmitSnapshot>>,
    pub gets: Mutex<Vec<GetExclusiveSyncptArgs>>,
    pub puts: Mutex<Vec<PutExclusiveSyncptArgs>>,
    /// Fence value written back by the next submit.
    pub fence_value: u32,
    /// Reply for GET_EXCLUSIVE_SYNCPT: (id, value, index).
    pub syncpt_reply: (u32, u32, u32),
    /// Fail every command with this errno.
    pub fail_errno: Option<i32>,
}

impl MockDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_fence(value: u32) -> Arc<Self> {
        Arc::new(Self {
            fence_value: value,
            ..Self::default()
        })
    }

    pub fn with_syncpt(id: u32, value: u32, index: u32) -> Arc<Self> {
        Arc::new(Self {
            syncpt_reply: (id, value, index),
            ..Self::default()
        })
    }

    pub fn failing(errno: i32) -> Arc<Self> {
        Arc::new(Self {
            fail_errno: Some(errno),
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl DriverTransport for MockDevice {
    fn write_read(&self, cmd: u32, args: &mut [u8]) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(cmd);

        if let Some(errno) = self.fail_errno {
            return Err(TransportError::Driver(-errno));
        }

        match cmd {
            op::SUBMIT => {
                let args: &mut SubmitArgs = bytemuck::from_bytes_mut(args);
                let snapshot = SubmitSnapshot {
                    context: args.context,
                    timeout: args.timeout,
                    syncpts: read_array(args.syncpts, args.num_syncpts),
                    bos: read_array(args.bos, args.num_bos),
                    cmdbufs: read_array(args.cmdbufs, args.num_cmdbufs),
                    num_relocs: args.num_relocs,
                    num_waitchks: args.num_waitchks,
                };
                self.submits.lock().unwrap().push(snapshot);
                args.fence = self.fence_value;
                Ok(())
            }
            op::GET_EXCLUSIVE_SYNCPT => {
                let args: &mut GetExclusiveSyncptArgs = bytemuck::from_bytes_mut(args);
                self.gets.lock().unwrap().push(*args);
                let (id, value, index) = self.syncpt_reply;
                args.id = id;
                args.value = value;
                args.index = index;
                Ok(())
            }
            op::PUT_EXCLUSIVE_SYNCPT => {
                let args: &PutExclusiveSyncptArgs = bytemuck::from_bytes(args);
                self.puts.lock().unwrap().push(*args);
                Ok(())
            }
            // unknown driver command
            _ => Err(TransportError::Driver(-25)),
        }
    }
}

/// Read a userspace record array out of a request the way the kernel would.
fn read_array<T: bytemuck::Pod>(addr: u64, count: u32) -> Vec<T> {
    if count == 0 {
        assert_eq!(addr, 0, "zero count must carry a null address");
        return Vec::new();
    }
    // SAFETY: the address points at a live array owned by the job for the
    // duration of the write_read call.
    unsafe { std::slice::from_raw_parts(addr as usize as *const T, count as usize).to_vec() }
}

pub fn make_channel(device: &Arc<MockDevice>, context: u64, syncpt: u32) -> Channel {
    let handle: DeviceHandle = device.clone();
    Channel::new(handle, context, syncpt)
}

/// Scripted command-stream segment. `pending_words` models the write
/// cursor; queueing drains it into a single descriptor.
pub struct FakeStream {
    pub bo_index: u32,
    pub offset: u32,
    pub pending_words: u32,
    /// Make the next queue call fail.
    pub fail_queue: bool,
    queue_log: Arc<Mutex<Vec<bool>>>,
    drops: Arc<AtomicUsize>,
}

impl FakeStream {
    pub fn new(bo_index: u32) -> Self {
        Self {
            bo_index,
            offset: 0,
            pending_words: 0,
            fail_queue: false,
            queue_log: Arc::default(),
            drops: Arc::default(),
        }
    }

    /// Advance the write cursor without going through a real pushbuf.
    pub fn write_words(&mut self, words: u32) {
        self.pending_words += words;
    }

    /// Handle onto the log of `force_new_cmdbuf` values seen by queue,
    /// usable after the segment moved into a job.
    pub fn queue_log(&self) -> Arc<Mutex<Vec<bool>>> {
        self.queue_log.clone()
    }

    pub fn drop_counter(&self) -> Arc<AtomicUsize> {
        self.drops.clone()
    }
}

impl CommandStream for FakeStream {
    fn has_pending(&self) -> bool {
        self.pending_words > 0
    }

    fn queue(&mut self, force_new_cmdbuf: bool) -> Result<Vec<SubmitCmdbuf>, CoreError> {
        self.queue_log.lock().unwrap().push(force_new_cmdbuf);

        if self.fail_queue {
            return Err(CoreError::OutOfMemory);
        }

        if self.pending_words == 0 {
            return Ok(Vec::new());
        }

        let descriptor = SubmitCmdbuf {
            index: self.bo_index,
            offset: self.offset,
            words: self.pending_words,
            pad: 0,
        };

        self.offset += self.pending_words * 4;
        self.pending_words = 0;

        Ok(vec![descriptor])
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

pub mod op;
pub mod submit;
pub mod syncpt;

pub use submit::{
    SubmitArgs, SubmitBo, SubmitBoFlags, SubmitCmdbuf, SubmitReloc, SubmitSyncpt, SubmitWaitchk,
};
pub use syncpt::{GetExclusiveSyncptArgs, PutExclusiveSyncptArgs, SyncptFlags};

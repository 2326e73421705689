pub mod channel;
pub mod config;
pub mod error;
pub mod fence;
pub mod job;
pub mod store;
pub mod stream;
pub mod syncpt;

pub use channel::Channel;
pub use error::CoreError;
pub use fence::Fence;
pub use job::Job;
pub use stream::CommandStream;
pub use syncpt::Syncpoint;

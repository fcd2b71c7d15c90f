pub mod coordinator;
pub mod message;
pub mod task;
pub mod transport;
pub mod worker;

pub use coordinator::{Coordinator, Frontend, Outcome, Phase};
pub use message::{Envelope, Message, Rank, Tag, COORDINATOR};
pub use task::{create_tasks, Task, TaskQueue};
pub use transport::{mesh, LocalTransport, Transport};
pub use worker::Worker;

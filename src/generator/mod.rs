pub mod agents;
pub mod context;
pub mod error;
pub mod events;
pub mod outlet;
pub mod proofread;
pub mod research;
pub mod session;
pub mod types;
pub mod validator;
pub mod workflow;

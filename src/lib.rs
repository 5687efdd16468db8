pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{MemoryManager, ProcessState, SimEvent};
pub use error::{ConfigError, SimError, SimResult};
pub use scheduler::{Policy, Scheduler};
pub use sim::{Process, ProcessSpec, Sim, SimConfig, Summary, simulate, trace};

pub mod driver;
pub mod event;
pub mod memory;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SimEvent;
pub use memory::MemoryManager;
pub use state::{ProcessState, SimCtx, Slot, Ticks};

use super::state::{ProcessState, SimCtx};

#[derive(Debug, Clone, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.memory.free_memory() + ctx.held_memory(),
            ctx.memory.total_memory(),
            "Free blocks {:?} plus held memory must equal the pool size",
            ctx.memory.free_blocks()
        );

        for (&slot, &size) in &ctx.held {
            let process = ctx.process(slot);
            debug_assert_eq!(
                size, process.spec.memory_required,
                "Process {} holds a block of the wrong size",
                process.spec.id
            );
            debug_assert!(
                process.state != ProcessState::Completed,
                "Completed process {} still holds memory",
                process.spec.id
            );
        }

        for process in &ctx.processes {
            let id = process.spec.id;
            debug_assert_ne!(
                process.state,
                ProcessState::Running,
                "Process {id} left Running between steps"
            );
            debug_assert!(
                process.remaining_time <= process.spec.burst_time,
                "Process {id} remaining time grew"
            );

            if process.state == ProcessState::Unarrived {
                debug_assert!(
                    process.spec.arrival_time > ctx.now,
                    "Process {id} arrived but was never admitted"
                );
            }

            if process.state == ProcessState::Completed {
                debug_assert_eq!(process.remaining_time, 0);
                let (Some(completion), Some(turnaround), Some(waiting)) = (
                    process.completion_time,
                    process.turnaround_time,
                    process.waiting_time,
                ) else {
                    debug_assert!(false, "Completed process {id} is missing metrics");
                    continue;
                };
                debug_assert_eq!(turnaround, completion - process.spec.arrival_time);
                debug_assert_eq!(waiting, turnaround - process.spec.burst_time);
                debug_assert!(
                    process.start_time.is_some_and(|s| s >= process.spec.arrival_time),
                    "Process {id} started before it arrived"
                );
            }
        }
    }
}

use std::str::FromStr;

use crate::core::state::{ProcessState, Ticks};
use crate::error::ConfigError;

pub type ProcessId = u64;

/// Caller-supplied description of one schedulable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub memory_required: u64,
}

impl ProcessSpec {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks, memory_required: u64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            memory_required,
        }
    }
}

// id:arrival:burst:memory
impl FromStr for ProcessSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason| ConfigError::Parse {
            input: s.to_owned(),
            reason,
        };

        let fields = s
            .split(':')
            .map(|field| field.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| parse_err("fields must be non-negative integers"))?;

        match fields[..] {
            [id, arrival_time, burst_time, memory_required] => Ok(Self::new(
                id,
                arrival_time,
                burst_time,
                memory_required,
            )),
            _ => Err(parse_err("expected id:arrival:burst:memory")),
        }
    }
}

/// A process together with the metrics the simulation computes for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub spec: ProcessSpec,
    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
}

impl Process {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            spec,
            state: ProcessState::Unarrived,
            remaining_time: spec.burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.spec.id
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    /// Records the first dispatch only; later slices leave it untouched.
    pub(crate) fn mark_started(&mut self, now: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Consumes `ticks` of CPU time. Returns true when the burst is exhausted.
    pub(crate) fn run_for(&mut self, ticks: Ticks) -> bool {
        debug_assert!(
            ticks <= self.remaining_time,
            "process {} ran past its burst",
            self.spec.id
        );
        self.remaining_time -= ticks;
        self.remaining_time == 0
    }

    pub(crate) fn mark_completed(&mut self, completion_time: Ticks) {
        debug_assert_eq!(self.remaining_time, 0);
        let turnaround = completion_time - self.spec.arrival_time;
        self.state = ProcessState::Completed;
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.spec.burst_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptor() {
        let spec: ProcessSpec = "3:2:5:40".parse().unwrap();
        assert_eq!(spec, ProcessSpec::new(3, 2, 5, 40));
    }

    #[test]
    fn rejects_malformed_descriptor() {
        assert!(matches!(
            "3:2:5".parse::<ProcessSpec>(),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            "3:-1:5:4".parse::<ProcessSpec>(),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn start_time_is_recorded_once() {
        let mut process = Process::new(ProcessSpec::new(1, 0, 5, 1));
        process.mark_started(0);
        assert!(!process.run_for(2));
        process.mark_started(2);
        assert!(!process.run_for(2));
        assert!(process.run_for(1));
        process.mark_completed(5);

        assert_eq!(process.start_time, Some(0));
        assert_eq!(process.completion_time, Some(5));
        assert_eq!(process.turnaround_time, Some(5));
        assert_eq!(process.waiting_time, Some(0));
        assert!(process.is_completed());
    }
}

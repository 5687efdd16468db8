use std::fmt;

use average::{Estimate, Mean};

use super::Process;
use crate::core::Ticks;

/// Aggregate metrics over the completed processes of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub completed: usize,
    pub mean_waiting: f64,
    pub mean_turnaround: f64,
    // Time to first dispatch
    pub mean_response: f64,
    pub makespan: Ticks,
    pub cpu_utilization: f64,
}

impl Summary {
    pub fn from_processes(processes: &[Process]) -> Self {
        let done: Vec<&Process> = processes.iter().filter(|p| p.is_completed()).collect();

        let mean = |metric: fn(&Process) -> Option<Ticks>| {
            avg(done.iter().filter_map(|p| metric(p)).map(|t| t as f64))
        };

        let first_arrival = done.iter().map(|p| p.spec.arrival_time).min().unwrap_or(0);
        let last_completion = done
            .iter()
            .filter_map(|p| p.completion_time)
            .max()
            .unwrap_or(0);
        let makespan = last_completion.saturating_sub(first_arrival);
        // Only reachable past `Ticks::MAX` for hand-built process tables
        let busy = done
            .iter()
            .try_fold(0, |acc: Ticks, p| acc.checked_add(p.spec.burst_time))
            .unwrap_or(Ticks::MAX);

        Self {
            completed: done.len(),
            mean_waiting: mean(|p| p.waiting_time),
            mean_turnaround: mean(|p| p.turnaround_time),
            mean_response: mean(|p| p.start_time.map(|s| s - p.spec.arrival_time)),
            makespan,
            cpu_utilization: if makespan == 0 {
                0.0
            } else {
                busy as f64 / makespan as f64
            },
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed processes: {}", self.completed)?;
        writeln!(f, "Average waiting time: {:.2} ticks", self.mean_waiting)?;
        writeln!(f, "Average turnaround time: {:.2} ticks", self.mean_turnaround)?;
        writeln!(f, "Average response time: {:.2} ticks", self.mean_response)?;
        writeln!(f, "Makespan: {} ticks", self.makespan)?;
        write!(f, "CPU utilization: {:.1}%", self.cpu_utilization * 100.0)
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessSpec;

    fn finished(spec: ProcessSpec, start: Ticks, completion: Ticks) -> Process {
        let mut process = Process::new(spec);
        process.mark_started(start);
        process.run_for(spec.burst_time);
        process.mark_completed(completion);
        process
    }

    #[test]
    fn summarises_completed_processes() {
        let processes = [
            finished(ProcessSpec::new(1, 0, 5, 1), 0, 5),
            finished(ProcessSpec::new(2, 1, 3, 1), 5, 8),
            finished(ProcessSpec::new(3, 2, 1, 1), 8, 9),
        ];
        let summary = Summary::from_processes(&processes);

        assert_eq!(summary.completed, 3);
        assert!((summary.mean_waiting - 10.0 / 3.0).abs() < 1e-9);
        assert!((summary.mean_turnaround - 19.0 / 3.0).abs() < 1e-9);
        assert!((summary.mean_response - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.makespan, 9);
        assert!((summary.cpu_utilization - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unfinished_processes_are_ignored() {
        let processes = [Process::new(ProcessSpec::new(1, 0, 5, 1))];
        let summary = Summary::from_processes(&processes);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.makespan, 0);
        assert_eq!(summary.cpu_utilization, 0.0);
    }

    #[test]
    fn busy_time_near_the_clock_limit_does_not_overflow() {
        let processes = [
            finished(ProcessSpec::new(1, 0, u64::MAX - 1, 1), 0, u64::MAX - 1),
            finished(ProcessSpec::new(2, 0, 5, 1), u64::MAX - 5, u64::MAX),
        ];
        let summary = Summary::from_processes(&processes);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.makespan, u64::MAX);
        assert!((summary.cpu_utilization - 1.0).abs() < 1e-9);
    }
}

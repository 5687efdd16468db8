//! Error types for configuration and simulation failures.

use std::fmt;

use crate::core::Ticks;
use crate::sim::ProcessId;

/// Invalid input rejected before the simulation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A process asked for zero CPU time
    ZeroBurst { id: ProcessId },
    /// A process asked for zero memory
    ZeroMemory { id: ProcessId },
    /// Round-robin configured with a zero quantum
    ZeroQuantum,
    /// Two descriptors share the same id
    DuplicateId { id: ProcessId },
    /// Latest arrival plus total burst time does not fit in `Ticks`
    HorizonOverflow,
    /// Textual descriptor or policy could not be parsed
    Parse { input: String, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBurst { id } => write!(f, "process {id}: burst time must be positive"),
            Self::ZeroMemory { id } => {
                write!(f, "process {id}: memory requirement must be positive")
            }
            Self::ZeroQuantum => write!(f, "round-robin quantum must be positive"),
            Self::DuplicateId { id } => write!(f, "process id {id} appears more than once"),
            Self::HorizonOverflow => {
                write!(f, "latest arrival plus total burst time overflows the clock")
            }
            Self::Parse { input, reason } => write!(f, "cannot parse {input:?}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Terminal failure of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    Config(ConfigError),
    /// The listed processes can never obtain a large enough free block.
    Unschedulable {
        now: Ticks,
        stuck: Vec<ProcessId>,
        largest_free_block: u64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Unschedulable {
                now,
                stuck,
                largest_free_block,
            } => write!(
                f,
                "t={now}: processes {stuck:?} are unschedulable (largest free block is {largest_free_block})"
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Unschedulable { .. } => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

pub type SimResult<T> = Result<T, SimError>;

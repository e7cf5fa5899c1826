//! # Clock Driver
//!
//! Drives a CPU one cycle per tick until it halts. The clock never runs two
//! cycles at once: each tick completes before the next is scheduled.
//!
//! The clock can optionally:
//! - pace execution with a fixed delay between ticks
//! - stop with an error after a cycle limit, for programs that never halt
//! - raise the timer interrupt (interrupt 0) every N ticks

use std::thread;
use std::time::Duration;

use crate::{ExecutionError, MemoryBus, OutputSink, CPU};

/// Interrupt line used by the periodic timer.
pub const TIMER_INTERRUPT: u8 = 0;

/// Clock settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockConfig {
    /// Delay between ticks. `None` runs as fast as possible.
    pub period: Option<Duration>,

    /// Maximum number of ticks before giving up.
    pub max_cycles: Option<u64>,

    /// Raise the timer interrupt every this many ticks.
    pub timer_interval: Option<u64>,
}

/// Errors that stop the clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The CPU faulted and halted.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The CPU did not halt within the cycle limit.
    #[error("CPU did not halt within {cycles} cycles")]
    CycleLimit { cycles: u64 },
}

/// Caller-driven clock for a CPU.
///
/// # Examples
///
/// ```
/// use ls8::{Clock, ClockConfig, FlatMemory, Output, CPU};
///
/// // LDI R0,5; DEC R0; DEC R0; PRN R0; HLT
/// let program = [0b1001_1001, 0, 5, 0b0111_1001, 0, 0b0111_1001, 0, 0b0100_0011, 0, 0b0000_0001];
/// let mut cpu = CPU::new(FlatMemory::with_contents(&program), Vec::<Output>::new());
///
/// let mut clock = Clock::new(ClockConfig::default());
/// let cycles = clock.run(&mut cpu).unwrap();
///
/// assert_eq!(cycles, 5);
/// assert_eq!(cpu.output(), &vec![Output::Number(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    config: ClockConfig,
    ticks: u64,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Self {
        Self { config, ticks: 0 }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Number of ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs a single cycle, raising the timer interrupt first when it is due.
    ///
    /// Ticking a halted CPU does nothing: no tick is counted and no timer
    /// interrupt is raised.
    pub fn tick<M: MemoryBus, O: OutputSink>(
        &mut self,
        cpu: &mut CPU<M, O>,
    ) -> Result<(), ExecutionError> {
        if cpu.is_halted() {
            return Ok(());
        }

        self.ticks += 1;

        if let Some(interval) = self.config.timer_interval {
            if interval > 0 && self.ticks % interval == 0 {
                log::trace!("timer interrupt at tick {}", self.ticks);
                cpu.raise_interrupt(TIMER_INTERRUPT);
            }
        }

        cpu.step()
    }

    /// Ticks until the CPU halts.
    ///
    /// Returns the number of ticks issued by this call.
    ///
    /// # Errors
    ///
    /// - `ClockError::Execution` when the CPU faults
    /// - `ClockError::CycleLimit` when `max_cycles` ticks pass without HLT
    pub fn run<M: MemoryBus, O: OutputSink>(
        &mut self,
        cpu: &mut CPU<M, O>,
    ) -> Result<u64, ClockError> {
        let start = self.ticks;

        while !cpu.is_halted() {
            let elapsed = self.ticks - start;
            if let Some(limit) = self.config.max_cycles {
                if elapsed >= limit {
                    log::warn!("stopping clock: no HLT after {} cycles", elapsed);
                    return Err(ClockError::CycleLimit { cycles: elapsed });
                }
            }

            self.tick(cpu)?;

            if let Some(period) = self.config.period {
                thread::sleep(period);
            }
        }

        Ok(self.ticks - start)
    }
}

//! Command-line runner for `.ls8` programs.
//!
//! ```text
//! ls8 programs/mult.ls8
//! ls8 --disassemble programs/call.ls8
//! ls8 -vv --period-us 1000 --timer-interval 1000 programs/interrupts.ls8
//! ```

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ls8::{disassembler, Clock, ClockConfig, FlatMemory, WriterSink, CPU};

#[derive(Parser, Debug)]
#[command(name = "ls8", about = "Run a program on the LS-8 emulator")]
struct Args {
    /// Program in .ls8 text format
    program: PathBuf,

    /// Print a disassembly listing instead of running
    #[arg(long)]
    disassemble: bool,

    /// Delay between clock ticks in microseconds (0 = unpaced)
    #[arg(long, default_value_t = 0)]
    period_us: u64,

    /// Give up after this many cycles if the program has not halted
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Raise the timer interrupt every N cycles
    #[arg(long)]
    timer_interval: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn clock_config(&self) -> ClockConfig {
        ClockConfig {
            period: (self.period_us > 0).then(|| Duration::from_micros(self.period_us)),
            max_cycles: self.max_cycles,
            timer_interval: self.timer_interval,
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    simple_logger::SimpleLogger::new()
        .with_level(args.log_level())
        .init()
        .context("failed to initialize logger")?;

    let program = ls8::load_file(&args.program)
        .with_context(|| format!("failed to load {}", args.program.display()))?;

    if args.disassemble {
        let listing = disassembler::format_listing(&disassembler::disassemble(&program, 0));
        print!("{}", listing);
        return Ok(());
    }

    let mut cpu = CPU::new(FlatMemory::new(), WriterSink::new(io::stdout()));
    cpu.load_program(&program)?;

    let mut clock = Clock::new(args.clock_config());
    let cycles = clock
        .run(&mut cpu)
        .with_context(|| format!("{} stopped at PC 0x{:02X}", args.program.display(), cpu.pc()))?;

    log::info!("halted after {} cycles", cycles);
    Ok(())
}

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use memsched::{
    Policy, ProcessSpec, SimConfig, SimResult, Summary,
    sim::{GeneratorConfig, simulate, trace},
};

/// Simulate CPU scheduling against a first-fit memory pool.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scheduling policy: fcfs, sjf or rr:<quantum>
    #[arg(short, long, default_value = "fcfs")]
    policy: Policy,

    /// Size of the memory pool
    #[arg(short, long, default_value_t = 100)]
    memory: u64,

    /// Process descriptor id:arrival:burst:memory (repeatable)
    #[arg(long = "process", value_name = "ID:ARRIVAL:BURST:MEMORY")]
    processes: Vec<ProcessSpec>,

    /// Number of random processes when no descriptors are given
    #[arg(short, long, default_value_t = 8)]
    count: usize,

    /// Seed for the random workload
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Print every simulation event
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> SimResult<()> {
    let specs = if args.processes.is_empty() {
        GeneratorConfig::new(args.count, args.seed).generate()
    } else {
        args.processes.clone()
    };
    let config = SimConfig::new(args.policy, args.memory);

    if args.trace {
        for event in trace(&specs, &config)? {
            println!("{:?}", event?);
        }
    }

    let processes = simulate(&specs, &config)?;
    for process in &processes {
        println!(
            "Process {}: arrival={} burst={} memory={} start={} completion={} waiting={} turnaround={}",
            process.id(),
            process.spec.arrival_time,
            process.spec.burst_time,
            process.spec.memory_required,
            show(process.start_time),
            show(process.completion_time),
            show(process.waiting_time),
            show(process.turnaround_time),
        );
    }
    println!("{}", Summary::from_processes(&processes));
    Ok(())
}

fn show(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

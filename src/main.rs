mod builtins;
mod error;
mod exec;
mod jobs;
mod parser;
mod reaper;
mod shell;
mod signals;
mod utils;

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut emit_prompt = true;
    let mut verbose = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "-h" => utils::print_usage(),
            "-v" => verbose = true,
            "-p" => emit_prompt = false,
            _ => {}
        }
    }

    // The shell itself must survive the signals meant for its foreground
    // jobs; children restore the defaults after fork.
    if let Err(err) = signals::ignore_job_control_signals() {
        eprintln!("signal: {}", err.desc());
        process::exit(1);
    }

    shell::run_shell(emit_prompt, verbose);
}

use crate::jobs::JobTable;
use std::process;

pub fn print_usage() -> ! {
    println!("Usage: jsh [-hvp]");
    println!("   -h   Print this help message");
    println!("   -v   Enable verbose mode");
    println!("   -p   Do not print a command prompt");
    process::exit(1);
}

/// Fatal tier: a job-control syscall or registry mutation failed in a way
/// that leaves terminal/process-group ownership ambiguous. Report, release
/// the registry, and terminate with status 1.
pub fn fatal(jobs: &mut JobTable, context: &str, err: nix::Error) -> ! {
    eprintln!("{}: {}", context, err.desc());
    jobs.clear();
    process::exit(1);
}

pub fn fatal_msg(jobs: &mut JobTable, msg: &str) -> ! {
    eprintln!("{}", msg);
    jobs.clear();
    process::exit(1);
}

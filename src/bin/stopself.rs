/*
 * stopself - shell test helper.
 *
 * usage: stopself <secs>
 * Sleeps for <secs> seconds, sends SIGTSTP to its own process group, and
 * once continued sleeps another <secs> seconds before exiting 0.
 */

use nix::sys::signal::{killpg, Signal};
use nix::unistd::getpgrp;
use std::env;
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <secs>", args[0]);
        process::exit(1);
    }

    let secs = args[1].parse::<u64>().unwrap_or_else(|_| {
        eprintln!("{}: <secs> must be a non-negative integer", args[0]);
        process::exit(1);
    });

    for _ in 0..secs {
        thread::sleep(Duration::from_secs(1));
    }

    if let Err(err) = killpg(getpgrp(), Signal::SIGTSTP) {
        eprintln!("{}: kill (tstp): {}", args[0], err);
        process::exit(1);
    }

    for _ in 0..secs {
        thread::sleep(Duration::from_secs(1));
    }
}

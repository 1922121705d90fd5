/*
 * intself - shell test helper.
 *
 * usage: intself <secs>
 * Sleeps for <secs> seconds, then sends SIGINT to its own process group.
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

    if let Err(err) = killpg(getpgrp(), Signal::SIGINT) {
        eprintln!("{}: kill (int): {}", args[0], err);
        process::exit(1);
    }
}

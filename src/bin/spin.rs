/*
 * spin - shell test helper.
 *
 * usage: spin <secs>
 * Runs for <secs> seconds, sleeping in one-second chunks so it can be
 * stopped and resumed at any point.
 */

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
}

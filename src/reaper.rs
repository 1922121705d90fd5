use crate::jobs::{JobState, JobTable};
use crate::utils;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::io::{self, Write};

/// Where a wait status was observed. Only the foreground path can turn an
/// unregistered process into a job, so it carries the launch name.
#[derive(Debug, Clone, Copy)]
pub enum WaitContext<'a> {
    Foreground { command: &'a str },
    Background,
}

/// Turns one observed status change into its status line and registry
/// mutation. The message is printed before the registry is touched; the
/// mutation then happens iff the job is tracked. A registry mutation that
/// fails underneath a tracked job is fatal.
pub fn reap(jobs: &mut JobTable, pid: Pid, status: WaitStatus, context: WaitContext) {
    match status {
        WaitStatus::Exited(_, code) => {
            let jid = jobs.jid_of(pid);
            if let (WaitContext::Background, Some(jid)) = (context, jid) {
                println!("[{}] ({}) terminated with exit status {}", jid, pid, code);
            }
            if jid.is_some() && !jobs.remove(pid) {
                utils::fatal_msg(jobs, "failed to update or remove job");
            }
        }
        WaitStatus::Signaled(_, sig, _) => {
            // A foreground job killed before ever stopping has no entry;
            // report it under the id it would have been assigned.
            let jid = jobs.jid_of(pid);
            println!(
                "[{}] ({}) terminated by signal {}",
                jid.unwrap_or_else(|| jobs.next_jid()),
                pid,
                sig as i32
            );
            if jid.is_some() && !jobs.remove(pid) {
                utils::fatal_msg(jobs, "failed to update or remove job");
            }
        }
        WaitStatus::Stopped(_, sig) => match jobs.jid_of(pid) {
            Some(jid) => {
                println!("[{}] ({}) suspended by signal {}", jid, pid, sig as i32);
                if !jobs.set_state(pid, JobState::Stopped) {
                    utils::fatal_msg(jobs, "failed to update or remove job");
                }
            }
            None => {
                println!(
                    "[{}] ({}) suspended by signal {}",
                    jobs.next_jid(),
                    pid,
                    sig as i32
                );
                if let WaitContext::Foreground { command } = context {
                    if jobs.add(pid, JobState::Stopped, command).is_none() {
                        utils::fatal_msg(jobs, "failed to add job");
                    }
                }
            }
        },
        WaitStatus::Continued(_) => {
            // Continue notifications only arise for previously stopped, hence
            // registered, jobs; an unknown pid means there is nothing to do.
            if let Some(jid) = jobs.jid_of(pid) {
                println!("[{}] ({}) resumed", jid, pid);
                if !jobs.set_state(pid, JobState::Running) {
                    utils::fatal_msg(jobs, "failed to update or remove job");
                }
            }
        }
        // No status change (WNOHANG) or a tracing stop we did not ask for.
        _ => {}
    }
    let _ = io::stdout().flush();
}

/// One non-blocking scan over every tracked pid, run once per loop iteration
/// before the next line is read. Pids with no pending status change are left
/// for the next pass.
pub fn reap_background(jobs: &mut JobTable) {
    for pid in jobs.pids() {
        let flags =
            WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
        match waitpid(pid, Some(flags)) {
            Ok(WaitStatus::StillAlive) => {}
            Ok(status) => reap(jobs, pid, status, WaitContext::Background),
            Err(_) => {}
        }
    }
}

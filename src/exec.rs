use crate::error::ShellError;
use crate::jobs::JobState;
use crate::parser::CommandLine;
use crate::reaper::{self, WaitContext};
use crate::shell::Session;
use crate::signals;
use crate::utils;
use nix::fcntl::{open, OFlag};
use nix::sys::signal::{killpg, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::{self, dup2, fork, getpid, tcsetpgrp, ForkResult, Pid};
use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::process;

/// The shell reads its terminal on standard input.
const SHELL_TERMINAL: RawFd = 0;

/// Launches an external command. A trailing `&` marks it as a background
/// job; otherwise the shell blocks until the child exits, is signaled, or
/// stops. The child gets its own process group, default signal dispositions,
/// and any requested redirections before the image is replaced.
pub fn execute_command(session: &mut Session, mut cmd: CommandLine) {
    let background = cmd.argv.last().map_or(false, |arg| arg == "&");
    if background {
        cmd.argv.pop();
    }
    if cmd.argv.is_empty() {
        return;
    }

    // argv[0] carries the final path component; exec still uses the path as
    // typed.
    let path = cmd.argv[0].clone();
    cmd.argv[0] = display_name(&path).to_string();

    let interactive = session.interactive;
    match unsafe { fork() } {
        Ok(ForkResult::Child) => run_child(&path, &cmd, background, interactive),
        Ok(ForkResult::Parent { child }) => {
            if background {
                match session.jobs.add(child, JobState::Running, &path) {
                    Some(jid) => {
                        println!("[{}] ({})", jid, child);
                        let _ = io::stdout().flush();
                    }
                    None => utils::fatal_msg(&mut session.jobs, "failed to add job"),
                }
            } else {
                wait_foreground(session, child, &path);
            }
        }
        Err(err) => eprintln!("fork: {}", err.desc()),
    }
}

/// Resumes a stopped or running job in the background: SIGCONT to the group,
/// then a non-blocking status check fed to the reaper.
pub fn resume_background(session: &mut Session, jid: i32) -> Result<(), ShellError> {
    let pid = session.jobs.pid_of(jid).ok_or(ShellError::JobNotFound)?;
    if let Err(err) = killpg(pid, Signal::SIGCONT) {
        utils::fatal(&mut session.jobs, "kill", err);
    }
    let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    match waitpid(pid, Some(flags)) {
        Ok(status) => reaper::reap(&mut session.jobs, pid, status, WaitContext::Background),
        Err(err) => eprintln!("waitpid: {}", err.desc()),
    }
    Ok(())
}

/// Brings a job into the foreground: hand it the terminal, SIGCONT its
/// group, block until it next changes state, then take the terminal back.
pub fn resume_foreground(session: &mut Session, jid: i32) -> Result<(), ShellError> {
    let pid = session.jobs.pid_of(jid).ok_or(ShellError::JobNotFound)?;
    let command = session.jobs.command_of(pid).unwrap_or_default();
    if session.interactive {
        if let Err(err) = tcsetpgrp(SHELL_TERMINAL, pid) {
            utils::fatal(&mut session.jobs, "tcsetpgrp", err);
        }
    }
    if let Err(err) = killpg(pid, Signal::SIGCONT) {
        utils::fatal(&mut session.jobs, "kill", err);
    }
    match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
        Ok(status) => reaper::reap(
            &mut session.jobs,
            pid,
            status,
            WaitContext::Foreground { command: &command },
        ),
        Err(err) => eprintln!("waitpid: {}", err.desc()),
    }
    reclaim_terminal(session);
    Ok(())
}

fn wait_foreground(session: &mut Session, pid: Pid, command: &str) {
    match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
        Ok(status) => reaper::reap(
            &mut session.jobs,
            pid,
            status,
            WaitContext::Foreground { command },
        ),
        Err(err) => eprintln!("waitpid: {}", err.desc()),
    }
    reclaim_terminal(session);
}

/// The shell takes the terminal back for its own group whenever a foreground
/// job stops or terminates, on error paths included.
fn reclaim_terminal(session: &mut Session) {
    if !session.interactive {
        return;
    }
    if let Err(err) = tcsetpgrp(SHELL_TERMINAL, unistd::getpgrp()) {
        utils::fatal(&mut session.jobs, "tcsetpgrp", err);
    }
}

/// Child-side setup. Every failure here ends this process; nothing below the
/// fork returns into shared shell logic.
fn run_child(path: &str, cmd: &CommandLine, background: bool, interactive: bool) -> ! {
    if let Err(err) = unistd::setpgid(Pid::from_raw(0), Pid::from_raw(0)) {
        child_fatal("setpgid", err);
    }
    if !background && interactive {
        if let Err(err) = tcsetpgrp(SHELL_TERMINAL, getpid()) {
            child_fatal("tcsetpgrp", err);
        }
    }
    if let Err(err) = signals::restore_default_dispositions() {
        child_fatal("signal", err);
    }

    if let Some(ref infile) = cmd.infile {
        redirect(infile, OFlag::O_RDONLY, Mode::S_IRUSR, 0);
    }
    if let Some(ref outfile) = cmd.outfile {
        let flags = OFlag::O_RDWR | OFlag::O_CREAT | OFlag::O_TRUNC;
        redirect(outfile, flags, Mode::S_IRUSR | Mode::S_IWUSR, 1);
    } else if let Some(ref appendfile) = cmd.appendfile {
        let flags = OFlag::O_RDWR | OFlag::O_CREAT | OFlag::O_APPEND;
        redirect(appendfile, flags, Mode::S_IRUSR | Mode::S_IWUSR, 1);
    }

    let prog = match CString::new(path) {
        Ok(prog) => prog,
        Err(_) => {
            eprintln!("execv: invalid path");
            process::exit(1);
        }
    };
    let mut argv = Vec::with_capacity(cmd.argv.len());
    for arg in &cmd.argv {
        match CString::new(arg.as_str()) {
            Ok(arg) => argv.push(arg),
            Err(_) => {
                eprintln!("execv: invalid argument");
                process::exit(1);
            }
        }
    }

    // Only returns on failure.
    if let Err(err) = unistd::execv(&prog, &argv) {
        eprintln!("execv: {}", err.desc());
    }
    process::exit(1);
}

/// Replaces `target` with the named file. An unopenable path aborts the
/// launch of this process only; the parent shell is unaffected.
fn redirect(path: &str, flags: OFlag, mode: Mode, target: RawFd) {
    match open(path, flags, mode) {
        Ok(fd) => {
            if let Err(err) = dup2(fd, target) {
                child_fatal("dup2", err);
            }
            if fd != target {
                if let Err(err) = unistd::close(fd) {
                    child_fatal("close", err);
                }
            }
        }
        Err(err) => {
            eprintln!("open: {}", err.desc());
            process::exit(1);
        }
    }
}

fn child_fatal(context: &str, err: nix::Error) -> ! {
    eprintln!("{}: {}", context, err.desc());
    process::exit(1);
}

/// Final path component of the command, shown as argv[0].
fn display_name(path: &str) -> &str {
    path.rsplit('/').find(|seg| !seg.is_empty()).unwrap_or(path)
}

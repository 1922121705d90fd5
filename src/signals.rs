use nix::sys::signal::{signal, SigHandler, Signal};

/// Signals the shell refuses at top level so that terminal-generated signals
/// only ever reach the foreground process group. SIGTTOU is among them so the
/// shell can reclaim the terminal from the background without being stopped.
const JOB_CONTROL_SIGNALS: [Signal; 4] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTOU,
];

/// Installs SIG_IGN for the job-control signals in the shell itself.
pub fn ignore_job_control_signals() -> nix::Result<()> {
    for sig in JOB_CONTROL_SIGNALS {
        unsafe { signal(sig, SigHandler::SigIgn)? };
    }
    Ok(())
}

/// Restores the default dispositions in a freshly forked child, before exec.
pub fn restore_default_dispositions() -> nix::Result<()> {
    for sig in JOB_CONTROL_SIGNALS {
        unsafe { signal(sig, SigHandler::SigDfl)? };
    }
    Ok(())
}

use nix::unistd::Pid;

/// State of a tracked job. Terminated jobs are removed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Stopped,
}

impl JobState {
    pub fn label(self) -> &'static str {
        match self {
            JobState::Running => "running",
            JobState::Stopped => "suspended",
        }
    }
}

/// A background or stopped external command still of interest to the shell.
#[derive(Debug)]
pub struct Job {
    pub jid: i32,
    pub pid: Pid,
    pub state: JobState,
    /// The path the job was launched with, kept for status messages.
    pub command: String,
}

/// Ordered registry of jobs. Insertion order is creation order, which is the
/// order `jobs` enumerates. Job ids are assigned from a counter that only
/// ever increments; an id is never handed out twice in one shell lifetime.
#[derive(Debug)]
pub struct JobTable {
    jobs: Vec<Job>,
    next_jid: i32,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable {
            jobs: Vec::new(),
            next_jid: 1,
        }
    }

    /// The id the next inserted job will receive.
    pub fn next_jid(&self) -> i32 {
        self.next_jid
    }

    /// Inserts a job and returns its assigned id. Fails on a non-positive
    /// pid or one that is already tracked.
    pub fn add(&mut self, pid: Pid, state: JobState, command: &str) -> Option<i32> {
        if pid.as_raw() < 1 || self.jid_of(pid).is_some() {
            return None;
        }
        let jid = self.next_jid;
        self.next_jid += 1;
        self.jobs.push(Job {
            jid,
            pid,
            state,
            command: command.to_string(),
        });
        Some(jid)
    }

    /// Removes the job with the given pid. False if it was not tracked.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.pid != pid);
        self.jobs.len() != before
    }

    /// Updates the state of the job with the given pid. False if untracked.
    pub fn set_state(&mut self, pid: Pid, state: JobState) -> bool {
        match self.jobs.iter_mut().find(|job| job.pid == pid) {
            Some(job) => {
                job.state = state;
                true
            }
            None => false,
        }
    }

    pub fn jid_of(&self, pid: Pid) -> Option<i32> {
        self.jobs.iter().find(|job| job.pid == pid).map(|job| job.jid)
    }

    pub fn pid_of(&self, jid: i32) -> Option<Pid> {
        self.jobs.iter().find(|job| job.jid == jid).map(|job| job.pid)
    }

    pub fn command_of(&self, pid: Pid) -> Option<String> {
        self.jobs
            .iter()
            .find(|job| job.pid == pid)
            .map(|job| job.command.clone())
    }

    /// Pids of all tracked jobs, in creation order.
    pub fn pids(&self) -> Vec<Pid> {
        self.jobs.iter().map(|job| job.pid).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drops every tracked job. The id counter keeps its value.
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

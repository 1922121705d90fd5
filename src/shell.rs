use crate::builtins;
use crate::exec;
use crate::jobs::JobTable;
use crate::parser;
use crate::reaper;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

pub static PROMPT: &str = "jsh> ";

/// Everything one shell invocation owns: the job registry (with its id
/// counter), whether stdin is a terminal, and the verbosity flag. Passed by
/// reference into every component; there is no ambient shell state.
pub struct Session {
    pub jobs: JobTable,
    pub interactive: bool,
    pub verbose: bool,
}

/// Runs the read/eval loop until end-of-input or `exit`.
///
/// Each iteration first polls the background jobs for status changes, then
/// reads one line, resolves redirections, and either dispatches a built-in
/// or launches the command. With a terminal on stdin and the prompt enabled,
/// lines come through rustyline with history in `~/.jsh_history`; otherwise
/// a plain buffered read is used.
pub fn run_shell(emit_prompt: bool, verbose: bool) {
    let interactive = nix::unistd::isatty(0).unwrap_or(false);
    let mut session = Session {
        jobs: JobTable::new(),
        interactive,
        verbose,
    };

    if emit_prompt && interactive {
        run_editor_loop(&mut session);
    } else {
        run_plain_loop(&mut session, emit_prompt);
    }
    session.jobs.clear();
}

fn run_editor_loop(session: &mut Session) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("jsh: {}", err);
            run_plain_loop(session, true);
            return;
        }
    };
    let history = history_path();
    if let Some(ref path) = history {
        let _ = editor.load_history(path);
    }

    loop {
        reaper::reap_background(&mut session.jobs);
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                dispatch_line(session, &line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("jsh: {}", err);
                session.jobs.clear();
                process::exit(1);
            }
        }
    }

    if let Some(ref path) = history {
        let _ = editor.save_history(path);
    }
}

fn run_plain_loop(session: &mut Session, emit_prompt: bool) {
    let stdin = io::stdin();
    loop {
        reaper::reap_background(&mut session.jobs);

        if emit_prompt {
            print!("{}", PROMPT);
            let _ = io::stdout().flush();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => dispatch_line(session, &line),
            Err(err) => {
                eprintln!("read: {}", err);
                session.jobs.clear();
                process::exit(1);
            }
        }
    }
}

fn dispatch_line(session: &mut Session, line: &str) {
    if session.verbose {
        println!("jsh: read command: {}", line.trim());
    }
    match parser::parse_command_line(line) {
        Ok(None) => {}
        Ok(Some(cmd)) => {
            if !builtins::handle_builtin(session, &cmd) {
                exec::execute_command(session, cmd);
            }
        }
        Err(err) => eprintln!("{}", err),
    }
}

fn history_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|home| home.join(".jsh_history"))
}

use crate::error::ShellError;
use crate::exec;
use crate::parser::CommandLine;
use crate::shell::Session;
use nix::unistd::{self, LinkatFlags};
use std::io::{self, Write};
use std::process;

/// Runs the command if its first token names a built-in, reporting any error
/// it produced. Returns false for everything else so the caller can launch
/// it as an external program.
pub fn handle_builtin(session: &mut Session, cmd: &CommandLine) -> bool {
    let result = match cmd.argv[0].as_str() {
        "jobs" => list_jobs(session, &cmd.argv),
        "bg" => parse_job_reference("bg", &cmd.argv)
            .and_then(|jid| exec::resume_background(session, jid)),
        "fg" => parse_job_reference("fg", &cmd.argv)
            .and_then(|jid| exec::resume_foreground(session, jid)),
        "cd" => change_directory(&cmd.argv),
        "ln" => hard_link(&cmd.argv),
        "rm" => unlink(&cmd.argv),
        "exit" => {
            session.jobs.clear();
            process::exit(0);
        }
        _ => return false,
    };
    if let Err(err) = result {
        eprintln!("{}", err);
    }
    true
}

fn list_jobs(session: &Session, args: &[String]) -> Result<(), ShellError> {
    if args.len() > 1 {
        return Err(ShellError::Syntax);
    }
    for job in session.jobs.iter() {
        println!(
            "[{}] ({}) {} {}",
            job.jid,
            job.pid,
            job.state.label(),
            job.command
        );
    }
    let _ = io::stdout().flush();
    Ok(())
}

/// Parses the `%N` job reference that `bg` and `fg` take as their only
/// argument.
fn parse_job_reference(name: &'static str, args: &[String]) -> Result<i32, ShellError> {
    let arg = args.get(1).ok_or(ShellError::Syntax)?;
    if args.len() > 2 {
        return Err(ShellError::CommandSyntax(name));
    }
    let digits = arg
        .strip_prefix('%')
        .ok_or(ShellError::BadJobReference(name))?;
    digits
        .parse::<i32>()
        .map_err(|_| ShellError::CommandSyntax(name))
}

fn change_directory(args: &[String]) -> Result<(), ShellError> {
    let path = args.get(1).ok_or(ShellError::CommandSyntax("cd"))?;
    unistd::chdir(path.as_str()).map_err(|source| ShellError::Os {
        context: "cd",
        source,
    })
}

fn hard_link(args: &[String]) -> Result<(), ShellError> {
    let (src, dst) = match (args.get(1), args.get(2)) {
        (Some(src), Some(dst)) => (src, dst),
        _ => return Err(ShellError::CommandSyntax("ln")),
    };
    unistd::linkat(
        None,
        src.as_str(),
        None,
        dst.as_str(),
        LinkatFlags::NoSymlinkFollow,
    )
    .map_err(|source| ShellError::Os {
        context: "ln",
        source,
    })
}

/// Removes the named file. Any later token containing `-f` suppresses the
/// error report of a failed unlink, not the attempt itself.
fn unlink(args: &[String]) -> Result<(), ShellError> {
    let path = args.get(1).ok_or(ShellError::CommandSyntax("rm"))?;
    if let Err(source) = unistd::unlink(path.as_str()) {
        let forced = args.iter().skip(1).any(|arg| arg.contains("-f"));
        if !forced {
            return Err(ShellError::Os {
                context: "rm",
                source,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn job_reference_requires_a_percent_prefix() {
        assert_eq!(parse_job_reference("bg", &args(&["bg", "%3"])), Ok(3));
        assert_eq!(
            parse_job_reference("bg", &args(&["bg", "3"])),
            Err(ShellError::BadJobReference("bg"))
        );
    }

    #[test]
    fn job_reference_rejects_missing_and_trailing_arguments() {
        assert_eq!(
            parse_job_reference("fg", &args(&["fg"])),
            Err(ShellError::Syntax)
        );
        assert_eq!(
            parse_job_reference("fg", &args(&["fg", "%1", "extra"])),
            Err(ShellError::CommandSyntax("fg"))
        );
    }

    #[test]
    fn job_reference_rejects_non_numeric_ids() {
        assert_eq!(
            parse_job_reference("bg", &args(&["bg", "%abc"])),
            Err(ShellError::CommandSyntax("bg"))
        );
        assert_eq!(
            parse_job_reference("bg", &args(&["bg", "%"])),
            Err(ShellError::CommandSyntax("bg"))
        );
    }

    #[test]
    fn builtins_with_missing_arguments_are_syntax_errors() {
        assert_eq!(
            change_directory(&args(&["cd"])),
            Err(ShellError::CommandSyntax("cd"))
        );
        assert_eq!(
            hard_link(&args(&["ln", "only-src"])),
            Err(ShellError::CommandSyntax("ln"))
        );
        assert_eq!(
            unlink(&args(&["rm"])),
            Err(ShellError::CommandSyntax("rm"))
        );
    }

    #[test]
    fn rm_force_flag_suppresses_the_report() {
        assert_eq!(unlink(&args(&["rm", "/no/such/file", "-f"])), Ok(()));
        assert!(unlink(&args(&["rm", "/no/such/file"])).is_err());
    }
}

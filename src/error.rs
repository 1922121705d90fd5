use thiserror::Error;

/// Recoverable errors: reported on stderr, the offending command line is
/// abandoned, and the shell loop continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("syntax error: multiple input files")]
    MultipleInputRedirection,

    /// A redirection operator with nothing after it. Carries the direction
    /// word used in the diagnostic ("input" or "output").
    #[error("syntax error: no {0} file")]
    MissingRedirectTarget(&'static str),

    /// The line contained redirections but no command token.
    #[error("error: redirects with no command")]
    MissingCommand,

    /// Malformed built-in invocation with no command attribution.
    #[error("syntax error")]
    Syntax,

    /// Malformed built-in invocation attributed to a specific command.
    #[error("{0}: syntax error")]
    CommandSyntax(&'static str),

    #[error("{0}: job input does not begin with %")]
    BadJobReference(&'static str),

    #[error("job not found")]
    JobNotFound,

    /// An OS-level failure from a built-in, perror-style.
    #[error("{context}: {}", .source.desc())]
    Os {
        context: &'static str,
        source: nix::Error,
    },
}

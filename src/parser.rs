use crate::error::ShellError;

/// A command line after redirection extraction.
///
/// `argv` holds the residual tokens in their original order; the first one is
/// the command path. A trailing `&` is left in place for the launcher to
/// interpret. The truncate and append slots are tracked separately; at launch
/// time the truncate slot takes precedence if both were given.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub argv: Vec<String>,
    pub infile: Option<String>,
    pub outfile: Option<String>,
    pub appendfile: Option<String>,
}

/// Splits a raw line on whitespace and pulls out redirections.
///
/// - `<` consumes the next token as the input path; a second `<` is an error.
/// - `>` / `>>` consume the next token into their slot; if the slot is
///   already set the operator is kept as an ordinary argument instead.
/// - Every other token lands in `argv` in order.
///
/// Returns `Ok(None)` for a blank line. A line consisting only of
/// redirections is rejected as a whole; no partial effects survive.
pub fn parse_command_line(line: &str) -> Result<Option<CommandLine>, ShellError> {
    let mut cmd = CommandLine::default();
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "<" => {
                if cmd.infile.is_some() {
                    return Err(ShellError::MultipleInputRedirection);
                }
                match tokens.next() {
                    Some(path) => cmd.infile = Some(path.to_string()),
                    None => return Err(ShellError::MissingRedirectTarget("input")),
                }
            }
            ">" if cmd.outfile.is_none() => match tokens.next() {
                Some(path) => cmd.outfile = Some(path.to_string()),
                None => return Err(ShellError::MissingRedirectTarget("output")),
            },
            ">>" if cmd.appendfile.is_none() => match tokens.next() {
                Some(path) => cmd.appendfile = Some(path.to_string()),
                None => return Err(ShellError::MissingRedirectTarget("output")),
            },
            _ => cmd.argv.push(token.to_string()),
        }
    }

    if cmd.argv.is_empty() {
        if cmd.infile.is_some() || cmd.outfile.is_some() || cmd.appendfile.is_some() {
            return Err(ShellError::MissingCommand);
        }
        return Ok(None);
    }
    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> CommandLine {
        parse_command_line(line).unwrap().unwrap()
    }

    #[test]
    fn plain_command_keeps_argument_order() {
        let cmd = parse("/bin/ls -l -a dir");
        assert_eq!(cmd.argv, vec!["/bin/ls", "-l", "-a", "dir"]);
        assert_eq!(cmd.infile, None);
        assert_eq!(cmd.outfile, None);
        assert_eq!(cmd.appendfile, None);
    }

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_command_line("").unwrap(), None);
        assert_eq!(parse_command_line("  \t \n").unwrap(), None);
    }

    #[test]
    fn extracts_all_three_redirections() {
        let cmd = parse("/bin/cat < in.txt > out.txt");
        assert_eq!(cmd.argv, vec!["/bin/cat"]);
        assert_eq!(cmd.infile.as_deref(), Some("in.txt"));
        assert_eq!(cmd.outfile.as_deref(), Some("out.txt"));

        let cmd = parse("/bin/cat >> log.txt");
        assert_eq!(cmd.appendfile.as_deref(), Some("log.txt"));
    }

    #[test]
    fn redirections_interleave_with_arguments() {
        let cmd = parse("/bin/grep < in.txt pattern > out.txt -c");
        assert_eq!(cmd.argv, vec!["/bin/grep", "pattern", "-c"]);
        assert_eq!(cmd.infile.as_deref(), Some("in.txt"));
        assert_eq!(cmd.outfile.as_deref(), Some("out.txt"));
    }

    #[test]
    fn redirection_may_precede_the_command() {
        let cmd = parse("< in.txt /bin/cat");
        assert_eq!(cmd.argv, vec!["/bin/cat"]);
        assert_eq!(cmd.infile.as_deref(), Some("in.txt"));
    }

    #[test]
    fn duplicate_input_redirection_is_an_error() {
        assert_eq!(
            parse_command_line("/bin/cat < a < b"),
            Err(ShellError::MultipleInputRedirection)
        );
    }

    #[test]
    fn missing_redirect_target_is_an_error() {
        assert_eq!(
            parse_command_line("/bin/cat <"),
            Err(ShellError::MissingRedirectTarget("input"))
        );
        assert_eq!(
            parse_command_line("/bin/cat >"),
            Err(ShellError::MissingRedirectTarget("output"))
        );
        assert_eq!(
            parse_command_line("/bin/cat >>"),
            Err(ShellError::MissingRedirectTarget("output"))
        );
    }

    #[test]
    fn redirects_without_a_command_are_rejected() {
        assert_eq!(
            parse_command_line("< in.txt"),
            Err(ShellError::MissingCommand)
        );
    }

    #[test]
    fn second_output_redirection_becomes_an_argument() {
        let cmd = parse("/bin/echo hi > a > b");
        assert_eq!(cmd.outfile.as_deref(), Some("a"));
        assert_eq!(cmd.argv, vec!["/bin/echo", "hi", ">", "b"]);
    }

    #[test]
    fn truncate_and_append_slots_are_independent() {
        let cmd = parse("/bin/echo hi > a >> b");
        assert_eq!(cmd.outfile.as_deref(), Some("a"));
        assert_eq!(cmd.appendfile.as_deref(), Some("b"));
    }

    #[test]
    fn ampersand_stays_in_argv() {
        let cmd = parse("/bin/sleep 5 &");
        assert_eq!(cmd.argv, vec!["/bin/sleep", "5", "&"]);
    }
}

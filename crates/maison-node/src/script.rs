//! Replay script parsing.
//!
//! One call per line. Blank lines and lines starting with `#` are skipped.
//! Tokens are separated by whitespace; a token wrapped in double quotes may
//! contain spaces. A quote anywhere else is an error: quoted tokens must
//! start and end at a token boundary, and bare tokens cannot contain `"`.
//!
//! ```text
//! register       <caller> <name> <cid>
//! update         <caller> <name> <cid>
//! reject         <caller> <target>
//! transfer-admin <caller> <new-admin>
//! is-registered  <account>
//! is-rejected    <account>
//! get            <account>
//! ```

use maison_core::{AccountKey, RegistryCall};
use thiserror::Error;

/// Errors from script parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// First token is not a known operation.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        op: String,
    },

    /// Wrong number of arguments for the operation.
    #[error("line {line}: '{op}' expects {expected} arguments, got {actual}")]
    Arity {
        /// 1-based line number.
        line: usize,
        /// Operation name.
        op: String,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// Opening quote without a closing one.
    #[error("line {line}: unterminated quote")]
    UnterminatedQuote {
        /// 1-based line number.
        line: usize,
    },

    /// Quote inside a bare token or glued to the end of a quoted one.
    #[error("line {line}: unexpected quote in token")]
    StrayQuote {
        /// 1-based line number.
        line: usize,
    },
}

/// A parsed call with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCall {
    /// 1-based line number.
    pub line: usize,
    /// Parsed call.
    pub call: RegistryCall,
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first `ScriptError` encountered; nothing is returned for
/// lines after it.
pub fn parse_script(source: &str) -> Result<Vec<ScriptCall>, ScriptError> {
    let mut calls = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        if let Some(call) = parse_line(raw, line)? {
            calls.push(ScriptCall { line, call });
        }
    }
    Ok(calls)
}

/// Parse a single line. `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns `ScriptError` for unknown operations, wrong arity or malformed
/// quoting.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<RegistryCall>, ScriptError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = tokenize(trimmed, line)?;
    let Some((op, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let call = match op.as_str() {
        "register" => {
            let [caller, name, cid] = take_args::<3>(op, args, line)?;
            RegistryCall::RegisterMaison { caller: caller.into(), name, cid }
        },
        "update" => {
            let [caller, name, cid] = take_args::<3>(op, args, line)?;
            RegistryCall::UpdateMaison { caller: caller.into(), name, cid }
        },
        "reject" => {
            let [caller, target] = take_args::<2>(op, args, line)?;
            RegistryCall::RejectMaison { caller: caller.into(), target: target.into() }
        },
        "transfer-admin" => {
            let [caller, new_admin] = take_args::<2>(op, args, line)?;
            RegistryCall::TransferAdmin { caller: caller.into(), new_admin: new_admin.into() }
        },
        "is-registered" => {
            let [account] = take_args::<1>(op, args, line)?;
            RegistryCall::IsRegistered { account: AccountKey::from(account) }
        },
        "is-rejected" => {
            let [account] = take_args::<1>(op, args, line)?;
            RegistryCall::IsRejected { account: AccountKey::from(account) }
        },
        "get" => {
            let [account] = take_args::<1>(op, args, line)?;
            RegistryCall::GetMaison { account: AccountKey::from(account) }
        },
        other => return Err(ScriptError::UnknownOperation { line, op: other.to_string() }),
    };

    Ok(Some(call))
}

fn take_args<const N: usize>(
    op: &str,
    args: &[String],
    line: usize,
) -> Result<[String; N], ScriptError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| ScriptError::Arity {
        line,
        op: op.to_string(),
        expected: N,
        actual: args.len(),
    })
}

fn tokenize(input: &str, line: usize) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err(ScriptError::UnterminatedQuote { line }),
                }
            }
            if chars.peek().is_some_and(|ch| !ch.is_whitespace()) {
                return Err(ScriptError::StrayQuote { line });
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                if ch == '"' {
                    return Err(ScriptError::StrayQuote { line });
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_quoted_names() {
        let call = parse_line(r#"register ST2USER "Maison d'Avant" Qm123abc"#, 1).unwrap();

        assert_eq!(
            call,
            Some(RegistryCall::RegisterMaison {
                caller: "ST2USER".into(),
                name: "Maison d'Avant".to_string(),
                cid: "Qm123abc".to_string(),
            })
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("   ", 2).unwrap(), None);
        assert_eq!(parse_line("# setup", 3).unwrap(), None);
    }

    #[test]
    fn empty_quoted_token_is_an_argument() {
        let call = parse_line(r#"update ST2USER "" Qm1"#, 1).unwrap();

        assert!(matches!(call, Some(RegistryCall::UpdateMaison { name, .. }) if name.is_empty()));
    }

    #[test]
    fn rejects_unknown_operation() {
        let err = parse_line("unreject ST1ADMIN ST2USER", 4).unwrap_err();

        assert_eq!(err, ScriptError::UnknownOperation { line: 4, op: "unreject".to_string() });
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = parse_line("reject ST1ADMIN", 2).unwrap_err();

        assert_eq!(err.to_string(), "line 2: 'reject' expects 2 arguments, got 1");
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = parse_line(r#"register U1 "Maison X Qm1"#, 9).unwrap_err();

        assert_eq!(err, ScriptError::UnterminatedQuote { line: 9 });
    }

    #[test]
    fn rejects_quotes_inside_tokens() {
        assert_eq!(
            parse_line(r#"register U1 "a"b Qm1"#, 3).unwrap_err(),
            ScriptError::StrayQuote { line: 3 }
        );
        assert_eq!(
            parse_line(r#"register U1 a"b c" Qm1"#, 5).unwrap_err(),
            ScriptError::StrayQuote { line: 5 }
        );
    }

    #[test]
    fn script_keeps_line_numbers() {
        let script = "# demo\nregister U1 X Qm1\n\nget U1\n";

        let calls = parse_script(script).unwrap();

        assert_eq!(calls.iter().map(|c| c.line).collect::<Vec<_>>(), vec![2, 4]);
    }

    proptest! {
        #[test]
        fn parse_never_panics(raw in ".{0,80}") {
            let _ = parse_line(&raw, 1);
        }

        #[test]
        fn quoted_arguments_survive(name in "[a-zA-Z' ]{0,20}", cid in "[a-zA-Z0-9]{1,12}") {
            let raw = format!("register U1 \"{name}\" {cid}");

            let call = parse_line(&raw, 1).unwrap();

            prop_assert_eq!(
                call,
                Some(RegistryCall::RegisterMaison { caller: "U1".into(), name, cid })
            );
        }
    }
}

use crate::command::Command;
use crate::types::access::Role;

pub const USAGE: &str = "\
prm — typed, access-controlled parameter registry

Usage:
  prm list  <limits.json> [--values <f>]
  prm tree  <limits.json> [--values <f>]
  prm get   <limits.json> <id> [--values <f>] [--role <r>]
  prm set   <limits.json> <values.json> <id> <value> [--role <r>]
  prm check <limits.json> <id> <read|write> <role>
  prm tui   <limits.json> [--values <f>]
  prm help

Roles: operator (default), engineer, developer, superroot.
Limits documents define ids and permission masks; values documents carry
current values. `set` writes the updated values document back in place.";


/// Parse CLI arguments into a typed Command enum.
///
/// Arguments are expected WITHOUT the program name (i.e., `args` should be
/// `["list", "limits.json"]`, not `["prm", "list", ...]`).
pub fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'prm help' for usage.".into());
    }

    match args[0] {
        "list" => parse_list(args),
        "tree" => parse_tree(args),
        "get" => parse_get(args),
        "set" => parse_set(args),
        "check" => parse_check(args),
        "tui" => parse_tui(args),
        "help" => Ok(Command::Help),
        _ => Err(format!("Unknown command: '{}'", args[0])),
    }
}


// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

/// `prm list <limits.json> [--values <f>]`
fn parse_list(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: prm list <limits.json> [--values <f>]".into());
    }
    let limits = args[1].to_string();
    let (values, _) = parse_flags(&args[2..], false)?;
    Ok(Command::List { limits, values })
}

/// `prm tree <limits.json> [--values <f>]`
fn parse_tree(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: prm tree <limits.json> [--values <f>]".into());
    }
    let limits = args[1].to_string();
    let (values, _) = parse_flags(&args[2..], false)?;
    Ok(Command::Tree { limits, values })
}

/// `prm get <limits.json> <id> [--values <f>] [--role <r>]`
fn parse_get(args: &[&str]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("Usage: prm get <limits.json> <id> [--values <f>] [--role <r>]".into());
    }
    let limits = args[1].to_string();
    let id = parse_id(args[2])?;
    let (values, role) = parse_flags(&args[3..], true)?;
    Ok(Command::Get {
        limits,
        values,
        id,
        role: role.unwrap_or(Role::Operator),
    })
}

/// `prm set <limits.json> <values.json> <id> <value> [--role <r>]`
fn parse_set(args: &[&str]) -> Result<Command, String> {
    if args.len() < 5 {
        return Err("Usage: prm set <limits.json> <values.json> <id> <value> [--role <r>]".into());
    }
    let limits = args[1].to_string();
    let values = args[2].to_string();
    let id = parse_id(args[3])?;
    let value = args[4].to_string();
    let (extra_values, role) = parse_flags(&args[5..], true)?;
    if extra_values.is_some() {
        return Err("Unexpected '--values' (set names the values file positionally)".into());
    }
    Ok(Command::Set {
        limits,
        values,
        id,
        value,
        role: role.unwrap_or(Role::Operator),
    })
}

/// `prm check <limits.json> <id> <read|write> <role>`
fn parse_check(args: &[&str]) -> Result<Command, String> {
    if args.len() < 5 {
        return Err("Usage: prm check <limits.json> <id> <read|write> <role>".into());
    }
    Ok(Command::Check {
        limits: args[1].to_string(),
        id: parse_id(args[2])?,
        permission: args[3].parse()?,
        role: args[4].parse()?,
    })
}

/// `prm tui <limits.json> [--values <f>]`
fn parse_tui(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: prm tui <limits.json> [--values <f>]".into());
    }
    let limits = args[1].to_string();
    let (values, _) = parse_flags(&args[2..], false)?;
    Ok(Command::Tui { limits, values })
}


// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("Invalid parameter id: '{}'", s))
}

/// Parse trailing `--values <f>` / `--role <r>` flags.
fn parse_flags(args: &[&str], allow_role: bool) -> Result<(Option<String>, Option<Role>), String> {
    let mut values = None;
    let mut role = None;
    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--values" if i + 1 < args.len() => {
                values = Some(args[i + 1].to_string());
                i += 2;
            }
            "--role" if allow_role && i + 1 < args.len() => {
                role = Some(args[i + 1].parse()?);
                i += 2;
            }
            other => return Err(format!("Unexpected argument: '{}'", other)),
        }
    }
    Ok((values, role))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::access::Permission;

    #[test]
    fn no_args_errors() {
        assert!(parse_args(&[]).is_err());
    }

    #[test]
    fn unknown_command_errors() {
        assert!(parse_args(&["frobnicate"]).is_err());
    }

    #[test]
    fn parse_list_and_tree() {
        assert_eq!(
            parse_args(&["list", "limits.json"]),
            Ok(Command::List {
                limits: "limits.json".into(),
                values: None
            })
        );
        assert_eq!(
            parse_args(&["tree", "limits.json", "--values", "values.json"]),
            Ok(Command::Tree {
                limits: "limits.json".into(),
                values: Some("values.json".into())
            })
        );
    }

    #[test]
    fn parse_get_defaults_to_operator() {
        assert_eq!(
            parse_args(&["get", "limits.json", "7"]),
            Ok(Command::Get {
                limits: "limits.json".into(),
                values: None,
                id: 7,
                role: Role::Operator
            })
        );
    }

    #[test]
    fn parse_get_with_flags() {
        assert_eq!(
            parse_args(&["get", "l.json", "7", "--values", "v.json", "--role", "engineer"]),
            Ok(Command::Get {
                limits: "l.json".into(),
                values: Some("v.json".into()),
                id: 7,
                role: Role::Engineer
            })
        );
    }

    #[test]
    fn parse_set() {
        assert_eq!(
            parse_args(&["set", "l.json", "v.json", "3", "42", "--role", "developer"]),
            Ok(Command::Set {
                limits: "l.json".into(),
                values: "v.json".into(),
                id: 3,
                value: "42".into(),
                role: Role::Developer
            })
        );
    }

    #[test]
    fn parse_check() {
        assert_eq!(
            parse_args(&["check", "l.json", "2", "write", "developer"]),
            Ok(Command::Check {
                limits: "l.json".into(),
                id: 2,
                permission: Permission::Write,
                role: Role::Developer
            })
        );
    }

    #[test]
    fn bad_id_errors() {
        assert!(parse_args(&["get", "l.json", "xyz"]).is_err());
        assert!(parse_args(&["check", "l.json", "-1", "read", "operator"]).is_err());
    }

    #[test]
    fn bad_role_errors() {
        assert!(parse_args(&["get", "l.json", "1", "--role", "wizard"]).is_err());
    }

    #[test]
    fn unexpected_argument_errors() {
        assert!(parse_args(&["list", "l.json", "extra"]).is_err());
    }
}

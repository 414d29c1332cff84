//! prm — the command-line shell over the parameter registry.
//!
//! # Usage
//!
//! ```text
//! prm list  limits.json --values values.json
//! prm tree  limits.json
//! prm get   limits.json 7 --role engineer
//! prm set   limits.json values.json 7 250 --role engineer
//! prm check limits.json 2 write developer
//! prm tui   limits.json --values values.json
//! ```
//!
//! Each invocation is one-shot: load the named documents, perform the
//! operation, and (for `set`) save the values document back in place.

mod tree;

use std::path::Path;
use std::process;

use param_registry_core::cli::{parse_args, USAGE};
use param_registry_core::command::Command;
use param_registry_core::{ParamRegistry, Value};


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("prm: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cmd) {
        eprintln!("prm: {}", e);
        process::exit(1);
    }
}


fn run(cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }

        Command::List { limits, values } => {
            let reg = load_registry(&limits, values.as_deref())?;
            print_list(&reg);
            Ok(())
        }

        Command::Tree { limits, values } => {
            let reg = load_registry(&limits, values.as_deref())?;
            print!("{}", tree::render_tree(&reg.snapshots()));
            Ok(())
        }

        Command::Get {
            limits,
            values,
            id,
            role,
        } => {
            let reg = load_registry(&limits, values.as_deref())?;
            let value = reg.get_cached(id, role).map_err(|e| e.to_string())?;
            println!("{}", value);
            Ok(())
        }

        Command::Set {
            limits,
            values,
            id,
            value,
            role,
        } => {
            let mut reg = load_registry(&limits, Some(&values))?;
            reg.set_cached(id, Value::parse_arg(&value), role)
                .map_err(|e| e.to_string())?;
            // The values document was loaded last, so it is the save template.
            reg.save(Path::new(&values)).map_err(|e| e.to_string())
        }

        Command::Check {
            limits,
            id,
            permission,
            role,
        } => {
            let reg = load_registry(&limits, None)?;
            if reg.check(id, permission, role) {
                println!("allowed");
            } else {
                println!("denied");
            }
            Ok(())
        }

        Command::Tui { limits, values } => {
            let reg = load_registry(&limits, values.as_deref())?;
            let mut tui = prm_tui::tui::Tui::new(reg.snapshots()).map_err(|e| e.to_string())?;
            tui.run().map_err(|e| e.to_string())
        }
    }
}


fn load_registry(limits: &str, values: Option<&str>) -> Result<ParamRegistry, String> {
    let mut reg = ParamRegistry::new();
    reg.load(Path::new(limits)).map_err(|e| e.to_string())?;
    if let Some(values) = values {
        reg.load(Path::new(values)).map_err(|e| e.to_string())?;
    }
    Ok(reg)
}


fn print_list(reg: &ParamRegistry) {
    println!("{:>6}  {:<30} {:>8}  {:<8} VALUE", "ID", "PATH", "LIMIT", "KIND");
    for entry in reg.entries() {
        println!(
            "{:>6}  {:<30} {:>8}  {:<8} {}",
            entry.id,
            entry.path,
            entry.limit.to_string(),
            entry.value.kind(),
            entry.value
        );
    }
}

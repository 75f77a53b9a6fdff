//! Command execution against a bound preference store.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;

use prefstore::{Backend, PreferenceStore, Snapshot, WriteError};

use crate::{Command, SystemReport};

/// Run one command. Write failures are reported on `err` and map to exit
/// status 1; only I/O on the terminal or files becomes an `Err`.
pub(crate) fn execute<B, O, E>(
    command: Command,
    prefs: &PreferenceStore<B>,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<ExitCode>
where
    B: Backend,
    O: Write,
    E: Write,
{
    match command {
        Command::Identity => {
            writeln!(out, "{}", prefs.identity())?;
        }
        Command::Get { key, default } => {
            writeln!(out, "{}", prefs.get(&key, &default))?;
        }
        Command::Put { key, value } => {
            if let Err(e) = prefs.put(&key, &value) {
                return report(err, &e);
            }
        }
        Command::Remove { key } => {
            if let Err(e) = prefs.remove(&key) {
                return report(err, &e);
            }
        }
        Command::List => {
            for (key, value) in prefs.snapshot().entries {
                writeln!(out, "{key}={value}")?;
            }
        }
        Command::Export { output } => {
            let json = prefs.snapshot().to_json()?;
            match output {
                Some(path) => std::fs::write(&path, json + "\n")
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let snapshot = Snapshot::from_json(&json)
                .with_context(|| format!("{} is not a prefstore export", file.display()))?;
            match prefs.import(&snapshot) {
                Ok(count) => writeln!(out, "imported {count} entries into {}", prefs.namespace())?,
                Err(e) => return report(err, &e),
            }
        }
        Command::Info => {
            out.write_all(SystemReport::collect().render().as_bytes())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report<E: Write>(err: &mut E, error: &WriteError) -> anyhow::Result<ExitCode> {
    writeln!(err, "error: {error}")?;
    Ok(ExitCode::from(1))
}

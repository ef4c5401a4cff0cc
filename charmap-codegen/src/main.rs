//! binary charmap compiler.
//!
//! Takes a path to a mapping file (or a toml plan listing several) and
//! writes the compiled conversion tables.

use std::{
    ffi::OsStr,
    io::Write,
    path::{Path, PathBuf},
};

use charmap_codegen::{generate_table, hex_dump, CodegenPlan, ErrorReport, OutputKind};
use miette::miette;
use write_charmaps::Table;

fn main() -> miette::Result<()> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(|e| ErrorReport::message(e.to_string()))?;

    if args.input.extension() == Some(OsStr::new("toml")) {
        return run_plan(&args.input);
    }

    let kind = if args.encoder || args.dump_transitions {
        OutputKind::Encoder
    } else {
        OutputKind::ExtendedAscii
    };
    let Some(table) = run_for_path(&args.input, kind)? else {
        return Ok(());
    };

    if args.dump_transitions {
        if let Table::StateMachine(states) = &table {
            let stdout = std::io::stdout();
            let mut locked = stdout.lock();
            states
                .dump_transitions(&mut locked)
                .and_then(|_| locked.flush())
                .map_err(|e| miette!("failed to write transitions: {e}"))?;
        }
    }

    let bytes = table.serialize();
    match &args.output {
        Some(target) => write_table(target, &bytes)?,
        None if !args.dump_transitions => print!("{}", hex_dump(&bytes)),
        None => (),
    }
    Ok(())
}

fn run_plan(path: &Path) -> miette::Result<()> {
    let contents = read_contents(path)?;
    let plan = CodegenPlan::from_toml(&contents)
        .map_err(|e| miette!("failed to parse plan: '{}'", e))?;

    let mut written = 0;
    for op in &plan.charmap {
        let Some(table) = run_for_path(&op.source, op.kind)? else {
            continue;
        };
        if let Some(parent) = op.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| miette!("failed to create directory '{}': {e}", parent.display()))?;
        }
        write_table(&op.target, &table.serialize())?;
        written += 1;
    }
    log::info!("wrote {written} of {} tables", plan.charmap.len());
    Ok(())
}

fn write_table(target: &Path, bytes: &[u8]) -> miette::Result<()> {
    log::info!("writing {} bytes to {}", bytes.len(), target.display());
    std::fs::write(target, bytes)
        .map_err(|e| miette!("error writing '{}': {}", target.display(), e))
}

fn read_contents(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ErrorReport::message(format!("error reading '{}': {}", path.display(), e)).into()
    })
}

/// Compile one mapping file, returning `None` if the charmap is unsupported.
fn run_for_path(path: &Path, kind: OutputKind) -> miette::Result<Option<Table>> {
    let contents = read_contents(path)?;
    let name = path.display().to_string();
    match generate_table(&contents, &name, kind) {
        Ok(table) => Ok(Some(table)),
        Err(e) if e.is_unsupported() => {
            log::warn!("skipping {name}: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into_report(path, contents).into()),
    }
}

mod flags {
    use super::PathBuf;

    xflags::xflags! {
        /// Compile legacy charmap files into conversion tables
        cmd args {
            /// A mapping file, or a toml plan listing several
            required input: PathBuf
            /// Write the compiled table to this file
            optional -o, --output output: PathBuf
            /// Build the Unicode to legacy encoding state machine
            optional --encoder
            /// Print the state machine's transitions
            optional --dump-transitions
        }
    }
}

// crates/cli/src/demos/mktemp.rs
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use posix_demos_core::{DemoConfig, Error, Result};
use tmpfile::{Presence, Template, probe, remove};

use crate::options::MktempOpts;
use crate::print::emit;

const HELD_PAYLOAD: &[u8] = b"written after unlink";

/// Create two files from the same template, report on each and unlink it.
pub fn run(opts: &MktempOpts, cfg: &DemoConfig, out: &mut dyn Write) -> Result<()> {
    let pattern = opts.template.as_deref().unwrap_or(cfg.template.as_path());
    let template = Template::new(pattern)?;

    emit(out, format_args!("trying to create first temp file..."))?;
    make_temp(&template, opts.hold, out)?;
    emit(out, format_args!("trying to create second temp file..."))?;
    make_temp(&template, opts.hold, out)
}

fn make_temp(template: &Template, hold: bool, out: &mut dyn Write) -> Result<()> {
    let (path, file) = template.create()?.into_parts();
    emit(out, format_args!("temp name = {}", path.display()))?;
    if !hold {
        drop(file);
        report(&path, out)?;
        return remove(&path);
    }

    report(&path, out)?;
    remove(&path)?;
    report(&path, out)?;
    let n = exercise_held(file)?;
    emit(out, format_args!("held handle still usable, read back {n} bytes"))
}

fn report(path: &Path, out: &mut dyn Write) -> Result<()> {
    match probe(path)? {
        Presence::Exists => emit(out, format_args!("file exists")),
        Presence::Missing => emit(out, format_args!("file doesn't exist")),
    }
}

fn exercise_held(mut file: File) -> Result<usize> {
    file.write_all(HELD_PAYLOAD)
        .and_then(|()| file.seek(SeekFrom::Start(0)))
        .map_err(|e| Error::io("write error", e))?;
    let mut back = Vec::new();
    file.read_to_end(&mut back)
        .map_err(|e| Error::io("read error", e))?;
    Ok(back.len())
}

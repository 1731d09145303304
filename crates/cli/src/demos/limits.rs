// crates/cli/src/demos/limits.rs
use std::io::Write;

use posix_demos_core::{Error, Result};
use resources::{LimitReport, enumerate, find, format_report, report, to_json};

use crate::options::LimitsOpts;
use crate::print::emit;

pub fn run(opts: &LimitsOpts, out: &mut dyn Write) -> Result<()> {
    let reports = collect(&opts.only)?;
    if opts.json {
        return emit(out, format_args!("{}", to_json(&reports)?));
    }
    for r in &reports {
        emit(out, format_args!("{}", format_report(r)))?;
    }
    Ok(())
}

fn collect(only: &[String]) -> Result<Vec<LimitReport>> {
    if only.is_empty() {
        return enumerate();
    }
    only.iter()
        .map(|name| {
            let kind = find(name).ok_or_else(|| Error::NotSupported(name.clone()))?;
            report(kind)
        })
        .collect()
}

//! `console-cleaner` command.
//!
//! All argument handling lives in the library so the two binaries behave
//! identically.

use anyhow::Result;
use console_cleaner::entry_point;

fn main() -> Result<()> {
    let code = entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}

//! Interactive loop.

use std::io::{self, BufRead, Write};

use tracing::info;

use super::Session;

const PROMPT: &str = "bus> ";
const INTRO: &str = "Bus network shell. Type \"help\" to list commands.";

/// Read lines from `input` and execute them until `exit` or end of input.
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{INTRO}")?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        for out in session.execute(&line) {
            writeln!(output, "{out}")?;
        }
        if session.is_finished() {
            return Ok(());
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    info!("end of input");
    Ok(())
}

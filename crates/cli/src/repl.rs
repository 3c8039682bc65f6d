//! Interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use runtime::Responder;
use tracing::debug;

pub const PROMPT: &str = "> ";

/// Whether `line` ends the session. Case-sensitive.
pub fn is_exit(line: &str) -> bool {
    line == "exit" || line == "quit"
}

/// Read lines from `input` until EOF or an exit command, answering each one.
///
/// Replies go to `out`; failed turns are reported on `err` and the loop
/// continues. Returns the number of lines sent to the responder.
pub async fn run(
    mut input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    responder: &impl Responder,
) -> io::Result<usize> {
    let mut turns = 0;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if is_exit(line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        turns += 1;
        match responder.respond(line).await {
            Ok(reply) => writeln!(out, "{reply}")?,
            Err(e) => {
                debug!(error = %e, "turn failed");
                writeln!(err, "Error: {e}")?;
            }
        }
    }

    Ok(turns)
}

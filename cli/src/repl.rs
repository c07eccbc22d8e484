use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter command and timer name (e.g., start Timer1): ";

/// Print the prompt and read one line. `None` at end of input.
pub fn readline() -> Result<Option<String>, String> {
    let mut stdout = io::stdout();
    write!(stdout, "{PROMPT}").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

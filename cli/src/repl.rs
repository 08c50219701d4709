use std::io::Write;

/// Prompt and read one line from stdin. Returns `None` at end of input.
pub fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "tactic> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let bytes = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok((bytes != 0).then_some(buffer))
}

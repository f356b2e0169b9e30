use std::io::{BufRead, Write};

use anyhow::{Result, anyhow};

use crate::aggregate::is_team_key;

/// Keep asking until a well-formed team key comes back. EOF on the input is
/// an error: the run cannot continue without a target team.
pub fn prompt_team_key(input: &mut dyn BufRead, output: &mut dyn Write) -> Result<String> {
    loop {
        write!(output, "Enter the target team (e.g. frc1710): ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Err(anyhow!("input closed before a team key was provided"));
        };
        let trimmed = line.trim();
        if is_team_key(trimmed) {
            return Ok(trimmed.to_string());
        }
        writeln!(
            output,
            "Invalid team format. Use 'frc' followed by the team number, e.g. frc254."
        )?;
    }
}

pub fn prompt_yes_no(question: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<bool> {
    loop {
        write!(output, "{question} [y/n]: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Err(anyhow!("input closed before '{question}' was answered"));
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

fn read_line(input: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 { Ok(None) } else { Ok(Some(line)) }
}

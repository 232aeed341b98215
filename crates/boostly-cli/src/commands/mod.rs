pub mod config;
pub mod data;
pub mod stats;
pub mod task;
pub mod timer;

use std::io::{BufRead, Write};

/// Ask a yes/no question on the terminal. Anything but "y"/"yes" is no.
pub fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

//! Interactive page-count prompt

use std::io::{BufRead, Write};

use crate::config::RankConfig;
use crate::error::{RankError, Result};

/// Ask for the number of pages until an answer within the configured bounds
/// arrives
///
/// Out-of-range and non-numeric answers print a hint and ask again. Running
/// out of input is an error.
pub fn prompt_page_count<R, W>(input: &mut R, output: &mut W, config: &RankConfig) -> Result<usize>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut line = String::new();
    loop {
        write!(output, "How many pages does your web have? ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(RankError::Input(
                "input ended before a page count was given".to_string(),
            ));
        }

        let answer = line.trim();
        match answer.parse::<i64>() {
            Err(_) => writeln!(output, "\"{answer}\" is not a whole number, try again.")?,
            Ok(n) if n < config.min_pages as i64 => writeln!(
                output,
                "Your web has too few pages, try {} or more.",
                config.min_pages
            )?,
            Ok(n) if n > config.max_pages as i64 => writeln!(
                output,
                "Your web has too many pages, try {} or less.",
                config.max_pages
            )?,
            Ok(n) => return Ok(n as usize),
        }
    }
}

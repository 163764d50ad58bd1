use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "zillow-photos")]
#[command(about = "Prints the photo URLs of a Zillow listing as a JSON array")]
#[command(version)]
pub struct Args {
    /// Listing URL (prompted for on stdin when omitted)
    pub url: Option<String>,
}

impl Args {
    /// The URL from the command line, or one line read from `input` after
    /// writing a prompt to `output`
    pub fn resolve_url<R: BufRead, W: Write>(self, input: R, output: W) -> io::Result<String> {
        match self.url {
            Some(url) => Ok(url),
            None => prompt_for_url(input, output),
        }
    }
}

/// Asks for a URL interactively. End of input yields an empty string.
pub fn prompt_for_url<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<String> {
    write!(output, "Enter Zillow URL: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

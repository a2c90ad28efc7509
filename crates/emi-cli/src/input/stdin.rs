use serde_json::Value;
use std::io::{self, Read};

/// Loan request piped on stdin, e.g. `echo '{...}' | emi calculate`.
///
/// An interactive terminal or blank input means no request was piped.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut request = String::new();
    io::stdin().read_to_string(&mut request)?;
    match request.trim() {
        "" => Ok(None),
        body => Ok(Some(serde_json::from_str(body)?)),
    }
}

use std::io::{BufRead, Write};

use tracing::debug;

use crate::date::CalendarDate;
use crate::error::Result;

/// Ask for a date on `output` until a line from `input` parses.
/// End of input is an error.
pub fn prompt_date<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<CalendarDate> {
    let mut line = String::new();
    loop {
        write!(output, "Enter a date (MM/DD/YYYY): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no date entered").into());
        }
        match line.parse() {
            Ok(date) => return Ok(date),
            Err(e) => {
                debug!(input = line.trim(), "rejected date");
                writeln!(output, "{}", e)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn reasks_until_valid() {
        let mut input = "tomorrow\n13/01/2000\n02/29/2004\n".as_bytes();
        let mut output = Vec::new();
        let date = prompt_date(&mut input, &mut output).unwrap();
        assert_eq!(date, CalendarDate::new(2, 29, 2004).unwrap());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Enter a date").count(), 3);
        assert_eq!(text.matches("formatted incorrectly").count(), 2);
    }

    #[test]
    fn eof_is_an_error() {
        let mut input = "".as_bytes();
        let mut output = Vec::new();
        assert!(matches!(prompt_date(&mut input, &mut output), Err(Error::Io(_))));
    }
}

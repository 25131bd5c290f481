//! Console host functions: an interactive prompt and a line printer.

use std::io::{BufRead, Write};

use rvm_core::error::{VmError, VmResult};
use rvm_core::host::{HostFunction, OutputSink};
use rvm_core::Value;
use tracing::debug;

/// Turn a line of user input into a value: integers become `Number`,
/// anything else stays `Text` (without the line terminator).
pub fn parse_input(line: &str) -> Value {
    let trimmed = line.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(trimmed.to_string()),
    }
}

/// Writes its first argument as a prompt, then blocks for one line of input.
pub struct Prompt<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// `echo` receives the prompt text; it is kept apart from the program's
    /// output sink so prompts never mix with printed results.
    pub fn new(input: R, echo: W) -> Self {
        Prompt { input, echo }
    }
}

impl<R: BufRead, W: Write> HostFunction for Prompt<R, W> {
    fn name(&self) -> &str {
        "prompt"
    }

    fn call(&mut self, args: &[Value]) -> VmResult<Option<Value>> {
        if let Some(message) = args.first() {
            write!(self.echo, "{}", message)?;
            self.echo.flush()?;
        }

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(VmError::Host {
                name: self.name().to_string(),
                message: "end of input".to_string(),
            });
        }
        let value = parse_input(&line);
        debug!(kind = value.kind(), "prompt answered");
        Ok(Some(value))
    }
}

/// Writes its arguments, space separated, as one line.
pub struct PrintLine<O> {
    sink: O,
}

impl<O: OutputSink> PrintLine<O> {
    pub fn new(sink: O) -> Self {
        PrintLine { sink }
    }
}

impl<O: OutputSink> HostFunction for PrintLine<O> {
    fn name(&self) -> &str {
        "print"
    }

    fn call(&mut self, args: &[Value]) -> VmResult<Option<Value>> {
        let line = args
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.sink.write_line(&line)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvm_core::Transcript;
    use std::io::Cursor;

    #[test]
    fn input_parsing() {
        assert_eq!(parse_input("5\n"), Value::Number(5));
        assert_eq!(parse_input("  -10\r\n"), Value::Number(-10));
        assert_eq!(parse_input("exit\n"), Value::from("exit"));
        assert_eq!(parse_input("1.5"), Value::from("1.5"));
    }

    #[test]
    fn prompt_echoes_message_and_reads_line() {
        let mut echo = Vec::new();
        let mut prompt = Prompt::new(Cursor::new("7\nrest\n"), &mut echo);
        let value = prompt.call(&[Value::from("n? ")]).expect("prompt failed");
        assert_eq!(value, Some(Value::Number(7)));
        let value = prompt.call(&[]).expect("prompt failed");
        assert_eq!(value, Some(Value::from("rest")));
        drop(prompt);
        assert_eq!(echo, b"n? ".to_vec());
    }

    #[test]
    fn prompt_at_end_of_input_fails() {
        let mut prompt = Prompt::new(Cursor::new(""), std::io::sink());
        assert!(matches!(prompt.call(&[]), Err(VmError::Host { .. })));
    }

    #[test]
    fn print_joins_arguments() {
        let out = Transcript::new();
        let mut print = PrintLine::new(out.clone());
        print
            .call(&[Value::Number(1), Value::Boolean(true), Value::from("x")])
            .expect("print failed");
        print.call(&[]).expect("print failed");
        assert_eq!(out.lines(), vec!["1 true x", ""]);
    }
}

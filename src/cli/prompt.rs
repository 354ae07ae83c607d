use std::io::{
    BufRead,
    Write
};

use tracing::debug;

use crate::cli::clierror::CliError;
use crate::expression::expression::Expression;
use crate::expression::parser::ExpressionParser;

/// 互動式輸入：提示、讀一行、驗證，不合法時重新提示。
///
/// 只有 I/O 錯誤或輸入結束（EOF）會回傳錯誤。
pub struct Prompter<R, W> {
    reader: R,
    writer: W
}

impl<R, W> Prompter<R, W> where
    R: BufRead,
    W: Write {
    pub fn new(reader: R, writer: W) -> Prompter<R, W> {
        Prompter { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    pub fn say(&mut self, message: &str) -> Result<(), CliError> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }
        Ok(line.trim().to_owned())
    }

    pub fn read_float(&mut self, prompt: &str) -> Result<f64, CliError> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => self.say("Please enter a valid number.")?
            }
        }
    }

    /// 讀取 >= `min_value` 的整數。
    pub fn read_count(&mut self, prompt: &str, min_value: usize) -> Result<usize, CliError> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i64>() {
                Ok(value) if value >= 0 && value as u64 >= min_value as u64 => return Ok(value as usize),
                Ok(_) => self.say(&format!("Please enter an integer greater than or equal to {}.", min_value))?,
                Err(_) => self.say("Please enter a valid integer.")?
            }
        }
    }

    /// 重複讀取直到輸入大於 `lower`。
    pub fn read_upper_bound(&mut self, prompt: &str, lower: f64) -> Result<f64, CliError> {
        loop {
            let upper = self.read_float(prompt)?;
            if upper > lower {
                return Ok(upper);
            }
            self.say("Upper bound must be greater than lower bound.")?;
        }
    }

    pub fn read_expression(&mut self,
                           prompt: &str,
                           parser: &ExpressionParser) -> Result<Expression, CliError> {
        loop {
            let line = self.read_line(prompt)?;
            match parser.parse(&line) {
                Ok(expression) => return Ok(expression),
                Err(error) => {
                    debug!(input = %line, %error, "expression rejected");
                    self.say(&format!("Error with function input: {}", error))?;
                    self.say("Please try again with a valid mathematical expression.")?;
                }
            }
        }
    }

    /// `y` / `Y` 為肯定，其餘皆為否定。
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        let line = self.read_line(prompt)?;
        Ok(line.eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_inner().1).unwrap()
    }

    #[test]
    fn float_reprompts_on_garbage() {
        let mut p = prompter("abc\ninf\n2.5\n");
        assert_eq!(p.read_float("a: ").unwrap(), 2.5);
        assert_eq!(output(p).matches("Please enter a valid number.").count(), 2);
    }

    #[test]
    fn count_enforces_minimum() {
        let mut p = prompter("0\n-3\nten\n4\n");
        assert_eq!(p.read_count("n: ", 1).unwrap(), 4);
        let text = output(p);
        assert_eq!(text.matches("greater than or equal to 1").count(), 2);
        assert_eq!(text.matches("Please enter a valid integer.").count(), 1);
    }

    #[test]
    fn upper_bound_must_exceed_lower() {
        let mut p = prompter("1\n0.5\n3\n");
        assert_eq!(p.read_upper_bound("b: ", 1.0).unwrap(), 3.0);
        assert_eq!(output(p).matches("Upper bound must be greater than lower bound.").count(), 2);
    }

    #[test]
    fn expression_reprompts_until_valid() {
        let mut p = prompter("x +\nsin(x)\n");
        let expression = p.read_expression("f: ", &ExpressionParser::default()).unwrap();
        assert_eq!(expression.source(), "sin(x)");
        assert!(output(p).contains("Error with function input"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("");
        assert!(matches!(p.read_float("a: "), Err(CliError::EndOfInput)));
    }

    #[test]
    fn confirm_accepts_only_y() {
        assert!(prompter("Y\n").confirm("? ").unwrap());
        assert!(!prompter("yes\n").confirm("? ").unwrap());
    }
}

//! Line-oriented drawing script parser.
//!
//! One command per line, whitespace-separated parameters:
//!
//! | command  | params            |
//! |----------|-------------------|
//! | `white`  |                   |
//! | `green`  |                   |
//! | `update` |                   |
//! | `bgrect` | `x0 y0 x1 y1`     |
//! | `figure` | `x y`             |
//! | `move`   | `x y`             |
//! | `reset`  |                   |
//!
//! Any bad line rejects the whole script. Parameters beyond the required
//! count are ignored.

use std::io::BufRead;
use std::num::ParseFloatError;

use thiserror::Error;

use painter_core::{Operation, Point, Rect};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: empty line")]
    EmptyLine { line: usize },

    #[error("line {line}: unknown command: {command}")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: insufficient number of parameters for {command}: have: {have}, want: {want}")]
    InsufficientParams {
        line: usize,
        command: &'static str,
        have: usize,
        want: usize,
    },

    #[error("line {line}: invalid number {token:?}: {source}")]
    InvalidNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// 1-based line the error was found on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyLine { line }
            | ParseError::UnknownCommand { line, .. }
            | ParseError::InsufficientParams { line, .. }
            | ParseError::InvalidNumber { line, .. } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}

/// Stateless script parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptParser;

impl ScriptParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every line of `reader` into operations, in order.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<Operation>, ParseError> {
        let mut ops = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            ops.push(parse_line(&line, idx + 1)?);
        }
        log::debug!("parsed {} operations", ops.len());
        Ok(ops)
    }

    pub fn parse_str(&self, text: &str) -> Result<Vec<Operation>, ParseError> {
        self.parse(text.as_bytes())
    }
}

/// Parse one command line. `line_no` is only used for error reporting.
pub fn parse_line(text: &str, line_no: usize) -> Result<Operation, ParseError> {
    let mut fields = text.split_whitespace();
    let Some(command) = fields.next() else {
        return Err(ParseError::EmptyLine { line: line_no });
    };
    let params: Vec<&str> = fields.collect();

    let op = match command {
        "white" => Operation::WhiteFill,
        "green" => Operation::GreenFill,
        "update" => Operation::Update,
        "reset" => Operation::Reset,
        "bgrect" => {
            let [x0, y0, x1, y1] = numbers::<4>("bgrect", &params, line_no)?;
            Operation::BackgroundRect(Rect::new(x0, y0, x1, y1))
        }
        "figure" => {
            let [x, y] = numbers::<2>("figure", &params, line_no)?;
            Operation::Figure(Point::new(x, y))
        }
        "move" => {
            let [x, y] = numbers::<2>("move", &params, line_no)?;
            Operation::Move(Point::new(x, y))
        }
        other => {
            return Err(ParseError::UnknownCommand {
                line: line_no,
                command: other.to_string(),
            })
        }
    };
    Ok(op)
}

fn numbers<const N: usize>(
    command: &'static str,
    params: &[&str],
    line: usize,
) -> Result<[f64; N], ParseError> {
    if params.len() < N {
        return Err(ParseError::InsufficientParams {
            line,
            command,
            have: params.len(),
            want: N,
        });
    }

    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(params) {
        *slot = token.parse().map_err(|source| ParseError::InvalidNumber {
            line,
            token: token.to_string(),
            source,
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn parse(text: &str) -> Result<Vec<Operation>, ParseError> {
        ScriptParser::new().parse_str(text)
    }

    #[test]
    fn test_one_operation() {
        assert_eq!(parse("white").unwrap(), vec![Operation::WhiteFill]);
    }

    #[test]
    fn test_all_operations() {
        let input = "white \n green \n update \n bgrect 0.5 0.75 0.95 1 \n figure 0.01 0.01 \n move 0.69 0.69 \n reset";
        assert_eq!(
            parse(input).unwrap(),
            vec![
                Operation::WhiteFill,
                Operation::GreenFill,
                Operation::Update,
                Operation::BackgroundRect(Rect::new(0.5, 0.75, 0.95, 1.0)),
                Operation::Figure(Point::new(0.01, 0.01)),
                Operation::Move(Point::new(0.69, 0.69)),
                Operation::Reset,
            ]
        );
    }

    #[test]
    fn test_trailing_newline_is_not_an_empty_line() {
        assert_eq!(
            parse("green\nupdate\n").unwrap(),
            vec![Operation::GreenFill, Operation::Update]
        );
        assert_eq!(parse("white\r\nupdate\r\n").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_line_fails_whole_batch() {
        let err = parse("white \n  \n green").unwrap_err();
        assert!(matches!(err, ParseError::EmptyLine { line: 2 }));
    }

    #[test]
    fn test_insufficient_params() {
        let err = parse("bgrect 0.5 0.75").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InsufficientParams { line: 1, command: "bgrect", have: 2, want: 4 }
        ));
        assert!(matches!(
            parse("figure 0.5").unwrap_err(),
            ParseError::InsufficientParams { want: 2, .. }
        ));
        assert!(matches!(
            parse("white\nmove").unwrap_err(),
            ParseError::InsufficientParams { line: 2, have: 0, .. }
        ));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("badCommand").unwrap_err();
        match err {
            ParseError::UnknownCommand { line, command } => {
                assert_eq!(line, 1);
                assert_eq!(command, "badCommand");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_number_keeps_source() {
        let err = parse("figure 0.5 abc").unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert!(err.source().is_some());
        match err {
            ParseError::InvalidNumber { token, .. } => assert_eq!(token, "abc"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_params_ignored() {
        assert_eq!(
            parse("move 0.1 0.2 0.3").unwrap(),
            vec![Operation::Move(Point::new(0.1, 0.2))]
        );
    }

    #[test]
    fn test_empty_input_is_empty_batch() {
        assert!(parse("").unwrap().is_empty());
    }
}

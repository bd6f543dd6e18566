use std::fmt;

/// Errors produced when parsing a chemical formula.
///
/// Every variant carries the formula text with whitespace removed; positions
/// are character indices into that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// A bracket was closed by the wrong kind of bracket, or never closed
    /// (`close` is `None`).
    MismatchedParenthesis {
        text: String,
        open: usize,
        close: Option<usize>,
    },
    /// A lowercase letter appeared where an element symbol or group must start.
    InvalidSymbol { text: String, pos: usize, ch: char },
    /// An unrecognized character, a closing bracket with no open group, or a
    /// multiplier with nothing before it.
    InvalidCharacter { text: String, pos: usize, ch: char },
    /// A multiplier that is malformed, zero, or too large.
    InvalidMultiplier {
        text: String,
        pos: usize,
        token: String,
    },
    /// An integer quantity overflowed while scaling or summing.
    QuantityOverflow { text: String, pos: usize },
}

impl FormulaError {
    /// The whitespace-stripped formula the error refers to.
    pub fn text(&self) -> &str {
        match self {
            Self::MismatchedParenthesis { text, .. }
            | Self::InvalidSymbol { text, .. }
            | Self::InvalidCharacter { text, .. }
            | Self::InvalidMultiplier { text, .. }
            | Self::QuantityOverflow { text, .. } => text,
        }
    }

    /// The position the error is anchored at. For bracket errors this is the
    /// closing bracket when there is one, otherwise the opener.
    pub fn position(&self) -> usize {
        match self {
            Self::MismatchedParenthesis { open, close, .. } => close.unwrap_or(*open),
            Self::InvalidSymbol { pos, .. }
            | Self::InvalidCharacter { pos, .. }
            | Self::InvalidMultiplier { pos, .. }
            | Self::QuantityOverflow { pos, .. } => *pos,
        }
    }

    /// Two-line diagnostic: the formula, then `^` under each offending
    /// position.
    pub fn caret(&self) -> String {
        let marks: Vec<usize> = match self {
            Self::MismatchedParenthesis { open, close, .. } => {
                std::iter::once(*open).chain(*close).collect()
            }
            _ => vec![self.position()],
        };
        let width = marks.iter().max().map_or(0, |&m| m + 1);
        let pointer: String = (0..width)
            .map(|i| if marks.contains(&i) { '^' } else { ' ' })
            .collect();
        format!("{}\n{}", self.text(), pointer)
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedParenthesis {
                text,
                open,
                close: Some(close),
            } => write!(
                f,
                "mismatched parenthesis in '{text}': opened at position {open}, closed at position {close}"
            ),
            Self::MismatchedParenthesis {
                text,
                open,
                close: None,
            } => write!(f, "unclosed parenthesis at position {open} in '{text}'"),
            Self::InvalidSymbol { text, pos, ch } => write!(
                f,
                "invalid element symbol '{ch}' at position {pos} in '{text}': symbols start with an uppercase letter"
            ),
            Self::InvalidCharacter { text, pos, ch } => write!(
                f,
                "unexpected character '{ch}' at position {pos} in '{text}': expected an element symbol or parenthesis"
            ),
            Self::InvalidMultiplier { text, pos, token } => {
                write!(f, "invalid multiplier '{token}' at position {pos} in '{text}'")
            }
            Self::QuantityOverflow { text, pos } => {
                write!(f, "element count overflow at position {pos} in '{text}'")
            }
        }
    }
}

impl std::error::Error for FormulaError {}

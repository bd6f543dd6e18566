use std::collections::btree_map::Entry;

use crate::formula::error::FormulaError;
use crate::formula::FormulaMap;
use crate::quantity::Quantity;

/// An open bracket group waiting for its closer.
struct Group {
    /// Accumulator of the enclosing level, restored when the group closes.
    outer: FormulaMap,
    open: usize,
    close: usize,
}

/// Parses whitespace-free formula characters.
///
/// Nested groups are kept on an explicit stack rather than the call stack,
/// so nesting depth is bounded only by memory.
pub(crate) fn parse(chars: &[char]) -> Result<FormulaMap, FormulaError> {
    let partners = match_brackets(chars);
    let mut stack: Vec<Group> = Vec::new();
    let mut acc = FormulaMap::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if let Some(expected) = closing_for(ch) {
            let close = partners[i].ok_or_else(|| mismatched(chars, i, None))?;
            if chars[close] != expected {
                return Err(mismatched(chars, i, Some(close)));
            }
            stack.push(Group {
                outer: std::mem::take(&mut acc),
                open: i,
                close,
            });
            i += 1;
        } else if is_closing(ch) {
            let group = match stack.pop() {
                Some(group) if group.close == i => group,
                _ => return Err(invalid_character(chars, i)),
            };
            let inner = std::mem::replace(&mut acc, group.outer);
            let (multiplier, next) = read_multiplier(chars, i + 1)?;
            for (symbol, quantity) in inner {
                let scaled = quantity
                    .checked_mul(multiplier)
                    .ok_or_else(|| overflow(chars, i))?;
                if !accumulate(&mut acc, symbol, scaled) {
                    return Err(overflow(chars, i));
                }
            }
            i = next;
        } else if ch.is_ascii_uppercase() {
            let (symbol, after) = read_symbol(chars, i);
            let (multiplier, next) = read_multiplier(chars, after)?;
            if !accumulate(&mut acc, symbol, multiplier) {
                return Err(overflow(chars, i));
            }
            i = next;
        } else if ch.is_ascii_lowercase() {
            return Err(FormulaError::InvalidSymbol {
                text: chars.iter().collect(),
                pos: i,
                ch,
            });
        } else {
            return Err(invalid_character(chars, i));
        }
    }

    if let Some(group) = stack.first() {
        return Err(mismatched(chars, group.open, None));
    }
    Ok(acc)
}

fn closing_for(ch: char) -> Option<char> {
    match ch {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn is_closing(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}')
}

/// For every opening bracket, the index of the closer at which the bracket
/// depth returns to zero. Bracket kinds are ignored here; any opener raises
/// the depth and any closer lowers it.
fn match_brackets(chars: &[char]) -> Vec<Option<usize>> {
    let mut partners = vec![None; chars.len()];
    let mut open = Vec::new();
    for (i, &ch) in chars.iter().enumerate() {
        if closing_for(ch).is_some() {
            open.push(i);
        } else if is_closing(ch) {
            if let Some(start) = open.pop() {
                partners[start] = Some(i);
            }
        }
    }
    partners
}

/// Reads the symbol starting at `start`, which must be an uppercase letter.
/// Only a lowercase letter extends it. Returns the symbol and the index
/// after it.
fn read_symbol(chars: &[char], start: usize) -> (String, usize) {
    let mut symbol = String::with_capacity(2);
    symbol.push(chars[start]);
    match chars.get(start + 1) {
        Some(&next) if next.is_ascii_lowercase() => {
            symbol.push(next);
            (symbol, start + 2)
        }
        _ => (symbol, start + 1),
    }
}

/// Reads an optional multiplier at `start`: a run of digits with at most one
/// decimal point. Absent means `1`.
fn read_multiplier(chars: &[char], start: usize) -> Result<(Quantity, usize), FormulaError> {
    let mut end = start;
    let mut seen_point = false;
    while let Some(&ch) = chars.get(end) {
        if ch.is_ascii_digit() {
            end += 1;
        } else if ch == '.' && !seen_point {
            seen_point = true;
            end += 1;
        } else {
            break;
        }
    }
    if end == start {
        return Ok((Quantity::ONE, start));
    }

    let token: String = chars[start..end].iter().collect();
    let value = if seen_point {
        token.parse::<f64>().ok().and_then(Quantity::decimal)
    } else {
        token.parse::<u64>().ok().map(Quantity::Integer)
    };

    match value {
        Some(q) if !q.is_zero() => Ok((q, end)),
        _ => Err(FormulaError::InvalidMultiplier {
            text: chars.iter().collect(),
            pos: start,
            token,
        }),
    }
}

/// Adds `quantity` to the entry for `symbol`. Returns false on integer
/// overflow.
fn accumulate(acc: &mut FormulaMap, symbol: String, quantity: Quantity) -> bool {
    match acc.entry(symbol) {
        Entry::Occupied(mut entry) => match entry.get().checked_add(quantity) {
            Some(sum) => {
                *entry.get_mut() = sum;
                true
            }
            None => false,
        },
        Entry::Vacant(entry) => {
            entry.insert(quantity);
            true
        }
    }
}

fn invalid_character(chars: &[char], pos: usize) -> FormulaError {
    FormulaError::InvalidCharacter {
        text: chars.iter().collect(),
        pos,
        ch: chars[pos],
    }
}

fn mismatched(chars: &[char], open: usize, close: Option<usize>) -> FormulaError {
    FormulaError::MismatchedParenthesis {
        text: chars.iter().collect(),
        open,
        close,
    }
}

fn overflow(chars: &[char], pos: usize) -> FormulaError {
    FormulaError::QuantityOverflow {
        text: chars.iter().collect(),
        pos,
    }
}

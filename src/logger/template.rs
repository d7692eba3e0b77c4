//! Positional template rendering
//!
//! Supports `{N}` placeholders (zero based, reusable, any order), an optional
//! alignment `{N,W}` (pad to `W` chars, right-aligned, left-aligned when `W`
//! is negative) and the `{{` / `}}` escapes. Format strings (`{N:x}`) and
//! anything else inside braces are rejected.

use std::fmt::{Display, Write};

use crate::error::{LoggerError, Result};

/// Widest alignment accepted in `{N,W}`
const MAX_ALIGNMENT: usize = 1_000_000;

/// Substitute `args` into `template`
pub fn render(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut body = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(LoggerError::Format(format!(
                        "unterminated placeholder at byte {}",
                        pos
                    )));
                }

                push_placeholder(&mut out, &body, pos, args)?;
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(LoggerError::Format(format!(
                        "unmatched '}}' at byte {}",
                        pos
                    )));
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Render one `N` or `N,W` placeholder body into `out`
fn push_placeholder(
    out: &mut String,
    body: &str,
    pos: usize,
    args: &[&dyn Display],
) -> Result<()> {
    let invalid =
        || LoggerError::Format(format!("invalid placeholder {{{}}} at byte {}", body, pos));

    if body.contains(':') {
        return Err(LoggerError::Format(format!(
            "format strings are not supported in {{{}}} at byte {}",
            body, pos
        )));
    }

    let (index, alignment) = match body.split_once(',') {
        Some((index, width)) => {
            let width: i64 = width.trim().parse().map_err(|_| invalid())?;
            (index, Some(width))
        }
        None => (body, None),
    };

    let index: usize = index.trim().parse().map_err(|_| invalid())?;
    let arg = args.get(index).ok_or_else(|| {
        LoggerError::Format(format!(
            "placeholder {{{}}} but only {} argument(s) given",
            index,
            args.len()
        ))
    })?;

    let Some(width) = alignment else {
        write!(out, "{}", arg)?;
        return Ok(());
    };

    let pad = usize::try_from(width.unsigned_abs()).map_err(|_| invalid())?;
    if pad > MAX_ALIGNMENT {
        return Err(LoggerError::Format(format!(
            "alignment {} exceeds {} at byte {}",
            width, MAX_ALIGNMENT, pos
        )));
    }
    if width < 0 {
        write!(out, "{:<pad$}", arg.to_string(), pad = pad)?;
    } else {
        write!(out, "{:>pad$}", arg.to_string(), pad = pad)?;
    }
    Ok(())
}

use std::fmt;

/// Errors that can occur during decoding.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a byte outside the alphabet, or padding in a
    /// position the encoder never produces
    InvalidCharacter {
        char: char,
        position: usize,
        input: String,
    },
    /// The input length is nonzero and not a multiple of eight
    InvalidLength { actual: usize },
    /// The engine's address space cannot grow far enough for this call
    OutOfMemory { requested_pages: usize },
}

/// Errors that can occur during encoding.
///
/// Only the linear-memory engine can fail to encode, and only by running
/// out of address space. The table-driven edition is total.
#[derive(Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The engine's address space cannot grow far enough for this call
    OutOfMemory { requested_pages: usize },
}

impl DecodeError {
    /// Create an InvalidCharacter error with display context.
    ///
    /// `position` is a byte offset into `input`; the offending character
    /// is recovered from it.
    pub(crate) fn invalid_character(position: usize, input: &str) -> Self {
        let char = input
            .get(position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);

        // Truncate long inputs
        let display_input = if input.chars().count() > 60 {
            format!("{}...", input.chars().take(60).collect::<String>())
        } else {
            input.to_string()
        };

        DecodeError::InvalidCharacter {
            char,
            position,
            input: display_input,
        }
    }

    pub(crate) fn invalid_length(actual: usize) -> Self {
        DecodeError::InvalidLength { actual }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            DecodeError::InvalidCharacter {
                char: c,
                position,
                input,
            } => {
                if use_color {
                    writeln!(
                        f,
                        "\x1b[1;31merror:\x1b[0m invalid character '{}' at position {}",
                        c, position
                    )?;
                } else {
                    writeln!(
                        f,
                        "error: invalid character '{}' at position {}",
                        c, position
                    )?;
                }
                writeln!(f)?;

                // Show input with caret pointing at error position,
                // clamped to the truncated display width
                let char_position = input
                    .get(..*position)
                    .map(|prefix| prefix.chars().count())
                    .unwrap_or_else(|| input.chars().count());
                writeln!(f, "  {}", input)?;
                write!(f, "  {}", " ".repeat(char_position))?;
                if use_color {
                    writeln!(f, "\x1b[1;31m^\x1b[0m")?;
                } else {
                    writeln!(f, "^")?;
                }
                writeln!(f)?;

                if use_color {
                    write!(
                        f,
                        "\x1b[1;36mhint:\x1b[0m valid characters: A-Z, a-z, 2-7, and trailing '='"
                    )?;
                } else {
                    write!(f, "hint: valid characters: A-Z, a-z, 2-7, and trailing '='")?;
                }
                Ok(())
            }
            DecodeError::InvalidLength { actual } => {
                if use_color {
                    writeln!(f, "\x1b[1;31merror:\x1b[0m invalid length for decode")?;
                } else {
                    writeln!(f, "error: invalid length for decode")?;
                }
                writeln!(f)?;
                writeln!(f, "  input is {} bytes, expected a multiple of 8", actual)?;
                writeln!(f)?;
                if use_color {
                    write!(
                        f,
                        "\x1b[1;36mhint:\x1b[0m check for truncated input or missing '=' padding"
                    )?;
                } else {
                    write!(f, "hint: check for truncated input or missing '=' padding")?;
                }
                Ok(())
            }
            DecodeError::OutOfMemory { requested_pages } => {
                write_out_of_memory(f, use_color, *requested_pages)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::OutOfMemory { requested_pages } => {
                write_out_of_memory(f, should_use_color(), *requested_pages)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

fn write_out_of_memory(
    f: &mut fmt::Formatter<'_>,
    use_color: bool,
    requested_pages: usize,
) -> fmt::Result {
    if use_color {
        writeln!(
            f,
            "\x1b[1;31merror:\x1b[0m cannot grow codec memory to {} pages",
            requested_pages
        )?;
        write!(
            f,
            "\n\x1b[1;36mhint:\x1b[0m the input is too large for the engine's address space"
        )
    } else {
        writeln!(
            f,
            "error: cannot grow codec memory to {} pages",
            requested_pages
        )?;
        write!(
            f,
            "\nhint: the input is too large for the engine's address space"
        )
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stderr is a terminal
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_character_display() {
        let err = DecodeError::invalid_character(4, "MZXW_YTB");
        let display = format!("{}", err);

        assert!(display.contains("invalid character '_' at position 4"));
        assert!(display.contains("MZXW_YTB"));
        assert!(display.contains("^"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn invalid_character_truncates_long_input() {
        let input = "A".repeat(200) + "_";
        let err = DecodeError::invalid_character(200, &input);

        match &err {
            DecodeError::InvalidCharacter { char, input, .. } => {
                assert_eq!(*char, '_');
                assert_eq!(input.len(), 63); // 60 chars + "..."
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Caret position falls past the truncated display; formatting
        // must still not panic
        let _ = format!("{}", err);
    }

    #[test]
    fn invalid_character_on_non_ascii_input() {
        let err = DecodeError::invalid_character(2, "MZ\u{00e9}XW6YQ");
        match err {
            DecodeError::InvalidCharacter { char, position, .. } => {
                assert_eq!(char, '\u{00e9}');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn invalid_length_display() {
        let err = DecodeError::invalid_length(13);
        let display = format!("{}", err);

        assert!(display.contains("invalid length"));
        assert!(display.contains("13 bytes"));
        assert!(display.contains("multiple of 8"));
    }

    #[test]
    fn out_of_memory_display() {
        let decode = DecodeError::OutOfMemory {
            requested_pages: 70000,
        };
        let encode = EncodeError::OutOfMemory {
            requested_pages: 70000,
        };

        assert!(format!("{}", decode).contains("70000 pages"));
        assert!(format!("{}", encode).contains("70000 pages"));
    }
}

/// Lexer state. Escapes are handled with one byte of lookahead from
/// `Normal`, so no dedicated escape state is needed.
enum State {
    Normal,
    /// Inside a double-quoted span; characters are taken verbatim. Quoted
    /// filenames are emitted by the TASKING compiler and are not standard
    /// make syntax.
    Quoted,
}

/// Split the content of a dependency file into decoded path tokens.
///
/// A dependency file uses Makefile syntax. This is not a perfect parser, but
/// it is enough for the prerequisite lists compilers actually emit: tokens
/// are separated by whitespace or a colon, `\`-escapes and `$$` are decoded,
/// quoted spans are taken verbatim, and a backslash-newline acts as a line
/// continuation. Blank tokens are discarded.
///
/// A colon is kept as part of the token in two cases:
///
/// - after a single-letter token, when directly followed by `/` or `\`; that
///   is a Windows drive designator (`c:/meow`), not a separator. GNU make
///   disambiguates the same way.
/// - terminating a target token, including when whitespace separates the
///   token from its colon (`cat : dep` is the rule `cat: dep`); keeping the
///   colon attached is what lets consumers tell targets and prerequisites
///   apart.
///
/// The lexer is total: malformed input (an unterminated quote, a stray
/// trailing escape) never fails, it just ends the in-progress token at end
/// of input.
#[must_use]
pub fn tokenize(content: &str) -> Vec<String> {
    let bytes = content.as_bytes();
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut state = State::Normal;
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        match state {
            State::Quoted => {
                if c == b'"' {
                    state = State::Normal;
                    pos += 1;
                } else {
                    pos = append_char(content, pos, &mut token);
                }
            }
            State::Normal => match c {
                b':' if token.len() == 1
                    && !is_blank(&token)
                    && matches!(bytes.get(pos + 1), Some(&(b'/' | b'\\'))) =>
                {
                    // Single-letter token followed by a slash: a drive
                    // designator, so the colon is part of the token.
                    token.push(':');
                    pos += 1;
                }
                b':' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => {
                    if c == b':' && is_blank(&token) {
                        // Separator colon with nothing to attach to.
                        pos += 1;
                    }
                    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    if is_blank(&token) {
                        token.clear();
                    } else {
                        // A colon at or right after the token (with any
                        // amount of whitespace in between) terminates a
                        // target, and must stay on the token so it is not
                        // mistaken for a prerequisite.
                        if bytes.get(pos) == Some(&b':') {
                            token.push(':');
                            pos += 1;
                            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                                pos += 1;
                            }
                        }
                        tokens.push(std::mem::take(&mut token));
                    }
                }
                b'\\' => match bytes.get(pos + 1) {
                    Some(&(next @ (b'\\' | b'#' | b':' | b' ' | b'\t'))) => {
                        token.push(char::from(next));
                        pos += 2;
                    }
                    Some(&b'\n') => {
                        // Line continuation: drop the backslash, let the
                        // newline separate tokens as ordinary whitespace.
                        pos += 1;
                    }
                    _ => {
                        token.push('\\');
                        pos += 1;
                    }
                },
                b'$' if bytes.get(pos + 1) == Some(&b'$') => {
                    token.push('$');
                    pos += 2;
                }
                b'"' => {
                    state = State::Quoted;
                    pos += 1;
                }
                _ => {
                    pos = append_char(content, pos, &mut token);
                }
            },
        }
    }

    if !is_blank(&token) {
        tokens.push(token);
    }

    tokens
}

/// Append the (possibly multi-byte) character starting at `pos` to `token`
/// and return the position past it.
fn append_char(content: &str, pos: usize, token: &mut String) -> usize {
    let bytes = content.as_bytes();
    let mut end = pos + 1;
    while end < bytes.len() && bytes[end] & 0xC0 == 0x80 {
        end += 1;
    }
    token.push_str(&content[pos..end]);
    end
}

fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_whitespace())
}

// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans paper text loaded from a file before it is used as
// the answering context.
//
// Text copied out of PDFs and Word files tends to carry:
//   - Non-breaking / zero-width spaces and byte order marks
//   - Soft hyphens (U+00AD) left by the typesetter
//   - Words hyphenated across a line break ("trans-\nformer")
//   - Carriage returns, tabs and other control characters
//   - Runs of spaces and blank lines from the page layout
//
// Cleaning steps (applied in order):
//   1. Map unicode whitespace / controls to plain spaces
//   2. Re-join words split by a hyphen at the end of a line
//   3. Collapse spaces and trim every line
//   4. Keep at most one blank line between paragraphs

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string. Returns an owned String.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let step1: String = text
            .chars()
            .filter(|&c| c != '\u{00AD}')
            .map(|c| match c {
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                '\r' => '\n',
                c if c.is_control() && c != '\n' => ' ',
                c => c,
            })
            .collect();

        // ── Step 2 + 3: Line-level clean up ───────────────────────────────────
        let lines: Vec<String> = step1.lines().map(collapse_spaces).collect();
        let step3 = join_hyphenated(&lines);

        // ── Step 4: Collapse excessive blank lines ────────────────────────────
        let mut result        = String::with_capacity(step3.len());
        let mut newline_count = 0usize;

        for c in step3.chars() {
            if c == '\n' {
                newline_count += 1;
                if newline_count <= 2 {
                    result.push(c);
                }
            } else {
                newline_count = 0;
                result.push(c);
            }
        }

        result.trim().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse runs of spaces into one and trim the line.
fn collapse_spaces(line: &str) -> String {
    line.split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join lines back together, merging a word hyphenated across a
/// line break: "trans-" followed by "former" becomes "transformer".
/// Only a hyphen directly after a lowercase letter, followed by a
/// line starting in lowercase, counts as a break hyphen.
fn join_hyphenated(lines: &[String]) -> String {
    let mut out = String::new();
    let mut glue_next = false;

    for (i, line) in lines.iter().enumerate() {
        if i > 0 && !glue_next {
            out.push('\n');
        }
        out.push_str(line);

        let next_lower = lines
            .get(i + 1)
            .and_then(|l| l.chars().next())
            .is_some_and(|c| c.is_lowercase());
        let mut tail = line.chars().rev();
        let hyphen_after_letter = tail.next() == Some('-')
            && tail.next().is_some_and(|c| c.is_lowercase());

        glue_next = next_lower && hyphen_after_letter;
        if glue_next {
            out.pop();
        }
    }

    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("attention   is  all"), "attention is all");
    }

    #[test]
    fn test_removes_control_and_invisible_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("self\x01attention\u{200B}layer"), "self attention layer");
        assert_eq!(p.clean("trans\u{00AD}former"), "transformer");
    }

    #[test]
    fn test_repairs_line_break_hyphenation() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("a trans-\nformer model"), "a transformer model");
    }

    #[test]
    fn test_keeps_real_hyphens() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("state-of-the-art results"), "state-of-the-art results");
        // Next line starts a new sentence, so the hyphen stays and so does the break
        assert_eq!(p.clean("pre-\nTraining"), "pre-\nTraining");
    }

    #[test]
    fn test_collapses_blank_lines() {
        let p = Preprocessor::new();
        let output = p.clean("Abstract\n\n\n\n\nIntroduction");
        assert_eq!(output, "Abstract\n\nIntroduction");
    }

    #[test]
    fn test_crlf_line_endings() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("line1\r\nline2"), "line1\n\nline2");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert_eq!(p.clean(" \t \n "), "");
    }
}

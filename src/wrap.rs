//! Comment text wrapping
//!
//! Word-wraps free-form description text into comment lines that fit an
//! 80-column budget. The caller supplies the indentation; this module knows
//! nothing about the surrounding output syntax beyond the `// ` marker it is
//! asked to prefix every line with.

const MAX_COLUMNS: usize = 80;
const COMMENT_MARKER: &str = "// ";
const TAB_WIDTH: usize = 4;

/// Wrap `text` into fully prefixed comment lines for the given indentation.
///
/// The usable text budget is 80 columns minus the display width of
/// `indent + "// "`, with each tab in the indent counted as 4 columns.
pub fn wrap_comment(indent: &str, text: &str) -> Vec<String> {
    let prefix = format!("{}{}", indent, COMMENT_MARKER);
    let budget = MAX_COLUMNS.saturating_sub(display_width(&prefix));

    wrap_text(text, budget)
        .into_iter()
        .map(|line| {
            let mut out = prefix.clone();
            out.push_str(&line);
            out.truncate(out.trim_end().len());
            out
        })
        .collect()
}

/// Display width of a prefix string, counting tabs as `TAB_WIDTH` columns.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Word-wrap `text` to `budget` columns.
///
/// Breaks only at whitespace; a single word longer than the budget is left
/// to overflow rather than split. Embedded newlines are preserved as hard
/// breaks. A leading or trailing line that is blank after wrapping is
/// dropped.
fn wrap_text(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let mut current = String::new();
        for word in segment.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= budget {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    // Blank first and last lines carry no content once wrapped.
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_whitespace() {
        assert_eq!(wrap_text("AAAA BBBB CCCC", 9), vec!["AAAA BBBB", "CCCC"]);
    }

    #[test]
    fn overlong_word_overflows_unsplit() {
        assert_eq!(
            wrap_text("tiny incomprehensibilities tiny", 10),
            vec!["tiny", "incomprehensibilities", "tiny"]
        );
    }

    #[test]
    fn embedded_newlines_are_hard_breaks() {
        assert_eq!(wrap_text("first\nsecond", 40), vec!["first", "second"]);
    }

    #[test]
    fn leading_and_trailing_blanks_dropped() {
        assert_eq!(wrap_text("\nbody\n", 40), vec!["body"]);
    }

    #[test]
    fn prefix_width_counts_tabs_as_four() {
        // "\t// " is 7 columns, leaving 73 for text.
        let long = "x".repeat(70);
        let lines = wrap_comment("\t", &format!("{} yy", long));
        assert_eq!(lines, vec![format!("\t// {} yy", long)]);

        let lines = wrap_comment("\t", &format!("{} yyyy", long));
        assert_eq!(lines, vec![format!("\t// {}", long), "\t// yyyy".to_string()]);
    }

    #[test]
    fn produced_lines_have_no_trailing_whitespace() {
        let lines = wrap_comment("", "one\n\nthree");
        assert_eq!(lines, vec!["// one", "//", "// three"]);
    }
}

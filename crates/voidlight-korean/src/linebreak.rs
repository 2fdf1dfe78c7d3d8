//! Korean-aware line-break repair: a newline sitting between two Hangul
//! syllables, with no preceding sentence terminator, is almost always a
//! soft-wrap artifact rather than an intended paragraph break.

use crate::charclass::is_korean_char;

const TERMINATORS: &[char] = &['.', '?', '!', '。', '？', '！'];
const CLOSERS: &[char] = &['"', '\'', ')', '」', '』', '」', '〉', '》'];

/// Collapses newline runs first (>= 3 -> exactly 2), then inspects each
/// remaining single newline: if it sits between two Korean characters and
/// the text immediately before it is not terminator-or-closer-after-
/// terminator, replace it with a single space.
pub fn fix_korean_line_breaks(text: &str) -> String {
    let collapsed = collapse_newline_runs(text);
    let chars: Vec<char> = collapsed.chars().collect();
    let mut out = String::with_capacity(collapsed.len());

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            let prev = out.chars().last();
            let next = chars.get(i + 1).copied();
            let preceded_by_terminator = prev.map(preceded_by_sentence_end).unwrap_or(false);

            if let (Some(p), Some(n)) = (prev, next)
                && is_korean_char(p) && is_korean_char(n) && !preceded_by_terminator {
                    out.push(' ');
                    i += 1;
                    continue;
                }
        }
        out.push(c);
        i += 1;
    }

    out
}

fn preceded_by_sentence_end(c: char) -> bool {
    TERMINATORS.contains(&c) || CLOSERS.contains(&c)
}

fn collapse_newline_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
        } else {
            flush_newline_run(&mut out, run);
            run = 0;
            out.push(c);
        }
    }
    flush_newline_run(&mut out, run);
    out
}

fn flush_newline_run(out: &mut String, run: usize) {
    if run == 0 {
        return;
    }
    if run >= 3 {
        out.push_str("\n\n");
    } else {
        out.push_str(&"\n".repeat(run));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inappropriate_break_between_hangul_becomes_a_space() {
        assert_eq!(fix_korean_line_breaks("안녕하\n세요"), "안녕하 세요");
    }

    #[test]
    fn break_after_a_terminator_is_preserved() {
        assert_eq!(
            fix_korean_line_breaks("안녕하세요.\n반갑습니다"),
            "안녕하세요.\n반갑습니다"
        );
    }

    #[test]
    fn excessive_newline_runs_collapse_to_two() {
        let fixed = fix_korean_line_breaks("안녕\n\n\n\n하세요");
        assert!(!fixed.contains("\n\n\n"));
    }
}

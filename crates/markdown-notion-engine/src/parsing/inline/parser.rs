use crate::models::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, InlineMath, Link, Strong},
};

type TryParse = fn(&mut Cursor<'_>) -> Option<Span>;

/// Constructs tried at each position, highest precedence first.
const PRECEDENCE: [TryParse; 4] = [
    try_parse_inline_math,
    try_parse_code_span,
    try_parse_link,
    try_parse_strong,
];

/// Splits one line into rich-text spans.
///
/// Single left-to-right pass. At every position the constructs in
/// [`PRECEDENCE`] are attempted in order; the first that closes wins and the
/// cursor jumps past it. Text between constructs is emitted verbatim as
/// [`Span::PlainText`]. Unclosed or empty constructs never match, so malformed
/// markup degrades to plain text rather than failing.
pub fn tokenize(line: &str) -> Vec<Span> {
    let mut cur = Cursor::new(line);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Span>, text: &str) {
        if !text.is_empty() {
            out.push(Span::plain(text));
        }
    }

    'scan: while !cur.eof() {
        let start = cur.pos();
        for try_parse in PRECEDENCE {
            if let Some(span) = try_parse(&mut cur) {
                flush_text(&mut out, cur.slice(text_start, start));
                text_start = cur.pos();
                out.push(span);
                continue 'scan;
            }
        }
        cur.bump();
    }

    flush_text(&mut out, cur.slice(text_start, line.len()));
    out
}

/// `$expr$` with a non-empty expression ending at the next `$`.
fn try_parse_inline_math(cur: &mut Cursor<'_>) -> Option<Span> {
    if cur.peek() != Some(InlineMath::DOLLAR) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // $
    let inner_start = cur.pos();
    let len = cur.skip_until(InlineMath::DOLLAR);
    if len == 0 || cur.peek() != Some(InlineMath::DOLLAR) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump(); // closing $

    Some(Span::equation(cur.slice(inner_start, inner_end)))
}

/// `` `code` `` with non-empty content.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Span> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // `
    let inner_start = cur.pos();
    let len = cur.skip_until(CodeSpan::TICK);
    if len == 0 || cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump(); // closing `

    Some(Span::code(cur.slice(inner_start, inner_end)))
}

/// `[text](url)`; both parts non-empty, `](` adjacent.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<Span> {
    if cur.peek() != Some(Link::TEXT_OPEN) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // [
    let text_start = cur.pos();
    let text_len = cur.skip_until(Link::TEXT_CLOSE);
    let text_end = cur.pos();
    if text_len == 0 || !cur.starts_with(Link::TEXT_CLOSE_URL_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump_n(Link::TEXT_CLOSE_URL_OPEN.len());

    let url_start = cur.pos();
    let url_len = cur.skip_until(Link::URL_CLOSE);
    if url_len == 0 || cur.peek() != Some(Link::URL_CLOSE) {
        *cur = saved;
        return None;
    }
    let url_end = cur.pos();
    cur.bump(); // )

    Some(Span::link(
        cur.slice(text_start, text_end),
        cur.slice(url_start, url_end),
    ))
}

/// `**text**` where text contains no `*`.
fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<Span> {
    if !cur.starts_with(Strong::DELIM) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(Strong::DELIM.len());
    let inner_start = cur.pos();
    let len = cur.skip_until(Strong::STAR);
    if len == 0 || !cur.starts_with(Strong::DELIM) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(Strong::DELIM.len());

    Some(Span::bold(cur.slice(inner_start, inner_end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visible_text;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn plain_text_is_verbatim() {
        assert_eq!(tokenize("  hello world "), vec![Span::plain("  hello world ")]);
    }

    #[test]
    fn heading_text_with_bold() {
        assert_eq!(
            tokenize("Hello **World**"),
            vec![Span::plain("Hello "), Span::bold("World")]
        );
    }

    #[test]
    fn adjacent_bold_keeps_separator() {
        assert_eq!(
            tokenize("**a** **b**"),
            vec![Span::bold("a"), Span::plain(" "), Span::bold("b")]
        );
    }

    #[test]
    fn every_form_in_one_line() {
        assert_eq!(
            tokenize("Mass $E=mc^2$ via `calc()` see [docs](https://x.io) **now**"),
            vec![
                Span::plain("Mass "),
                Span::equation("E=mc^2"),
                Span::plain(" via "),
                Span::code("calc()"),
                Span::plain(" see "),
                Span::link("docs", "https://x.io"),
                Span::plain(" "),
                Span::bold("now"),
            ]
        );
    }

    #[test]
    fn math_takes_precedence_over_code_inside_it() {
        assert_eq!(
            tokenize("$a `b` c$"),
            vec![Span::equation("a `b` c")]
        );
    }

    #[test]
    fn code_span_suppresses_bold() {
        assert_eq!(tokenize("`**x**`"), vec![Span::code("**x**")]);
    }

    #[rstest]
    #[case("a * b")]
    #[case("**unclosed")]
    #[case("**a*b**")]
    #[case("****")]
    #[case("[text](missing paren")]
    #[case("[text] (spaced)")]
    #[case("[](empty)")]
    #[case("[empty]()")]
    #[case("`unclosed code")]
    #[case("``")]
    #[case("costs $5")]
    #[case("$$")]
    fn malformed_markup_stays_plain(#[case] line: &str) {
        assert_eq!(tokenize(line), vec![Span::plain(line)]);
    }

    #[test]
    fn malformed_link_before_valid_bold() {
        assert_eq!(
            tokenize("[a](b **c**"),
            vec![Span::plain("[a](b "), Span::bold("c")]
        );
    }

    #[test]
    fn non_ascii_text_around_markup() {
        assert_eq!(
            tokenize("café **crème** brûlée"),
            vec![
                Span::plain("café "),
                Span::bold("crème"),
                Span::plain(" brûlée"),
            ]
        );
    }

    #[rstest]
    #[case("plain only", "plain only")]
    #[case("**bold** and `code`", "bold and code")]
    #[case("[link](http://a.b) then $x^2$", "link then x^2")]
    #[case("**a** **b**", "a b")]
    fn visible_text_round_trips(#[case] line: &str, #[case] visible: &str) {
        assert_eq!(visible_text(&tokenize(line)), visible);
    }
}

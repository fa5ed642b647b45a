/// Hard cap on headline length in the share image.
pub const HEADLINE_MAX_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Cut `headline` to [`HEADLINE_MAX_CHARS`], ending in `...` when shortened.
///
/// Counts Unicode scalar values, so a character is never split.
pub fn truncate_headline(headline: &str) -> String {
    let headline = headline.trim();
    if headline.chars().count() <= HEADLINE_MAX_CHARS {
        return headline.to_string();
    }
    let keep = HEADLINE_MAX_CHARS - ELLIPSIS.len();
    let mut out: String = headline.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
/// Words longer than a line are split; text past the last line is dropped.
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let current_len = current.chars().count();
        if current_len == 0 {
            current = word;
        } else if current_len + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}

/// Headline as drawn: truncated, wrapped into at most `max_lines` lines of
/// `width` characters. When wrapping overflows, the last shown line is cut
/// again so the image still ends in `...`.
pub fn headline_lines(headline: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = wrap_lines(&truncate_headline(headline), width, usize::MAX);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(ELLIPSIS.len());
            let mut shown: String = last.chars().take(keep).collect();
            shown.truncate(shown.trim_end().len());
            shown.push_str(ELLIPSIS);
            *last = shown;
        }
    }
    lines
}

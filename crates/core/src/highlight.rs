//! Split suggestion text into runs that do and do not match the typed query,
//! so renderers can emphasize the matched parts.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Case-insensitive, non-overlapping matches of `query` (trimmed) in `text`.
/// A blank query yields the whole text as one unmatched segment.
pub fn match_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let needle: Vec<char> = query.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() || text.is_empty() {
        return vec![Segment { text, matched: false }];
    }

    // Fold both sides the same way; each folded char remembers its source char
    // so matches map back onto byte offsets in `text`.
    let starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    let folded: Vec<(usize, char)> = text
        .chars()
        .enumerate()
        .flat_map(|(n, c)| c.to_lowercase().map(move |l| (n, l)))
        .collect();
    let byte_at = |k: usize| folded.get(k).map_or(text.len(), |(n, _)| starts[*n]);
    let on_boundary = |k: usize| k == 0 || k == folded.len() || folded[k - 1].0 != folded[k].0;

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let end = i + needle.len();
        let hit = on_boundary(i)
            && on_boundary(end)
            && folded[i..end].iter().map(|(_, c)| *c).eq(needle.iter().copied());
        if !hit {
            i += 1;
            continue;
        }
        let (start, stop) = (byte_at(i), byte_at(end));
        if start > plain_start {
            segments.push(Segment { text: &text[plain_start..start], matched: false });
        }
        segments.push(Segment { text: &text[start..stop], matched: true });
        plain_start = stop;
        i = end;
    }
    if plain_start < text.len() {
        segments.push(Segment { text: &text[plain_start..], matched: false });
    }
    segments
}

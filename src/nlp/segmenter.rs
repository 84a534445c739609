//! Sentence segmentation
//!
//! UAX #29 sentence boundaries, corrected for language-specific
//! abbreviations ("Dr.", "vb.", "e.g.") that end a segment without ending
//! the sentence, and for hard line wraps (UAX #29 breaks after every line
//! break). Blank lines always separate sentences.

use crate::types::{Language, Sentence};
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into ordered sentences
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    language: Language,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl SentenceSegmenter {
    /// Create a segmenter for the given language
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Segment text into sentences with original indices and byte offsets.
    ///
    /// Empty or whitespace-only input yields no sentences.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();

        for (start, end) in self.sentence_boundaries(text) {
            let raw = &text[start..end];
            let leading = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            let index = sentences.len();
            sentences.push(Sentence::new(
                trimmed,
                index,
                start + leading,
                start + leading + trimmed.len(),
            ));
        }

        sentences
    }

    /// Segment and return only the sentence texts
    pub fn segment_texts(&self, text: &str) -> Vec<String> {
        self.segment(text).into_iter().map(|s| s.text).collect()
    }

    fn sentence_boundaries(&self, text: &str) -> Vec<(usize, usize)> {
        let mut boundaries: Vec<(usize, usize)> = Vec::new();
        let mut pending: Option<(usize, usize)> = None;

        for (idx, segment) in text.split_sentence_bound_indices() {
            let end = idx + segment.len();
            let span = match pending.take() {
                Some((start, _)) => (start, end),
                None => (idx, end),
            };

            let joined = &text[span.0..span.1];
            if self.ends_with_abbreviation(joined) || ends_at_line_wrap(joined) {
                pending = Some(span);
            } else {
                boundaries.push(span);
            }
        }

        if let Some(span) = pending {
            boundaries.push(span);
        }

        boundaries
            .into_iter()
            .flat_map(|(start, end)| split_paragraphs(text, start, end))
            .filter(|&(start, end)| !text[start..end].trim().is_empty())
            .collect()
    }

    /// Whether a segment ends in an abbreviation that does not end a sentence
    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        let trimmed = segment.trim_end();
        if !trimmed.ends_with('.') || contains_blank_line(segment) {
            return false;
        }

        let last_word = trimmed
            .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
            .next()
            .unwrap_or("");
        let candidate = self.language.to_lowercase(last_word.trim_end_matches('.'));

        abbreviations(self.language).contains(&candidate.as_str())
    }
}

/// Whether a segment was cut at a single line break inside a sentence
fn ends_at_line_wrap(segment: &str) -> bool {
    let body = segment.trim_end();
    if body.is_empty() {
        return false;
    }
    line_breaks(&segment[body.len()..]) == 1 && !ends_with_terminal(body)
}

/// Count line breaks, treating CRLF as one
fn line_breaks(whitespace: &str) -> usize {
    let mut count = 0;
    let mut chars = whitespace.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                count += 1;
            }
            '\n' | '\u{0B}' | '\u{85}' | '\u{2028}' => count += 1,
            // form feed and paragraph separator end a paragraph
            '\u{0C}' | '\u{2029}' => count += 2,
            _ => {}
        }
    }
    count
}

fn ends_with_terminal(body: &str) -> bool {
    body.trim_end_matches(['"', '\'', ')', ']', '»', '\u{201D}', '\u{2019}'])
        .ends_with(['.', '!', '?', '\u{2026}', '\u{3002}', '\u{FF01}', '\u{FF1F}'])
}

/// Whether a line consisting only of whitespace follows a line break
fn contains_blank_line(segment: &str) -> bool {
    segment
        .split_inclusive('\n')
        .skip(1)
        .any(|line| line.ends_with('\n') && line.trim().is_empty())
}

/// Split a span on blank lines so paragraphs never merge into one sentence
fn split_paragraphs(text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut cursor = start;
    let mut offset = start;
    let mut after_break = false;

    for line in text[start..end].split_inclusive('\n') {
        if after_break && line.trim().is_empty() && offset > cursor {
            spans.push((cursor, offset));
            cursor = offset;
        }
        after_break = line.ends_with('\n');
        offset += line.len();
    }
    spans.push((cursor, end));
    spans
}

/// Lowercased abbreviations, without the trailing period
fn abbreviations(language: Language) -> &'static [&'static str] {
    match language {
        Language::Turkish => &[
            "dr", "prof", "doç", "yrd", "av", "sn", "bkz", "vb", "vs", "örn", "no", "st",
            "mah", "cad", "sok", "apt", "yy", "hz", "gen", "alb", "yzb", "ltd", "şti",
        ],
        Language::English => &[
            "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "al",
            "inc", "ltd", "co", "corp", "fig", "approx", "dept", "gen", "gov", "jan",
            "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        ],
        Language::German => &["dr", "prof", "bzw", "z.b", "usw", "ca", "nr", "str", "d.h"],
        Language::French => &["m", "mme", "mlle", "dr", "prof", "p.ex", "cf", "av"],
        Language::Spanish => &["sr", "sra", "srta", "dr", "dra", "prof", "ej", "al"],
        Language::Italian => &["sig", "sig.ra", "dott", "prof", "ecc", "es"],
        Language::Portuguese => &["sr", "sra", "dr", "dra", "prof", "ex"],
        Language::Dutch => &["dhr", "mevr", "dr", "prof", "bijv", "nr"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_segmentation() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("Hello world. This is a test. Is it working?");

        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "Hello world.");
        assert_eq!(sentences[1].text, "This is a test.");
        assert_eq!(sentences[2].text, "Is it working?");
    }

    #[test]
    fn test_indices_are_sequential() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("One. Two. Three. Four.");

        let indices: Vec<_> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "  First sentence here.   Second one follows.";
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment(text);

        for s in &sentences {
            assert_eq!(&text[s.start..s.end], s.text);
        }
    }

    #[test]
    fn test_empty_input() {
        let segmenter = SentenceSegmenter::new(Language::English);
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("   \n\t ").is_empty());
    }

    #[test]
    fn test_english_abbreviation() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("Dr. Smith arrived late. The meeting had started.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Dr. Smith arrived late.");
    }

    #[test]
    fn test_turkish_abbreviation() {
        let segmenter = SentenceSegmenter::new(Language::Turkish);
        let sentences =
            segmenter.segment("Prof. Yılmaz derse geldi. Öğrenciler elma, armut vb. getirdi.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Prof. Yılmaz derse geldi.");
        assert_eq!(sentences[1].text, "Öğrenciler elma, armut vb. getirdi.");
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("Inflation reached 3.5 percent. Prices rose.");

        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].text.contains("3.5"));
    }

    #[test]
    fn test_paragraph_breaks_split() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("A heading without period\n\nThe body starts here.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "A heading without period");
    }

    #[test]
    fn test_crlf_paragraph_breaks_split() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("A heading without period\r\n\r\nThe body starts here.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "A heading without period");
        assert_eq!(sentences[1].text, "The body starts here.");
    }

    #[test]
    fn test_hard_wrapped_sentence_stays_whole() {
        let text = "The committee approved the new budget\nafter a long debate on Monday.";
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment(text);

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, text);
    }

    #[test]
    fn test_wrapped_paragraph_splits_at_terminal_punctuation() {
        let text = "The committee approved the new budget\r\nafter a long debate on Monday. The mayor\n\
                    praised the decision. Work starts\nnext spring.\n";
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment(text);

        assert_eq!(sentences.len(), 3);
        assert!(sentences.iter().all(|s| s.text.ends_with('.')));
        assert!(sentences[1].text.starts_with("The mayor"));
        for s in &sentences {
            assert_eq!(&text[s.start..s.end], s.text);
        }
    }

    #[test]
    fn test_line_after_terminal_punctuation_splits() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("First line ends here.\nSecond line starts anew.");

        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_wrapped_text_does_not_cross_blank_lines() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("A heading\n  \nBody text\ncontinues here.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "A heading");
        assert_eq!(sentences[1].text, "Body text\ncontinues here.");
    }

    #[test]
    fn test_single_letters_are_sentences() {
        let segmenter = SentenceSegmenter::new(Language::English);
        let sentences = segmenter.segment("A. B. C. D.");

        assert_eq!(sentences.len(), 4);
    }

    #[test]
    fn test_text_without_terminal_punctuation() {
        let segmenter = SentenceSegmenter::new(Language::Turkish);
        let sentences = segmenter.segment("noktasız bir cümle");

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "noktasız bir cümle");
    }
}

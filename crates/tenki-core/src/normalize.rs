//! Short display text for weather phrases

/// Spatial and temporal qualifiers dropped from the display text
pub const FILLER_WORDS: &[&str] = &[
    "所により",
    "を伴う",
    "山沿いでは",
    "平地では",
    "付近",
    "から",
    "にかけて",
];

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Strip filler words and collapse whitespace.
///
/// Removal is plain substring deletion, repeated until no filler is left,
/// so deleting one word cannot leave another one behind.
pub fn normalize(phrase: &str) -> String {
    let mut text = phrase.to_string();
    loop {
        let stripped = FILLER_WORDS
            .iter()
            .fold(text.clone(), |acc, word| acc.replace(word, ""));
        if stripped == text {
            break;
        }
        text = stripped;
    }

    text.replace(FULL_WIDTH_SPACE, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_fillers() {
        assert_eq!(normalize("晴 所により 雨"), "晴 雨");
        assert_eq!(normalize("くもり 山沿いでは 雪"), "くもり 雪");
        assert_eq!(normalize("雨 夜遅くから くもり"), "雨 夜遅く くもり");
        assert_eq!(normalize("雷を伴う"), "雷");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(normalize("晴　時々　くもり"), "晴 時々 くもり");
        assert_eq!(normalize("  雨   のち  晴 "), "雨 のち 晴");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("　　"), "");
    }

    #[test]
    fn test_plain_phrase_untouched() {
        assert_eq!(normalize("晴のち雨"), "晴のち雨");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "晴 所により 雨",
            "くもり 昼過ぎから 夕方にかけて 雨",
            "かから ら",
            "かからら",
            "付近付近 雷を伴うを伴う",
            "　雨　",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_removal_that_exposes_another_filler() {
        // Removing the inner から joins か and ら into another から
        assert_eq!(normalize("かからら"), "");
    }
}

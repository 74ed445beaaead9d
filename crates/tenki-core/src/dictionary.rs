//! Weather code dictionary and keyword tables
//!
//! The feed publishes an opaque three digit code per day. The tables here
//! turn that code into a Japanese phrase, and the phrase into icon and color
//! tokens. Every table is an ordered slice because lookup order decides the
//! result when a phrase matches more than one keyword.

/// Phrase used for codes missing from the table
pub const DEFAULT_PHRASE: &str = "晴れ";

/// Color stored for a code whose phrase matches no color keyword
pub const DEFAULT_CODE_COLOR: &str = "#808080";

/// Page background when the phrase matches no color keyword (blue grey 50)
pub const DEFAULT_BACKGROUND: &str = "#ECEFF1";

/// Background color stored alongside every code definition
pub const CODE_BG_COLOR: &str = "#FFFFFF";

/// Known weather codes, sorted ascending by code
const CODE_TABLE: &[(&str, &str)] = &[
    ("100", "晴れ"),
    ("101", "晴時々曇"),
    ("102", "晴一時雨"),
    ("103", "晴時々雨"),
    ("104", "晴時々雪"),
    ("105", "晴時々雪"),
    ("106", "晴一時雨"),
    ("107", "晴一時雨"),
    ("108", "晴一時雨"),
    ("110", "晴のち曇"),
    ("111", "晴のち曇"),
    ("112", "晴のち雨"),
    ("113", "晴のち雨"),
    ("114", "晴のち雨"),
    ("115", "晴のち雪"),
    ("116", "晴のち雪"),
    ("117", "晴のち雪"),
    ("118", "晴のち雨"),
    ("119", "晴のち雨"),
    ("120", "晴一時雨"),
    ("121", "晴一時雨"),
    ("122", "晴一時雨"),
    ("123", "晴一時雨"),
    ("124", "晴一時雪"),
    ("132", "晴のち曇"),
    ("140", "晴時々雨"),
    ("160", "晴一時雪"),
    ("170", "晴時々雪"),
    ("181", "晴のち雪"),
    ("200", "くもり"),
    ("201", "くもり時々晴"),
    ("202", "くもり一時雨"),
    ("203", "くもり時々雨"),
    ("204", "くもり時々雪"),
    ("205", "くもり時々雪"),
    ("206", "くもり一時雨"),
    ("207", "くもり一時雨"),
    ("208", "くもり一時雨"),
    ("209", "くもり一時雪"),
    ("210", "くもりのち晴"),
    ("211", "くもりのち晴"),
    ("212", "くもりのち雨"),
    ("213", "くもりのち雨"),
    ("214", "くもりのち雨"),
    ("215", "くもりのち雪"),
    ("216", "くもりのち雪"),
    ("217", "くもりのち雪"),
    ("218", "くもりのち雨"),
    ("219", "くもりのち雨"),
    ("220", "くもり一時雨"),
    ("221", "くもり一時雨"),
    ("222", "くもり一時雨"),
    ("223", "くもり一時雨"),
    ("224", "くもり一時雪"),
    ("225", "くもり一時雪"),
    ("226", "くもり一時雪"),
    ("228", "くもり一時雪"),
    ("229", "くもり一時雪"),
    ("231", "くもり一時晴"),
    ("240", "くもり時々雨"),
    ("250", "くもり時々雪"),
    ("260", "くもり一時雪"),
    ("270", "くもり時々雪"),
    ("281", "くもりのち雪"),
    ("300", "雨"),
    ("301", "雨時々晴"),
    ("302", "雨時々止む"),
    ("303", "雨時々雪"),
    ("304", "雨"),
    ("306", "大雨"),
    ("308", "雨"),
    ("309", "雨一時雪"),
    ("311", "雨のち晴"),
    ("313", "雨のちくもり"),
    ("314", "雨のち雪"),
    ("315", "雨のち雪"),
    ("316", "雨のち晴"),
    ("317", "雨のちくもり"),
    ("320", "雨一時晴"),
    ("321", "雨一時晴"),
    ("322", "雨時々雪"),
    ("323", "雨一時雪"),
    ("324", "雨一時雪"),
    ("325", "雨一時雪"),
    ("326", "雨一時雪"),
    ("327", "雨一時雪"),
    ("328", "雨一時雪"),
    ("329", "雨一時雪"),
    ("340", "雪"),
    ("350", "雨"),
    ("361", "雪"),
    ("371", "雪"),
    ("400", "雪"),
    ("401", "雪時々晴"),
    ("402", "雪時々止む"),
    ("403", "雪時々雨"),
    ("405", "大雪"),
    ("406", "風雪"),
    ("407", "暴風雪"),
    ("409", "雪一時雨"),
    ("411", "雪のち晴"),
    ("413", "雪のちくもり"),
    ("414", "雪のち雨"),
    ("420", "雪一時晴"),
    ("421", "雪一時晴"),
    ("422", "雪一時雨"),
    ("423", "雪一時雨"),
    ("425", "雪一時雨"),
    ("426", "雪一時雨"),
    ("427", "雪一時雨"),
    ("450", "雪"),
];

/// Icon drawn for a weather keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Snowing,
    Thunderstorm,
    WaterDrop,
    Sunny,
    Cloud,
    HelpOutline,
}

impl WeatherIcon {
    /// Icon token name, as stored in the code master
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Snowing => "snowing",
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::WaterDrop => "water_drop",
            WeatherIcon::Sunny => "sunny",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::HelpOutline => "help_outline",
        }
    }
}

/// Keyword -> (icon, color), in priority order. 曇 and くもり share a pair.
pub const KEYWORD_ICONS: &[(&str, WeatherIcon, &str)] = &[
    ("雪", WeatherIcon::Snowing, "cyan"),
    ("雷", WeatherIcon::Thunderstorm, "yellow_900"),
    ("雨", WeatherIcon::WaterDrop, "blue"),
    ("晴", WeatherIcon::Sunny, "orange"),
    ("曇", WeatherIcon::Cloud, "grey"),
    ("くもり", WeatherIcon::Cloud, "grey"),
];

/// Keyword -> color, first match wins
pub const COLOR_KEYWORDS: &[(&str, &str)] = &[
    ("雪", "#B2EBF2"),
    ("雷", "#FFF59D"),
    ("雨", "#90CAF9"),
    ("晴", "#FFE0B2"),
    ("曇", "#CFD8DC"),
    ("くもり", "#CFD8DC"),
];

/// Resolve a weather code to its phrase, falling back to [`DEFAULT_PHRASE`]
pub fn resolve_phrase(code: &str) -> &'static str {
    lookup(code).unwrap_or(DEFAULT_PHRASE)
}

/// Whether the code has an entry in the dictionary
pub fn is_known_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// All `(code, phrase)` pairs in ascending code order
pub fn all_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    CODE_TABLE.iter().copied()
}

fn lookup(code: &str) -> Option<&'static str> {
    CODE_TABLE
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| CODE_TABLE[i].1)
}

/// First color in `table` whose keyword occurs in the phrase
pub fn match_color_in<'a>(phrase: &str, table: &[(&str, &'a str)]) -> Option<&'a str> {
    table
        .iter()
        .find(|(kw, _)| phrase.contains(kw))
        .map(|(_, color)| *color)
}

/// Color stored for a phrase in the code master
pub fn primary_color(phrase: &str) -> &'static str {
    match_color_in(phrase, COLOR_KEYWORDS).unwrap_or(DEFAULT_CODE_COLOR)
}

/// Page background tint for a phrase
pub fn background_color(phrase: &str) -> &'static str {
    match_color_in(phrase, COLOR_KEYWORDS).unwrap_or(DEFAULT_BACKGROUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table_sorted_and_unique() {
        for pair in CODE_TABLE.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_resolve_known_codes() {
        assert_eq!(resolve_phrase("100"), "晴れ");
        assert_eq!(resolve_phrase("112"), "晴のち雨");
        assert_eq!(resolve_phrase("200"), "くもり");
        assert_eq!(resolve_phrase("450"), "雪");

        for (code, phrase) in all_codes() {
            assert_eq!(resolve_phrase(code), phrase);
            assert!(is_known_code(code));
        }
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in ["999", "", "10", "1000", " 100", "abc"] {
            assert_eq!(resolve_phrase(code), DEFAULT_PHRASE);
            assert!(!is_known_code(code));
        }
    }

    #[test]
    fn test_background_color_table_order() {
        // Table order decides, not position in the phrase
        assert_eq!(background_color("晴のち雨"), "#90CAF9");
        assert_eq!(background_color("くもり時々雪"), "#B2EBF2");
        assert_eq!(background_color("晴時々曇"), "#FFE0B2");
        assert_eq!(background_color("曇"), "#CFD8DC");
        assert_eq!(background_color("風"), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_primary_color_first_match_wins() {
        // 雪 precedes 雨 in the table even though 雨 comes first in the phrase
        assert_eq!(primary_color("雨時々雪"), "#B2EBF2");
        assert_eq!(primary_color("晴時々曇"), "#FFE0B2");
        assert_eq!(primary_color("くもり"), "#CFD8DC");
        assert_eq!(primary_color("風"), DEFAULT_CODE_COLOR);
    }

    #[test]
    fn test_background_color_default() {
        assert_eq!(background_color("大雨"), "#90CAF9");
        assert_eq!(background_color("不明"), DEFAULT_BACKGROUND);
    }
}

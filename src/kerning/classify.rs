//! Coarse script and case classification of glyphs.
//!
//! Each glyph is classified once, trying in order: its declared codepoint, a
//! `uniXXXX` name, then its (suffix-stripped) name.
use crate::provider::GlyphRecord;

/// Writing system of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Basic and extended Latin letters
    Latin,
    /// Cyrillic letters
    Cyrillic,
    /// Figures, in any style
    Number,
    /// Punctuation marks
    Punctuation,
    /// Currency signs and other symbols
    Symbol,
    /// Anything not recognised
    Unknown,
}

/// Letter case of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// Capitals
    Upper,
    /// Lowercase, including small caps
    Lower,
    /// Upper and lower case letters in one name
    CaseMixed,
    /// No case, as for figures and punctuation
    CaseInapplicable,
}

/// Script and case together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphClass {
    /// The glyph's script
    pub script: Script,
    /// The glyph's case
    pub case: Case,
}

impl GlyphClass {
    const UNKNOWN: GlyphClass = GlyphClass {
        script: Script::Unknown,
        case: Case::CaseInapplicable,
    };

    fn uncased(script: Script) -> Self {
        GlyphClass {
            script,
            case: Case::CaseInapplicable,
        }
    }
}

const FIGURES: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const PUNCTUATION: &[&str] = &[
    "period",
    "comma",
    "colon",
    "semicolon",
    "exclam",
    "exclamdown",
    "question",
    "questiondown",
    "quotedbl",
    "quotesingle",
    "quoteleft",
    "quoteright",
    "quotedblleft",
    "quotedblright",
    "quotesinglbase",
    "quotedblbase",
    "guillemetleft",
    "guillemetright",
    "guilsinglleft",
    "guilsinglright",
    "hyphen",
    "endash",
    "emdash",
    "underscore",
    "parenleft",
    "parenright",
    "bracketleft",
    "bracketright",
    "braceleft",
    "braceright",
    "slash",
    "backslash",
    "ellipsis",
    "periodcentered",
    "bullet",
];

const SYMBOLS: &[&str] = &[
    "plus",
    "minus",
    "equal",
    "less",
    "greater",
    "multiply",
    "divide",
    "percent",
    "dollar",
    "cent",
    "sterling",
    "yen",
    "euro",
    "at",
    "ampersand",
    "numbersign",
    "asterisk",
    "section",
    "paragraph",
    "copyright",
    "registered",
    "trademark",
    "degree",
];

/// Classify a codepoint
pub fn classify_codepoint(codepoint: u32) -> Option<GlyphClass> {
    let c = char::from_u32(codepoint)?;
    let case = if c.is_uppercase() {
        Case::Upper
    } else if c.is_lowercase() {
        Case::Lower
    } else {
        Case::CaseInapplicable
    };
    let script = match codepoint {
        0x0030..=0x0039 => Script::Number,
        0x0400..=0x04FF => Script::Cyrillic,
        0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F if c.is_alphabetic() => Script::Latin,
        _ if c.is_ascii_punctuation() && !is_ascii_symbol(c) => Script::Punctuation,
        _ if c.is_alphanumeric() => return Some(GlyphClass::UNKNOWN),
        _ if c.is_whitespace() || c.is_control() => return Some(GlyphClass::UNKNOWN),
        0x2010..=0x205E | 0x00A1 | 0x00AB | 0x00B7 | 0x00BB | 0x00BF => Script::Punctuation,
        _ => Script::Symbol,
    };
    let case = match script {
        Script::Latin | Script::Cyrillic => case,
        _ => Case::CaseInapplicable,
    };
    Some(GlyphClass { script, case })
}

fn is_ascii_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' | '#' | '%' | '&' | '*' | '@'
    )
}

fn classify_uni_name(name: &str) -> Option<GlyphClass> {
    let hex = name.strip_prefix("uni")?;
    if hex.len() != 4 {
        return None;
    }
    classify_codepoint(u32::from_str_radix(hex, 16).ok()?)
}

fn classify_base_name(base: &str) -> GlyphClass {
    if FIGURES.contains(&base) {
        return GlyphClass::uncased(Script::Number);
    }
    if PUNCTUATION.contains(&base) {
        return GlyphClass::uncased(Script::Punctuation);
    }
    if SYMBOLS.contains(&base) {
        return GlyphClass::uncased(Script::Symbol);
    }
    if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphabetic()) {
        return GlyphClass::UNKNOWN;
    }
    let case = if base.chars().all(|c| c.is_ascii_uppercase()) {
        Case::Upper
    } else if base.chars().all(|c| c.is_ascii_lowercase()) {
        Case::Lower
    } else if base.starts_with(|c: char| c.is_ascii_uppercase()) {
        // Aacute, Tcaron, Germandbls
        Case::Upper
    } else {
        Case::CaseMixed
    };
    GlyphClass {
        script: Script::Latin,
        case,
    }
}

/// Classify a glyph
pub fn classify(glyph: &GlyphRecord) -> GlyphClass {
    if let Some(class) = glyph.unicode.and_then(classify_codepoint) {
        return class;
    }
    let base = glyph.name.split('.').next().unwrap_or_default();
    if let Some(class) = classify_uni_name(base) {
        return class;
    }
    classify_base_name(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn class(script: Script, case: Case) -> GlyphClass {
        GlyphClass { script, case }
    }

    #[rstest]
    #[case(GlyphRecord::new("A").with_unicode(0x41), class(Script::Latin, Case::Upper))]
    #[case(GlyphRecord::new("a").with_unicode(0x61), class(Script::Latin, Case::Lower))]
    #[case(GlyphRecord::new("Tcaron"), class(Script::Latin, Case::Upper))]
    #[case(GlyphRecord::new("germandbls"), class(Script::Latin, Case::Lower))]
    #[case(GlyphRecord::new("a.sc"), class(Script::Latin, Case::Lower))]
    #[case(GlyphRecord::new("uni0414"), class(Script::Cyrillic, Case::Upper))]
    #[case(GlyphRecord::new("De-cy").with_unicode(0x0434), class(Script::Cyrillic, Case::Lower))]
    #[case(GlyphRecord::new("seven"), class(Script::Number, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("four").with_unicode(0x34), class(Script::Number, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("comma"), class(Script::Punctuation, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("x").with_unicode(0x2C), class(Script::Punctuation, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("euro"), class(Script::Symbol, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("plus").with_unicode(0x2B), class(Script::Symbol, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("fi_ligature"), class(Script::Unknown, Case::CaseInapplicable))]
    #[case(GlyphRecord::new("aB"), class(Script::Latin, Case::CaseMixed))]
    fn test_classify(#[case] glyph: GlyphRecord, #[case] expected: GlyphClass) {
        assert_eq!(classify(&glyph), expected);
    }
}

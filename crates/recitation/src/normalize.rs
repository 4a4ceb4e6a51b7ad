//! Canonical Arabic orthography for comparison.
//!
//! Recognizers and reference texts disagree on surface spelling all the time:
//! one emits full tashkeel, the other none; one writes `أ`, the other `ا`.
//! Everything that reaches the matcher goes through [`normalize`] first, so
//! these differences never show up as mismatches.

const TATWEEL: char = '\u{0640}';

const ALEF: char = '\u{0627}';
const WAW: char = '\u{0648}';
const YAA: char = '\u{064A}';
const HAA: char = '\u{0647}';

/// Canonicalize Arabic text.
///
/// Removes tashkeel and tatweel, folds the Alef/Hamza/Taa-Marbuta/Alef-Maksura
/// variants onto one letter each, and drops every character that is not an
/// Arabic letter. Whitespace is kept so whole phrases can be normalized.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_tashkeel(c) && c != TATWEEL)
        .map(fold_letter)
        .filter(|&c| c.is_whitespace() || is_arabic_char(c))
        .collect()
}

/// Strip tashkeel and tatweel only, keeping letter shapes as written.
///
/// Used for display, where `ة` and `ه` must stay distinct.
pub fn remove_tashkeel_only(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_tashkeel(c) && c != TATWEEL)
        .collect()
}

/// Whether `c` is a letter (or letter-like mark) of the Arabic script.
///
/// Arabic punctuation and digits live inside the same Unicode blocks but are
/// not letters, so they are excluded.
pub fn is_arabic_char(c: char) -> bool {
    let in_block = matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    );

    in_block && !is_arabic_punctuation_or_digit(c)
}

fn is_tashkeel(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
            | '\u{08D3}'..='\u{08E1}'
            | '\u{08E3}'..='\u{08FF}'
            // isolated harakat presentation forms
            | '\u{FE70}'..='\u{FE72}'
            | '\u{FE74}'
            | '\u{FE76}'..='\u{FE7F}'
    )
}

fn is_arabic_punctuation_or_digit(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{060F}'
            | '\u{061B}'..='\u{061F}'
            | '\u{0660}'..='\u{066D}'
            | '\u{06D4}'
            | '\u{06DD}'
            | '\u{06DE}'
            | '\u{06E9}'
            | '\u{06F0}'..='\u{06F9}'
            | '\u{08E2}'
            | '\u{FD3E}'
            | '\u{FD3F}'
            | '\u{FEFF}'
    )
}

fn fold_letter(c: char) -> char {
    match c {
        // madda, hamza above, hamza below, wasla
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => ALEF,
        '\u{0624}' => WAW,
        '\u{0626}' => YAA,
        // taa marbuta
        '\u{0629}' => HAA,
        // alef maksura
        '\u{0649}' => YAA,
        other => other,
    }
}

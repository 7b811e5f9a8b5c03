/*!
 * Constant tables used by the analyzers.
 *
 * Every table is immutable and handed to the analyzers explicitly through
 * `AlignmentRules` and `StopWords`, so tests can swap them out.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Characters that end a word-like run in Japanese target text.
pub const BREAK_CHARS: &str = "のをがはにでとからまでより・、。「」『』（）【】";

/// Particles trimmed from both ends of an aligned span.
pub const PARTICLE_CHARS: &str = "のをがはにでとからまでより";

/// Characters ignored when deciding whether two translations differ trivially.
pub const TRIVIAL_CHARS: [char; 5] = [' ', '　', '・', ':', '：'];

/// Source strings that are nothing but a format specifier.
pub const BARE_PLACEHOLDERS: [&str; 4] = ["%s", "%d", "%1$s", "%2$s"];

/// Prefixes of separator/banner lines in lang files.
pub const BANNER_PREFIXES: [&str; 2] = ["===", "---"];

/// Infix that marks a banner line anywhere in the string.
pub const BANNER_INFIX: &str = "====";

/// Words too common or too context-dependent to be worth reporting as single-word phrases.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    // English articles, pronouns and auxiliaries
    "the", "a", "an", "of", "to", "and", "or", "in", "on", "at", "for", "with", "by", "from",
    "as", "is", "are", "was", "were", "be", "has", "have", "had", "do", "does", "this", "that",
    "these", "those", "it", "its", "i", "you", "we", "they", "he", "she", "my", "your", "will",
    "would", "can", "could", "should", "may", "might", "must", "all", "any", "some", "no", "not",
    // Minecraft dye colours
    "white", "orange", "magenta", "light", "yellow", "lime", "pink", "gray", "cyan", "purple",
    "blue", "brown", "green", "red", "black", "grey",
    // Generic block/item nouns
    "block", "item", "tile", "entity", "slab", "stairs", "wall", "fence", "button", "plate",
    "door", "gate", "small", "large", "big", "tiny",
];

static DEFAULT_STOP_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DEFAULT_STOP_WORDS.iter().copied().collect());

/// Is `c` in the CJK/kana block range used to detect Japanese text?
pub fn is_target_script(c: char) -> bool {
    ('\u{3000}'..='\u{9FFF}').contains(&c)
}

/// Break and particle sets used by the span aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentRules {
    /// Non-whitespace characters that count as span boundaries
    pub break_chars: &'static str,
    /// Characters trimmed from the ends of an aligned span
    pub particle_chars: &'static str,
}

impl AlignmentRules {
    /// Whitespace always breaks; otherwise consult `break_chars`.
    pub fn is_break(&self, c: char) -> bool {
        c.is_whitespace() || self.break_chars.contains(c)
    }

    pub fn is_particle(&self, c: char) -> bool {
        self.particle_chars.contains(c)
    }
}

impl Default for AlignmentRules {
    fn default() -> Self {
        Self {
            break_chars: BREAK_CHARS,
            particle_chars: PARTICLE_CHARS,
        }
    }
}

/// Case-insensitive stoplist for single-word phrases.
#[derive(Debug, Clone)]
pub enum StopWords {
    /// The built-in table
    Builtin,
    /// A caller-provided set, stored lowercased
    Custom(HashSet<String>),
}

impl StopWords {
    pub fn custom<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Custom(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        match self {
            StopWords::Builtin => DEFAULT_STOP_SET.contains(lowered.as_str()),
            StopWords::Custom(set) => set.contains(&lowered),
        }
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::Builtin
    }
}

//! Offline phrase/word dictionary used when every backend has failed.
//!
//! Tables are keyed by direction (`"en-de"`, `"de-en"`) and keep their
//! entries in insertion order; that order breaks ties when two phrases of
//! equal length match. All phrases and translations are stored lowercase.
//!
//! Lookup proceeds in three stages, first hit wins:
//!
//! 1. the whole (trimmed, lowercased) input as an exact phrase;
//! 2. the longest phrase that occurs as a substring of the input, replaced
//!    once in place;
//! 3. word by word, ignoring surrounding punctuation.
//!
//! When nothing matches, [`PhraseDictionary::translate_or_marker`] returns
//! the `"[Translation needed: …]"` marker.
//!
//! User entries can be merged from a JSON file shaped like
//! `{"en-de": {"phrase": "translation"}}`; they override built-in entries.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};

use crate::translate::types::pair_key;

/// Characters stripped from both ends of a word before word-by-word lookup.
const WORD_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']'];

/// Marker returned when neither the backends nor the dictionary could
/// translate `text`.
///
/// ```
/// use voice_translator::translate::translation_needed;
///
/// assert_eq!(translation_needed("xyz"), "[Translation needed: xyz]");
/// ```
pub fn translation_needed(text: &str) -> String {
    format!("[Translation needed: {text}]")
}

// ---------------------------------------------------------------------------
// PhraseTable
// ---------------------------------------------------------------------------

/// Entries for one direction, ordered, with an exact-match index.
#[derive(Debug, Clone, Default)]
struct PhraseTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PhraseTable {
    /// Insert or overwrite. Returns `false` for an empty phrase/translation.
    fn insert(&mut self, phrase: &str, translation: &str) -> bool {
        let (phrase, translation) = match normalize(phrase, translation) {
            Some(p) => p,
            None => return false,
        };
        match self.index.get(&phrase) {
            Some(&i) => self.entries[i].1 = translation,
            None => {
                self.index.insert(phrase.clone(), self.entries.len());
                self.entries.push((phrase, translation));
            }
        }
        true
    }

    /// Insert only when `phrase` is not present yet.
    fn insert_if_absent(&mut self, phrase: &str, translation: &str) {
        if let Some((phrase, translation)) = normalize(phrase, translation) {
            if !self.index.contains_key(&phrase) {
                self.index.insert(phrase.clone(), self.entries.len());
                self.entries.push((phrase, translation));
            }
        }
    }

    fn get(&self, phrase: &str) -> Option<&str> {
        self.index.get(phrase).map(|&i| self.entries[i].1.as_str())
    }

    /// Longest phrase contained in `text`; the earliest entry wins ties.
    fn longest_substring_match(&self, text: &str) -> Option<&(String, String)> {
        let mut best: Option<(&(String, String), usize)> = None;
        for entry in &self.entries {
            if !text.contains(entry.0.as_str()) {
                continue;
            }
            let len = entry.0.chars().count();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((entry, len));
            }
        }
        best.map(|(entry, _)| entry)
    }
}

fn normalize(phrase: &str, translation: &str) -> Option<(String, String)> {
    let phrase = phrase.trim().to_lowercase();
    let translation = translation.trim().to_lowercase();
    if phrase.is_empty() || translation.is_empty() {
        None
    } else {
        Some((phrase, translation))
    }
}

// ---------------------------------------------------------------------------
// PhraseDictionary
// ---------------------------------------------------------------------------

/// Immutable-at-runtime lookup tables for offline translation.
///
/// # Example
/// ```
/// use voice_translator::translate::PhraseDictionary;
///
/// let dict = PhraseDictionary::builtin();
/// assert_eq!(dict.translate_or_marker("Good morning", "en", "de"), "guten morgen");
/// assert_eq!(dict.translate_or_marker("danke", "de", "en"), "thank you");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhraseDictionary {
    tables: HashMap<String, PhraseTable>,
}

impl PhraseDictionary {
    /// An empty dictionary (every lookup misses).
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English/German tables.
    ///
    /// `de-en` is the inverse of `en-de`; where several English phrases map
    /// to the same German one, the first listed wins.
    pub fn builtin() -> Self {
        let mut dict = Self::new();
        dict.extend("en", "de", EN_DE.iter().copied());

        let reverse = dict.table_mut(&pair_key("de", "en"));
        for (en, de) in EN_DE {
            reverse.insert_if_absent(de, en);
        }
        dict
    }

    /// Built-in tables plus the user file at `path`, when it exists.
    ///
    /// A user file that cannot be read or parsed is logged and skipped.
    pub fn builtin_with_user_file(path: &Path) -> Self {
        let mut dict = Self::builtin();
        if path.exists() {
            match dict.load_user_entries(path) {
                Ok(n) => log::info!("Loaded {n} user dictionary entries from {}", path.display()),
                Err(e) => log::warn!("Ignoring user dictionary {}: {e:#}", path.display()),
            }
        }
        dict
    }

    /// Build a single-direction dictionary from `(phrase, translation)` pairs.
    pub fn from_entries<'a>(
        source: &str,
        target: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut dict = Self::new();
        dict.extend(source, target, entries);
        dict
    }

    // -----------------------------------------------------------------------
    // Construction helpers
    // -----------------------------------------------------------------------

    /// Insert or overwrite one entry. Empty phrases are ignored.
    pub fn insert(&mut self, source: &str, target: &str, phrase: &str, translation: &str) {
        self.table_mut(&pair_key(source, target))
            .insert(phrase, translation);
    }

    /// Insert several entries, keeping their order.
    pub fn extend<'a>(
        &mut self,
        source: &str,
        target: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let table = self.table_mut(&pair_key(source, target));
        for (phrase, translation) in entries {
            table.insert(phrase, translation);
        }
    }

    /// Merge entries from a JSON file. Returns how many entries were applied.
    pub fn load_user_entries(&mut self, path: &Path) -> Result<usize> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let parsed: HashMap<String, BTreeMap<String, String>> = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", path.display()))?;

        let mut applied = 0;
        for (key, entries) in parsed {
            let key = key.trim().to_lowercase();
            let table = self.table_mut(&key);
            for (phrase, translation) in &entries {
                if table.insert(phrase, translation) {
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }

    fn table_mut(&mut self, key: &str) -> &mut PhraseTable {
        self.tables.entry(key.to_string()).or_default()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Exact lookup of an already-normalised (lowercase, trimmed) phrase.
    pub fn lookup(&self, source: &str, target: &str, phrase: &str) -> Option<&str> {
        self.tables.get(&pair_key(source, target))?.get(phrase)
    }

    /// Number of entries for one direction.
    pub fn len(&self, source: &str, target: &str) -> usize {
        self.tables
            .get(&pair_key(source, target))
            .map_or(0, |t| t.entries.len())
    }

    /// `true` when no direction holds any entry.
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(|t| t.entries.is_empty())
    }

    /// Translate `text` using the three lookup stages.
    ///
    /// Returns `None` when nothing in `text` could be translated.
    pub fn translate(&self, text: &str, source: &str, target: &str) -> Option<String> {
        let table = self.tables.get(&pair_key(source, target))?;
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        // 1. Whole input as a phrase.
        if let Some(hit) = table.get(&lower) {
            return Some(hit.to_string());
        }

        // 2. Longest contained phrase, replaced once.
        if let Some((phrase, translation)) = table.longest_substring_match(&lower) {
            return Some(lower.replacen(phrase.as_str(), translation, 1));
        }

        // 3. Word by word.
        let mut translated_any = false;
        let words: Vec<String> = lower
            .split_whitespace()
            .map(|word| match translate_word(table, word) {
                Some(w) => {
                    translated_any = true;
                    w
                }
                None => word.to_string(),
            })
            .collect();

        translated_any.then(|| words.join(" "))
    }

    /// [`translate`](Self::translate), or the "translation needed" marker
    /// built from the trimmed original text.
    pub fn translate_or_marker(&self, text: &str, source: &str, target: &str) -> String {
        self.translate(text, source, target)
            .unwrap_or_else(|| translation_needed(text.trim()))
    }
}

/// Look up one whitespace token, keeping its surrounding punctuation.
fn translate_word(table: &PhraseTable, word: &str) -> Option<String> {
    let core = word.trim_matches(WORD_PUNCTUATION);
    if core.is_empty() {
        return None;
    }
    let translation = table.get(core)?;

    let start = word.len() - word.trim_start_matches(WORD_PUNCTUATION).len();
    let end = start + core.len();
    Some(format!("{}{}{}", &word[..start], translation, &word[end..]))
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

static EN_DE: &[(&str, &str)] = &[
    // Greetings
    ("hello", "hallo"),
    ("hi", "hallo"),
    ("good morning", "guten morgen"),
    ("good afternoon", "guten tag"),
    ("good evening", "guten abend"),
    ("good night", "gute nacht"),
    ("goodbye", "auf wiedersehen"),
    ("bye", "tschüss"),
    ("see you later", "bis später"),
    // Politeness
    ("please", "bitte"),
    ("thank you", "danke"),
    ("thanks", "danke"),
    ("thank you very much", "vielen dank"),
    ("you are welcome", "bitte schön"),
    ("excuse me", "entschuldigung"),
    ("sorry", "entschuldigung"),
    ("pardon", "verzeihung"),
    // Questions
    ("how are you", "wie geht es dir"),
    ("what is your name", "wie heißt du"),
    ("where are you from", "woher kommst du"),
    ("how old are you", "wie alt bist du"),
    ("what time is it", "wie spät ist es"),
    ("what time", "wie spät"),
    ("where is", "wo ist"),
    ("how much", "wie viel"),
    ("how many", "wie viele"),
    ("what", "was"),
    ("when", "wann"),
    ("where", "wo"),
    ("why", "warum"),
    ("how", "wie"),
    ("who", "wer"),
    // Responses
    ("yes", "ja"),
    ("no", "nein"),
    ("maybe", "vielleicht"),
    ("i do not know", "ich weiß nicht"),
    ("i understand", "ich verstehe"),
    ("i do not understand", "ich verstehe nicht"),
    ("i speak english", "ich spreche englisch"),
    ("do you speak english", "sprechen sie englisch"),
    ("i love you", "ich liebe dich"),
    ("i like it", "es gefällt mir"),
    ("i need", "ich brauche"),
    // Emergency and help
    ("help", "hilfe"),
    ("help me", "hilf mir"),
    ("call the police", "rufen sie die polizei"),
    ("call a doctor", "rufen sie einen arzt"),
    ("emergency", "notfall"),
    ("hospital", "krankenhaus"),
    ("police", "polizei"),
    ("fire department", "feuerwehr"),
    // Travel and directions
    ("where is the bathroom", "wo ist die toilette"),
    ("where is the train station", "wo ist der bahnhof"),
    ("where is the airport", "wo ist der flughafen"),
    ("where is the hotel", "wo ist das hotel"),
    ("where is the restaurant", "wo ist das restaurant"),
    ("bathroom", "badezimmer"),
    ("hotel", "hotel"),
    ("restaurant", "restaurant"),
    ("train station", "bahnhof"),
    ("airport", "flughafen"),
    ("left", "links"),
    ("right", "rechts"),
    ("straight", "geradeaus"),
    ("near", "nah"),
    ("far", "weit"),
    // Food and drink
    ("water", "wasser"),
    ("food", "essen"),
    ("bread", "brot"),
    ("meat", "fleisch"),
    ("fish", "fisch"),
    ("vegetables", "gemüse"),
    ("fruit", "obst"),
    ("coffee", "kaffee"),
    ("tea", "tee"),
    ("beer", "bier"),
    ("wine", "wein"),
    ("milk", "milch"),
    ("sugar", "zucker"),
    ("salt", "salz"),
    // Numbers
    ("one", "eins"),
    ("two", "zwei"),
    ("three", "drei"),
    ("four", "vier"),
    ("five", "fünf"),
    ("six", "sechs"),
    ("seven", "sieben"),
    ("eight", "acht"),
    ("nine", "neun"),
    ("ten", "zehn"),
    ("eleven", "elf"),
    ("twelve", "zwölf"),
    ("twenty", "zwanzig"),
    ("thirty", "dreißig"),
    ("forty", "vierzig"),
    ("fifty", "fünfzig"),
    ("hundred", "hundert"),
    ("thousand", "tausend"),
    // Common verbs
    ("go", "gehen"),
    ("come", "kommen"),
    ("see", "sehen"),
    ("hear", "hören"),
    ("speak", "sprechen"),
    ("eat", "essen"),
    ("drink", "trinken"),
    ("sleep", "schlafen"),
    ("work", "arbeiten"),
    ("study", "studieren"),
    ("play", "spielen"),
    ("run", "laufen"),
    ("walk", "gehen"),
    ("buy", "kaufen"),
    ("sell", "verkaufen"),
    ("give", "geben"),
    ("take", "nehmen"),
    // Time
    ("today", "heute"),
    ("tomorrow", "morgen"),
    ("yesterday", "gestern"),
    ("now", "jetzt"),
    ("later", "später"),
    ("early", "früh"),
    ("late", "spät"),
    ("morning", "morgen"),
    ("afternoon", "nachmittag"),
    ("evening", "abend"),
    ("night", "nacht"),
    ("monday", "montag"),
    ("tuesday", "dienstag"),
    ("wednesday", "mittwoch"),
    ("thursday", "donnerstag"),
    ("friday", "freitag"),
    ("saturday", "samstag"),
    ("sunday", "sonntag"),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small() -> PhraseDictionary {
        PhraseDictionary::from_entries(
            "en",
            "de",
            [("good morning", "guten morgen"), ("morning", "morgen")],
        )
    }

    #[test]
    fn exact_phrase_match_ignores_case_and_padding() {
        let dict = small();
        assert_eq!(
            dict.translate("  Good Morning ", "en", "de").as_deref(),
            Some("guten morgen")
        );
    }

    #[test]
    fn longest_contained_phrase_wins() {
        let dict = small();
        assert_eq!(
            dict.translate("good morning everyone", "en", "de").as_deref(),
            Some("guten morgen everyone")
        );
    }

    #[test]
    fn equal_length_tie_goes_to_first_entry() {
        let dict = PhraseDictionary::from_entries("en", "de", [("abc", "first"), ("xyz", "second")]);
        assert_eq!(
            dict.translate("xyz abc", "en", "de").as_deref(),
            Some("xyz first")
        );
    }

    #[test]
    fn substring_replacement_happens_once() {
        let dict = PhraseDictionary::from_entries("en", "de", [("tea", "tee")]);
        assert_eq!(
            dict.translate("tea or tea", "en", "de").as_deref(),
            Some("tee or tea")
        );
    }

    #[test]
    fn quoted_word_keeps_its_quotes() {
        let mut dict = PhraseDictionary::new();
        dict.insert("en", "de", "yes", "ja");
        assert_eq!(
            dict.translate_or_marker("\"yes\"", "en", "de"),
            "\"ja\""
        );
    }

    #[test]
    fn translate_word_strips_only_surrounding_punctuation() {
        let mut table = PhraseTable::default();
        table.insert("water", "wasser");
        assert_eq!(translate_word(&table, "(water!)").as_deref(), Some("(wasser!)"));
        assert_eq!(translate_word(&table, "wa.ter"), None);
        assert_eq!(translate_word(&table, "?!"), None);
    }

    #[test]
    fn miss_yields_marker_with_original_text() {
        let dict = small();
        assert_eq!(
            dict.translate_or_marker("Xyz Abc", "en", "de"),
            "[Translation needed: Xyz Abc]"
        );
    }

    #[test]
    fn unknown_direction_misses() {
        let dict = small();
        assert!(dict.translate("good morning", "en", "fr").is_none());
        assert_eq!(dict.len("en", "fr"), 0);
    }

    #[test]
    fn insert_overwrites_existing_phrase_in_place() {
        let mut dict = small();
        dict.insert("en", "de", "Morning", "Vormittag");
        assert_eq!(dict.lookup("en", "de", "morning"), Some("vormittag"));
        assert_eq!(dict.len("en", "de"), 2);
    }

    #[test]
    fn empty_entries_are_ignored() {
        let mut dict = PhraseDictionary::new();
        dict.insert("en", "de", "  ", "leer");
        dict.insert("en", "de", "empty", "");
        assert!(dict.is_empty());
    }

    #[test]
    fn builtin_reverse_table_is_inverse_of_forward() {
        let dict = PhraseDictionary::builtin();
        assert_eq!(dict.lookup("en", "de", "good morning"), Some("guten morgen"));
        assert_eq!(dict.lookup("de", "en", "guten morgen"), Some("good morning"));
        // Every forward entry translates back to some English phrase.
        for (_, de) in EN_DE {
            assert!(dict.lookup("de", "en", de).is_some(), "missing reverse for {de}");
        }
    }

    #[test]
    fn builtin_reverse_prefers_first_listed_phrase() {
        let dict = PhraseDictionary::builtin();
        assert_eq!(dict.lookup("de", "en", "hallo"), Some("hello"));
        assert_eq!(dict.lookup("de", "en", "danke"), Some("thank you"));
        assert_eq!(dict.lookup("de", "en", "essen"), Some("food"));
        assert_eq!(dict.lookup("de", "en", "morgen"), Some("tomorrow"));
    }

    #[test]
    fn user_file_overrides_and_extends() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("user-dictionary.json");
        std::fs::write(
            &path,
            r#"{ "en-de": { "Hello": "Servus", "cheers": "prost" }, "en-fr": { "hello": "bonjour" } }"#,
        )
        .expect("write");

        let mut dict = PhraseDictionary::builtin();
        let applied = dict.load_user_entries(&path).expect("load");

        assert_eq!(applied, 3);
        assert_eq!(dict.lookup("en", "de", "hello"), Some("servus"));
        assert_eq!(dict.lookup("en", "de", "cheers"), Some("prost"));
        assert_eq!(dict.lookup("en", "fr", "hello"), Some("bonjour"));
    }

    #[test]
    fn broken_user_file_falls_back_to_builtin() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("user-dictionary.json");
        std::fs::write(&path, "{ not json").expect("write");

        let dict = PhraseDictionary::builtin_with_user_file(&path);
        assert_eq!(dict.len("en", "de"), PhraseDictionary::builtin().len("en", "de"));
    }

    #[test]
    fn missing_user_file_is_not_an_error() {
        let dir = tempdir().expect("temp dir");
        let dict = PhraseDictionary::builtin_with_user_file(&dir.path().join("absent.json"));
        assert!(!dict.is_empty());
    }
}

//! The few user-visible strings the engine itself produces.

use crate::locale::LangText;

const LOAD_ERROR: &[(&str, &str)] = &[
    ("en", "The system map could not be loaded. Please try again later."),
    ("de", "Die Systemlandkarte konnte nicht geladen werden. Bitte versuchen Sie es später erneut."),
    ("fr", "La carte des systèmes n'a pas pu être chargée. Veuillez réessayer plus tard."),
    ("it", "Non è stato possibile caricare la mappa dei sistemi. Riprovare più tardi."),
];

const DEFAULT_TITLE: &[(&str, &str)] = &[
    ("en", "System Map"),
    ("de", "Systemlandkarte"),
    ("fr", "Carte des systèmes"),
    ("it", "Mappa dei sistemi"),
];

fn table(entries: &[(&str, &str)]) -> LangText {
    entries
        .iter()
        .fold(LangText::new(), |t, (lang, text)| t.with(*lang, *text))
}

/// Message shown in place of the title when startup fails.
pub fn load_error<S: AsRef<str>>(lang: &str, fallbacks: &[S]) -> String {
    table(LOAD_ERROR).text(lang, fallbacks)
}

/// Title used when the dataset does not provide one.
pub fn default_title<S: AsRef<str>>(lang: &str, fallbacks: &[S]) -> String {
    table(DEFAULT_TITLE).text(lang, fallbacks)
}

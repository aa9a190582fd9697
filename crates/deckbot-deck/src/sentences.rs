//! Heuristic sentence splitting for company descriptions
//!
//! Periods that do not end a sentence (titles, initials, acronyms, domain
//! names, company suffixes) are masked with a placeholder, terminators are
//! marked, and the text is split on the marks.

use crate::error::Result;
use regex::Regex;

const PRD: &str = "<prd>";
const STOP: &str = "<stop>";

const ALPHABETS: &str = "([A-Za-z])";
const PREFIXES: &str = "(Mr|St|Mrs|Ms|Dr)[.]";
const SUFFIXES: &str = "(Inc|Ltd|Jr|Sr|Co)";
const STARTERS: &str =
    r"(Mr|Mrs|Ms|Dr|He\s|She\s|It\s|They\s|Their\s|Our\s|We\s|But\s|However\s|That\s|This\s|Wherever)";
const ACRONYMS: &str = "([A-Z][.][A-Z][.](?:[A-Z][.])?)";
const WEBSITES: &str = "[.](com|net|org|io|gov)";

/// Compiled masking rules, applied in order
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    rules: Vec<(Regex, &'static str)>,
}

impl SentenceSplitter {
    pub fn new() -> Result<Self> {
        let rules = vec![
            (Regex::new(PREFIXES)?, "${1}<prd>"),
            (Regex::new(WEBSITES)?, "<prd>${1}"),
            (Regex::new(&format!(r"\s{ALPHABETS}[.] "))?, " ${1}<prd> "),
            (Regex::new(&format!("{ACRONYMS} {STARTERS}"))?, "${1}<stop> ${2}"),
            (
                Regex::new(&format!("{ALPHABETS}[.]{ALPHABETS}[.]{ALPHABETS}[.]"))?,
                "${1}<prd>${2}<prd>${3}<prd>",
            ),
            (
                Regex::new(&format!("{ALPHABETS}[.]{ALPHABETS}[.]"))?,
                "${1}<prd>${2}<prd>",
            ),
            (Regex::new(&format!(" {SUFFIXES}[.] {STARTERS}"))?, " ${1}<prd><stop> ${2}"),
            (Regex::new(&format!(" {SUFFIXES}[.]"))?, " ${1}<prd>"),
            (Regex::new(&format!(" {ALPHABETS}[.]"))?, " ${1}<prd>"),
        ];
        Ok(Self { rules })
    }

    /// Split a paragraph into trimmed sentences
    ///
    /// A trailing fragment without a terminator is kept as the last sentence.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut text = format!(" {}  ", text.replace('\n', " "));

        for (idx, (pattern, replacement)) in self.rules.iter().enumerate() {
            text = pattern.replace_all(&text, *replacement).into_owned();
            // Ph.D. is masked right after the website rule
            if idx == 1 && text.contains("Ph.D") {
                text = text.replace("Ph.D.", "Ph<prd>D<prd>");
            }
        }

        let text = text
            .replace(".\"", "\".")
            .replace("!\"", "\"!")
            .replace("?\"", "\"?")
            .replace('.', ".<stop>")
            .replace('?', "?<stop>")
            .replace('!', "!<stop>")
            .replace(PRD, ".");

        text.split(STOP)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Split `text` with a freshly compiled [`SentenceSplitter`]
pub fn split_into_sentences(text: &str) -> Result<Vec<String>> {
    Ok(SentenceSplitter::new()?.split(text))
}

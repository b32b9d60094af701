//! Header/footer detection
//!
//! Three line-based passes over a document:
//!
//! 1. **Header cut**: the first lines are classified against a set of
//!    [`HeaderIndicator`] rules; once enough indicators accumulate before the
//!    first substantial line, everything above that line is dropped.
//! 2. **Page numbers**: lines that contain nothing but a page marker.
//! 3. **Running headers/footers**: short lines repeated across the document.
//!
//! Blank-line runs and repeated spaces are collapsed afterwards.

use crate::types::BoilerplateConfig;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::LazyLock;

static RE_PAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:page|p\.?)\s*\d+\b").unwrap());

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap());

static RE_LEGAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:copyright|confidentiel|confidential|propriété)\b|©").unwrap()
});

static RE_DOCUMENT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:document|rapport|mémoire|thèse|article)\b|(?:titre|title|sujet|subject|auteur|author|par|by|date|version)\s*:)",
    )
    .unwrap()
});

static RE_CONTACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://|www\.|@[\w.-]+\.\w+|\+?\d{10,}").unwrap());

static RE_PAGE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:page\s+\d+|p\.\s*\d+|-\s*\d+\s*-|\[\d+\]|\d+\s*/\s*\d+)\s*$").unwrap()
});

static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Lines considered "near the top" for the short-line and all-caps rules
const TOP_LINES: usize = 5;
/// Lines in which a date still counts as header material
const DATE_LINES: usize = 8;

/// Independent rules that flag a line as header material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderIndicator {
    /// Fewer than 5 words within the first 5 lines
    ShortLine,
    /// "Page 3", "p. 3"
    PageNumber,
    /// Numeric date within the first 8 lines
    Date,
    /// Copyright or confidentiality marker
    LegalNotice,
    /// "Title:", "Author:", "Date:", "Rapport ..." and similar
    DocumentField,
    /// All-caps line of 3 to 10 words within the first 5 lines
    AllCaps,
    /// URL, e-mail address or phone number
    Contact,
}

impl HeaderIndicator {
    pub const ALL: [HeaderIndicator; 7] = [
        HeaderIndicator::ShortLine,
        HeaderIndicator::PageNumber,
        HeaderIndicator::Date,
        HeaderIndicator::LegalNotice,
        HeaderIndicator::DocumentField,
        HeaderIndicator::AllCaps,
        HeaderIndicator::Contact,
    ];

    /// Check a trimmed, non-empty line at `line_idx` against this rule
    pub fn matches(self, line: &str, line_idx: usize, word_count: usize) -> bool {
        match self {
            HeaderIndicator::ShortLine => line_idx < TOP_LINES && (1..5).contains(&word_count),
            HeaderIndicator::PageNumber => RE_PAGE_REF.is_match(line),
            HeaderIndicator::Date => line_idx < DATE_LINES && RE_DATE.is_match(line),
            HeaderIndicator::LegalNotice => RE_LEGAL.is_match(line),
            HeaderIndicator::DocumentField => RE_DOCUMENT_FIELD.is_match(line),
            HeaderIndicator::AllCaps => {
                line_idx < TOP_LINES && (3..=10).contains(&word_count) && is_all_caps(line)
            }
            HeaderIndicator::Contact => RE_CONTACT.is_match(line),
        }
    }
}

/// Every indicator the line triggers
pub fn classify_line(line: &str, line_idx: usize) -> Vec<HeaderIndicator> {
    let word_count = line.split_whitespace().count();
    HeaderIndicator::ALL
        .into_iter()
        .filter(|rule| rule.matches(line, line_idx, word_count))
        .collect()
}

/// Strip headers, page numbers and running headers/footers.
///
/// Text shorter than `config.min_chars` characters or with fewer than
/// `config.min_lines` lines is returned unchanged.
pub fn remove_boilerplate(text: &str, config: &BoilerplateConfig) -> String {
    if text.trim().chars().count() < config.min_chars
        || text.split('\n').count() < config.min_lines
    {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let header_end = find_header_end(&lines, config);
    trace_event!(header_end, "header cut");

    let body = remove_page_number_lines(&lines[header_end..]);
    let body = remove_repeated_lines(body, config);
    collapse_layout(&body.join("\n"))
}

/// Index of the first line of main content (0 when no header was found)
///
/// A substantial line ends the scan and cuts every flagged line above it.
/// When no such line is found within `config.scan_lines`, the cut needs at
/// least `config.min_indicators` flagged lines.
pub fn find_header_end(lines: &[&str], config: &BoilerplateConfig) -> usize {
    let mut indicators = 0;
    let mut potential_end = 0;
    let mut scanned = 0;

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if scanned == config.scan_lines {
            break;
        }
        scanned += 1;

        if !classify_line(line, idx).is_empty() {
            indicators += 1;
            potential_end = idx + 1;
        } else if line.split_whitespace().count() >= config.content_min_words {
            // Content starts here: whatever was flagged above it is header,
            // however few indicators there were
            return potential_end;
        }
    }

    if indicators >= config.min_indicators {
        potential_end
    } else {
        0
    }
}

/// Drop lines that hold nothing but a page marker
pub fn remove_page_number_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| !RE_PAGE_ONLY.is_match(line))
        .collect()
}

/// Drop short lines that repeat often enough to be running headers/footers
pub fn remove_repeated_lines<'a>(lines: Vec<&'a str>, config: &BoilerplateConfig) -> Vec<&'a str> {
    if lines.len() < config.repeat_min_lines {
        return lines;
    }

    let mut frequency: FxHashMap<&str, usize> = FxHashMap::default();
    for line in &lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.chars().count() < config.repeat_max_chars {
            *frequency.entry(trimmed).or_insert(0) += 1;
        }
    }

    let repeated: FxHashSet<&str> = frequency
        .into_iter()
        .filter(|(line, count)| {
            *count >= config.repeat_min_count
                && line.split_whitespace().count() <= config.repeat_max_words
        })
        .map(|(line, _)| line)
        .collect();

    if repeated.is_empty() {
        return lines;
    }
    trace_event!(count = repeated.len(), "repeated lines removed");

    lines
        .into_iter()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || !repeated.contains(trimmed)
        })
        .collect()
}

fn collapse_layout(text: &str) -> String {
    let text = RE_BLANK_RUN.replace_all(text, "\n\n");
    let text = RE_SPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// At least one cased character and no lowercase ones
fn is_all_caps(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BoilerplateConfig {
        BoilerplateConfig::default()
    }

    const BODY: [&str; 7] = [
        "Les réseaux de neurones artificiels apprennent des représentations utiles à partir de nombreuses données.",
        "Chaque couche transforme progressivement le signal reçu afin d'extraire des caractéristiques plus abstraites.",
        "Les chercheurs comparent plusieurs architectures pour mesurer leur précision sur des tâches de classification.",
        "La régularisation limite le surapprentissage lorsque le volume des exemples annotés reste modeste.",
        "Les résultats obtenus confirment que la profondeur du modèle améliore nettement la qualité des prédictions.",
        "Une validation croisée rigoureuse permet enfin de comparer équitablement les différentes configurations testées.",
        "Ces travaux ouvrent la voie à des applications industrielles dans la santé et les transports.",
    ];

    #[test]
    fn test_short_text_unchanged() {
        let text = "Page 1\nCONFIDENTIAL\nBonjour.";
        assert_eq!(remove_boilerplate(text, &config()), text);
    }

    #[test]
    fn test_few_lines_unchanged() {
        let text = format!("Page 1\n{}\n{}\n{}", BODY[0], BODY[1], BODY[2]);
        assert_eq!(remove_boilerplate(&text, &config()), text);
    }

    #[test]
    fn test_header_stripped() {
        let mut lines = vec!["Page 1", "CONFIDENTIAL REPORT", "01/02/2024"];
        lines.extend(BODY.iter());
        let text = lines.join("\n");

        let cleaned = remove_boilerplate(&text, &config());
        assert!(cleaned.starts_with(BODY[0]));
        assert!(!cleaned.contains("CONFIDENTIAL"));
        assert!(!cleaned.contains("01/02/2024"));
        assert!(!cleaned.contains("Page 1"));
    }

    #[test]
    fn test_single_indicator_before_content_is_cut() {
        let mut lines = vec!["Introduction générale"];
        lines.extend(BODY.iter().take(5));
        let text = lines.join("\n");

        let all: Vec<&str> = text.split('\n').collect();
        assert_eq!(find_header_end(&all, &config()), 1);
        let cleaned = remove_boilerplate(&text, &config());
        assert_eq!(cleaned.lines().next(), Some(BODY[0]));
        assert!(!cleaned.contains("Introduction générale"));
    }

    #[test]
    fn test_content_first_line_not_cut() {
        let mut lines = vec![BODY[0], "Page 2"];
        lines.extend(BODY.iter().skip(1));
        let all: Vec<&str> = lines.to_vec();
        assert_eq!(find_header_end(&all, &config()), 0);
    }

    #[test]
    fn test_single_indicator_without_content_not_cut() {
        let lines = [
            "Introduction générale",
            "Cette phrase compte sept mots au total.",
            "La suivante reste elle aussi assez brève.",
        ];
        assert_eq!(find_header_end(&lines, &config()), 0);
    }

    #[test]
    fn test_classify_line_rules() {
        assert!(classify_line("Page 12", 10).contains(&HeaderIndicator::PageNumber));
        assert!(classify_line("Titre : Rapport", 10).contains(&HeaderIndicator::DocumentField));
        assert!(classify_line("© 2024 Société Exemple", 10).contains(&HeaderIndicator::LegalNotice));
        assert!(classify_line("Contact : info@exemple.fr", 10).contains(&HeaderIndicator::Contact));
        assert!(classify_line("RAPPORT ANNUEL DE GESTION", 2).contains(&HeaderIndicator::AllCaps));
        assert!(classify_line("15/03/2023", 3).contains(&HeaderIndicator::Date));
        assert!(!classify_line("15/03/2023", 9).contains(&HeaderIndicator::Date));
        assert!(classify_line(BODY[0], 0).is_empty());
    }

    #[test]
    fn test_page_number_lines_removed() {
        let lines = ["Texte", "Page 4", "- 5 -", "[6]", "7/10", "p. 8", "Suite du texte"];
        assert_eq!(remove_page_number_lines(&lines), vec!["Texte", "Suite du texte"]);
    }

    #[test]
    fn test_repeated_footer_removed_unique_kept() {
        let footer = "Rapport annuel interne";
        let unique = "Rapport annuel externe";
        assert_eq!(footer.len(), unique.len());

        let lines = [
            BODY[0], BODY[1], footer, BODY[2], BODY[3], footer, unique, BODY[4], footer, BODY[5],
            BODY[6], BODY[0],
        ];
        let text = lines.join("\n");

        let cleaned = remove_boilerplate(&text, &config());
        assert!(!cleaned.contains(footer));
        assert!(cleaned.contains(unique));
        assert!(cleaned.contains(BODY[6]));
    }

    #[test]
    fn test_layout_collapsed() {
        assert_eq!(collapse_layout("a  b\n\n\n\nc \n"), "a b\n\nc");
    }

    #[test]
    fn test_all_caps_detection() {
        assert!(is_all_caps("RAPPORT 2024"));
        assert!(!is_all_caps("Rapport 2024"));
        assert!(!is_all_caps("2024"));
    }
}

//! Quiz assembly
//!
//! Walks the ranked anchors once, threading an explicit accumulator that
//! tracks the items built so far, the sentences already questioned and how
//! often each keyword has been used.

use super::anchors::{extract_key_information, KeyInformation};
use super::distractors::{generate_distractors, score_question_quality};
use super::prompts::{build_explanation, build_question};
use crate::cleanup::{clean_inline, prepare_document};
use crate::errors::{Result, StudyError};
use crate::nlp::StopwordFilter;
use crate::types::{QuizAnchor, QuizConfig, QuizItem, StudyConfig};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::ControlFlow;

/// Options appended when distractors run short
pub const FILLER_OPTIONS: [&str; 4] = [
    "answer not mentioned",
    "information absent",
    "none of the above",
    "unknown option",
];

/// Up to three distinct distractors, then the answer, then fillers until
/// there are [`QuizItem::OPTION_COUNT`] options. Comparisons ignore case.
pub fn assemble_options(correct: &str, distractors: &[String]) -> Vec<String> {
    let correct_lower = correct.to_lowercase();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut options: Vec<String> = Vec::with_capacity(QuizItem::OPTION_COUNT);

    for candidate in distractors.iter().map(|d| d.trim()) {
        if options.len() == QuizItem::OPTION_COUNT - 1 {
            break;
        }
        let lowered = candidate.to_lowercase();
        if candidate.is_empty() || lowered == correct_lower || !seen.insert(lowered) {
            continue;
        }
        options.push(candidate.to_string());
    }

    options.push(correct.to_string());

    for filler in FILLER_OPTIONS {
        if options.len() >= QuizItem::OPTION_COUNT {
            break;
        }
        if filler == correct_lower || !seen.insert(filler.to_string()) {
            continue;
        }
        options.push(filler.to_string());
    }

    options
}

/// State threaded through the anchor walk
#[derive(Debug, Default)]
struct QuizAccumulator {
    items: Vec<QuizItem>,
    used_sentences: FxHashSet<String>,
    keyword_usage: FxHashMap<String, usize>,
}

impl QuizAccumulator {
    fn admits(&self, anchor: &QuizAnchor, config: &QuizConfig) -> bool {
        !self.used_sentences.contains(&anchor.sentence().text)
            && self.keyword_usage.get(anchor.keyword_lower()).copied().unwrap_or(0)
                < config.max_keyword_uses
    }

    fn record(&mut self, anchor: &QuizAnchor, item: QuizItem) {
        self.items.push(item);
        self.used_sentences.insert(anchor.sentence().text.clone());
        *self
            .keyword_usage
            .entry(anchor.keyword_lower().to_string())
            .or_insert(0) += 1;
    }
}

/// A question built for one anchor, before shuffling
#[derive(Debug, Clone)]
pub struct QuizCandidate {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
    pub explanation: String,
    pub quality: f64,
}

impl QuizCandidate {
    /// Build the prompt, options and explanation for an anchor.
    ///
    /// Fails when fewer than [`QuizItem::OPTION_COUNT`] options can be found.
    pub fn from_anchor(anchor: &QuizAnchor, pool: &[String], config: &QuizConfig) -> Result<Self> {
        let question = clean_inline(&build_question(anchor));
        let correct = clean_inline(anchor.keyword());
        let distractors = generate_distractors(&correct, pool, anchor, config.max_distractors);

        let options: Vec<String> = assemble_options(&correct, &distractors)
            .iter()
            .map(|o| clean_inline(o))
            .collect();
        if options.len() < QuizItem::OPTION_COUNT {
            return Err(StudyError::malformed(format!(
                "only {} options for \"{correct}\"",
                options.len()
            )));
        }

        let quality = score_question_quality(&question, &options, &correct);
        let explanation = clean_inline(&build_explanation(anchor, &correct));
        Ok(Self {
            question,
            options,
            correct,
            explanation,
            quality,
        })
    }

    /// Shuffle the options and validate the final item
    pub fn into_item<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<QuizItem> {
        self.options.shuffle(rng);
        let correct_index = self
            .options
            .iter()
            .position(|o| *o == self.correct)
            .ok_or_else(|| StudyError::malformed("correct answer missing from options"))?;
        QuizItem::new(self.question, self.options, correct_index, self.explanation)
    }
}

/// Build up to `num_questions` items from ranked anchors, shuffling options
/// with `rng`.
pub fn assemble_quiz<R: Rng + ?Sized>(
    info: &KeyInformation,
    num_questions: usize,
    config: &QuizConfig,
    rng: &mut R,
) -> Vec<QuizItem> {
    trace_stage!("assemble");

    if num_questions == 0 {
        return Vec::new();
    }
    let quota = config.quality_quota(num_questions);

    let folded = info.anchors.iter().try_fold(QuizAccumulator::default(), |mut acc, anchor| {
        if acc.items.len() >= num_questions {
            return ControlFlow::Break(acc);
        }
        if !acc.admits(anchor, config) {
            return ControlFlow::Continue(acc);
        }

        let candidate = match QuizCandidate::from_anchor(anchor, &info.pool, config) {
            Ok(candidate) => candidate,
            Err(_err) => {
                trace_event!(error = %_err, "candidate skipped");
                return ControlFlow::Continue(acc);
            }
        };
        if candidate.quality < config.quality_floor && acc.items.len() >= quota {
            trace_event!(quality = candidate.quality, "candidate below quality floor");
            return ControlFlow::Continue(acc);
        }

        match candidate.into_item(rng) {
            Ok(item) => acc.record(anchor, item),
            Err(_err) => {
                trace_event!(error = %_err, "candidate failed validation");
            }
        }
        ControlFlow::Continue(acc)
    });

    let (ControlFlow::Break(mut acc) | ControlFlow::Continue(mut acc)) = folded;
    acc.items.truncate(num_questions);
    acc.items
}

/// Clean `raw_text` and build a quiz with the given random source
pub fn generate_quiz_with_rng<R: Rng + ?Sized>(
    raw_text: &str,
    num_questions: usize,
    config: &StudyConfig,
    rng: &mut R,
) -> Vec<QuizItem> {
    let prepared = prepare_document(raw_text, &config.boilerplate);
    let stopwords = StopwordFilter::from_language(config.analyzer.stopword_language.as_deref());
    let info = extract_key_information(&prepared, &config.analyzer, &stopwords);
    if info.is_empty() {
        trace_event!("no quiz anchors");
        return Vec::new();
    }
    assemble_quiz(&info, num_questions, &config.quiz, rng)
}

/// Clean `raw_text` and build a quiz, shuffling with an entropy-seeded generator
pub fn generate_quiz(raw_text: &str, num_questions: usize, config: &StudyConfig) -> Vec<QuizItem> {
    generate_quiz_with_rng(raw_text, num_questions, config, &mut SmallRng::from_entropy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContextWindow, Sentence};

    const PARIS: &str =
        "Paris est la capitale de la France. Elle compte plus de deux millions d'habitants.";

    const VOLCANS: &str = "L'Etna est un volcan actif situé en Sicile orientale. \
        Le Vésuve domine la baie de Naples depuis des siècles. \
        Le Stromboli projette régulièrement des bombes volcaniques incandescentes. \
        Les volcans italiens attirent chaque année de nombreux géologues. \
        La lave du Vésuve a enseveli Pompéi en l'an 79. \
        Les géologues surveillent l'Etna grâce à des capteurs sismiques.";

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn quiz(text: &str, n: usize, seed: u64) -> Vec<QuizItem> {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_quiz_with_rng(text, n, &StudyConfig::default(), &mut rng)
    }

    #[test]
    fn test_assemble_options_order_and_fillers() {
        let options = assemble_options("Paris", &strings(&["Pari", "PARI", " ", "paris", "Lyon"]));
        assert_eq!(options, vec!["Pari", "Lyon", "Paris", "answer not mentioned"]);
    }

    #[test]
    fn test_assemble_options_caps_distractors() {
        let options = assemble_options("Paris", &strings(&["Lyon", "Nice", "Lille", "Rome"]));
        assert_eq!(options, vec!["Lyon", "Nice", "Lille", "Paris"]);
    }

    #[test]
    fn test_assemble_options_skips_colliding_filler() {
        let options = assemble_options("x", &strings(&["information absent"]));
        assert_eq!(
            options,
            vec!["information absent", "x", "answer not mentioned", "none of the above"]
        );
    }

    #[test]
    fn test_paris_quiz() {
        let items = quiz(PARIS, 1, 7);
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert!(item.correct_answer() == "Paris" || item.correct_answer() == "France");
        assert!(item.question().ends_with('?'));
        assert!(item.explanation().starts_with("The correct answer is «"));
    }

    #[test]
    fn test_seeded_quiz_is_reproducible() {
        assert_eq!(quiz(VOLCANS, 4, 42), quiz(VOLCANS, 4, 42));
    }

    #[test]
    fn test_quiz_invariants() {
        for n in [0, 1, 3, 10] {
            let items = quiz(VOLCANS, n, 3);
            assert!(items.len() <= n);
            for item in &items {
                assert_eq!(item.options().len(), QuizItem::OPTION_COUNT);
                let mut lowered: Vec<String> = item.options().iter().map(|o| o.to_lowercase()).collect();
                lowered.sort();
                lowered.dedup();
                assert_eq!(lowered.len(), QuizItem::OPTION_COUNT);
                assert!(item.correct_index() < QuizItem::OPTION_COUNT);
            }
        }
    }

    #[test]
    fn test_one_question_per_sentence() {
        let info = extract_key_information(
            VOLCANS,
            &StudyConfig::default().analyzer,
            &StopwordFilter::french_curated(),
        );
        let mut rng = SmallRng::seed_from_u64(1);
        let items = assemble_quiz(&info, 20, &QuizConfig::default(), &mut rng);

        let mut excerpts: Vec<&str> = items
            .iter()
            .filter_map(|i| i.explanation().split("Excerpt: ").nth(1))
            .collect();
        let total = excerpts.len();
        excerpts.sort_unstable();
        excerpts.dedup();
        assert_eq!(excerpts.len(), total);
        assert!(total <= 6);
    }

    fn anchor(text: &str, keyword: &str, index: usize) -> QuizAnchor {
        QuizAnchor::new(Sentence::new(text, index), keyword, ContextWindow::default(), 0.0, 1.0, false)
            .unwrap()
    }

    fn info(anchors: Vec<QuizAnchor>) -> KeyInformation {
        KeyInformation {
            anchors,
            pool: Vec::new(),
        }
    }

    fn answers(items: &[QuizItem]) -> Vec<&str> {
        items.iter().map(|i| i.correct_answer()).collect()
    }

    // Short completion prompts score at most 0.89
    fn short_anchors() -> Vec<QuizAnchor> {
        vec![
            anchor("La lave coule lentement.", "lave", 0),
            anchor("Le cratère fume encore.", "cratère", 1),
            anchor("La cendre retombe partout.", "cendre", 2),
            anchor("Le magma remonte vite.", "magma", 3),
            anchor("Le séisme inquiète Naples.", "séisme", 4),
        ]
    }

    #[test]
    fn test_quality_floor_applies_after_quota() {
        let strict = QuizConfig {
            quality_floor: 0.95,
            ..QuizConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);

        // quota for 4 questions is 2: the first two pass regardless of quality
        let items = assemble_quiz(&info(short_anchors()), 4, &strict, &mut rng);
        assert_eq!(answers(&items), vec!["lave", "cratère"]);

        let lenient = QuizConfig {
            quality_floor: 0.0,
            ..QuizConfig::default()
        };
        let items = assemble_quiz(&info(short_anchors()), 4, &lenient, &mut rng);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_quality_floor_keeps_strong_candidates() {
        let strict = QuizConfig {
            quality_floor: 0.95,
            ..QuizConfig::default()
        };
        let mut anchors = short_anchors();
        anchors.truncate(3);
        anchors.push(anchor(
            "La lave du Vésuve a enseveli la ville de Pompéi en quelques heures.",
            "Pompéi",
            5,
        ));

        let mut rng = SmallRng::seed_from_u64(9);
        let items = assemble_quiz(&info(anchors), 4, &strict, &mut rng);
        assert_eq!(answers(&items), vec!["lave", "cratère", "Pompéi"]);
    }

    #[test]
    fn test_keyword_use_cap() {
        let anchors: Vec<QuizAnchor> = [
            "Le volcan fume encore ce matin.",
            "Un volcan domine la baie.",
            "Ce volcan reste très actif.",
            "Le volcan inquiète les habitants.",
            "Chaque volcan possède un cratère.",
        ]
        .iter()
        .enumerate()
        .map(|(i, text)| anchor(text, "volcan", i))
        .collect();
        let lenient = QuizConfig {
            quality_floor: 0.0,
            ..QuizConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(4);

        let items = assemble_quiz(&info(anchors.clone()), 10, &lenient, &mut rng);
        assert_eq!(items.len(), 2);

        let three_uses = QuizConfig {
            max_keyword_uses: 3,
            ..lenient
        };
        let items = assemble_quiz(&info(anchors), 10, &three_uses, &mut rng);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_shuffled_index_points_at_keyword() {
        let anchor = anchor("Le Vésuve domine la baie de Naples.", "Vésuve", 0);
        let pool = strings(&["Vésubie", "Véronèse", "Naples", "Etna"]);
        let candidate = QuizCandidate::from_anchor(&anchor, &pool, &QuizConfig::default()).unwrap();

        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let item = candidate.clone().into_item(&mut rng).unwrap();
            assert_eq!(item.options()[item.correct_index()], "Vésuve");
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(quiz("", 5, 0).is_empty());
        assert!(quiz("Trop court.", 5, 0).is_empty());
    }
}

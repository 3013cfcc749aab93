//! Progress tracking.
//!
//! [`apply_attempt`] is a pure reducer: it takes the previous
//! [`UserProgress`] and one [`Attempt`] and returns the next progress plus
//! what changed. [`ProgressTracker`] owns one learner's progress and swaps in
//! each new state.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::badges::{self, Badge};
use crate::check::FULL_SCORE;
use crate::error::DrillError;
use crate::model::{AnswerValidation, Difficulty, Problem, Topic};

/// Per-topic statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic: Topic,
    pub problems_attempted: u64,
    pub correct_answers: u64,
    /// Mean score over every attempt in this topic.
    pub average_score: f64,
    /// Always contains easy. Grows, never shrinks.
    pub difficulties_unlocked: BTreeSet<Difficulty>,
    #[serde(default)]
    pub last_attempted: Option<DateTime<Utc>>,
}

impl TopicProgress {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            problems_attempted: 0,
            correct_answers: 0,
            average_score: 0.0,
            difficulties_unlocked: BTreeSet::from([Difficulty::Easy]),
            last_attempted: None,
        }
    }

    /// Fraction of attempts answered correctly, 0.0 with no attempts.
    pub fn accuracy_ratio(&self) -> f64 {
        if self.problems_attempted == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.problems_attempted as f64
        }
    }

    pub fn is_unlocked(&self, difficulty: Difficulty) -> bool {
        self.difficulties_unlocked.contains(&difficulty)
    }

    /// Add any tiers the current counters qualify for. Returns the new ones.
    fn apply_unlocks(&mut self, config: &TrackerConfig) -> Vec<Difficulty> {
        let mut unlocked = Vec::new();
        for (difficulty, rule) in [
            (Difficulty::Medium, &config.medium_unlock),
            (Difficulty::Hard, &config.hard_unlock),
        ] {
            if !self.is_unlocked(difficulty)
                && rule.is_met(self.accuracy_ratio(), self.problems_attempted)
            {
                self.difficulties_unlocked.insert(difficulty);
                unlocked.push(difficulty);
            }
        }
        unlocked
    }
}

/// Everything tracked for one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: String,
    pub total_problems_attempted: u64,
    pub total_correct: u64,
    pub topic_progress: BTreeMap<Topic, TopicProgress>,
    /// In the order earned.
    pub badges: Vec<Badge>,
    /// Most recent first.
    pub recent_scores: Vec<f64>,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl UserProgress {
    /// Initial state: every topic present at zero with only easy unlocked.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_problems_attempted: 0,
            total_correct: 0,
            topic_progress: Topic::ALL
                .iter()
                .map(|t| (*t, TopicProgress::new(*t)))
                .collect(),
            badges: Vec::new(),
            recent_scores: Vec::new(),
            current_streak: 0,
            best_streak: 0,
        }
    }

    /// Overall accuracy as a percentage, 0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.total_problems_attempted == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_problems_attempted as f64 * 100.0
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_accuracy(self.accuracy())
    }

    pub fn topic(&self, topic: Topic) -> Option<&TopicProgress> {
        self.topic_progress.get(&topic)
    }

    /// Accuracy within one topic as a percentage.
    pub fn topic_accuracy(&self, topic: Topic) -> f64 {
        self.topic(topic)
            .map(|t| t.accuracy_ratio() * 100.0)
            .unwrap_or(0.0)
    }

    pub fn is_unlocked(&self, topic: Topic, difficulty: Difficulty) -> bool {
        difficulty == Difficulty::Easy
            || self
                .topic(topic)
                .is_some_and(|t| t.is_unlocked(difficulty))
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    /// Verify the structural invariants every reachable progress state holds.
    pub fn check_invariants(&self, config: &TrackerConfig) -> Result<(), DrillError> {
        let fail = |msg: String| Err(DrillError::InvalidSnapshot(msg));

        if self.total_correct > self.total_problems_attempted {
            return fail(format!(
                "totalCorrect {} exceeds totalProblemsAttempted {}",
                self.total_correct, self.total_problems_attempted
            ));
        }
        if self.best_streak < self.current_streak {
            return fail(format!(
                "bestStreak {} is below currentStreak {}",
                self.best_streak, self.current_streak
            ));
        }
        if self.recent_scores.len() > config.recent_scores_cap {
            return fail(format!(
                "{} recent scores exceeds the cap of {}",
                self.recent_scores.len(),
                config.recent_scores_cap
            ));
        }
        if self.recent_scores.iter().any(|s| !s.is_finite()) {
            return fail("recentScores contains a non-finite value".into());
        }

        let mut seen = BTreeSet::new();
        for badge in &self.badges {
            if !seen.insert(badge.id.as_str()) {
                return fail(format!("badge '{}' appears more than once", badge.id));
            }
        }

        let mut topic_total = 0;
        for topic in Topic::ALL {
            let Some(tp) = self.topic_progress.get(&topic) else {
                return fail(format!("missing progress for topic '{topic}'"));
            };
            if tp.topic != topic {
                return fail(format!("progress under '{topic}' is labeled '{}'", tp.topic));
            }
            if tp.correct_answers > tp.problems_attempted {
                return fail(format!(
                    "topic '{topic}' has more correct answers than attempts"
                ));
            }
            if !tp.is_unlocked(Difficulty::Easy) {
                return fail(format!("topic '{topic}' does not have easy unlocked"));
            }
            if !tp.average_score.is_finite() {
                return fail(format!("topic '{topic}' has a non-finite average score"));
            }
            topic_total += tp.problems_attempted;
        }
        if topic_total != self.total_problems_attempted {
            return fail(format!(
                "topic attempts sum to {topic_total} but totalProblemsAttempted is {}",
                self.total_problems_attempted
            ));
        }
        Ok(())
    }
}

/// Letter grade for an overall accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Grade for an accuracy percentage (0–100).
    pub fn from_accuracy(accuracy: f64) -> Self {
        match accuracy {
            a if a >= 90.0 => Grade::APlus,
            a if a >= 85.0 => Grade::A,
            a if a >= 80.0 => Grade::BPlus,
            a if a >= 75.0 => Grade::B,
            a if a >= 70.0 => Grade::CPlus,
            a if a >= 65.0 => Grade::C,
            a if a >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        })
    }
}

/// Threshold for unlocking a difficulty tier in a topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockRule {
    /// Minimum fraction correct (0.0–1.0).
    pub min_accuracy: f64,
    pub min_attempts: u64,
}

impl UnlockRule {
    pub fn is_met(&self, accuracy: f64, attempts: u64) -> bool {
        attempts >= self.min_attempts && accuracy >= self.min_accuracy
    }
}

/// Tunables for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub recent_scores_cap: usize,
    pub medium_unlock: UnlockRule,
    pub hard_unlock: UnlockRule,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            recent_scores_cap: 10,
            medium_unlock: UnlockRule {
                min_accuracy: 0.7,
                min_attempts: 5,
            },
            hard_unlock: UnlockRule {
                min_accuracy: 0.8,
                min_attempts: 10,
            },
        }
    }
}

/// One graded attempt, as fed to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub is_correct: bool,
    /// Score on a 0–100 scale.
    pub score: f64,
    pub at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(problem: &Problem, validation: &AnswerValidation, at: DateTime<Utc>) -> Self {
        Self {
            topic: problem.topic,
            difficulty: problem.difficulty,
            is_correct: validation.is_correct,
            score: validation.score,
            at,
        }
    }
}

/// What a single attempt changed beyond the counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptOutcome {
    /// Difficulties newly unlocked in the attempt's topic.
    pub unlocked: Vec<Difficulty>,
    pub badges_earned: Vec<Badge>,
}

/// Fold one attempt into `prev`, returning the next state and its outcome.
pub fn apply_attempt(
    prev: &UserProgress,
    attempt: &Attempt,
    config: &TrackerConfig,
) -> (UserProgress, AttemptOutcome) {
    let score = if attempt.score.is_finite() {
        attempt.score.clamp(0.0, FULL_SCORE)
    } else {
        warn!(score = attempt.score, topic = %attempt.topic, "non-finite score recorded as 0");
        0.0
    };

    let mut next = prev.clone();

    next.total_problems_attempted += 1;
    if attempt.is_correct {
        next.total_correct += 1;
        next.current_streak += 1;
        next.best_streak = next.best_streak.max(next.current_streak);
    } else {
        next.current_streak = 0;
    }

    next.recent_scores.insert(0, score);
    next.recent_scores.truncate(config.recent_scores_cap);

    let topic = next
        .topic_progress
        .entry(attempt.topic)
        .or_insert_with(|| TopicProgress::new(attempt.topic));
    topic.problems_attempted += 1;
    if attempt.is_correct {
        topic.correct_answers += 1;
    }
    let n = topic.problems_attempted as f64;
    topic.average_score = (topic.average_score * (n - 1.0) + score) / n;
    topic.last_attempted = Some(attempt.at);

    let unlocked = topic.apply_unlocks(config);
    for difficulty in &unlocked {
        info!(topic = %attempt.topic, %difficulty, "difficulty unlocked");
    }

    let badges_earned = badges::newly_earned(prev, &next, attempt.at);
    for badge in &badges_earned {
        info!(id = %badge.id, name = %badge.name, rarity = %badge.rarity, "badge earned");
    }
    next.badges.extend(badges_earned.iter().cloned());

    debug!(
        topic = %attempt.topic,
        difficulty = %attempt.difficulty,
        correct = attempt.is_correct,
        score,
        streak = next.current_streak,
        "attempt recorded"
    );

    (
        next,
        AttemptOutcome {
            unlocked,
            badges_earned,
        },
    )
}

/// Owns one learner's progress and applies attempts to it in order.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    progress: UserProgress,
    config: TrackerConfig,
}

impl ProgressTracker {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_config(user_id, TrackerConfig::default())
    }

    pub fn with_config(user_id: impl Into<String>, config: TrackerConfig) -> Self {
        Self {
            progress: UserProgress::new(user_id),
            config,
        }
    }

    /// Resume from previously saved progress.
    pub fn from_progress(progress: UserProgress, config: TrackerConfig) -> Self {
        Self { progress, config }
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn into_progress(self) -> UserProgress {
        self.progress
    }

    /// Record a validated answer, timestamped now.
    pub fn record_attempt(
        &mut self,
        problem: &Problem,
        validation: &AnswerValidation,
    ) -> AttemptOutcome {
        self.record(&Attempt::new(problem, validation, Utc::now()))
    }

    pub fn record(&mut self, attempt: &Attempt) -> AttemptOutcome {
        let (next, outcome) = apply_attempt(&self.progress, attempt, &self.config);
        self.progress = next;
        outcome
    }

    /// Back to the initial state, keeping the learner's id.
    pub fn reset(&mut self) {
        info!(user = %self.progress.user_id, "progress reset");
        self.progress = UserProgress::new(std::mem::take(&mut self.progress.user_id));
    }

    pub fn accuracy(&self) -> f64 {
        self.progress.accuracy()
    }

    pub fn grade(&self) -> Grade {
        self.progress.grade()
    }

    pub fn topic_accuracy(&self, topic: Topic) -> f64 {
        self.progress.topic_accuracy(topic)
    }

    pub fn is_unlocked(&self, topic: Topic, difficulty: Difficulty) -> bool {
        self.progress.is_unlocked(topic, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::{FIRST_PROBLEM, PERFECT_20, STREAK_5};
    use crate::random::{RandomSource, RngSource};

    fn attempt(topic: Topic, correct: bool) -> Attempt {
        Attempt {
            topic,
            difficulty: Difficulty::Easy,
            is_correct: correct,
            score: if correct { 100.0 } else { 0.0 },
            at: Utc::now(),
        }
    }

    fn badge_count(progress: &UserProgress, id: &str) -> usize {
        progress.badges.iter().filter(|b| b.id == id).count()
    }

    #[test]
    fn initial_state_has_every_topic_at_easy() {
        let tracker = ProgressTracker::new("learner");
        let progress = tracker.progress();
        assert_eq!(progress.topic_progress.len(), Topic::ALL.len());
        for tp in progress.topic_progress.values() {
            assert_eq!(tp.difficulties_unlocked, BTreeSet::from([Difficulty::Easy]));
            assert_eq!(tp.problems_attempted, 0);
            assert!(tp.last_attempted.is_none());
        }
        assert_eq!(tracker.accuracy(), 0.0);
        assert_eq!(tracker.grade(), Grade::F);
        progress.check_invariants(tracker.config()).unwrap();
    }

    #[test]
    fn counters_and_streaks() {
        let mut tracker = ProgressTracker::new("learner");
        for correct in [true, true, true, false, true] {
            tracker.record(&attempt(Topic::Algebra, correct));
        }
        let p = tracker.progress();
        assert_eq!(p.total_problems_attempted, 5);
        assert_eq!(p.total_correct, 4);
        assert_eq!(p.current_streak, 1);
        assert_eq!(p.best_streak, 3);
        assert_eq!(p.recent_scores, vec![100.0, 0.0, 100.0, 100.0, 100.0]);
        assert_eq!(tracker.accuracy(), 80.0);
        assert_eq!(tracker.topic_accuracy(Topic::Algebra), 80.0);
        assert_eq!(tracker.topic_accuracy(Topic::Geometry), 0.0);
    }

    #[test]
    fn medium_unlocks_on_fifth_attempt_only() {
        let mut tracker = ProgressTracker::new("learner");
        for (i, correct) in [true, true, false, true, true].into_iter().enumerate() {
            let outcome = tracker.record(&attempt(Topic::Fractions, correct));
            if i < 4 {
                assert!(outcome.unlocked.is_empty(), "unlocked early at attempt {}", i + 1);
                assert!(!tracker.is_unlocked(Topic::Fractions, Difficulty::Medium));
            } else {
                assert_eq!(outcome.unlocked, vec![Difficulty::Medium]);
            }
        }
        assert!(tracker.is_unlocked(Topic::Fractions, Difficulty::Medium));
        assert!(!tracker.is_unlocked(Topic::Fractions, Difficulty::Hard));
        assert!(!tracker.is_unlocked(Topic::Algebra, Difficulty::Medium));
    }

    #[test]
    fn hard_unlocks_at_eighty_percent_over_ten() {
        let mut tracker = ProgressTracker::new("learner");
        let mut hard_at = None;
        for i in 1..=10 {
            let outcome = tracker.record(&attempt(Topic::Geometry, i % 5 != 0));
            if outcome.unlocked.contains(&Difficulty::Hard) {
                hard_at = Some(i);
            }
        }
        assert_eq!(hard_at, Some(10));
    }

    #[test]
    fn unlocks_survive_falling_accuracy() {
        let mut tracker = ProgressTracker::new("learner");
        for _ in 0..5 {
            tracker.record(&attempt(Topic::Algebra, true));
        }
        for _ in 0..20 {
            let outcome = tracker.record(&attempt(Topic::Algebra, false));
            assert!(outcome.unlocked.is_empty());
        }
        assert!(tracker.is_unlocked(Topic::Algebra, Difficulty::Medium));
    }

    #[test]
    fn streak_badge_awarded_once() {
        let mut tracker = ProgressTracker::new("learner");
        let mut awarded = 0;
        for correct in [true, true, true, true, true, false, true, true, true, true, true] {
            let outcome = tracker.record(&attempt(Topic::Algebra, correct));
            awarded += outcome
                .badges_earned
                .iter()
                .filter(|b| b.id == STREAK_5)
                .count();
        }
        assert_eq!(awarded, 1);
        assert_eq!(badge_count(tracker.progress(), STREAK_5), 1);
        assert_eq!(badge_count(tracker.progress(), FIRST_PROBLEM), 1);
    }

    #[test]
    fn perfect_badge_not_duplicated() {
        let mut tracker = ProgressTracker::new("learner");
        for i in 1..=21 {
            let outcome = tracker.record(&attempt(Topic::Fractions, true));
            let got_perfect = outcome.badges_earned.iter().any(|b| b.id == PERFECT_20);
            assert_eq!(got_perfect, i == 20, "attempt {i}");
        }
        assert_eq!(badge_count(tracker.progress(), PERFECT_20), 1);
    }

    #[test]
    fn badges_keep_earn_order() {
        let mut tracker = ProgressTracker::new("learner");
        for _ in 0..20 {
            tracker.record(&attempt(Topic::Geometry, true));
        }
        let ids: Vec<&str> = tracker
            .progress()
            .badges
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![FIRST_PROBLEM, STREAK_5, crate::badges::STREAK_10, PERFECT_20]
        );
    }

    #[test]
    fn recent_scores_are_capped_most_recent_first() {
        let mut tracker = ProgressTracker::new("learner");
        for i in 0..15 {
            let mut a = attempt(Topic::Algebra, true);
            a.score = i as f64;
            tracker.record(&a);
        }
        let scores = &tracker.progress().recent_scores;
        assert_eq!(scores.len(), 10);
        assert_eq!(scores[0], 14.0);
        assert_eq!(scores[9], 5.0);
    }

    #[test]
    fn average_score_is_the_mean() {
        let mut tracker = ProgressTracker::new("learner");
        for score in [100.0, 50.0, 0.0, 70.0] {
            let mut a = attempt(Topic::WordProblems, score > 60.0);
            a.score = score;
            tracker.record(&a);
        }
        let tp = tracker.progress().topic(Topic::WordProblems).unwrap();
        assert!((tp.average_score - 55.0).abs() < 1e-9);
        assert!(tp.last_attempted.is_some());
    }

    #[test]
    fn non_finite_scores_count_as_zero() {
        let mut tracker = ProgressTracker::new("learner");
        let mut a = attempt(Topic::Algebra, false);
        a.score = f64::NAN;
        tracker.record(&a);
        let p = tracker.progress();
        assert_eq!(p.recent_scores, vec![0.0]);
        assert_eq!(p.topic(Topic::Algebra).unwrap().average_score, 0.0);
    }

    #[test]
    fn apply_attempt_leaves_previous_state_untouched() {
        let prev = UserProgress::new("learner");
        let config = TrackerConfig::default();
        let (next, outcome) = apply_attempt(&prev, &attempt(Topic::Algebra, true), &config);
        assert_eq!(prev, UserProgress::new("learner"));
        assert_eq!(next.total_problems_attempted, 1);
        assert_eq!(outcome.badges_earned.len(), 1);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut tracker = ProgressTracker::new("learner");
        for _ in 0..12 {
            tracker.record(&attempt(Topic::Fractions, true));
        }
        tracker.reset();
        assert_eq!(tracker.progress(), &UserProgress::new("learner"));
    }

    #[test]
    fn record_attempt_uses_problem_topic() {
        let mut rng = RngSource::seeded(6);
        let problem = crate::generator::geometry::area(Difficulty::Easy, &mut rng);
        let validation = crate::check::validate_answer(
            &problem,
            &problem.correct_answer.to_string(),
            crate::check::DEFAULT_TOLERANCE,
        );
        let mut tracker = ProgressTracker::new("learner");
        tracker.record_attempt(&problem, &validation);
        assert_eq!(tracker.progress().total_correct, 1);
        assert_eq!(
            tracker.progress().topic(Topic::Geometry).unwrap().correct_answers,
            1
        );
    }

    #[test]
    fn invariants_hold_over_random_sequences() {
        let mut rng = RngSource::seeded(2024);
        let mut tracker = ProgressTracker::new("learner");
        let mut best_seen = 0;
        for _ in 0..400 {
            let topic = Topic::ALL[rng.next_int(0, 7) as usize];
            let correct = rng.next_float() < 0.75;
            let before: BTreeSet<_> = tracker
                .progress()
                .topic(topic)
                .unwrap()
                .difficulties_unlocked
                .clone();
            tracker.record(&attempt(topic, correct));

            let p = tracker.progress();
            p.check_invariants(tracker.config()).unwrap();
            assert!(p.best_streak >= best_seen);
            best_seen = p.best_streak;
            assert!(before.is_subset(&p.topic(topic).unwrap().difficulties_unlocked));
        }
    }

    #[test]
    fn invariant_violations_are_reported() {
        let config = TrackerConfig::default();
        let mut p = UserProgress::new("learner");
        p.total_correct = 1;
        assert!(p.check_invariants(&config).is_err());

        let mut p = UserProgress::new("learner");
        p.topic_progress.remove(&Topic::Integers);
        let err = p.check_invariants(&config).unwrap_err();
        assert!(err.to_string().contains("integers"));

        let mut p = UserProgress::new("learner");
        p.recent_scores = vec![100.0; 11];
        assert!(p.check_invariants(&config).is_err());
    }

    #[test]
    fn grade_thresholds() {
        let cases = [
            (100.0, "A+"),
            (90.0, "A+"),
            (89.9, "A"),
            (85.0, "A"),
            (80.0, "B+"),
            (75.0, "B"),
            (70.0, "C+"),
            (65.0, "C"),
            (60.0, "D"),
            (59.9, "F"),
            (0.0, "F"),
        ];
        for (accuracy, expected) in cases {
            assert_eq!(Grade::from_accuracy(accuracy).to_string(), expected);
        }
    }

    #[test]
    fn progress_serializes_camel_case() {
        let mut tracker = ProgressTracker::new("learner");
        tracker.record(&attempt(Topic::WordProblems, true));
        let json = serde_json::to_value(tracker.progress()).unwrap();
        assert_eq!(json["userId"], "learner");
        assert_eq!(json["totalProblemsAttempted"], 1);
        let wp = &json["topicProgress"]["word-problems"];
        assert_eq!(wp["difficultiesUnlocked"], serde_json::json!(["easy"]));
        assert_eq!(wp["correctAnswers"], 1);
    }
}

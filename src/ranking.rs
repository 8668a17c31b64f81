// src/ranking.rs
use serde::Serialize;

use crate::benchmark::Benchmark;
use crate::JobPosting;

const BASE_SCORE: i32 = 50;
const SENIOR_KEYWORDS: [&str; 4] = ["senior", "lead", "expert", "head"];
const JUNIOR_KEYWORDS: [&str; 2] = ["junior", "assistant"];
const PREMIUM_SKILLS: [&str; 7] = ["cloud", "sap", "data", "ai", "python", "kubernetes", "project"];

/// One ranked posting. `apply_url` ties the entry back to the posting it
/// was scored from.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub apply_url: String,
    pub score: u8,
    pub rationale: String,
}

/// Scores postings against a salary benchmark, measuring commute distance
/// from a configured reference city.
pub struct Ranker {
    reference_city: String,
}

impl Ranker {
    pub fn new(reference_city: impl Into<String>) -> Self {
        Self {
            reference_city: reference_city.into(),
        }
    }

    /// Attractiveness score on a 0..=100 scale.
    ///
    /// Starts from a neutral 50 and adds or subtracts per signal: posted
    /// salary against the benchmark percentiles, seniority words in the
    /// title, remote friendliness, distance from the reference city and
    /// premium skills in the title.
    pub fn score_job(&self, posting: &JobPosting, benchmark: &Benchmark) -> u8 {
        let mut score = BASE_SCORE;

        match &posting.salary {
            Some(salary) => {
                if let Some(eur) = salary.eur {
                    let eur = eur as f64;
                    if eur >= benchmark.p90 as f64 {
                        score += 40;
                    } else if eur >= benchmark.p50 as f64 {
                        score += 25;
                    } else if eur >= 0.8 * (benchmark.p50 as f64) {
                        score += 10;
                    }
                }
                // Posted but unreadable amounts neither help nor hurt.
            }
            None => score -= 5,
        }

        if has_keyword(&posting.title, &SENIOR_KEYWORDS) {
            score += 15;
        } else if has_keyword(&posting.title, &JUNIOR_KEYWORDS) {
            score -= 10;
        }

        if posting.remote {
            score += 5;
        }

        let distance = estimate_distance_km(&self.reference_city, &posting.location);
        if distance > 100 {
            score -= 10;
        } else if distance > 50 {
            score -= 5;
        }

        if has_keyword(&posting.title, &PREMIUM_SKILLS) {
            score += 5;
        }

        score.clamp(0, 100) as u8
    }

    /// Scores every posting and returns them best-first. Equal scores keep
    /// the order the search returned them in.
    pub fn rank_jobs(&self, postings: &[JobPosting], benchmark: &Benchmark) -> Vec<RankedResult> {
        let mut ranked: Vec<RankedResult> = postings
            .iter()
            .map(|posting| {
                let score = self.score_job(posting, benchmark);
                RankedResult {
                    apply_url: posting.apply_url.clone(),
                    score,
                    rationale: build_rationale(posting, score, benchmark),
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Case-insensitive whole-word match, so "Seniority" never counts as
/// "senior" and "headhunter" never counts as "head".
fn has_keyword(text: &str, keywords: &[&str]) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| keywords.contains(&word))
}

/// Coarse road-distance guess in km between two city names. Anything not
/// recognized counts as far away.
pub fn estimate_distance_km(from: &str, to: &str) -> u32 {
    let from = from.trim().to_lowercase();
    let to = to.trim().to_lowercase();
    if from == to {
        return 0;
    }

    const NEARBY: [&str; 4] = ["milano", "bologna", "torino", "padova"];
    const MIDRANGE: [&str; 3] = ["roma", "napoli", "firenze"];

    if NEARBY.iter().any(|city| to.contains(city)) {
        20
    } else if MIDRANGE.iter().any(|city| to.contains(city)) {
        100
    } else {
        200
    }
}

/// One-line Italian explanation of the score, keyed off the same salary
/// benchmark the score used.
pub fn build_rationale(posting: &JobPosting, score: u8, benchmark: &Benchmark) -> String {
    let title = posting.title.trim();
    let title = if title.is_empty() { "Ruolo" } else { title };
    let p50 = benchmark.p50;

    if score > 90 {
        format!("{title} con RAL molto sopra la mediana ({p50}€) e skill premium.")
    } else if score > 75 {
        format!(
            "{title} con RAL competitiva e località favorevole ({}).",
            posting.location
        )
    } else if score > 60 {
        format!("{title} con RAL media e requisiti coerenti con benchmark.")
    } else {
        format!("{title}: RAL non indicata o inferiore alla mediana ({p50}€).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PostedSalary;

    fn benchmark() -> Benchmark {
        Benchmark {
            p50: 70_000,
            p75: 85_000,
            p90: 100_000,
            source: "test".to_string(),
            date: "2025-01-01".to_string(),
        }
    }

    fn posting(title: &str, location: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: None,
            location: location.to_string(),
            salary: None,
            remote: false,
            apply_url: format!("https://example.com/{}", title.replace(' ', "-")),
            source: None,
        }
    }

    fn with_salary(mut posting: JobPosting, eur: i64) -> JobPosting {
        posting.salary = Some(PostedSalary {
            raw: format!("€{eur}"),
            eur: Some(eur),
        });
        posting
    }

    #[test]
    fn test_senior_remote_premium_maxes_out() {
        let ranker = Ranker::new("bologna");
        let mut job = with_salary(posting("Senior SAP Project Manager", "Bologna"), 85_000);
        job.remote = true;
        // 50 +25 salary (>= p50) +15 senior +5 remote +5 premium skill = 100
        assert_eq!(ranker.score_job(&job, &benchmark()), 100);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let ranker = Ranker::new("bologna");
        let mut job = with_salary(posting("Senior Cloud Architect", "Bologna"), 120_000);
        job.remote = true;
        // raw 50 +40 +15 +5 +5 = 115
        assert_eq!(ranker.score_job(&job, &benchmark()), 100);
    }

    #[test]
    fn test_missing_salary_costs_five_points() {
        let ranker = Ranker::new("bologna");
        let job = posting("Impiegato", "bologna");
        assert_eq!(ranker.score_job(&job, &benchmark()), 45);
    }

    #[test]
    fn test_unreadable_salary_is_neutral() {
        let ranker = Ranker::new("bologna");
        let mut job = posting("Impiegato", "bologna");
        job.salary = Some(PostedSalary {
            raw: "€99999999999999999999".to_string(),
            eur: None,
        });
        assert_eq!(ranker.score_job(&job, &benchmark()), 50);
    }

    #[test]
    fn test_near_median_salary_small_bonus() {
        let ranker = Ranker::new("bologna");
        // 56_000 is exactly 0.8 * p50
        let job = with_salary(posting("Impiegato", "bologna"), 56_000);
        assert_eq!(ranker.score_job(&job, &benchmark()), 60);
    }

    #[test]
    fn test_junior_far_away_drops_hard() {
        let ranker = Ranker::new("bologna");
        let job = posting("Junior Developer", "Londra");
        // 50 -5 salary -10 junior -10 distance = 25
        assert_eq!(ranker.score_job(&job, &benchmark()), 25);
    }

    #[test]
    fn test_midrange_city_costs_five_points() {
        let ranker = Ranker::new("bologna");
        let job = posting("Impiegato", "Roma");
        // 50 -5 salary -5 distance = 40
        assert_eq!(ranker.score_job(&job, &benchmark()), 40);
    }

    #[test]
    fn test_keyword_match_word_bounded() {
        let ranker = Ranker::new("bologna");
        // "Seniority" and "headhunter" must not trigger the senior bonus.
        let job = posting("Seniority review headhunter", "bologna");
        assert_eq!(ranker.score_job(&job, &benchmark()), 45);

        // "AI" as its own word does count as a premium skill.
        let job = posting("Ricercatore AI", "bologna");
        assert_eq!(ranker.score_job(&job, &benchmark()), 50);
    }

    #[test]
    fn test_distance_estimates() {
        assert_eq!(estimate_distance_km("bologna", "Bologna"), 0);
        assert_eq!(estimate_distance_km("bologna", "Milano, Italia"), 20);
        assert_eq!(estimate_distance_km("bologna", "Roma"), 100);
        assert_eq!(estimate_distance_km("bologna", "New York"), 200);
    }

    #[test]
    fn test_ranking_best_first_stable_on_ties() {
        let ranker = Ranker::new("bologna");
        let jobs = vec![
            posting("Impiegato", "Londra"),
            with_salary(posting("Senior Data Engineer", "Bologna"), 90_000),
            posting("Impiegato secondo", "Berlino"),
        ];
        let ranked = ranker.rank_jobs(&jobs, &benchmark());

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].apply_url, "https://example.com/Senior-Data-Engineer");
        assert!(ranked[0].score > ranked[1].score);
        // The two remaining postings tie; input order must survive.
        assert_eq!(ranked[1].score, ranked[2].score);
        assert_eq!(ranked[1].apply_url, "https://example.com/Impiegato");
        assert_eq!(ranked[2].apply_url, "https://example.com/Impiegato-secondo");
    }

    #[test]
    fn test_rationale_tiers() {
        let bench = benchmark();
        let top = posting("Senior SAP Lead", "Bologna");
        assert!(build_rationale(&top, 95, &bench).contains("molto sopra la mediana (70000€)"));

        let good = posting("Data Engineer", "Milano");
        assert!(build_rationale(&good, 80, &bench).contains("località favorevole (Milano)"));

        let mid = posting("Analista", "Roma");
        assert!(build_rationale(&mid, 65, &bench).contains("RAL media"));

        let low = posting("Impiegato", "Londra");
        assert!(build_rationale(&low, 40, &bench).contains("RAL non indicata o inferiore"));
    }

    #[test]
    fn test_empty_title_falls_back_to_generic_role() {
        let bench = benchmark();
        let job = posting("", "Bologna");
        let rationale = build_rationale(&job, 40, &bench);
        assert!(rationale.starts_with("Ruolo:"));
    }
}

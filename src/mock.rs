//! Placeholder presentation data for job recommendations.
//!
//! The recommendation endpoint returns prose with no company,
//! location, or score attached, so the client fabricates them from
//! fixed candidate lists to fill out the display. None of this is
//! business logic: everything in here is demo filler and should go
//! away once the backend returns structured recommendations.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::parse::RecSection;

const COMPANIES: &[&str] = &[
    "TechNova",
    "Bluepeak Labs",
    "Datawise",
    "Cloudmont",
    "Brightstack",
    "Orbital Systems",
    "Kitefin",
    "Northbyte",
];

const LOCATIONS: &[&str] = &[
    "Remote",
    "New York, NY",
    "San Francisco, CA",
    "Austin, TX",
    "Seattle, WA",
    "Boston, MA",
];

const FILLER_SKILLS: &[&str] = &[
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Git",
    "Agile",
    "SQL",
    "Docker",
    "REST APIs",
];

const MAX_JOBS: usize = 6;
const SCORE_MIN: u8 = 80;
const SCORE_MAX: u8 = 95;

#[derive(Debug, Clone)]
pub struct RecommendedJob {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub match_score: u8,
    pub skills: Vec<String>,
}

/// Dress parsed recommendation sections up as job cards: at most six,
/// each with a fabricated company/location, a match score in
/// [80, 95], and a skill list that always contains every user-supplied
/// skill plus a random sample of filler skills.
pub fn synthesize_jobs<R: Rng>(
    sections: &[RecSection],
    user_skills: &[String],
    rng: &mut R,
) -> Vec<RecommendedJob> {
    sections
        .iter()
        .take(MAX_JOBS)
        .map(|section| RecommendedJob {
            title: section.title.clone(),
            description: section.description.clone(),
            company: pick(COMPANIES, rng),
            location: pick(LOCATIONS, rng),
            match_score: rng.gen_range(SCORE_MIN..=SCORE_MAX),
            skills: mix_skills(user_skills, rng),
        })
        .collect()
}

fn pick<R: Rng>(candidates: &[&str], rng: &mut R) -> String {
    candidates
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string()
}

fn mix_skills<R: Rng>(user_skills: &[String], rng: &mut R) -> Vec<String> {
    let mut skills: Vec<String> = user_skills.to_vec();
    let filler_count = rng.gen_range(2..=4);
    let fillers = FILLER_SKILLS
        .choose_multiple(rng, filler_count)
        .map(|s| s.to_string());
    for filler in fillers {
        if !skills.iter().any(|s| s.eq_ignore_ascii_case(&filler)) {
            skills.push(filler);
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sections(n: usize) -> Vec<RecSection> {
        (0..n)
            .map(|i| RecSection {
                title: format!("Role {}", i),
                description: format!("Description {}", i),
            })
            .collect()
    }

    #[test]
    fn test_caps_at_six_jobs() {
        let mut rng = StdRng::seed_from_u64(7);
        let jobs = synthesize_jobs(&sections(10), &[], &mut rng);
        assert_eq!(jobs.len(), 6);

        let jobs = synthesize_jobs(&sections(3), &[], &mut rng);
        assert_eq!(jobs.len(), 3);
    }

    #[test]
    fn test_match_score_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let jobs = synthesize_jobs(&sections(6), &[], &mut rng);
            for job in jobs {
                assert!((80..=95).contains(&job.match_score), "score {}", job.match_score);
            }
        }
    }

    #[test]
    fn test_every_user_skill_present() {
        let mut rng = StdRng::seed_from_u64(3);
        let user_skills = vec!["Rust".to_string(), "Kubernetes".to_string()];
        let jobs = synthesize_jobs(&sections(6), &user_skills, &mut rng);
        for job in jobs {
            for skill in &user_skills {
                assert!(job.skills.contains(skill), "missing {}", skill);
            }
        }
    }

    #[test]
    fn test_filler_does_not_duplicate_user_skills() {
        let mut rng = StdRng::seed_from_u64(11);
        let user_skills: Vec<String> = FILLER_SKILLS.iter().map(|s| s.to_string()).collect();
        let jobs = synthesize_jobs(&sections(6), &user_skills, &mut rng);
        for job in jobs {
            assert_eq!(job.skills.len(), user_skills.len());
        }
    }

    #[test]
    fn test_fabricated_fields_come_from_candidate_lists() {
        let mut rng = StdRng::seed_from_u64(1);
        let jobs = synthesize_jobs(&sections(6), &[], &mut rng);
        for job in jobs {
            assert!(COMPANIES.contains(&job.company.as_str()));
            assert!(LOCATIONS.contains(&job.location.as_str()));
        }
    }
}

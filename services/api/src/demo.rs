use crate::infra::{seed_histories, InMemoryCandidateRepository};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::workflows::matching::{AiInsights, JobRequirement, RankKey, Recommendation};
use talent_match::workflows::recommendations::{
    CandidateEvaluation, EvaluationPlan, LedgerView, RecommendationRequest, TalentService,
};
use talent_match::workflows::skills::{
    rebuild_ledger, Assessment, AssessmentImporter, CandidateHistory, CandidateId,
};

#[derive(Args, Debug)]
pub(crate) struct LedgerArgs {
    /// Assessment CSV export (candidate_id, techstack, role, type, overall_score, created_at)
    pub(crate) csv: PathBuf,
    /// Only print the ledger of this candidate
    #[arg(long)]
    pub(crate) candidate: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Required job skill; repeat for several. Defaults to a backend stack.
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    /// Rank by the composite CV/interview score instead of the match score
    #[arg(long)]
    pub(crate) by_performance: bool,
    /// Override the configured minimum score
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Override the configured number of recommendations
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_ledger_report(args: LedgerArgs) -> Result<(), AppError> {
    let histories = AssessmentImporter::from_path(&args.csv)?;
    let views = ledger_views(histories, args.candidate.as_deref());
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

fn ledger_views(histories: Vec<CandidateHistory>, only: Option<&str>) -> Vec<LedgerView> {
    histories
        .into_iter()
        .filter(|history| only.map_or(true, |id| history.candidate_id.as_str() == id))
        .map(|history| LedgerView::new(history.candidate_id, rebuild_ledger(&history.assessments)))
        .collect()
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let service = TalentService::new(repository, config.scoring);

    let pool = synthetic_pool();
    if let Err(err) = seed_histories(&service, pool) {
        println!("Candidate pool unavailable: {err}");
        return Ok(());
    }
    for (candidate, insights) in synthetic_insights() {
        if let Err(err) = service.record_ai_insights(&CandidateId::new(candidate), insights) {
            println!("AI insights skipped for {candidate}: {err}");
        }
    }

    let skills = if args.skills.is_empty() {
        vec!["Rust".to_string(), "PostgreSQL".to_string(), "Docker".to_string()]
    } else {
        args.skills
    };
    let mut request = RecommendationRequest::for_job(JobRequirement::new(skills.clone()));
    request.min_score = args.min_score;
    request.limit = args.limit;
    if args.by_performance {
        request.sort_by = RankKey::Performance;
        request.evaluation = Some(synthetic_evaluation());
    }

    println!("Talent matching demo");
    println!("  Job skills: {}", skills.join(", "));
    println!("  Ranked by: {:?}", request.sort_by);

    match service.recommend(&request) {
        Ok(recommendations) if recommendations.is_empty() => {
            println!("\nNo candidates cleared the threshold");
        }
        Ok(recommendations) => render_recommendations(&recommendations),
        Err(err) => println!("\nRecommendations unavailable: {err}"),
    }

    Ok(())
}

fn render_recommendations(recommendations: &[Recommendation]) {
    println!("\nRecommendations");
    for (rank, entry) in recommendations.iter().enumerate() {
        let final_score = entry
            .final_score
            .map_or_else(|| "-".to_string(), |score| score.to_string());
        println!(
            "  {}. {:<8} match {:>3}  final {:>3}  assessments {}  matched [{}]",
            rank + 1,
            entry.candidate_id,
            entry.match_score,
            final_score,
            entry.assessment_count,
            entry.matched_skills.join(", ")
        );
        for component in &entry.components {
            println!(
                "       {:?}: {:.1} x {:.2} = {:.1} ({})",
                component.factor,
                component.value,
                component.weight,
                component.contribution,
                component.notes
            );
        }
    }
}

fn demo_day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
        .single()
        .map(|base| base + Duration::days(offset))
        .unwrap_or_else(Utc::now)
}

fn synthetic_pool() -> Vec<CandidateHistory> {
    let history = |candidate: &str, assessments: Vec<Assessment>| CandidateHistory {
        candidate_id: CandidateId::new(candidate),
        assessments,
    };

    vec![
        history(
            "amara",
            vec![
                Assessment::new(demo_day(0))
                    .with_techstack("Rust, PostgreSQL")
                    .with_role("Backend Engineer")
                    .with_kind("Technical")
                    .with_score(84.0),
                Assessment::new(demo_day(6))
                    .with_techstack("rust, Docker, Kubernetes")
                    .with_kind("System Design")
                    .with_score(78.0),
            ],
        ),
        history(
            "bastian",
            vec![Assessment::new(demo_day(2))
                .with_techstack("Go, Docker")
                .with_role("Platform Engineer")
                .with_kind("Technical")
                .with_score(91.0)],
        ),
        history(
            "chioma",
            vec![
                Assessment::new(demo_day(1))
                    .with_techstack("React, TypeScript")
                    .with_role("Frontend Engineer")
                    .with_score(73.0),
                Assessment::new(demo_day(4))
                    .with_techstack("PostgreSQL")
                    .with_kind("Behavioral"),
            ],
        ),
        history(
            "dmitri",
            vec![Assessment::new(demo_day(3))
                .with_techstack("Rust, PostgreSQL, Docker")
                .with_role("Backend Engineer")
                .with_score(58.0)],
        ),
    ]
}

fn synthetic_insights() -> Vec<(&'static str, AiInsights)> {
    vec![
        (
            "amara",
            AiInsights {
                report_count: 2,
                ai_insight_score: 81.0,
            },
        ),
        (
            "bastian",
            AiInsights {
                report_count: 1,
                ai_insight_score: 67.0,
            },
        ),
    ]
}

fn synthetic_evaluation() -> EvaluationPlan {
    let scores = |candidate: &str, cv_score: Option<f64>, interview_score: Option<f64>| {
        CandidateEvaluation {
            candidate_id: CandidateId::new(candidate),
            cv_score,
            interview_score,
        }
    };

    EvaluationPlan {
        enable_cv_analysis: true,
        interview_type: Some("technical".to_string()),
        candidates: vec![
            scores("amara", Some(70.0), Some(82.0)),
            scores("bastian", Some(88.0), None),
            scores("chioma", None, Some(64.0)),
            scores("dmitri", None, None),
        ],
    }
}

//! Brokerdash CLI - sales-performance metrics for brokerage dashboards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brokerdash_core::{
    ActionRecord, AgentId, MonthlyGoal, PerformanceRecord, ProbationPlan, WeightedComponent,
};
use brokerdash_metrics::{
    percentage, pacing, ratio, score, ActionLedger, AssessmentService, DashboardConfig,
    GoalTracker, Leaderboard, ProbationEvaluator, RankBy, SALES_PERFORMANCE,
};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brokerdash")]
#[command(about = "Sales-performance metrics for brokerage dashboards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dashboard configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Progress percentage of a count against its target
    Progress {
        /// Achieved so far
        #[arg(long, allow_hyphen_values = true)]
        current: f64,
        /// Goal value
        #[arg(long, allow_hyphen_values = true)]
        target: f64,
    },
    /// Pacing of actual progress through a period
    Pacing {
        /// Units already passed (e.g. day of month)
        #[arg(long)]
        elapsed: f64,
        /// Units in the period (e.g. days in month)
        #[arg(long)]
        total: f64,
        /// Full-period target
        #[arg(long)]
        target: f64,
        /// Value reached so far
        #[arg(long, allow_hyphen_values = true)]
        actual: f64,
    },
    /// Weighted composite score
    Score {
        /// Component as value:max:weight (repeatable)
        #[arg(long = "component", value_parser = parse_component, required = true)]
        components: Vec<WeightedComponent>,
    },
    /// Assess team members from performance records
    Assess {
        /// JSON array of performance records
        file: PathBuf,
    },
    /// Rank agents
    Leaderboard {
        /// JSON array of performance records, goals, or actions (matching --by)
        file: PathBuf,
        /// Ranking criterion: score, ratio, or points
        #[arg(long, default_value = "score", value_parser = parse_rank_by)]
        by: RankBy,
        /// Month for point rankings, YYYY-MM (default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
    /// Review probation plans
    Probation {
        /// JSON array of probation plans
        file: PathBuf,
    },
    /// Track monthly goals
    Goal {
        /// JSON array of monthly goals
        file: PathBuf,
        /// Day to report on, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Summarise an agent's logged actions
    Actions {
        /// JSON array of action records
        file: PathBuf,
        /// Agent ID
        #[arg(long)]
        agent: AgentId,
        /// Month, YYYY-MM (default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = DashboardConfig::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => DashboardConfig::default(),
    };

    match cli.command {
        Commands::Progress { current, target } => {
            let pct = percentage(current, target);
            let raw = ratio(current, target);
            if cli.json {
                print_json(&serde_json::json!({ "percentage": pct, "ratio": raw }))?;
            } else {
                println!("Progress: {}% ({} / {}, ratio {:.3})", pct, current, target, raw);
            }
        }
        Commands::Pacing { elapsed, total, target, actual } => {
            let p = pacing(elapsed, total, target, actual);
            if cli.json {
                print_json(&p)?;
            } else {
                println!("Expected: {}", p.expected);
                println!("Actual:   {}", p.actual);
                println!("Delta:    {:+}", p.delta);
                println!("Status:   {}", if p.ahead_of_pace { "AHEAD" } else { "BEHIND" });
                println!("Needed per remaining unit: {:.1}", p.required_per_remaining_unit());
            }
        }
        Commands::Score { components } => {
            let composite = score(&components);
            if cli.json {
                print_json(&serde_json::json!({ "score": composite }))?;
            } else {
                println!("Score: {}", composite);
            }
        }
        Commands::Assess { file } => {
            let records: Vec<PerformanceRecord> = read_json(&file).await?;
            validate_all(&records, |r| r.validate().with_context(|| format!("Record for {}", r.name)))?;

            let service = AssessmentService::new(config.profile(SALES_PERFORMANCE)?.clone());
            let assessments = service.assess_all(&records);

            if cli.json {
                print_json(&assessments)?;
            } else {
                println!("Assessments ({})", assessments.len());
                for a in &assessments {
                    println!("  {} | {} | {} | {}", a.agent_id, a.grade.as_str(), a.score, a.name);
                    for c in &a.components {
                        println!("      {:<18} {:>5.1}", c.id, c.contribution);
                    }
                }
            }
        }
        Commands::Leaderboard { file, by, month } => {
            let board = match by {
                RankBy::Score => {
                    let records: Vec<PerformanceRecord> = read_json(&file).await?;
                    validate_all(&records, |r| r.validate().with_context(|| format!("Record for {}", r.name)))?;
                    let service = AssessmentService::new(config.profile(SALES_PERFORMANCE)?.clone());
                    Leaderboard::from_assessments(&service.assess_all(&records))
                }
                RankBy::Ratio => {
                    let goals: Vec<MonthlyGoal> = read_json(&file).await?;
                    validate_all(&goals, |g| g.validate().with_context(|| format!("Goal for {}", g.agent_id)))?;
                    Leaderboard::from_goals(&goals)
                }
                RankBy::Points => {
                    let actions: Vec<ActionRecord> = read_json(&file).await?;
                    let (year, month) = month.unwrap_or_else(current_month);
                    let mut ledger = ActionLedger::new(config.action_points.clone());
                    ledger.extend(actions);
                    Leaderboard::from_points(&ledger.totals_by_agent(year, month), &ledger.agent_names())
                }
            };

            if cli.json {
                print_json(&board)?;
            } else {
                println!("Leaderboard by {} ({})", board.rank_by.as_str(), board.entries.len());
                for e in &board.entries {
                    println!("  {:>3}. {} | {:.2} | {}", e.rank, e.agent_id, e.value, e.name);
                }
            }
        }
        Commands::Probation { file } => {
            let plans: Vec<ProbationPlan> = read_json(&file).await?;
            validate_all(&plans, |p| p.validate().with_context(|| format!("Plan for {}", p.agent_id)))?;

            let evaluator = ProbationEvaluator::new(config.probation.clone());
            let reviews: Vec<_> = plans.iter().map(|p| evaluator.review(p)).collect();

            if cli.json {
                print_json(&reviews)?;
            } else {
                for r in &reviews {
                    println!(
                        "{} {} | month {}/{} | {}% | {}",
                        r.agent_id,
                        r.name,
                        r.current_month,
                        r.duration_months,
                        r.overall_percentage,
                        r.status.as_str()
                    );
                    for m in &r.months {
                        let kpis: Vec<String> = m
                            .kpis
                            .iter()
                            .map(|k| format!("{} {}%", k.name, k.percentage))
                            .collect();
                        println!(
                            "    month {}: {}% {} [{}]",
                            m.month_index,
                            m.score,
                            if m.passed { "PASS" } else { "OPEN" },
                            kpis.join(", ")
                        );
                    }
                }
            }
        }
        Commands::Goal { file, date } => {
            let goals: Vec<MonthlyGoal> = read_json(&file).await?;
            validate_all(&goals, |g| g.validate().with_context(|| format!("Goal for {}", g.agent_id)))?;

            let on = date.unwrap_or_else(|| Utc::now().date_naive());
            let snapshot = GoalTracker::new().snapshot(&goals, on);

            if cli.json {
                print_json(&snapshot)?;
            } else {
                println!("Goals as of {} ({})", on, snapshot.reports.len());
                for r in &snapshot.reports {
                    println!(
                        "  {} {} | {}% | expected {} | delta {:+} | {}",
                        r.agent_id,
                        r.agent_name,
                        r.percentage,
                        r.pacing.expected,
                        r.pacing.delta,
                        if r.pacing.ahead_of_pace { "AHEAD" } else { "BEHIND" }
                    );
                }
            }
        }
        Commands::Actions { file, agent, month } => {
            let actions: Vec<ActionRecord> = read_json(&file).await?;
            let (year, month) = month.unwrap_or_else(current_month);

            let mut ledger = ActionLedger::new(config.action_points.clone());
            ledger.extend(actions);
            let summary = ledger.summary(agent, year, month);

            if cli.json {
                print_json(&summary)?;
            } else {
                println!("Actions for {} in {}-{:02}", agent, year, month);
                for (kind, count) in &summary.counts {
                    let points = summary.points_by_kind.get(kind).copied().unwrap_or(0.0);
                    println!("  {:<18} {:>4} | {} pts", kind.as_str(), count, points);
                }
                println!("  Total: {} pts", summary.total_points);
            }
        }
    }

    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn validate_all<T>(items: &[T], check: impl Fn(&T) -> Result<()>) -> Result<()> {
    items.iter().try_for_each(check)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn current_month() -> (i32, u32) {
    let today = Utc::now().date_naive();
    (today.year(), today.month())
}

fn parse_component(s: &str) -> Result<WeightedComponent, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [value, max_value, weight] = parts.as_slice() else {
        return Err(format!("expected value:max:weight, got '{}'", s));
    };
    let num = |field: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid {} '{}'", field, raw))
    };
    Ok(WeightedComponent::new(
        num("value", value)?,
        num("max", max_value)?,
        num("weight", weight)?,
    ))
}

fn parse_rank_by(s: &str) -> Result<RankBy, String> {
    match s.to_lowercase().as_str() {
        "score" => Ok(RankBy::Score),
        "ratio" => Ok(RankBy::Ratio),
        "points" => Ok(RankBy::Points),
        _ => Err(format!("unknown ranking '{}', expected score, ratio, or points", s)),
    }
}

fn parse_month(s: &str) -> Result<(i32, u32), String> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM, got '{}'", s))?;
    Ok((date.year(), date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_component() {
        assert_eq!(
            parse_component("72:100:0.3").unwrap(),
            WeightedComponent::new(72.0, 100.0, 0.3)
        );
        assert!(parse_component("72:100").is_err());
        assert!(parse_component("a:100:0.3").is_err());
    }

    #[test]
    fn test_parse_rank_by() {
        assert_eq!(parse_rank_by("Ratio").unwrap(), RankBy::Ratio);
        assert!(parse_rank_by("speed").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-06").unwrap(), (2024, 6));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }

    #[test]
    fn test_score_command_args() {
        let cli = Cli::try_parse_from([
            "brokerdash",
            "score",
            "--component",
            "50:100:1",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Score { components } => assert_eq!(score(&components), 50.0),
            _ => panic!("expected score command"),
        }
    }

    #[tokio::test]
    async fn test_read_json_goals() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"agentId":"01HZX3Q5J8N4Y6M2K7T9V0W1RS","year":2024,"month":6,"targetPoints":3000,"currentMonthPoints":1250}}]"#
        )
        .unwrap();

        let goals: Vec<MonthlyGoal> = read_json(file.path()).await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current_points, 1250.0);
    }

    #[tokio::test]
    async fn test_read_json_reports_path() {
        let err = read_json::<Vec<MonthlyGoal>>(Path::new("/nonexistent/goals.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/goals.json"));
    }
}

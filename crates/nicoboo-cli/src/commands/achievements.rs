use chrono::Utc;
use clap::Subcommand;
use nicoboo_core::Achievement;
use serde_json::json;

use crate::session::{print_json, Engine, Session};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List achievements in display order
    List {
        /// Only unlocked achievements
        #[arg(long, conflicts_with = "locked")]
        unlocked: bool,
        /// Only locked achievements
        #[arg(long)]
        locked: bool,
    },
    /// Show one achievement with its countdown
    Show {
        /// Achievement id or display order number
        id: String,
    },
    /// Print unlocked and total counts
    Count,
}

fn find<'a>(engine: &'a Engine, id: &str) -> Option<&'a Achievement> {
    engine
        .achievement(id)
        .or_else(|| engine.achievement_by_order(id.parse().ok()?))
}

pub fn run(action: AchievementsAction, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(user)?;
    // Bring unlock state up to date before reporting it.
    session.engine.tick(Utc::now());
    let engine = &session.engine;

    match action {
        AchievementsAction::List { unlocked, locked } => {
            let entries: Vec<&Achievement> = engine
                .achievements()
                .iter()
                .filter(|a| !unlocked || a.is_unlocked)
                .filter(|a| !locked || !a.is_unlocked)
                .collect();
            print_json(&entries)?;
        }
        AchievementsAction::Show { id } => {
            let achievement =
                find(engine, &id).ok_or_else(|| format!("achievement not found: {id}"))?;
            let countdown = engine.countdown(&achievement.id);
            let label = match &countdown {
                Some(c) => c.label(),
                None if achievement.is_unlocked => achievement.kind.encouragement().to_string(),
                None => "Keep going!".to_string(),
            };
            print_json(&json!({
                "achievement": achievement,
                "progress": engine.snapshot().map(|s| achievement.progress(s)),
                "countdown": countdown,
                "label": label,
            }))?;
        }
        AchievementsAction::Count => {
            print_json(&json!({
                "unlocked": engine.unlocked_count(),
                "total": engine.total_count(),
            }))?;
        }
    }
    Ok(())
}

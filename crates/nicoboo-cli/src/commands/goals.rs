use chrono::Utc;
use clap::Subcommand;
use nicoboo_core::accrual::{daily_savings, find_preset, PRESET_GOALS};
use nicoboo_core::SavingGoal;
use serde_json::json;

use crate::session::{print_json, Session};

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List the preset goals
    Presets,
    /// Add a custom goal
    Add {
        /// Goal name
        name: String,
        /// Target amount in the profile currency
        amount: f64,
        /// Image name shown with the goal
        #[arg(long)]
        image: Option<String>,
    },
    /// Add one of the preset goals by name
    AddPreset {
        /// Preset name (case-insensitive)
        name: String,
    },
    /// List goals with progress, newest first
    List,
    /// Remove a goal
    Remove {
        /// Goal ID
        id: String,
    },
}

pub fn run(action: GoalsAction, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if let GoalsAction::Presets = action {
        let presets: Vec<_> = PRESET_GOALS
            .iter()
            .map(|p| json!({ "name": p.name, "amount": p.amount, "image_name": p.image_name }))
            .collect();
        return print_json(&presets);
    }

    let mut session = Session::open(user)?;
    let now = Utc::now();

    match action {
        GoalsAction::Presets => {}
        GoalsAction::Add {
            name,
            amount,
            image,
        } => {
            let goal = SavingGoal::new(session.partition(), &name, amount, image, now)?;
            session.engine.store().add_goal(&goal)?;
            print_json(&goal)?;
        }
        GoalsAction::AddPreset { name } => {
            let preset = find_preset(&name).ok_or_else(|| format!("unknown preset: {name}"))?;
            let goal = SavingGoal::from_preset(session.partition(), preset, now)?;
            session.engine.store().add_goal(&goal)?;
            print_json(&goal)?;
        }
        GoalsAction::List => {
            session.engine.tick(now);
            let goals = session.engine.store().list_goals(session.partition())?;
            let saved = session.engine.snapshot().map(|s| s.money_saved).unwrap_or(0.0);
            let profile = session.engine.profile();
            let rows: Vec<_> = goals
                .iter()
                .map(|goal| {
                    json!({
                        "goal": goal,
                        "progress": profile.map(|p| goal.progress(saved, p)),
                    })
                })
                .collect();
            print_json(&json!({
                "daily_savings": profile.map(daily_savings).unwrap_or(0.0),
                "goals": rows,
            }))?;
        }
        GoalsAction::Remove { id } => {
            if !session.engine.store().remove_goal(session.partition(), &id)? {
                return Err(format!("goal not found: {id}").into());
            }
            println!("Goal removed: {id}");
        }
    }
    Ok(())
}

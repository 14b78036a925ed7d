use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use nicoboo_core::{Profile, SmokingType};

use crate::session::{no_profile, print_json, Session};

#[derive(Args, Default)]
pub struct ProfileFields {
    /// Cigarettes smoked per day
    #[arg(long)]
    cigarettes_per_day: Option<u32>,
    /// Cigarettes in one pack
    #[arg(long)]
    cigarettes_per_pack: Option<u32>,
    /// Price of one pack
    #[arg(long)]
    price_per_pack: Option<f64>,
    /// Puffs per day
    #[arg(long)]
    puffs_per_day: Option<u32>,
    /// Pods used per day
    #[arg(long)]
    pods_per_day: Option<u32>,
    /// Price of one pod
    #[arg(long)]
    price_per_pod: Option<f64>,
    /// Currency code (e.g. "EUR")
    #[arg(long)]
    currency: Option<String>,
}

impl ProfileFields {
    fn apply(self, profile: &mut Profile) {
        if let Some(v) = self.cigarettes_per_day {
            profile.cigarettes_per_day = Some(v);
        }
        if let Some(v) = self.cigarettes_per_pack {
            profile.cigarettes_per_pack = Some(v);
        }
        if let Some(v) = self.price_per_pack {
            profile.price_per_pack = Some(v);
        }
        if let Some(v) = self.puffs_per_day {
            profile.puffs_per_day = Some(v);
        }
        if let Some(v) = self.pods_per_day {
            profile.pods_per_day = Some(v);
        }
        if let Some(v) = self.price_per_pod {
            profile.price_per_pod = Some(v);
        }
        if let Some(v) = self.currency {
            profile.currency_code = v.trim().to_ascii_uppercase();
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create (or replace) the profile
    Init {
        /// smoke, vape or both
        #[arg(long = "type", default_value = "smoke")]
        smoking_type: SmokingType,
        /// Quit date: "now", YYYY-MM-DD or RFC 3339
        #[arg(long, default_value = "now")]
        stop_date: String,
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Change fields of the existing profile
    Set {
        /// smoke, vape or both
        #[arg(long = "type")]
        smoking_type: Option<SmokingType>,
        /// Quit date: "now", YYYY-MM-DD or RFC 3339
        #[arg(long)]
        stop_date: Option<String>,
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Print the profile as JSON
    Show,
    /// Delete the profile (achievements are kept)
    Clear,
}

/// Parse a quit date relative to `now`.
pub fn parse_stop_date(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("now") {
        return Ok(now);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid stop date '{raw}' (expected now, YYYY-MM-DD or RFC 3339)"))
}

pub fn run(action: ProfileAction, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(user)?;
    let now = Utc::now();

    match action {
        ProfileAction::Init {
            smoking_type,
            stop_date,
            fields,
        } => {
            let mut profile = Profile::new(smoking_type, parse_stop_date(&stop_date, now)?);
            profile.currency_code = session.config.profile.default_currency.clone();
            fields.apply(&mut profile);
            for event in session.engine.update_profile(profile, now)? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        ProfileAction::Set {
            smoking_type,
            stop_date,
            fields,
        } => {
            let mut profile = session.engine.profile().cloned().ok_or_else(no_profile)?;
            if let Some(t) = smoking_type {
                profile.smoking_type = t;
            }
            if let Some(raw) = stop_date {
                profile.stop_date = parse_stop_date(&raw, now)?;
            }
            fields.apply(&mut profile);
            for event in session.engine.update_profile(profile, now)? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        ProfileAction::Show => {
            let profile = session.engine.profile().ok_or_else(no_profile)?;
            print_json(profile)?;
        }
        ProfileAction::Clear => {
            let event = session.engine.clear_profile(now)?;
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

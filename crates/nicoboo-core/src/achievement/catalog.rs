//! Default achievement catalog.
//!
//! Life-regained requirements are in hours; sub-hour badges use fractions.

use super::kind::RequirementKind;
use super::model::Achievement;
use crate::partition::Partition;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub order: u32,
    pub title: &'static str,
    pub details: &'static str,
    pub requirement: f64,
    pub kind: RequirementKind,
    pub image_name: &'static str,
}

const fn entry(
    order: u32,
    title: &'static str,
    details: &'static str,
    requirement: f64,
    kind: RequirementKind,
    image_name: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        order,
        title,
        details,
        requirement,
        kind,
        image_name,
    }
}

#[rustfmt::skip]
pub const DEFAULT_CATALOG: [CatalogEntry; 60] = [
    // Cigarettes avoided, 1-50
    entry(1, "Baby Steps", "1 cigarette avoided", 1.0, RequirementKind::CigarettesAvoided, "image-a1"),
    entry(2, "First Spark", "3 cigarettes avoided", 3.0, RequirementKind::CigarettesAvoided, "image-a2"),
    entry(3, "To Infinity and Beyond", "5 cigarettes avoided", 5.0, RequirementKind::CigarettesAvoided, "image-a3"),
    entry(4, "Smoke Houdini", "7 cigarettes avoided", 7.0, RequirementKind::CigarettesAvoided, "image-a4"),
    entry(5, "Saturday Night Fever", "10 cigarettes avoided", 10.0, RequirementKind::CigarettesAvoided, "image-a5"),
    entry(6, "Double Digits", "12 cigarettes avoided", 12.0, RequirementKind::CigarettesAvoided, "image-a6"),
    entry(7, "Clothes Off", "15 cigarettes avoided", 15.0, RequirementKind::CigarettesAvoided, "image-a7"),
    entry(8, "Jump Around", "20 cigarettes avoided", 20.0, RequirementKind::CigarettesAvoided, "image-a8"),
    entry(9, "Cloud Walker", "25 cigarettes avoided", 25.0, RequirementKind::CigarettesAvoided, "image-a9"),
    entry(10, "Fresh Air Fan", "30 cigarettes avoided", 30.0, RequirementKind::CigarettesAvoided, "image-a10"),
    entry(11, "Breathe Easy", "35 cigarettes avoided", 35.0, RequirementKind::CigarettesAvoided, "image-a11"),
    entry(12, "Sky Dancer", "40 cigarettes avoided", 40.0, RequirementKind::CigarettesAvoided, "image-a12"),
    entry(13, "Lungs Level Up", "45 cigarettes avoided", 45.0, RequirementKind::CigarettesAvoided, "image-a13"),
    entry(14, "Airbender", "50 cigarettes avoided", 50.0, RequirementKind::CigarettesAvoided, "image-a14"),
    // Cigarettes avoided, 60-300
    entry(15, "Fresh Start", "60 cigarettes avoided", 60.0, RequirementKind::CigarettesAvoided, "image-a15"),
    entry(16, "Breathe Again", "70 cigarettes avoided", 70.0, RequirementKind::CigarettesAvoided, "image-a16"),
    entry(17, "Clean Slate", "80 cigarettes avoided", 80.0, RequirementKind::CigarettesAvoided, "image-a17"),
    entry(18, "Odyssey", "90 cigarettes avoided", 90.0, RequirementKind::CigarettesAvoided, "image-a18"),
    entry(19, "Century Breaker", "100 cigarettes avoided", 100.0, RequirementKind::CigarettesAvoided, "image-a19"),
    entry(20, "Windrunner", "120 cigarettes avoided", 120.0, RequirementKind::CigarettesAvoided, "image-a20"),
    entry(21, "Skywhisper", "150 cigarettes avoided", 150.0, RequirementKind::CigarettesAvoided, "image-a21"),
    entry(22, "Dustless Path", "180 cigarettes avoided", 180.0, RequirementKind::CigarettesAvoided, "image-a22"),
    entry(23, "Sun of the Earth", "200 cigarettes avoided", 200.0, RequirementKind::CigarettesAvoided, "image-a23"),
    entry(24, "Airborne", "220 cigarettes avoided", 220.0, RequirementKind::CigarettesAvoided, "image-a24"),
    entry(25, "Freedom Rider", "250 cigarettes avoided", 250.0, RequirementKind::CigarettesAvoided, "image-a25"),
    entry(26, "The Big Clean", "300 cigarettes avoided", 300.0, RequirementKind::CigarettesAvoided, "image-a26"),
    // Days smoke-free
    entry(27, "First Cross on the Calendar", "1 day without smoking", 1.0, RequirementKind::DaysSmokeFree, "image-a27"),
    entry(28, "Weekend Warrior", "2 days smoke-free", 2.0, RequirementKind::DaysSmokeFree, "image-a28"),
    entry(29, "Three's Company", "3 days smoke-free", 3.0, RequirementKind::DaysSmokeFree, "image-a29"),
    entry(30, "Stayin' Alive", "4 days smoke-free", 4.0, RequirementKind::DaysSmokeFree, "image-a30"),
    entry(31, "High Five", "5 days smoke-free", 5.0, RequirementKind::DaysSmokeFree, "image-a31"),
    entry(32, "Almost a Week", "6 days smoke-free", 6.0, RequirementKind::DaysSmokeFree, "image-a32"),
    entry(33, "One Week Wonder", "7 days smoke-free", 7.0, RequirementKind::DaysSmokeFree, "image-a33"),
    entry(34, "Double Week Dash", "14 days smoke-free", 14.0, RequirementKind::DaysSmokeFree, "image-a34"),
    entry(35, "Twenty-One Pilots", "21 days smoke-free", 21.0, RequirementKind::DaysSmokeFree, "image-a35"),
    entry(36, "Smoke-Free Month", "30 days smoke-free", 30.0, RequirementKind::DaysSmokeFree, "image-a36"),
    entry(37, "Six-Week Sage", "42 days smoke-free", 42.0, RequirementKind::DaysSmokeFree, "image-a37"),
    entry(38, "Two-Month Titan", "60 days smoke-free", 60.0, RequirementKind::DaysSmokeFree, "image-a38"),
    entry(39, "Quarter Year", "90 days smoke-free", 90.0, RequirementKind::DaysSmokeFree, "image-a39"),
    entry(40, "The Clean 100", "100 days smoke-free", 100.0, RequirementKind::DaysSmokeFree, "image-a40"),
    entry(41, "Season of Breath", "120 days smoke-free", 120.0, RequirementKind::DaysSmokeFree, "image-a41"),
    entry(42, "Half-Year Halo", "180 days smoke-free", 180.0, RequirementKind::DaysSmokeFree, "image-a42"),
    entry(43, "Year One", "365 days smoke-free", 365.0, RequirementKind::DaysSmokeFree, "image-a43"),
    // Hours of life regained
    entry(44, "Borrowed Time", "10 minutes of life regained", 10.0 / 60.0, RequirementKind::LifeRegained, "image-a44"),
    entry(45, "Pocketful of Minutes", "30 minutes of life regained", 30.0 / 60.0, RequirementKind::LifeRegained, "image-a45"),
    entry(46, "Superpowers", "1 hour of life regained", 1.0, RequirementKind::LifeRegained, "image-a46"),
    entry(47, "Time Traveler", "2 hours of life regained", 2.0, RequirementKind::LifeRegained, "image-a47"),
    entry(48, "Hourglass Hero", "3 hours of life regained", 3.0, RequirementKind::LifeRegained, "image-a48"),
    entry(49, "Clockmaster", "6 hours of life regained", 6.0, RequirementKind::LifeRegained, "image-a49"),
    entry(50, "Daylight Bonus", "12 hours of life regained", 12.0, RequirementKind::LifeRegained, "image-a50"),
    entry(51, "Time Bender", "18 hours of life regained", 18.0, RequirementKind::LifeRegained, "image-a51"),
    entry(52, "Day Reclaimed", "24 hours of life regained", 24.0, RequirementKind::LifeRegained, "image-a52"),
    entry(53, "Beyond Time", "48 hours of life regained", 48.0, RequirementKind::LifeRegained, "image-a53"),
    entry(54, "Immortality Patch", "72 hours of life regained", 72.0, RequirementKind::LifeRegained, "image-a54"),
    entry(55, "Eternal Engine", "120 hours of life regained", 120.0, RequirementKind::LifeRegained, "image-a55"),
    entry(56, "Time Overlord", "200 hours of life regained", 200.0, RequirementKind::LifeRegained, "image-a56"),
    // Novelty badges
    entry(57, "You vs. You", "First time opening the app", 0.0, RequirementKind::DaysSmokeFree, "image-a57"),
    entry(58, "Reset Warrior", "First time restarting progress", 0.0, RequirementKind::DaysSmokeFree, "image-a58"),
    entry(59, "Habit Hacker", "Used the app for 7 consecutive days", 7.0, RequirementKind::DaysSmokeFree, "image-a59"),
    entry(60, "Mind Over Nicotine", "Reached a new personal best streak", 0.0, RequirementKind::DaysSmokeFree, "image-a60"),
];

/// Identity used to match stored entries against the catalog.
///
/// Stored ids are per-user UUIDs, so the diff goes by content instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    title: String,
    requirement_bits: u64,
    kind: RequirementKind,
}

impl CatalogKey {
    pub fn new(title: &str, requirement: f64, kind: RequirementKind) -> Self {
        // Normalize -0.0 so it keys the same as 0.0.
        let requirement = if requirement == 0.0 { 0.0 } else { requirement };
        Self {
            title: title.to_string(),
            requirement_bits: requirement.to_bits(),
            kind,
        }
    }
}

impl CatalogEntry {
    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(self.title, self.requirement, self.kind)
    }

    /// A fresh, locked copy of this entry for `partition`.
    pub fn instantiate(&self, partition: &Partition) -> Achievement {
        Achievement {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: partition.user_id().map(str::to_string),
            title: self.title.to_string(),
            details: self.details.to_string(),
            requirement: self.requirement,
            kind: self.kind,
            image_name: self.image_name.to_string(),
            is_unlocked: false,
            unlocked_at: None,
            order: self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_sorted_by_order() {
        assert!(DEFAULT_CATALOG.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[test]
    fn catalog_keys_are_unique() {
        let keys: HashSet<_> = DEFAULT_CATALOG.iter().map(CatalogEntry::key).collect();
        assert_eq!(keys.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn instantiate_is_locked_and_owned_by_partition() {
        let partition = Partition::User("u-42".into());
        let a = DEFAULT_CATALOG[0].instantiate(&partition);
        assert!(!a.is_unlocked);
        assert!(a.unlocked_at.is_none());
        assert_eq!(a.partition(), partition);
        assert_eq!(a.key(), DEFAULT_CATALOG[0].key());
    }

    #[test]
    fn instantiated_ids_differ_between_partitions() {
        let a = DEFAULT_CATALOG[3].instantiate(&Partition::Guest);
        let b = DEFAULT_CATALOG[3].instantiate(&Partition::User("x".into()));
        assert_ne!(a.id, b.id);
    }
}

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

static CORPUS_DIR: Dir = include_dir!("src/corpus");

/// Difficulty tier selecting a paragraph pool. Pure data selector; nothing
/// about timing or scoring varies by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Parse the lowercase name used in the config file.
    pub fn from_name(name: &str) -> Option<Tier> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.to_string().to_lowercase())
    }
}

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct TierBank {
    pub name: String,
    pub size: u32,
    pub paragraphs: Vec<String>,
}

impl TierBank {
    pub fn new(tier: Tier) -> Self {
        read_bank_from_file(tier.file_name())
    }

    /// Uniformly random paragraph from this tier's pool.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.paragraphs
            .choose(rng)
            .expect("Tier bank has no paragraphs")
    }
}

fn read_bank_from_file(file_name: String) -> TierBank {
    let file = CORPUS_DIR
        .get_file(&file_name)
        .expect("Corpus file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    from_str(file_as_str).expect("Unable to deserialize corpus json")
}

/// All three tiers, loaded from the compiled-in corpus.
#[derive(Clone, Debug)]
pub struct ParagraphBank {
    easy: TierBank,
    medium: TierBank,
    hard: TierBank,
}

impl ParagraphBank {
    pub fn load() -> Self {
        Self {
            easy: TierBank::new(Tier::Easy),
            medium: TierBank::new(Tier::Medium),
            hard: TierBank::new(Tier::Hard),
        }
    }

    pub fn tier(&self, tier: Tier) -> &TierBank {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    /// Uniformly random paragraph from the given tier. The RNG is owned by
    /// the caller so selection can be made deterministic in tests.
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R, tier: Tier) -> String {
        self.tier(tier).pick(rng).to_string()
    }
}

impl Default for ParagraphBank {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_each_tier_loads_ten_paragraphs() {
        for tier in Tier::ALL {
            let bank = TierBank::new(tier);
            assert_eq!(bank.paragraphs.len(), 10, "{tier} should have 10 paragraphs");
            assert_eq!(bank.size as usize, bank.paragraphs.len());
            for p in &bank.paragraphs {
                assert!(!p.is_empty());
                assert!(p.chars().all(|c| c.is_ascii() && c != '\n'));
            }
        }
    }

    #[test]
    fn test_tier_names_match_files() {
        assert_eq!(TierBank::new(Tier::Easy).name, "easy");
        assert_eq!(TierBank::new(Tier::Medium).name, "medium");
        assert_eq!(TierBank::new(Tier::Hard).name, "hard");
    }

    #[test]
    fn test_pick_returns_pool_member() {
        let bank = TierBank::new(Tier::Medium);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let p = bank.pick(&mut rng).to_string();
            assert!(bank.paragraphs.contains(&p));
        }
    }

    #[test]
    fn test_select_random_is_deterministic_with_seed() {
        let bank = ParagraphBank::load();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for tier in Tier::ALL {
            assert_eq!(
                bank.select_random(&mut a, tier),
                bank.select_random(&mut b, tier)
            );
        }
    }

    #[test]
    fn test_select_random_covers_pool() {
        // With enough draws a uniform pick should touch most of a 10-entry pool.
        let bank = ParagraphBank::load();
        let mut rng = StdRng::seed_from_u64(3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(bank.select_random(&mut rng, Tier::Easy));
        }
        assert!(seen.len() >= 8);
    }

    #[test]
    fn test_tiers_have_distinct_pools() {
        let bank = ParagraphBank::load();
        let easy = &bank.tier(Tier::Easy).paragraphs;
        let hard = &bank.tier(Tier::Hard).paragraphs;
        assert!(easy.iter().all(|p| !hard.contains(p)));
    }

    #[test]
    fn test_from_name_parses_all_tiers() {
        assert_eq!(Tier::from_name("easy"), Some(Tier::Easy));
        assert_eq!(Tier::from_name("Medium"), Some(Tier::Medium));
        assert_eq!(Tier::from_name("HARD"), Some(Tier::Hard));
        assert_eq!(Tier::from_name("nightmare"), None);
    }

    #[test]
    fn test_display_is_capitalized() {
        assert_eq!(Tier::Easy.to_string(), "Easy");
        assert_eq!(Tier::Medium.to_string(), "Medium");
        assert_eq!(Tier::Hard.to_string(), "Hard");
    }
}

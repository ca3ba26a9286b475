use std::collections::HashSet;

use super::error::GroupStageError;
use super::random::RandomSource;

pub const PLAYER_FIRST_NAMES: [&str; 23] = [
    "Robert", "Bill", "Evan", "Richard", "Pepper", "Mauro", "Lucas", "Niels", "Jan", "Rob",
    "Edwin", "John", "Alex", "Brandon", "Tom", "Tim", "Wiebe", "Menno", "Robin", "Freek", "Jordy",
    "Fortune", "Dylan",
];

pub const PLAYER_LAST_NAMES: [&str; 36] = [
    "Wood",
    "Mulder",
    "Lee",
    "San Giorgi",
    "van der Sloot",
    "van der Wijk",
    "de Groot",
    "de Bruijne",
    "Kluivert",
    "Santon",
    "de Rode",
    "Webber",
    "Alonso",
    "Houston",
    "Koster",
    "Smith",
    "Johnson",
    "Williams",
    "Jones",
    "Brown",
    "Davis",
    "Wilson",
    "Florence",
    "Moore",
    "Taylor",
    "Anderson",
    "Thomas",
    "Jackson",
    "White",
    "Harris",
    "Martin",
    "Thompson",
    "Martinez",
    "Clark",
    "Turner",
    "Perez",
];

pub const TEAM_PREFIXES: [&str; 7] = ["FC", "SC", "Youth", "Real", "Team", "Inter", "Atletico"];

pub const TEAM_SUFFIXES: [&str; 16] = [
    "Madrid",
    "Barcelona",
    "Ajax",
    "Utrecht",
    "Twente",
    "London",
    "Hotspur",
    "Lelystad",
    "Groningen",
    "Kaapstad",
    "Washington",
    "New York",
    "Brooklyn",
    "Zoetermeer",
    "Amsterdam",
    "Rotterdam",
];

/// How many draws a generator makes before it gives up on
/// finding an unused name.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// Two word lists. A name is one word from each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePool {
    first: Vec<String>,
    last: Vec<String>,
}

impl NamePool {
    pub fn new(first: Vec<String>, last: Vec<String>) -> Self {
        Self { first, last }
    }

    pub fn players() -> Self {
        Self::from_static(&PLAYER_FIRST_NAMES, &PLAYER_LAST_NAMES)
    }

    pub fn teams() -> Self {
        Self::from_static(&TEAM_PREFIXES, &TEAM_SUFFIXES)
    }

    fn from_static(first: &[&str], last: &[&str]) -> Self {
        Self::new(
            first.iter().map(|s| s.to_string()).collect(),
            last.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Number of different names the pool can produce.
    pub fn capacity(&self) -> usize {
        self.first.len() * self.last.len()
    }

    fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (String, String) {
        let first = &self.first[rng.choose_index(self.first.len())];
        let last = &self.last[rng.choose_index(self.last.len())];
        (first.clone(), last.clone())
    }
}

/// Hands out names that haven't been used before.
///
/// Every name handed out is remembered, so one generator should be shared
/// by everything created for the same group stage.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    player_pool: NamePool,
    team_pool: NamePool,
    used_player_names: HashSet<String>,
    used_team_names: HashSet<String>,
    max_attempts: usize,
}

impl NameGenerator {
    pub fn new(player_pool: NamePool, team_pool: NamePool) -> Self {
        Self {
            player_pool,
            team_pool,
            used_player_names: HashSet::new(),
            used_team_names: HashSet::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draw a first and last name no other player has.
    pub fn next_player_name<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(String, String), GroupStageError> {
        Self::next_unused(
            &self.player_pool,
            &mut self.used_player_names,
            self.max_attempts,
            rng,
        )
    }

    /// Draw a team name no other team has.
    pub fn next_team_name<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<String, GroupStageError> {
        let (prefix, suffix) = Self::next_unused(
            &self.team_pool,
            &mut self.used_team_names,
            self.max_attempts,
            rng,
        )?;
        Ok(format!("{prefix} {suffix}"))
    }

    pub fn is_player_name_used(&self, full_name: &str) -> bool {
        self.used_player_names.contains(full_name)
    }

    pub fn is_team_name_used(&self, name: &str) -> bool {
        self.used_team_names.contains(name)
    }

    fn next_unused<R: RandomSource + ?Sized>(
        pool: &NamePool,
        used: &mut HashSet<String>,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<(String, String), GroupStageError> {
        // Nothing left to find, don't bother drawing.
        if used.len() >= pool.capacity() {
            return Err(GroupStageError::NamePoolExhausted(0));
        }

        for _ in 0..max_attempts {
            let (first, last) = pool.draw(rng);
            let full_name = format!("{first} {last}");
            if used.insert(full_name) {
                return Ok((first, last));
            }
        }

        Err(GroupStageError::NamePoolExhausted(max_attempts))
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new(NamePool::players(), NamePool::teams())
    }
}

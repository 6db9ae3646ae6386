use std::fmt;
use std::sync::Arc;

use rand::Rng;
use webring_common::{Member, Registry};

/// Where a visitor asked to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
    Random,
}

impl Direction {
    fn offset(self) -> i64 {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
            Direction::Random => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
            Direction::Random => write!(f, "random"),
        }
    }
}

/// Mathematical modulo: always in `[0, n)`, also for negative `a`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn modulo(a: i64, n: usize) -> usize {
    a.rem_euclid(n as i64) as usize
}

/// Ring navigator.
///
/// Every operation is a pure function of the registry and the resolved
/// position. An unresolved position always falls back to a uniformly random
/// member, so navigation can never fail once the registry exists.
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: Arc<Registry>,
}

impl Navigator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Picks a member uniformly at random using the thread-local RNG.
    pub fn random(&self) -> &Member {
        self.random_with(&mut rand::thread_rng())
    }

    /// Picks a member uniformly at random from the given RNG.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &Member {
        let position = rng.gen_range(0..self.registry.len());
        &self.registry.members()[position]
    }

    /// The member after `position`, wrapping from the last to the first.
    pub fn next(&self, position: Option<usize>) -> &Member {
        self.navigate(Direction::Next, position)
    }

    /// The member before `position`, wrapping from the first to the last.
    pub fn previous(&self, position: Option<usize>) -> &Member {
        self.navigate(Direction::Previous, position)
    }

    /// Moves one step in `direction` from `position`.
    ///
    /// `Direction::Random` and an unresolved position both yield a random
    /// member.
    pub fn navigate(&self, direction: Direction, position: Option<usize>) -> &Member {
        self.navigate_with(direction, position, &mut rand::thread_rng())
    }

    /// Like [`Navigator::navigate`], drawing any random choice from `rng`.
    pub fn navigate_with<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        position: Option<usize>,
        rng: &mut R,
    ) -> &Member {
        match (direction, position) {
            (Direction::Random, _) | (_, None) => self.random_with(rng),
            (direction, Some(position)) => {
                let target = modulo(position as i64 + direction.offset(), self.registry.len());
                &self.registry.members()[target]
            }
        }
    }
}

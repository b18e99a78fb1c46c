//! Teams and rosters
//!
//! A [`Roster`] is the ordered list of a team's live robots plus the
//! rotation cursor used to pick who acts next. Eliminated robots are simply
//! removed; the cursor is always taken modulo the current length, so it can
//! never select a dead slot.

use serde::{Deserialize, Serialize};

/// Index of an actor in the match's actor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Red team, always acts first
    A,
    /// Blue team
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// Team owning spawn slot `slot`: even slots are A, odd slots are B.
    pub fn for_slot(slot: usize) -> Self {
        if slot % 2 == 0 { Team::A } else { Team::B }
    }

    pub fn other(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Display name used on the victory screen.
    pub fn label(self) -> &'static str {
        match self {
            Team::A => "RED",
            Team::B => "BLUE",
        }
    }

    fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

/// Live robots of one team in creation order, with the rotation cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: Vec<ActorId>,
    /// Index of the robot that acted last; `None` before the first turn
    cursor: Option<usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ActorId) {
        self.members.push(id);
    }

    /// Remove a robot. Returns `false` if it was not on the roster.
    pub fn remove(&mut self, id: ActorId) -> bool {
        match self.members.iter().position(|m| *m == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[ActorId] {
        &self.members
    }

    /// Move the cursor to the next robot and return it.
    ///
    /// The first call selects index 0. Later calls step by one, wrapping
    /// modulo the current length.
    pub fn advance(&mut self) -> Option<ActorId> {
        if self.members.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(c) => (c + 1) % self.members.len(),
        };
        self.cursor = Some(next);
        self.members.get(next).copied()
    }
}

/// Both teams' rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rosters {
    teams: [Roster; 2],
}

impl Rosters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, team: Team) -> &Roster {
        &self.teams[team.index()]
    }

    pub fn get_mut(&mut self, team: Team) -> &mut Roster {
        &mut self.teams[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Roster {
        let mut r = Roster::new();
        for i in 0..n {
            r.push(ActorId(i));
        }
        r
    }

    #[test]
    fn test_slot_teams_alternate() {
        assert_eq!(Team::for_slot(0), Team::A);
        assert_eq!(Team::for_slot(1), Team::B);
        assert_eq!(Team::for_slot(6), Team::A);
        assert_eq!(Team::A.other(), Team::B);
        assert_eq!(Team::B.label(), "BLUE");
    }

    #[test]
    fn test_first_advance_selects_index_zero() {
        let mut r = roster(3);
        assert_eq!(r.advance(), Some(ActorId(0)));
        assert_eq!(r.advance(), Some(ActorId(1)));
        assert_eq!(r.advance(), Some(ActorId(2)));
        assert_eq!(r.advance(), Some(ActorId(0)));
    }

    #[test]
    fn test_advance_wraps_after_removal() {
        let mut r = roster(4);
        r.advance();
        r.advance();
        r.advance(); // cursor on index 2
        assert!(r.remove(ActorId(3)));
        assert!(r.remove(ActorId(1)));
        // Two left; cursor 2 wraps to (2 + 1) % 2.
        let next = r.advance().unwrap();
        assert!(r.contains(next));
    }

    #[test]
    fn test_remove_is_once() {
        let mut r = roster(2);
        assert!(r.remove(ActorId(1)));
        assert!(!r.remove(ActorId(1)));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_empty_roster_has_no_next() {
        let mut r = Roster::new();
        assert_eq!(r.advance(), None);
        assert!(r.is_empty());
    }
}

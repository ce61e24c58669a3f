//! Validated quest party: a leader plus companions, all available.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::COMPANION_CHANCE_STEP;
use crate::engine::QuestError;
use crate::numbers::i64_to_f64;
use crate::roster::{CharacterDirectory, CharacterKind, RosterError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub name: String,
    pub kind: CharacterKind,
}

/// Leader and companions, checked against the directory once at assembly.
///
/// Member kinds are resolved at assembly so the party never has to consult
/// the directory again for type queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    leader: PartyMember,
    companions: SmallVec<[PartyMember; 4]>,
}

impl Party {
    /// Assemble a party, failing on the leader or the first unavailable companion.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::CharacterUnavailable`],
    /// [`QuestError::CompanionUnavailable`], [`QuestError::DuplicateMember`],
    /// or a directory lookup failure.
    pub fn assemble<D, S>(
        directory: &D,
        leader: &str,
        companions: &[S],
    ) -> Result<Self, QuestError>
    where
        D: CharacterDirectory + ?Sized,
        S: AsRef<str>,
    {
        let names: SmallVec<[&str; 4]> = companions.iter().map(|name| name.as_ref()).collect();
        if !directory.is_available(leader) {
            return Err(QuestError::CharacterUnavailable(leader.to_string()));
        }
        if let Some(missing) = names.iter().find(|name| !directory.is_available(name)) {
            return Err(QuestError::CompanionUnavailable((*missing).to_string()));
        }

        let mut seen: SmallVec<[&str; 5]> = SmallVec::new();
        seen.push(leader);
        for name in &names {
            if seen.contains(name) {
                return Err(QuestError::DuplicateMember((*name).to_string()));
            }
            seen.push(*name);
        }

        let leader = resolve(directory, leader)?;
        let companions = names
            .iter()
            .map(|name| resolve(directory, name))
            .collect::<Result<SmallVec<_>, _>>()?;
        Ok(Self { leader, companions })
    }

    #[must_use]
    pub const fn leader(&self) -> &PartyMember {
        &self.leader
    }

    #[must_use]
    pub fn companions(&self) -> &[PartyMember] {
        &self.companions
    }

    #[must_use]
    pub fn companion_names(&self) -> Vec<String> {
        self.companions.iter().map(|m| m.name.clone()).collect()
    }

    /// Leader first, then companions in the order given.
    pub fn members(&self) -> impl Iterator<Item = &PartyMember> {
        std::iter::once(&self.leader).chain(self.companions.iter())
    }

    /// Number of members including the leader.
    #[must_use]
    pub fn size(&self) -> usize {
        self.companions.len() + 1
    }

    #[must_use]
    pub fn contains_kind(&self, kind: CharacterKind) -> bool {
        self.members().any(|member| member.kind == kind)
    }

    /// At least one member of each kind, in any role.
    #[must_use]
    pub fn contains_kind_combination(&self, first: CharacterKind, second: CharacterKind) -> bool {
        self.contains_kind(first) && self.contains_kind(second)
    }

    /// Success chance contributed by the companions (the leader does not count).
    #[must_use]
    pub fn base_chance(&self) -> f64 {
        let companions = i64::try_from(self.companions.len()).unwrap_or(i64::MAX);
        i64_to_f64(companions) * COMPANION_CHANCE_STEP
    }

    /// Forward a quest outcome to the directory for every member.
    ///
    /// # Errors
    ///
    /// Returns the first directory failure; members after it are not updated.
    pub fn complete_quest<D>(&self, directory: &mut D, success: bool) -> Result<(), RosterError>
    where
        D: CharacterDirectory + ?Sized,
    {
        for member in self.members() {
            directory.complete_quest(&member.name, success)?;
        }
        Ok(())
    }
}

fn resolve<D>(directory: &D, name: &str) -> Result<PartyMember, RosterError>
where
    D: CharacterDirectory + ?Sized,
{
    Ok(PartyMember {
        name: name.to_string(),
        kind: directory.kind(name)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Level, Roster};

    fn roster() -> Roster {
        let mut roster = Roster::with_seed(1).with_promotion_chance(0.0);
        roster.add_character("Legolas", CharacterKind::Elf, Level::Veteran);
        roster.add_character("Gimli", CharacterKind::Dwarf, Level::Veteran);
        roster.add_character("Aragorn", CharacterKind::Human, Level::Veteran);
        roster.add_character("Sam", CharacterKind::Hobbit, Level::Novice);
        roster
    }

    #[test]
    fn unavailable_leader_is_rejected() {
        let mut roster = roster();
        roster.set_availability("Aragorn", false).unwrap();
        let err = Party::assemble(&roster, "Aragorn", &["Sam"]).unwrap_err();
        assert_eq!(err, QuestError::CharacterUnavailable("Aragorn".into()));
    }

    #[test]
    fn first_unavailable_companion_is_reported() {
        let mut roster = roster();
        roster.set_availability("Gimli", false).unwrap();
        let err =
            Party::assemble(&roster, "Aragorn", &["Sam", "Gimli", "Boromir"]).unwrap_err();
        assert_eq!(err, QuestError::CompanionUnavailable("Gimli".into()));
    }

    #[test]
    fn duplicate_members_are_rejected() {
        let roster = roster();
        let err = Party::assemble(&roster, "Aragorn", &["Sam", "Aragorn"]).unwrap_err();
        assert_eq!(err, QuestError::DuplicateMember("Aragorn".into()));
    }

    #[test]
    fn combinations_count_leader_and_companions() {
        let roster = roster();
        let party = Party::assemble(&roster, "Legolas", &["Gimli"]).unwrap();
        assert!(party.contains_kind_combination(CharacterKind::Elf, CharacterKind::Dwarf));
        assert!(!party.contains_kind_combination(CharacterKind::Hobbit, CharacterKind::Wizard));

        let led_by_human = Party::assemble(&roster, "Aragorn", &["Legolas", "Gimli"]).unwrap();
        assert!(led_by_human.contains_kind_combination(CharacterKind::Dwarf, CharacterKind::Elf));
    }

    #[test]
    fn base_chance_counts_companions_only() {
        let roster = roster();
        let solo = Party::assemble::<_, &str>(&roster, "Aragorn", &[]).unwrap();
        assert!(solo.base_chance().abs() < f64::EPSILON);
        let party = Party::assemble(&roster, "Aragorn", &["Sam", "Gimli"]).unwrap();
        assert!((party.base_chance() - 0.10).abs() < 1e-9);
        assert_eq!(party.size(), 3);
    }

    #[test]
    fn complete_quest_reaches_every_member() {
        let mut roster = roster();
        let party = Party::assemble(&roster, "Aragorn", &["Sam"]).unwrap();
        party.complete_quest(&mut roster, false).unwrap();
        assert_eq!(roster.get("Aragorn").unwrap().failed_quests, 1);
        assert_eq!(roster.get("Sam").unwrap().failed_quests, 1);
    }
}

//! Draft participants (coaches).

use super::pool::SelectableItem;

/// A participant in the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Display name, unique within a draft
    pub name: String,

    /// Team chosen during team selection
    pub team: Option<String>,

    /// Items drafted so far, in pick order
    roster: Vec<SelectableItem>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: None,
            roster: Vec::new(),
        }
    }

    pub fn has_team(&self) -> bool {
        self.team.is_some()
    }

    /// Items drafted so far.
    pub fn roster(&self) -> &[SelectableItem] {
        &self.roster
    }

    /// Names of drafted items, in pick order.
    pub fn roster_names(&self) -> Vec<String> {
        self.roster.iter().map(|i| i.name.clone()).collect()
    }

    pub(crate) fn draft(&mut self, items: impl IntoIterator<Item = SelectableItem>) {
        self.roster.extend(items);
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "team": self.team,
            "roster": self.roster_names()
        })
    }
}

/// Final roster for one participant, produced when the draft completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRoster {
    pub participant: String,
    pub team: String,
    pub items: Vec<String>,
}

impl FinalRoster {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "participant": self.participant,
            "team": self.team,
            "items": self.items
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_participant_new() {
        let p = Participant::new("Alice");
        assert!(!p.has_team());
        assert!(p.roster().is_empty());
    }

    #[test]
    fn test_draft_appends() {
        let mut p = Participant::new("Alice");
        p.draft(vec![SelectableItem::new("P1")]);
        p.draft(vec![
            SelectableItem::grouped("P2", "g"),
            SelectableItem::grouped("P3", "g"),
        ]);
        assert_eq!(p.roster_names(), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_to_json() {
        let mut p = Participant::new("Alice");
        p.team = Some("Reds".to_string());
        p.draft(vec![SelectableItem::new("P1")]);

        let json = p.to_json();
        assert_eq!(json["team"], "Reds");
        assert_eq!(json["roster"][0], "P1");
    }
}

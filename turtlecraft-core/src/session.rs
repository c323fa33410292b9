//! # Session
//!
//! The turtles of one interpreter run, kept in creation order.

use crate::agent::Agent;
use crate::command::AgentLookup;
use crate::config::SessionConfig;
use indexmap::IndexMap;

/// Printed by `status` when no turtle exists yet
pub const NO_TURTLES: &str = "    No turtles!";

/// Ordered name → turtle map plus the configuration new turtles start from
#[derive(Debug, Clone, Default)]
pub struct Session {
    agents: IndexMap<String, Agent>,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            agents: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create `name`, or reset it to a fresh turtle. A reset turtle keeps its
    /// place in creation order.
    ///
    /// Returns true when the name was new.
    pub fn insert_or_replace(&mut self, name: &str) -> bool {
        let agent = Agent::new(name, &self.config);
        self.agents.insert(name.to_string(), agent).is_none()
    }

    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Agent> {
        self.agents.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Turtles in creation order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// One line per turtle in creation order, or [`NO_TURTLES`]
    pub fn status_report(&self) -> Vec<String> {
        if self.agents.is_empty() {
            return vec![NO_TURTLES.to_string()];
        }
        self.agents
            .iter()
            .map(|(name, agent)| format!("{:>14}:  {}", name, agent))
            .collect()
    }
}

impl AgentLookup for Session {
    fn contains_agent(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Colour;

    #[test]
    fn test_empty_status() {
        let session = Session::default();
        assert!(session.is_empty());
        assert_eq!(session.status_report(), vec!["    No turtles!".to_string()]);
    }

    #[test]
    fn test_creation_order_survives_reset() {
        let mut session = Session::new(SessionConfig::text_mode());
        assert!(session.insert_or_replace("bob"));
        assert!(session.insert_or_replace("bill"));
        session.get_mut("bob").unwrap().set_colour(Colour::Red);
        session.get_mut("bob").unwrap().left(10.0);

        assert!(!session.insert_or_replace("bob"));

        let names: Vec<_> = session.agents().map(|a| a.name().to_string()).collect();
        assert_eq!(names, ["bob", "bill"]);
        let bob = session.get("bob").unwrap();
        assert_eq!(bob.colour(), Colour::Black);
        assert_eq!(bob.heading(), 90.0);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_status_lines() {
        let mut session = Session::new(SessionConfig::text_mode());
        session.insert_or_replace("bill");
        session.insert_or_replace("bob");

        let report = session.status_report();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0], "          bill:  (   0.00,    0.00) |  90.00° | DOWN | black");
        assert!(report[1].starts_with("           bob:  "));
    }

    #[test]
    fn test_lookup() {
        let mut session = Session::default();
        assert!(!session.contains_agent("bob"));
        session.insert_or_replace("bob");
        assert!(session.contains_agent("bob"));
        assert!(!session.contains_agent("Bob"));
    }
}

//! Tag-based project filtering.
//!
//! A pill vocabulary plus per-card tag sets. Activating a pill hides every
//! card that does not carry its tag; the [`SHOW_ALL`] pill (and the state
//! before any activation) shows everything. With no pills or no cards the
//! widget is inert and hides nothing.

/// The pill that disables filtering.
pub const SHOW_ALL: &str = "all";

#[derive(Debug)]
struct ProjectCard {
    id: String,
    tags: Vec<String>,
}

/// Filter state over a set of pills and cards.
#[derive(Debug)]
pub struct TagFilter {
    pills: Vec<String>,
    active: Option<usize>,
    cards: Vec<ProjectCard>,
}

impl TagFilter {
    /// Create a filter with the given pill vocabulary.
    pub fn new<I, S>(pills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pills: pills.into_iter().map(Into::into).collect(),
            active: None,
            cards: Vec::new(),
        }
    }

    /// Register a card with its whitespace-separated tag list.
    pub fn add_card(&mut self, id: impl Into<String>, tags: &str) {
        self.cards.push(ProjectCard {
            id: id.into(),
            tags: tags.split_whitespace().map(str::to_string).collect(),
        });
    }

    /// Inert filters never hide anything.
    pub fn is_inert(&self) -> bool {
        self.pills.is_empty() || self.cards.is_empty()
    }

    /// Activate a pill. Exactly one pill is active afterwards; unknown pills
    /// are ignored and leave the previous activation in place.
    pub fn activate(&mut self, pill: &str) -> bool {
        match self.pills.iter().position(|p| p == pill) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// The currently active pill, if any has been activated.
    pub fn active(&self) -> Option<&str> {
        self.active.map(|idx| self.pills[idx].as_str())
    }

    /// Whether the card with this id is currently shown.
    pub fn is_visible(&self, id: &str) -> bool {
        let Some(card) = self.cards.iter().find(|c| c.id == id) else {
            return false;
        };
        self.card_visible(card)
    }

    /// Ids of all currently shown cards, in registration order.
    pub fn visible_cards(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| self.card_visible(c))
            .map(|c| c.id.as_str())
            .collect()
    }

    fn card_visible(&self, card: &ProjectCard) -> bool {
        if self.is_inert() {
            return true;
        }
        match self.active() {
            None => true,
            Some(SHOW_ALL) => true,
            Some(tag) => card.tags.iter().any(|t| t == tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TagFilter {
        let mut filter = TagFilter::new(["all", "rust", "data", "web"]);
        filter.add_card("ray-tracer", "rust graphics");
        filter.add_card("dashboard", "data web");
        filter.add_card("scraper", "rust data");
        filter
    }

    #[test]
    fn test_everything_visible_before_activation() {
        let filter = sample();
        assert_eq!(filter.visible_cards().len(), 3);
    }

    #[test]
    fn test_tag_activation_hides_others() {
        let mut filter = sample();
        assert!(filter.activate("rust"));
        assert_eq!(filter.visible_cards(), vec!["ray-tracer", "scraper"]);
        assert!(!filter.is_visible("dashboard"));
    }

    #[test]
    fn test_show_all_restores_everything() {
        let mut filter = sample();
        filter.activate("web");
        filter.activate(SHOW_ALL);
        assert_eq!(filter.visible_cards().len(), 3);
    }

    #[test]
    fn test_unknown_pill_ignored() {
        let mut filter = sample();
        filter.activate("rust");
        assert!(!filter.activate("cobol"));
        assert_eq!(filter.active(), Some("rust"));
    }

    #[test]
    fn test_single_active_pill() {
        let mut filter = sample();
        filter.activate("rust");
        filter.activate("data");
        assert_eq!(filter.active(), Some("data"));
    }

    #[test]
    fn test_inert_without_cards() {
        let filter = TagFilter::new(["all", "rust"]);
        assert!(filter.is_inert());
        assert!(filter.visible_cards().is_empty());
    }
}

use marubatsu_protocol::{PlayerId, UserSummary};

/// Inactivity window before a search fires
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Shortest term worth sending to the service
pub const MIN_SEARCH_LEN: usize = 3;

/// Debounce and selection policy for the opponent search box. Timer
/// scheduling lives in the component; this type only decides, so the
/// whole policy is testable without a clock: every keystroke bumps a
/// generation, and a firing timer is honored only if its generation is
/// still the current one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpponentSearch {
    term: String,
    generation: u64,
    results: Vec<UserSummary>,
    selected: Option<UserSummary>,
}

impl OpponentSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &[UserSummary] {
        &self.results
    }

    pub fn selected(&self) -> Option<&UserSummary> {
        self.selected.as_ref()
    }

    /// Term long enough to have searched, but nothing came back
    pub fn no_results(&self) -> bool {
        self.term.chars().count() >= MIN_SEARCH_LEN && self.results.is_empty()
    }

    /// Record a keystroke; the returned generation supersedes every
    /// previously scheduled timer
    pub fn input(&mut self, term: String) -> u64 {
        self.term = term;
        self.generation += 1;
        self.generation
    }

    /// A scheduled timer fired. Returns the term to search for, or
    /// `None` when the timer was superseded or the term is too short
    /// (which clears the result set immediately).
    pub fn timer_fired(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        if self.term.chars().count() < MIN_SEARCH_LEN {
            self.results.clear();
            return None;
        }
        Some(self.term.clone())
    }

    /// Store search results, excluding the current user
    pub fn apply_results(&mut self, users: Vec<UserSummary>, me: &PlayerId) {
        self.results = users.into_iter().filter(|user| user.id != *me).collect();
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    /// Selecting a result clears the term and the result list
    pub fn select(&mut self, id: &PlayerId) -> bool {
        let Some(user) = self.results.iter().find(|user| user.id == *id).cloned() else {
            return false;
        };
        self.selected = Some(user);
        self.term.clear();
        self.results.clear();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> UserSummary {
        UserSummary {
            id: PlayerId::from(id),
            name: name.to_owned(),
        }
    }

    #[test]
    fn rapid_keystrokes_collapse_into_one_search() {
        let mut search = OpponentSearch::new();

        let generations: Vec<u64> = ["g", "gr", "gra", "grac", "grace"]
            .into_iter()
            .map(|term| search.input(term.to_owned()))
            .collect();

        // every timer eventually fires; only the last one searches
        let fired: Vec<Option<String>> = generations
            .into_iter()
            .map(|generation| search.timer_fired(generation))
            .collect();

        assert_eq!(
            fired,
            vec![None, None, None, None, Some("grace".to_owned())]
        );
    }

    #[test]
    fn short_terms_never_search_and_clear_results() {
        let mut search = OpponentSearch::new();
        search.apply_results(vec![user("u2", "Grace")], &PlayerId::from("me"));
        assert_eq!(search.results().len(), 1);

        let generation = search.input("gr".to_owned());
        assert_eq!(search.timer_fired(generation), None);
        assert!(search.results().is_empty());
    }

    #[test]
    fn results_exclude_the_current_user() {
        let mut search = OpponentSearch::new();
        search.apply_results(
            vec![user("me", "Myself"), user("u2", "Grace")],
            &PlayerId::from("me"),
        );

        assert_eq!(search.results().len(), 1);
        assert_eq!(search.results()[0].name, "Grace");
    }

    #[test]
    fn selecting_a_result_clears_term_and_results() {
        let mut search = OpponentSearch::new();
        search.input("grace".to_owned());
        search.apply_results(vec![user("u2", "Grace")], &PlayerId::from("me"));

        assert!(search.select(&PlayerId::from("u2")));
        assert_eq!(search.selected().unwrap().name, "Grace");
        assert_eq!(search.term(), "");
        assert!(search.results().is_empty());

        assert!(!search.select(&PlayerId::from("unknown")));
        assert!(search.clear_selection());
        assert!(!search.clear_selection());
    }
}

//! Dashboard rendering
//!
//! Pure composition of settings, task/note counts, the time of day and a
//! motivational quote into the text the front end displays.

use crate::store::{pending_tasks, FontSize, Note, Settings, Task, Theme};
use chrono::{Local, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Motivational quotes, one is picked per render
pub const QUOTES: [&str; 5] = [
    "The best way to predict the future is to create it. - Abraham Lincoln",
    "Education is not preparation for life; education is life itself. - John Dewey",
    "Learn from yesterday, live for today, hope for tomorrow. - Albert Einstein",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. - Winston Churchill",
    "The beautiful thing about learning is that no one can take it away from you. - B.B. King",
];

/// Greeting for an hour of the day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// Welcome line shown at the top of the dashboard
pub fn welcome_message(hour: u32, user: &str) -> String {
    format!("{}, {} 👋", greeting(hour), user)
}

/// Pick a quote with the given RNG
pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

/// Pick a quote with the thread-local RNG
pub fn random_quote() -> &'static str {
    pick_quote(&mut rand::thread_rng())
}

/// Current local hour
pub fn current_hour() -> u32 {
    Local::now().hour()
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub welcome: String,
    pub pending_tasks: usize,
    pub notes: usize,
    pub quote: String,
    pub theme: Theme,
    pub font_size: FontSize,
}

/// Compose the dashboard for a given hour
pub fn render(settings: &Settings, tasks: &[Task], notes: &[Note], hour: u32) -> DashboardView {
    DashboardView {
        welcome: welcome_message(hour, &settings.user),
        pending_tasks: pending_tasks(tasks).count(),
        notes: notes.len(),
        quote: random_quote().to_string(),
        theme: settings.theme,
        font_size: settings.font_size,
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.welcome)?;
        writeln!(f)?;
        writeln!(f, "  Pending Tasks: {}", self.pending_tasks)?;
        writeln!(f, "  Notes:         {}", self.notes)?;
        writeln!(f)?;
        write!(f, "  \"{}\"", self.quote)
    }
}

/// Today's plan: one line per pending task
pub fn plan(tasks: &[Task]) -> Vec<String> {
    pending_tasks(tasks)
        .map(|t| t.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_greeting_buckets() {
        assert_eq!(greeting(0), "Good Morning");
        assert_eq!(greeting(9), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(14), "Good Afternoon");
        assert_eq!(greeting(17), "Good Afternoon");
        assert_eq!(greeting(18), "Good Evening");
        assert_eq!(greeting(20), "Good Evening");
        assert_eq!(greeting(23), "Good Evening");
    }

    #[test]
    fn test_welcome_message() {
        assert_eq!(welcome_message(9, "Ada"), "Good Morning, Ada 👋");
        assert!(welcome_message(14, "Ada").starts_with("Good Afternoon"));
        assert!(welcome_message(20, "").starts_with("Good Evening"));
    }

    #[test]
    fn test_quotes_always_from_fixed_set() {
        for _ in 0..200 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }

    #[test]
    fn test_pick_quote_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_quote(&mut rng));
        }
        assert_eq!(seen.len(), QUOTES.len());
    }

    #[test]
    fn test_render_counts() {
        let settings = Settings {
            user: "Grace".to_string(),
            ..Settings::default()
        };
        let tasks = vec![Task::new("a"), Task::new("b").completed(), Task::new("c")];
        let notes = vec![Note::new("one")];

        let view = render(&settings, &tasks, &notes, 20);
        assert_eq!(view.welcome, "Good Evening, Grace 👋");
        assert_eq!(view.pending_tasks, 2);
        assert_eq!(view.notes, 1);
        assert!(QUOTES.contains(&view.quote.as_str()));

        let text = view.to_string();
        assert!(text.contains("Pending Tasks: 2"));
        assert!(text.contains("Notes:         1"));
    }

    #[test]
    fn test_plan_lists_pending_only() {
        let tasks = vec![Task::new("read ch. 3"), Task::new("done").completed()];
        assert_eq!(plan(&tasks), vec!["read ch. 3".to_string()]);
    }
}

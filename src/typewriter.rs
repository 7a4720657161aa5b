use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Phrases cycled through when none are configured
pub const DEFAULT_PHRASES: [&str; 3] = [
    "Full Stack Developer",
    "Software Engineer",
    "Backend Developer",
];

/// Delays between typewriter steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypewriterTiming {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_after_complete_ms: u64,
    pub pause_after_delete_ms: u64,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_ms: 80,
            delete_ms: 40,
            pause_after_complete_ms: 1000,
            pause_after_delete_ms: 250,
        }
    }
}

/// Types a phrase out one character at a time, deletes it again, then
/// moves on to the next phrase.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timing: TypewriterTiming,
    index: usize,
    char_index: usize,
    deleting: bool,
    text: String,
}

impl Typewriter {
    pub fn new<S: AsRef<str>>(phrases: &[S], timing: TypewriterTiming) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().chars().collect())
                .collect(),
            timing,
            index: 0,
            char_index: 0,
            deleting: false,
            text: String::new(),
        }
    }

    /// Currently visible text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advance by one character and return the delay before the next
    /// step, or `None` when there is nothing to type.
    pub fn step(&mut self) -> Option<Duration> {
        let current = self.phrases.get(self.index)?;

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(current.len());
        }
        self.text = current[..self.char_index].iter().collect();

        let delay_ms = if !self.deleting && self.char_index == current.len() {
            self.deleting = true;
            self.timing.pause_after_complete_ms
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            self.timing.pause_after_delete_ms
        } else if self.deleting {
            self.timing.delete_ms
        } else {
            self.timing.type_ms
        };

        Some(Duration::from_millis(delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tw: &mut Typewriter, steps: usize) -> Vec<(String, u64)> {
        (0..steps)
            .map(|_| {
                let delay = tw.step().unwrap();
                (tw.text().to_string(), delay.as_millis() as u64)
            })
            .collect()
    }

    #[test]
    fn test_types_then_deletes_then_advances() {
        let mut tw = Typewriter::new(&["ab", "c"], TypewriterTiming::default());
        let trace = run(&mut tw, 7);
        assert_eq!(
            trace,
            vec![
                ("a".to_string(), 80),
                ("ab".to_string(), 1000),
                ("a".to_string(), 40),
                ("".to_string(), 250),
                ("c".to_string(), 1000),
                ("".to_string(), 250),
                ("a".to_string(), 80),
            ]
        );
    }

    #[test]
    fn test_default_phrases_cycle() {
        let mut tw = Typewriter::new(&DEFAULT_PHRASES, TypewriterTiming::default());
        let len = DEFAULT_PHRASES[0].chars().count();
        for _ in 0..len {
            tw.step();
        }
        assert_eq!(tw.text(), DEFAULT_PHRASES[0]);
        assert!(tw.is_deleting());
        for _ in 0..len {
            tw.step();
        }
        assert_eq!(tw.text(), "");
        tw.step();
        assert_eq!(tw.text(), "S");
    }

    #[test]
    fn test_multibyte_phrases_slice_on_chars() {
        let mut tw = Typewriter::new(&["héllo"], TypewriterTiming::default());
        tw.step();
        tw.step();
        assert_eq!(tw.text(), "hé");
    }

    #[test]
    fn test_no_phrases_is_inert() {
        let mut tw = Typewriter::new::<&str>(&[], TypewriterTiming::default());
        assert_eq!(tw.step(), None);
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn test_empty_phrase_does_not_stall() {
        let mut tw = Typewriter::new(&["", "x"], TypewriterTiming::default());
        // the empty phrase completes immediately, then deletes to nothing
        assert_eq!(tw.step(), Some(Duration::from_millis(1000)));
        assert_eq!(tw.step(), Some(Duration::from_millis(250)));
        tw.step();
        assert_eq!(tw.text(), "x");
    }
}

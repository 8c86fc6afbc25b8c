//! Interaction capabilities: confirmation dialogs and the free-text name prompt.
//!
//! Destructive operations take these as arguments instead of opening dialogs
//! themselves. Over HTTP the page asks the user first and sends the answer
//! along with the request, which arrives here as [`Answers`].

/// Yes/no confirmation before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Free-text input, `None` when the user cancels.
pub trait PromptText {
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// Answers collected from the user before the request was sent.
///
/// Records every message it was asked so callers can tell whether a
/// confirmation was actually needed.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub confirmed: bool,
    pub text: Option<String>,
    pub asked: Vec<String>,
}

impl Answers {
    pub fn confirmed(confirmed: bool) -> Self {
        Self {
            confirmed,
            ..Self::default()
        }
    }

    pub fn with_text(text: Option<String>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    /// The confirmation that was asked and declined, if any.
    pub fn declined_prompt(&self) -> Option<&str> {
        if self.confirmed {
            None
        } else {
            self.asked.last().map(String::as_str)
        }
    }
}

impl Confirm for Answers {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirmed
    }
}

impl PromptText for Answers {
    fn prompt(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_record_questions() {
        let mut answers = Answers::confirmed(false);
        assert!(answers.declined_prompt().is_none());
        assert!(!answers.confirm("Really?"));
        assert_eq!(answers.declined_prompt(), Some("Really?"));

        let mut yes = Answers::confirmed(true);
        assert!(yes.confirm("Really?"));
        assert!(yes.declined_prompt().is_none());
    }

    #[test]
    fn test_answers_prompt_text() {
        let mut answers = Answers::with_text(Some("demo".to_string()));
        assert_eq!(answers.prompt("Name?").as_deref(), Some("demo"));
        assert_eq!(answers.asked, vec!["Name?".to_string()]);
    }
}

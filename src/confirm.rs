use console::{style, Term};
use std::fmt;

/// Decides whether a destructive or bulk operation may go ahead.
pub enum ConfirmationPolicy {
    AlwaysProceed,
    AlwaysAbort,
    Ask(Box<dyn Fn(&str) -> bool>),
}

impl ConfirmationPolicy {
    /// Prompt on the terminal and accept `y`/`yes`.
    pub fn interactive() -> Self {
        ConfirmationPolicy::Ask(Box::new(prompt_yes_no))
    }

    pub fn confirm(&self, question: &str) -> bool {
        match self {
            ConfirmationPolicy::AlwaysProceed => true,
            ConfirmationPolicy::AlwaysAbort => false,
            ConfirmationPolicy::Ask(ask) => ask(question),
        }
    }
}

impl fmt::Debug for ConfirmationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationPolicy::AlwaysProceed => f.write_str("AlwaysProceed"),
            ConfirmationPolicy::AlwaysAbort => f.write_str("AlwaysAbort"),
            ConfirmationPolicy::Ask(_) => f.write_str("Ask(..)"),
        }
    }
}

fn prompt_yes_no(question: &str) -> bool {
    let term = Term::stdout();
    if term
        .write_str(&format!("{} {} ", style(question).yellow(), style("(y/n):").dim()))
        .is_err()
    {
        return false;
    }
    match term.read_line() {
        Ok(answer) => is_yes(&answer),
        Err(e) => {
            tracing::warn!("could not read confirmation: {e}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fixed_policies_never_ask() {
        assert!(ConfirmationPolicy::AlwaysProceed.confirm("Delete?"));
        assert!(!ConfirmationPolicy::AlwaysAbort.confirm("Delete?"));
    }

    #[test]
    fn ask_forwards_the_question() {
        let asked = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&asked);
        let policy = ConfirmationPolicy::Ask(Box::new(move |q| {
            seen.borrow_mut().push(q.to_string());
            q.contains("recreate")
        }));

        assert!(policy.confirm("Delete and recreate?"));
        assert!(!policy.confirm("Continue?"));
        assert_eq!(*asked.borrow(), vec!["Delete and recreate?", "Continue?"]);
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}

//! Interactive prompting for missing configuration values.

use std::io;

/// Source of answers for configuration questions.
///
/// Implementations return `Ok(None)` when no answer is available; callers
/// fall back to the default in that case, and also when the answer is empty.
pub trait Prompt {
    /// Asks `question`, offering `default` as the pre-filled answer.
    fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<Option<String>>;
}

/// Non-interactive prompt that always accepts the offered default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompt for AcceptDefaults {
    fn ask(&mut self, _question: &str, default: Option<&str>) -> io::Result<Option<String>> {
        Ok(default.map(str::to_owned))
    }
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<Option<String>> {
        (**self).ask(question, default)
    }
}

/// Asks `question` and resolves the final value.
///
/// A blank answer keeps `default`.
pub(crate) fn ask_or_default<P: Prompt + ?Sized>(
    prompt: &mut P,
    question: &str,
    default: Option<String>,
) -> io::Result<Option<String>> {
    let answer = prompt.ask(question, default.as_deref())?;
    Ok(answer
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
        .or(default))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Prompt that replays canned answers and records the questions asked.
    #[derive(Debug, Default)]
    pub(crate) struct Scripted {
        pub answers: VecDeque<Option<String>>,
        pub asked: Vec<(String, Option<String>)>,
    }

    impl Scripted {
        pub(crate) fn new<const N: usize>(answers: [Option<&str>; N]) -> Self {
            Self {
                answers: answers.into_iter().map(|a| a.map(str::to_owned)).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<Option<String>> {
            self.asked
                .push((question.to_owned(), default.map(str::to_owned)));
            Ok(self.answers.pop_front().flatten())
        }
    }

    #[test]
    fn blank_answer_keeps_default() {
        let mut prompt = Scripted::new([Some("  ")]);
        let value = ask_or_default(&mut prompt, "bucket?", Some("releases".into())).unwrap();
        assert_eq!(value.as_deref(), Some("releases"));
    }

    #[test]
    fn answer_overrides_default() {
        let mut prompt = Scripted::new([Some(" nightly ")]);
        let value = ask_or_default(&mut prompt, "bucket?", Some("releases".into())).unwrap();
        assert_eq!(value.as_deref(), Some("nightly"));
        assert_eq!(prompt.asked[0].1.as_deref(), Some("releases"));
    }

    #[test]
    fn accept_defaults_is_silent() {
        let value = ask_or_default(&mut AcceptDefaults, "key?", None).unwrap();
        assert_eq!(value, None);
    }
}

use super::question::{Answer, AnsweredQuestion, Question};

const SAMPLE_TIME_MS: u64 = 10_000;

/// Built-in demo question bank.
pub struct QuestionFixtures;

impl QuestionFixtures {
    /// Three capital-city questions; answer "1" is correct for each.
    pub fn capitals() -> Vec<AnsweredQuestion> {
        vec![
            Self::hardcoded("1", "What is the capital of France?", ["Paris", "Lyon", "Marseille", "Toulouse"]),
            Self::hardcoded("2", "What is the capital of Germany?", ["Berlin", "Munich", "Cologne", "Frankfurt"]),
            Self::hardcoded("3", "What is the capital of Italy?", ["Rome", "Milan", "Naples", "Turin"]),
        ]
    }

    /// Build a question whose first listed answer is the correct one.
    ///
    /// Only for hardcoded data: the correct answer is taken from the list
    /// itself, so construction cannot fail.
    fn hardcoded(id: &str, title: &str, answers: [&str; 4]) -> AnsweredQuestion {
        let answers = answers
            .iter()
            .enumerate()
            .map(|(idx, text)| Answer::new((idx + 1).to_string(), *text))
            .collect();
        let question = Question {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            time_ms: SAMPLE_TIME_MS,
            answers,
        };
        #[allow(clippy::expect_used)]
        let answered =
            AnsweredQuestion::new(question, "1").expect("hardcoded question lists its correct answer");
        answered
    }
}

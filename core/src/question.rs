use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Multiple-choice question asked when a question tile is activated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub answer: usize,
    pub difficulty: QuestionDifficulty,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.answer < self.options.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Questions whose answer does not point at an option are dropped.
    pub fn new(questions: Vec<Question>) -> Self {
        let total = questions.len();
        let questions: Vec<_> = questions.into_iter().filter(Question::is_well_formed).collect();
        if questions.len() != total {
            log::warn!("Dropped {} malformed questions", total - questions.len());
        }
        Self { questions }
    }

    /// Parses a JSON array of questions.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn builtin() -> Self {
        fn question(text: &str, options: &[&str], answer: usize, difficulty: QuestionDifficulty) -> Question {
            Question {
                text: text.into(),
                options: options.iter().map(|&option| option.into()).collect(),
                answer,
                difficulty,
            }
        }
        use QuestionDifficulty::*;

        Self::new(alloc::vec![
            question("How many neighbours does an inner cell have?", &["4", "6", "8", "9"], 2, Easy),
            question("Which number never shows on a minesweeper cell?", &["0", "8", "9", "1"], 2, Easy),
            question("What does a flag mark?", &["A safe cell", "A suspected mine", "A question", "A bonus"], 1, Easy),
            question("Which data structure drives a breadth-first flood fill?", &["Stack", "Queue", "Heap", "Trie"], 1, Medium),
            question("What is 2 to the power of 10?", &["512", "1000", "1024", "2048"], 2, Medium),
            question("Which sort is stable?", &["Heap sort", "Quick sort", "Merge sort", "Selection sort"], 2, Hard),
            question("Worst-case time of a flood fill over an n x n grid?", &["O(n)", "O(n log n)", "O(n^2)", "O(2^n)"], 2, Hard),
            question("Which problem is minesweeper consistency known to be?", &["P", "NP-complete", "Undecidable", "O(1)"], 1, Expert),
        ])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&Question> {
        if self.questions.is_empty() {
            return None;
        }
        let upper = CellCount::try_from(self.questions.len()).unwrap_or(CellCount::MAX);
        self.questions.get(usize::from(rng.below(upper)))
    }
}

//! Static question stems used by the fallback generator.
//!
//! Lookup is `templates[subject][type][index]`. Only the four curated
//! subjects have stems, five per question type; every other combination
//! resolves to a generic stem built from the topic and subject name.

use super::entities::{QuestionType, Subject};

const STEMS_PER_TYPE: usize = 5;

type Stems = [&'static str; STEMS_PER_TYPE];

struct SubjectTemplates {
    multiple_choice: Stems,
    true_false: Stems,
    short_answer: Stems,
    fill_in_blank: Stems,
}

impl SubjectTemplates {
    fn stems(&self, question_type: QuestionType) -> &Stems {
        match question_type {
            QuestionType::MultipleChoice => &self.multiple_choice,
            QuestionType::TrueFalse => &self.true_false,
            QuestionType::ShortAnswer => &self.short_answer,
            QuestionType::FillInBlank => &self.fill_in_blank,
        }
    }
}

const MATH: SubjectTemplates = SubjectTemplates {
    multiple_choice: [
        "What is the value of x in the equation 2x + 5 = 15?",
        "If a triangle has angles of 60° and 80°, what is the measure of the third angle?",
        "What is the area of a rectangle with length 8 cm and width 5 cm?",
        "Solve for y: 3y - 7 = 14",
        "What is the perimeter of a square with side length 6 cm?",
    ],
    true_false: [
        "The sum of angles in a triangle is always 180 degrees.",
        "A square is a type of rectangle.",
        "Zero is a positive number.",
        "The number π is exactly 3.14.",
        "All rectangles are squares.",
    ],
    short_answer: [
        "Explain how to solve a linear equation step by step.",
        "What is the difference between area and perimeter?",
        "Describe the process of long division.",
        "Explain what a fraction represents.",
        "How do you find the mean of a set of numbers?",
    ],
    fill_in_blank: [
        "The formula for the area of a rectangle is length × _____.",
        "In the equation 2x + 3 = 11, the value of x is _____.",
        "A triangle with all equal sides is called an _____ triangle.",
        "The number that appears most frequently in a set is called the _____.",
        "The distance around a circle is called its _____.",
    ],
};

const SCIENCE: SubjectTemplates = SubjectTemplates {
    multiple_choice: [
        "What is the chemical symbol for water?",
        "Which planet is closest to the Sun?",
        "What is the process by which plants make their own food?",
        "What is the smallest unit of matter?",
        "Which gas do plants absorb from the atmosphere?",
    ],
    true_false: [
        "The Sun is a star.",
        "Water boils at 100°C at sea level.",
        "All living things are made of cells.",
        "The Earth is the largest planet in our solar system.",
        "Photosynthesis occurs only in plants.",
    ],
    short_answer: [
        "Explain the water cycle in your own words.",
        "What is the difference between a solid, liquid, and gas?",
        "Describe how plants make their own food.",
        "Explain what causes day and night.",
        "What is the difference between weather and climate?",
    ],
    fill_in_blank: [
        "The process by which plants make food is called _____.",
        "The smallest unit of matter is called an _____.",
        "The force that pulls objects toward Earth is called _____.",
        "The study of living things is called _____.",
        "The layer of gases around Earth is called the _____.",
    ],
};

const ENGLISH: SubjectTemplates = SubjectTemplates {
    multiple_choice: [
        "What is the past tense of the verb \"run\"?",
        "Which of the following is a proper noun?",
        "What type of word describes a noun?",
        "What is the plural form of \"child\"?",
        "Which sentence is written in passive voice?",
    ],
    true_false: [
        "A sentence must have a subject and a verb.",
        "All nouns can be made plural by adding -s.",
        "Adjectives describe verbs.",
        "Every sentence must end with a period.",
        "Proper nouns are always capitalized.",
    ],
    short_answer: [
        "Explain the difference between a noun and a verb.",
        "What is the purpose of a topic sentence in a paragraph?",
        "Describe the elements of a good story.",
        "Explain what makes a sentence complete.",
        "What is the difference between fiction and non-fiction?",
    ],
    fill_in_blank: [
        "A word that describes a noun is called an _____.",
        "The main character in a story is called the _____.",
        "A group of words that expresses a complete thought is called a _____.",
        "The time and place where a story happens is called the _____.",
        "A word that shows action is called a _____.",
    ],
};

const HISTORY: SubjectTemplates = SubjectTemplates {
    multiple_choice: [
        "In what year did World War II end?",
        "Who was the first President of the United States?",
        "What was the name of the ship that brought the Pilgrims to America?",
        "Which ancient wonder was located in Egypt?",
        "What was the main cause of the American Civil War?",
    ],
    true_false: [
        "The Declaration of Independence was signed in 1776.",
        "The Roman Empire fell in 476 AD.",
        "Christopher Columbus discovered America.",
        "The Great Wall of China is visible from space.",
        "The Renaissance began in Italy.",
    ],
    short_answer: [
        "Explain why the American Revolution happened.",
        "What were the main causes of World War I?",
        "Describe the impact of the Industrial Revolution.",
        "Explain the significance of the Magna Carta.",
        "What led to the fall of the Roman Empire?",
    ],
    fill_in_blank: [
        "The first President of the United States was _____.",
        "The war between the North and South in America was called the _____ War.",
        "The document that declared American independence was the _____.",
        "The ancient wonder located in Egypt was the Great _____ of Giza.",
        "The period of renewed interest in learning was called the _____.",
    ],
};

fn catalog(subject: &Subject) -> Option<&'static SubjectTemplates> {
    match subject {
        Subject::Math => Some(&MATH),
        Subject::Science => Some(&SCIENCE),
        Subject::English => Some(&ENGLISH),
        Subject::History => Some(&HISTORY),
        Subject::Other(_) => None,
    }
}

/// Curated stem for a subject, type and 0-based index, if one exists.
pub fn lookup(subject: &Subject, question_type: QuestionType, index: usize) -> Option<&'static str> {
    catalog(subject).and_then(|c| c.stems(question_type).get(index).copied())
}

/// Stem used when no curated one exists for the lookup key.
pub fn generic_stem(question_type: QuestionType, topic: &str, subject: &Subject) -> String {
    match question_type {
        QuestionType::MultipleChoice => {
            format!("What is an important concept about {topic} in {subject}?")
        }
        QuestionType::TrueFalse => format!("The concept of {topic} is important in {subject}."),
        QuestionType::ShortAnswer => {
            format!("Explain an important concept about {topic} in {subject}.")
        }
        QuestionType::FillInBlank => {
            format!("An important concept in {subject} related to {topic} is _____.")
        }
    }
}

/// Question stem for the question at `index`, always defined.
pub fn stem(subject: &Subject, question_type: QuestionType, index: usize, topic: &str) -> String {
    lookup(subject, question_type, index)
        .map(str::to_string)
        .unwrap_or_else(|| generic_stem(question_type, topic, subject))
}

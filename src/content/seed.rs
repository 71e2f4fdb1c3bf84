//! Built-in topic corpus, used when no catalog file is installed.

use crate::content::Catalog;
use crate::domain::{Flashcard, ScheduleSlot, Topic};

fn topic(id: &str, title: &str, summary: &str, cards: &[(&str, &str)]) -> Topic {
    Topic {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        flashcards: cards.iter().map(|(q, a)| Flashcard::new(*q, *a)).collect(),
    }
}

pub fn seed_catalog() -> Catalog {
    let topics = vec![
        topic(
            "wk13a",
            "Cultural & Social Context of Gender",
            "Gender is socially constructed; culture shapes gender roles and expectations; \
             gender socialization influences personality and behavior.",
            &[
                (
                    "What is gender?",
                    "A social and cultural construct describing norms, behaviors, and roles \
                     associated with being a woman, man, neither, or multiple genders.",
                ),
                (
                    "Name one way children learn gender roles.",
                    "Through family, peers, media, and school, both directly and indirectly.",
                ),
                (
                    "What's the difference between gender norms and gender roles?",
                    "Gender norms are expectations; gender roles are the behaviors assigned \
                     to those expectations.",
                ),
            ],
        ),
        topic(
            "wk11_12",
            "Gender Pronouns & Inclusive Language",
            "Pronouns are part of gender expression; ask instead of assume; use correct \
             pronouns; apologize briefly if you make a mistake.",
            &[
                (
                    "Give three common pronouns.",
                    "she/her/hers, he/him/his, they/them/theirs.",
                ),
                (
                    "How should you apologize after using the wrong pronoun?",
                    "Briefly apologize, correct yourself, and move on (e.g., 'Sorry, I meant she').",
                ),
                (
                    "Why avoid assuming pronouns?",
                    "Assuming reinforces stereotypes and may misgender someone; ask to respect \
                     identity.",
                ),
            ],
        ),
        topic(
            "wk13b",
            "Gender & Politics",
            "How gender shapes political participation and institutions; key laws and \
             governance measures include the Magna Carta of Women.",
            &[
                (
                    "What does gender and politics study?",
                    "How political behavior, participation and institutions are influenced by \
                     gender identity and norms.",
                ),
                (
                    "Name one governance instrument in the Philippines that promotes gender equality.",
                    "The Magna Carta of Women (RA 9710).",
                ),
            ],
        ),
        topic(
            "wks14_16",
            "Gender, Politics & Violence",
            "Philippine history of women's political involvement and laws protecting women \
             (e.g., RA 7877, RA 7192); implementation gaps exist.",
            &[
                (
                    "Name two laws protecting women in the Philippines.",
                    "RA 7877 (Anti-Sexual Harassment, 1995) and RA 7192 (Women in Nation \
                     Building, 1991).",
                ),
                (
                    "Give one historical example of women in Filipino resistance.",
                    "Gabriela Silang, who fought in the revolution and performed leadership roles.",
                ),
            ],
        ),
    ];

    let schedule = [
        ("05:00", "Skim & orient (20 min)"),
        ("05:20", "Cultural & Social Context - flashcards (50 min)"),
        ("06:10", "Pronouns - flashcards + quiz (50 min)"),
        ("07:00", "Break (10 min)"),
        ("07:10", "Gender & Politics - flashcards + quiz (50 min)"),
        ("08:00", "Gender, Politics & Violence - flashcards + essay bullets (45 min)"),
        ("08:45", "Rapid final review (15 min)"),
    ]
    .iter()
    .map(|(time, task)| ScheduleSlot {
        time: time.to_string(),
        task: task.to_string(),
    })
    .collect();

    Catalog {
        title: "Gender & Society – Quick Reviewer".to_string(),
        topics,
        schedule,
    }
}

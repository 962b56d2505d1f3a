//! Raw rows to goal records.
//!
//! Each surviving row gets `id = base + idx` and `menu_order = idx + 1`,
//! where `idx` counts only rows that were not skipped. The base is drawn
//! once per run from [`ID_RANGE`], so ids are unique and strictly increasing
//! within one table but carry no guarantee across runs.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use super::cleaner::clean_question_text;
use crate::models::{
    ConversionParameters, GoalRecord, GoalTable, PostStatus, QuestionType, RawRow, RawTable,
};

/// Range the per-run base identifier is drawn from.
pub const ID_RANGE: RangeInclusive<u64> = 100_000..=999_999;

/// Separator between answer choices in the options field.
pub const OPTIONS_SEPARATOR: &str = "|";

/// Draw a base identifier from [`ID_RANGE`].
pub fn draw_id_base<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(ID_RANGE)
}

/// Transform a validated table, drawing the id base from `rng`.
///
/// The table is expected to have passed [`crate::validation::validate`].
pub fn transform<R: Rng + ?Sized>(
    table: &RawTable,
    params: &ConversionParameters,
    rng: &mut R,
) -> GoalTable {
    let base = draw_id_base(rng);
    transform_with_base(table, params, base)
}

/// Transform a validated table with a fixed id base.
pub fn transform_with_base(
    table: &RawTable,
    params: &ConversionParameters,
    base: u64,
) -> GoalTable {
    let mut records = Vec::with_capacity(table.len());

    for row in table.rows() {
        // Validation rejects these too; transform can be called on its own.
        if row.question.is_none() {
            debug!(row = row.number, "skipping row without question");
            continue;
        }

        let idx = records.len();
        let id = (!params.blank_ids).then(|| base + idx as u64);
        records.push(build_record(row, params, id, idx + 1));
    }

    GoalTable { records }
}

fn build_record(
    row: &RawRow,
    params: &ConversionParameters,
    id: Option<u64>,
    menu_order: usize,
) -> GoalRecord {
    let title = clean_question_text(row.question.as_deref().unwrap_or(""));

    GoalRecord {
        id,
        post_content: title.clone(),
        title,
        category: params.category.clone(),
        kind: QuestionType::SingleChoice,
        status: PostStatus::Publish,
        menu_order,
        options: join_options(row),
        answer: row.correct_answer.as_deref().unwrap_or("").trim().to_string(),
    }
}

/// Trimmed choices A..D joined with [`OPTIONS_SEPARATOR`].
fn join_options(row: &RawRow) -> String {
    row.choices()
        .iter()
        .map(|choice| choice.unwrap_or("").trim())
        .collect::<Vec<_>>()
        .join(OPTIONS_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const HEADERS: [&str; 6] = [
        "Question",
        "answer choice A",
        "answer choice B",
        "answer choice C",
        "answer choice D",
        "Correct Answer",
    ];

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::from_records(HEADERS.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn capitals() -> RawTable {
        table(vec![
            vec!["1. Capital of Germany?", "Paris", "London", "Berlin", "Rome", "Berlin"],
            vec!["2. Capital of Italy?", " Paris ", "London", "Berlin", " Rome", " Rome "],
            vec!["3. Capital of France?", "Paris", "London", "Berlin", "Rome", "Paris"],
        ])
    }

    #[test]
    fn test_record_fields() {
        let params = ConversionParameters {
            category: "Geography".into(),
            blank_ids: false,
        };
        let goal = transform_with_base(&capitals(), &params, 500_000);

        assert_eq!(goal.len(), 3);
        let first = &goal.records[0];
        assert_eq!(first.id, Some(500_000));
        assert_eq!(first.title, "Capital of Germany?");
        assert_eq!(first.post_content, first.title);
        assert_eq!(first.category, "Geography");
        assert_eq!(first.kind, QuestionType::SingleChoice);
        assert_eq!(first.status, PostStatus::Publish);
        assert_eq!(first.menu_order, 1);
        assert_eq!(first.options, "Paris|London|Berlin|Rome");
        assert_eq!(first.answer, "Berlin");
    }

    #[test]
    fn test_choices_and_answer_trimmed() {
        let params = ConversionParameters::default();
        let goal = transform_with_base(&capitals(), &params, 100_000);
        let second = &goal.records[1];
        assert_eq!(second.options, "Paris|London|Berlin|Rome");
        assert_eq!(second.answer, "Rome");
    }

    #[test]
    fn test_ids_increase_by_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let goal = transform(&capitals(), &ConversionParameters::default(), &mut rng);

        let ids: Vec<u64> = goal.iter().map(|r| r.id.unwrap()).collect();
        assert!(ID_RANGE.contains(&ids[0]));
        assert_eq!(ids, vec![ids[0], ids[0] + 1, ids[0] + 2]);
        let orders: Vec<usize> = goal.iter().map(|r| r.menu_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_ids() {
        let params = ConversionParameters {
            blank_ids: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let goal = transform(&capitals(), &params, &mut rng);
        assert!(goal.iter().all(|r| r.id.is_none()));
        assert_eq!(goal.records[2].menu_order, 3);
    }

    #[test]
    fn test_rows_without_question_skipped_without_gaps() {
        let t = table(vec![
            vec!["First", "a", "b", "c", "d", "a"],
            vec!["", "a", "b", "c", "d", "a"],
            vec!["Third", "a", "b", "c", "d", "b"],
        ]);
        let goal = transform_with_base(&t, &ConversionParameters::default(), 200_000);

        assert_eq!(goal.len(), 2);
        assert_eq!(goal.records[1].title, "Third");
        assert_eq!(goal.records[1].id, Some(200_001));
        assert_eq!(goal.records[1].menu_order, 2);
    }

    #[test]
    fn test_same_seed_same_output() {
        let params = ConversionParameters::default();
        let a = transform(&capitals(), &params, &mut StdRng::seed_from_u64(42));
        let b = transform(&capitals(), &params, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reruns_differ_only_in_ids() {
        let params = ConversionParameters::default();
        let a = transform_with_base(&capitals(), &params, 100_000);
        let b = transform_with_base(&capitals(), &params, 900_000);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_ne!(x.id, y.id);
            assert_eq!(
                GoalRecord { id: None, ..x.clone() },
                GoalRecord { id: None, ..y.clone() }
            );
        }

        let blank = ConversionParameters {
            blank_ids: true,
            ..Default::default()
        };
        assert_eq!(
            transform_with_base(&capitals(), &blank, 100_000),
            transform_with_base(&capitals(), &blank, 900_000)
        );
    }

    #[test]
    fn test_draw_id_base_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(ID_RANGE.contains(&draw_id_base(&mut rng)));
        }
    }

    #[test]
    fn test_empty_table() {
        let goal = transform_with_base(&table(vec![]), &ConversionParameters::default(), 100_000);
        assert!(goal.is_empty());
    }
}

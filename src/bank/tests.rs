use super::*;

const HEADER: &str = "question,option1,option2,option3,option4,option5,answer,year,category";

fn bank_from_rows(rows: &[&str]) -> Result<QuestionBank, BankError> {
    let mut csv = HEADER.to_owned();
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    QuestionBank::from_reader(csv.as_bytes())
}

fn sample_bank() -> QuestionBank {
    bank_from_rows(&[
        "1+1?,1,2,3,4,5,2,2023,math",
        "Capital of France?,Paris,Rome,Oslo,Bern,Lima,Paris,2022,geography",
        "2*3?,5,6,7,8,9,6,2022,math",
        "Largest ocean?,Atlantic,Indian,Pacific,Arctic,Southern,Pacific,2023,geography",
    ])
    .unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn texts(questions: &[Question]) -> Vec<&str> {
    questions.iter().map(|q| q.text.as_str()).collect()
}

#[test]
fn loads_every_row() {
    let bank = sample_bank();
    assert_eq!(bank.len(), 4);
    let question = &bank.questions()[1];
    assert_eq!(question.text, "Capital of France?");
    assert_eq!(question.options, strings(&["Paris", "Rome", "Oslo", "Bern", "Lima"]));
    assert_eq!(question.correct_option, "Paris");
    assert_eq!(question.year, "2022");
    assert_eq!(question.category, "geography");
}

#[test]
fn trims_cells() {
    let bank = bank_from_rows(&[" Q? , a , b , c , d , e , c , 2023 , math "]).unwrap();
    let question = &bank.questions()[0];
    assert_eq!(question.text, "Q?");
    assert_eq!(question.correct_option, "c");
    assert!(question.is_correct("c"));
}

#[test]
fn header_only_is_an_empty_bank() {
    let bank = bank_from_rows(&[]).unwrap();
    assert!(bank.is_empty());
    assert_eq!(bank.facet_values(Facet::Year), Vec::<String>::new());
}

#[test]
fn blank_option_is_malformed() {
    let result = bank_from_rows(&[
        "1+1?,1,2,3,4,5,2,2023,math",
        "2+2?,1,4,,5,6,4,2023,math",
    ]);
    match result {
        Err(BankError::MalformedInput { row, reason }) => {
            assert_eq!(row, 3);
            assert!(reason.contains("option3"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_column_is_malformed() {
    let csv = "question,option1,option2,option4,option5,answer,year,category\n\
               1+1?,1,2,4,5,2,2023,math";
    let result = QuestionBank::from_reader(csv.as_bytes());
    match result {
        Err(BankError::MalformedInput { reason, .. }) => assert!(reason.contains("option3")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn short_row_is_malformed() {
    let result = bank_from_rows(&["1+1?,1,2,3,4,5,2,2023"]);
    assert!(matches!(result, Err(BankError::MalformedInput { .. })));
}

#[test]
fn answer_must_be_an_option() {
    let result = bank_from_rows(&["1+1?,1,3,4,5,6,2,2023,math"]);
    match result {
        Err(BankError::MalformedInput { reason, .. }) => assert!(reason.contains("answer")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn duplicate_questions_are_malformed() {
    let result = bank_from_rows(&[
        "1+1?,1,2,3,4,5,2,2023,math",
        "1+1?,1,2,3,4,5,2,2022,math",
    ]);
    assert!(matches!(result, Err(BankError::MalformedInput { row: 3, .. })));
}

#[test]
fn invalid_utf8_is_replaced() {
    let mut csv = HEADER.as_bytes().to_vec();
    csv.extend_from_slice(b"\nQ\xff?,a,b,c,d,e,a,2023,math");
    let bank = QuestionBank::from_reader(&csv[..]).unwrap();
    assert_eq!(bank.questions()[0].text, "Q\u{fffd}?");
}

#[test]
fn facet_values_keep_first_seen_order() {
    let bank = sample_bank();
    assert_eq!(bank.facet_values(Facet::Year), strings(&["2023", "2022"]));
    assert_eq!(
        bank.facet_values(Facet::Category),
        strings(&["math", "geography"])
    );
}

#[test]
fn facet_choices_start_with_wildcard() {
    let bank = sample_bank();
    assert_eq!(
        bank.facet_choices(Facet::Year),
        strings(&[WILDCARD, "2023", "2022"])
    );
}

#[test]
fn filter_keeps_bank_order() {
    let bank = sample_bank();
    let questions = bank.filter(&strings(&["2022", "2023"]), &strings(&["math"]));
    assert_eq!(texts(&questions), ["1+1?", "2*3?"]);
}

#[test]
fn filter_requires_both_facets_to_match() {
    let bank = sample_bank();
    let questions = bank.filter(&strings(&["2022"]), &strings(&["geography"]));
    assert_eq!(texts(&questions), ["Capital of France?"]);
}

#[test]
fn filter_without_matches_is_empty() {
    let bank = sample_bank();
    assert!(bank.filter(&strings(&["1999"]), &strings(&["math"])).is_empty());
    assert!(bank.filter(&[], &strings(&["math"])).is_empty());
}

#[test]
fn wildcard_year_selects_every_year() {
    let bank = sample_bank();
    let math = strings(&["math"]);
    let with_wildcard = bank.filter(&strings(&[WILDCARD]), &math);
    let with_all_years = bank.filter(&bank.facet_values(Facet::Year), &math);
    assert_eq!(with_wildcard, with_all_years);
    assert_eq!(texts(&with_wildcard), ["1+1?", "2*3?"]);
}

#[test]
fn wildcard_overrides_other_selected_values() {
    let bank = sample_bank();
    let questions = bank.filter(&strings(&["2022", WILDCARD]), &strings(&[WILDCARD]));
    assert_eq!(questions.len(), 4);
}

use mergequery::error::{Error, Result};
use mergequery::{
    concat, ColumnType, Combinator, ConditionStore, DataFrame, DataValue, JoinExt, Notice,
    PredicateBuilder, QueryEngine, QueryExt,
};

fn frame(columns: &[&str], rows: &[&[&str]]) -> DataFrame {
    DataFrame::from_rows(
        columns.iter().copied(),
        rows.iter()
            .map(|r| r.iter().map(|s| DataValue::from(*s)).collect())
            .collect(),
    )
    .unwrap()
}

fn add(
    df: &DataFrame,
    store: &mut ConditionStore,
    column: &str,
    op: &str,
    value: &str,
    combinator: Option<Combinator>,
) -> Result<String> {
    PredicateBuilder::new(df).add_condition(store, column, op, value, combinator)
}

#[test]
fn test_column_type_inference() {
    let df = frame(
        &["a", "b", "c"],
        &[&["1", "1", "1"], &["2", "", "a"], &["3", "3", "3"]],
    );
    assert_eq!(mergequery::infer(&df, "a").unwrap(), ColumnType::Numeric);
    assert_eq!(mergequery::infer(&df, "b").unwrap(), ColumnType::Text);
    assert_eq!(mergequery::infer(&df, "c").unwrap(), ColumnType::Text);
}

#[test]
fn test_fold_is_left_to_right() -> Result<()> {
    // Row (A=1, B=0, C=0): left-to-right gives (T or F) and F = F,
    // precedence would give T or (F and F) = T
    let df = frame(
        &["A", "B", "C"],
        &[&["1", "0", "0"], &["0", "2", "3"], &["1", "0", "3"], &["0", "0", "3"]],
    );
    let mut store = ConditionStore::new();
    add(&df, &mut store, "A", "==", "1", None)?;
    add(&df, &mut store, "B", "==", "2", Some(Combinator::Or))?;
    add(&df, &mut store, "C", "==", "3", Some(Combinator::And))?;

    let outcome = df.query(&store)?;
    let a: Vec<String> = outcome
        .frame
        .rows()
        .iter()
        .map(|r| format!("{}{}{}", r[0], r[1], r[2]))
        .collect();
    assert_eq!(a, vec!["023", "103"]);
    assert_eq!(outcome.match_count, 2);
    Ok(())
}

#[test]
fn test_empty_store_is_an_error() {
    let df = frame(&["A"], &[&["1"]]);
    let result = QueryEngine::new().execute(&df, &ConditionStore::new());
    match result {
        Err(Error::ConditionIncomplete(msg)) => assert_eq!(msg, "No queries added"),
        other => panic!("expected ConditionIncomplete, got {:?}", other),
    }
}

#[test]
fn test_no_match_is_not_an_error() -> Result<()> {
    let df = frame(&["A"], &[&["1"], &["2"]]);
    let mut store = ConditionStore::new();
    add(&df, &mut store, "A", ">", "100", None)?;

    let outcome = df.query(&store)?;
    assert_eq!(outcome.match_count, 0);
    assert_eq!(outcome.frame.row_count(), 0);
    assert_eq!(outcome.frame.column_names(), df.column_names());
    assert_eq!(outcome.notice(), Some(Notice::EmptyResult));
    Ok(())
}

#[test]
fn test_startswith_is_case_sensitive_and_skips_missing() -> Result<()> {
    let df = DataFrame::from_rows(
        ["fruit"],
        vec![
            vec![DataValue::from("Apple")],
            vec![DataValue::from("banana")],
            vec![DataValue::Missing],
        ],
    )?;
    let mut store = ConditionStore::new();
    add(&df, &mut store, "fruit", "startswith", "A", None)?;

    let outcome = df.query(&store)?;
    assert_eq!(outcome.match_count, 1);
    assert_eq!(outcome.frame.get(0, "fruit"), Some(&DataValue::from("Apple")));
    Ok(())
}

#[test]
fn test_missing_cells_only_satisfy_not_equal() -> Result<()> {
    let df = DataFrame::from_rows(
        ["name"],
        vec![
            vec![DataValue::from("X")],
            vec![DataValue::Missing],
            vec![DataValue::from("Y")],
        ],
    )?;

    let mut eq = ConditionStore::new();
    add(&df, &mut eq, "name", "==", "X", None)?;
    assert_eq!(df.query(&eq)?.match_count, 1);

    let mut ne = ConditionStore::new();
    add(&df, &mut ne, "name", "!=", "X", None)?;
    let outcome = df.query(&ne)?;
    assert_eq!(outcome.match_count, 2);
    assert_eq!(outcome.frame.get(0, "name"), Some(&DataValue::Missing));

    let mut nc = ConditionStore::new();
    add(&df, &mut nc, "name", "not contains", "X", None)?;
    assert_eq!(df.query(&nc)?.match_count, 1);
    Ok(())
}

#[test]
fn test_complementary_conditions_partition_rows() -> Result<()> {
    let df = DataFrame::from_rows(
        ["n", "s"],
        vec![
            vec!["1".into(), "alpha".into()],
            vec!["5".into(), DataValue::Missing],
            vec!["10".into(), "beta".into()],
            vec!["7".into(), "alphabet".into()],
        ],
    )?;

    let pairs = [
        ("n", ">", "5", "<="),
        ("n", "<", "7", ">="),
        ("n", "==", "5", "!="),
        ("s", "==", "beta", "!="),
    ];

    for (column, op, value, complement) in pairs {
        let mut s = ConditionStore::new();
        add(&df, &mut s, column, op, value, None)?;
        let mut c = ConditionStore::new();
        add(&df, &mut c, column, complement, value, None)?;

        let a = df.query(&s)?;
        let b = df.query(&c)?;
        assert_eq!(
            a.match_count + b.match_count,
            df.row_count(),
            "{} {} {}",
            column,
            op,
            value
        );
        for row in a.frame.rows() {
            assert!(!b.frame.rows().contains(row));
        }
    }
    Ok(())
}

#[test]
fn test_numeric_literal_on_text_column_compares_textually() -> Result<()> {
    let df = frame(&["code"], &[&["7"], &["07"], &["x"]]);
    let mut store = ConditionStore::new();
    add(&df, &mut store, "code", "==", "7", None)?;

    let outcome = df.query(&store)?;
    assert_eq!(outcome.match_count, 1);
    assert_eq!(outcome.frame.get(0, "code"), Some(&DataValue::from("7")));
    Ok(())
}

#[test]
fn test_conditions_on_removed_column_fail() -> Result<()> {
    let df = frame(&["a", "b"], &[&["1", "x"]]);
    let mut store = ConditionStore::new();
    add(&df, &mut store, "b", "==", "x", None)?;

    let other = frame(&["a"], &[&["1"]]);
    assert!(matches!(
        other.query(&store),
        Err(Error::ColumnNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_merge_join_filter_scenario() -> Result<()> {
    let t1 = frame(&["id", "name"], &[&["1", "X"], &["2", "Y"]]);
    let t2 = frame(&["id", "name"], &[&["1", "Z"], &["3", "X"]]);
    let merged = concat(&[t1, t2])?;
    assert_eq!(merged.row_count(), 4);
    assert_eq!(merged.column_names(), &["id", "name"]);

    let lookup = frame(&["id", "score"], &[&["1", "75"], &["5", "20"]]);
    let joined = merged.lookup_join(&lookup)?;
    assert_eq!(joined.row_count(), 4);
    assert_eq!(joined.column_names(), &["id", "name", "score"]);

    let mut store = ConditionStore::new();
    add(&joined, &mut store, "score", ">=", "50", None)?;
    add(&joined, &mut store, "name", "==", "X", Some(Combinator::And))?;
    assert_eq!(store.render(), "score >= 50\nAND name == \"X\"");

    let outcome = joined.query(&store)?;
    assert_eq!(outcome.match_count, 1);
    assert_eq!(outcome.frame.get(0, "id"), Some(&DataValue::from("1")));
    assert_eq!(outcome.frame.get(0, "name"), Some(&DataValue::from("X")));
    assert_eq!(outcome.frame.get(0, "score"), Some(&DataValue::from("75")));
    Ok(())
}

#[test]
fn test_ordering_on_text_column_with_missing_cells() -> Result<()> {
    let df = DataFrame::from_rows(
        ["id", "score"],
        vec![
            vec!["1".into(), "75".into()],
            vec!["2".into(), DataValue::Missing],
            vec!["3".into(), "20".into()],
        ],
    )?;
    assert_eq!(mergequery::infer(&df, "score")?, ColumnType::Text);

    let ids = |op: &str| -> Result<Vec<String>> {
        let mut store = ConditionStore::new();
        add(&df, &mut store, "score", op, "50", None)?;
        Ok(df
            .query(&store)?
            .frame
            .column_values("id")?
            .iter()
            .map(|v| v.to_string())
            .collect())
    };

    assert_eq!(ids(">")?, vec!["1"]);
    assert_eq!(ids("<")?, vec!["3"]);
    assert_eq!(ids(">=")?, vec!["1"]);
    assert_eq!(ids("<=")?, vec!["3"]);
    assert_eq!(ids("==")?, Vec::<String>::new());
    assert_eq!(ids("!=")?, vec!["1", "2", "3"]);
    Ok(())
}

#[test]
fn test_text_comparison_is_lexicographic() -> Result<()> {
    let df = DataFrame::from_rows(
        ["score"],
        vec![
            vec!["100".into()],
            vec!["75".into()],
            vec![DataValue::Missing],
        ],
    )?;
    let mut store = ConditionStore::new();
    add(&df, &mut store, "score", ">=", "50", None)?;

    let outcome = df.query(&store)?;
    assert_eq!(outcome.match_count, 1);
    assert_eq!(outcome.frame.get(0, "score"), Some(&DataValue::from("75")));
    Ok(())
}

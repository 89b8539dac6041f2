use assert_float_eq::*;
use numtree::{
    error::{InconsistentArguments, UnexpectedVariable},
    default_evaluator,
    Call,
    Data,
    EvalOptions,
    EvalOptionsBuilder,
    Evaluator,
    Expr,
    Literal,
    Output,
    Table,
    Variable,
    VmBackend,
};
use numtree_compiler::error::LengthMismatch;
use numtree_expr::error::{MissingVariable, UnsupportedLiteralType};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap};

fn x() -> Expr {
    Expr::variable("x")
}

fn y() -> Expr {
    Expr::variable("y")
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

#[test]
fn constants_render_naturally() {
    assert_eq!(Expr::constant(5.0).to_latex(), "5");
    assert_eq!(Expr::constant(0.25).to_latex(), "0.25");
    assert_eq!(Expr::from(-12).to_latex(), "-12");
}

#[test]
fn commutative_trees_are_distinct_but_equal_in_value() {
    let ab = Expr::add("a", "b");
    let ba = Expr::add("b", "a");
    assert_ne!(ab, ba);

    let data = || Data::new().with("a", 3.5).with("b", -1.25);
    assert_eq!(ab.call(data()).unwrap(), ba.call(data()).unwrap());
}

#[test]
fn repeated_variable_is_one_parameter() {
    let expr = x() + x();
    assert_eq!(expr.variables().len(), 1);
    assert_eq!(expr.parameter_list().names().collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn parameter_order_is_first_seen() {
    let expr = y() + x();
    let first = expr.parameter_list();
    let second = expr.parameter_list();
    assert_eq!(first.names().collect::<Vec<_>>(), vec!["y", "x"]);
    assert_eq!(first, second);
}

#[test]
fn linear_scalar_and_vectorized() {
    let expr = 2 + 3 * x();

    let output = expr.call(Data::new().with("x", 4.0)).unwrap();
    assert_eq!(output, Output::Scalar(14.0));

    let output = expr.call(Data::new().with("x", [1.0, 2.0, 3.0])).unwrap();
    assert_eq!(output, Output::Array(vec![5.0, 8.0, 11.0]));
}

#[test]
fn data_from_maps() {
    let expr = x() - y();

    let map = HashMap::from([("x", 10.0), ("y", 4.0)]);
    assert_eq!(expr.call(map).unwrap(), Output::Scalar(6.0));

    let map = BTreeMap::from([
        (Variable::new("x"), vec![1.0, 2.0]),
        (Variable::new("y"), vec![0.5, 0.5]),
    ]);
    assert_eq!(expr.call(map).unwrap(), Output::Array(vec![0.5, 1.5]));

    let pairs = vec![("y".to_string(), 1.0), ("x".to_string(), 3.0)];
    assert_eq!(expr.call(pairs).unwrap(), Output::Scalar(2.0));
}

#[test]
fn mixed_shapes_are_rejected() {
    let expr = x() + y();
    let err = expr.call(Data::new().with("x", 1.0).with("y", [1.0, 2.0])).unwrap_err();
    let kind = err.kind_as::<InconsistentArguments>().unwrap();
    assert_eq!(kind.name, "y");
    assert_eq!(kind.first, "x");
}

#[test]
fn missing_variable_is_rejected() {
    let expr = 2 * x();
    let err = expr.call(Data::new().with("y", 1.0)).unwrap_err();
    assert_eq!(err.kind_as::<MissingVariable>().map(|kind| kind.name.as_str()), Some("x"));

    let err = expr.call(Data::new().with("y", [1.0])).unwrap_err();
    assert!(err.is::<MissingVariable>());
}

#[test]
fn compiled_once_and_bit_identical() {
    let evaluator: Evaluator = Evaluator::new(VmBackend);
    let expr = x().exp() / (1 + x().exp());
    let data = Data::new().with("x", (0..1000).map(|i| i as f64 / 100.0 - 5.0).collect::<Vec<_>>());

    let first = evaluator.evaluate(&expr, data.clone(), EvalOptions::default()).unwrap();
    assert_eq!(evaluator.cache().len(), 1);
    let second = evaluator.evaluate(&expr, data, EvalOptions::default()).unwrap();
    assert_eq!(evaluator.cache().len(), 1);

    assert_eq!(bits(first.as_array().unwrap()), bits(second.as_array().unwrap()));
}

#[test]
fn parallel_matches_sequential() {
    let expr = (x().sin() * y().cos()).pow(2) + x().ln().log(10) - y().sqrt();
    let xs = (1..=20_000).map(|i| 1.0 + i as f64 * 0.37).collect::<Vec<_>>();
    let ys = (1..=20_000).map(|i| (i % 97) as f64 + 0.5).collect::<Vec<_>>();
    let data = Data::new().with("x", xs.clone()).with("y", ys.clone());

    let sequential = EvalOptionsBuilder::new().parallel(false).build();
    let a = expr.call_with(data.clone(), sequential).unwrap().into_array().unwrap();
    let b = expr.call(data).unwrap().into_array().unwrap();
    assert_eq!(bits(&a), bits(&b));

    for i in [0, 1234, 19_999] {
        let expected = (xs[i].sin() * ys[i].cos()).powf(2.0) + xs[i].ln().log(10.0) - ys[i].sqrt();
        assert_float_absolute_eq!(a[i], expected, 1e-12);
    }
}

#[test]
fn reflected_operators_keep_order() {
    let expr = 1 - x();
    assert_eq!(expr, Expr::sub(1, "x"));
    assert_eq!(expr.call(Data::new().with("x", 3.0)).unwrap(), Output::Scalar(-2.0));

    let expr = 1.0 / x();
    assert_eq!(expr.to_latex(), r"\frac{1}{x}");
    assert_eq!(expr.call(Data::new().with("x", 4.0)).unwrap(), Output::Scalar(0.25));
}

#[test]
fn unsupported_literal_names_its_type() {
    let err = Expr::try_from(Literal::Boolean(true)).unwrap_err();
    let kind = err.kind_as::<UnsupportedLiteralType>().unwrap();
    assert_eq!(kind.type_name, Literal::Boolean(true).typename());
}

#[test]
fn table_columns_feed_parameters() {
    let table = Table::from_rows(["y", "x"], [[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]).unwrap();
    let output = (x() - y()).call(table).unwrap();
    assert_eq!(output, Output::Array(vec![9.0, 18.0, 27.0]));
}

#[test]
fn length_mismatch_is_rejected() {
    let err = (x() * y())
        .call(Data::new().with("x", [1.0, 2.0, 3.0]).with("y", [1.0, 2.0]))
        .unwrap_err();
    assert_eq!(err.kind_as::<LengthMismatch>(), Some(&LengthMismatch { lengths: vec![3, 2] }));
}

#[test]
fn unused_array_length_is_ignored() {
    let output = (2 * x())
        .call(Data::new().with("x", [1.0, 2.0, 3.0]).with("unused", [9.0]))
        .unwrap();
    assert_eq!(output, Output::Array(vec![2.0, 4.0, 6.0]));
}

#[test]
fn compile_cache_stays_bounded() {
    let evaluator: Evaluator = Evaluator::with_cache_capacity(VmBackend, 8);
    for i in 0..1000 {
        let expr = x() + i;
        let output = evaluator.evaluate(&expr, Data::new().with("x", [1.0]), EvalOptions::default());
        assert_eq!(output.unwrap(), Output::Array(vec![1.0 + i as f64]));
    }
    assert_eq!(evaluator.cache().len(), 8);

    for i in 0..1000 {
        (x() * i).call(Data::new().with("x", [1.0])).unwrap();
    }
    let cache = default_evaluator().cache();
    assert!(cache.len() <= cache.capacity());
    assert!(cache.capacity() < 1000);
}

#[test]
fn strict_mode_rejects_extra_variables() {
    let data = Data::new().with("x", 2.0).with("extra", 0.0);
    assert_eq!(x().call(data.clone()).unwrap(), Output::Scalar(2.0));

    let options = EvalOptions { strict: true, ..EvalOptions::default() };
    let err = x().call_with(data, options).unwrap_err();
    assert!(err.is::<UnexpectedVariable>());
}

#[test]
fn constant_tree_yields_one_output_per_row() {
    let output = Expr::constant(7.0).call(Data::new().with("t", [0.0, 0.0, 0.0])).unwrap();
    assert_eq!(output, Output::Array(vec![7.0; 3]));
}

#[test]
fn float_semantics_are_preserved() {
    let output = (1 / x()).call(Data::new().with("x", [0.0, -0.0])).unwrap();
    assert_eq!(output, Output::Array(vec![f64::INFINITY, f64::NEG_INFINITY]));

    let output = x().ln().call(Data::new().with("x", -1.0)).unwrap();
    assert!(output.as_scalar().unwrap().is_nan());
}

#[test]
fn deep_trees_evaluate() {
    let mut expr = x();
    for _ in 0..20_000 {
        expr = expr + 1.0;
    }

    assert_eq!(expr.call(Data::new().with("x", 0.0)).unwrap(), Output::Scalar(20_000.0));
    assert_eq!(
        expr.call(Data::new().with("x", [0.0, 1.0])).unwrap(),
        Output::Array(vec![20_000.0, 20_001.0]),
    );
}

//! End-to-end matching scenarios: literals, variables, guards, tuples,
//! alternates, lists, type tests, binders, structural values, custom
//! decomposition, piecewise dispatchers and match objects.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use casus_match::{
    match_value, Action, Bindings, Clause, ClauseItem, Constructor, Decomposable, Dispatcher,
    Family, Guard, MatchErrorKind, MatchOutcome, Matcher, Pattern, TypeDesc, Value,
};
use pretty_assertions::assert_eq;

fn int(b: &Bindings, name: &str) -> i64 {
    b.get(name).unwrap().as_int().unwrap()
}

fn yes(pattern: impl Into<Pattern>, result: bool) -> Clause<bool> {
    Clause::new(pattern).then(move |_| Ok(result)).unwrap()
}

// Literals and variables

#[test]
fn literal() {
    let clauses = vec![yes(234, false), yes(true, false), yes(42, true)];
    assert!(match_value(&Value::int(42), &clauses).unwrap());
}

#[test]
fn exhaustion() {
    let clauses = vec![yes(234, false), yes(true, false), yes(42, true)];
    let err = match_value(&Value::int(999), &clauses).unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(err.to_string(), "no pattern matches 999");
}

#[test]
fn explicit_string_literal() {
    let clauses = vec![yes(Pattern::lit("hello world"), true), yes(42, false)];
    assert!(match_value(&Value::string("hello world"), &clauses).unwrap());
    assert!(!match_value(&Value::int(42), &clauses).unwrap());
}

#[test]
fn variables_bind_anything() {
    let arbitrary = Constructor::new("Arbitrary", 0).construct(vec![]).unwrap();
    let clauses = vec![
        Clause::new(42).then(|_| Ok(Value::Void)).unwrap(),
        Clause::new("x").then(|b| Ok(b.get("x")?.clone())).unwrap(),
    ];
    assert_eq!(match_value(&arbitrary, &clauses).unwrap(), arbitrary);
}

#[test]
fn wildcard() {
    let clauses = vec![yes(42, false), yes(10101, false), yes("_", true)];
    assert!(match_value(&Value::int(4545), &clauses).unwrap());
}

#[test]
fn guards_select_by_runtime_type() {
    let clauses: Vec<Clause<Value>> = vec![
        Clause::new("x")
            .guard(Guard::named(&["x"], |args| args[0].as_int().is_some()))
            .then(|b| {
                let n = int(b, "x");
                Ok(Value::int(n * n))
            })
            .unwrap(),
        Clause::new("x")
            .guard(Guard::named(&["x"], |args| args[0].as_str().is_some()))
            .then(|b| Ok(b.get("x")?.clone()))
            .unwrap(),
    ];
    assert_eq!(
        match_value(&Value::string("hello world"), &clauses).unwrap(),
        Value::string("hello world")
    );
    assert_eq!(match_value(&Value::int(7), &clauses).unwrap(), Value::int(49));
}

// Tuples

fn arith(op: Value) -> MatchOutcome<i64> {
    let clauses = vec![
        Clause::new((Pattern::lit("+"), "x", "y"))
            .then(|b| Ok(int(b, "x") + int(b, "y")))
            .unwrap(),
        Clause::new((Pattern::lit("*"), "x", "y"))
            .then(|b| Ok(int(b, "x") * int(b, "y")))
            .unwrap(),
        Clause::new((Pattern::lit("pred"), "x"))
            .then(|b| Ok(int(b, "x") - 1))
            .unwrap(),
    ];
    match_value(&op, &clauses)
}

#[test]
fn tuple_arithmetic() {
    assert_eq!(arith(Value::from(("*", 4, 5))).unwrap(), 20);
    assert_eq!(arith(Value::from(("+", 39, 3))).unwrap(), 42);
    assert_eq!(arith(Value::from(("pred", 4))).unwrap(), 3);
}

#[test]
fn repeated_variables_must_agree() {
    let clauses = vec![yes(("x", "x"), true), yes(("x", "y"), false)];
    assert!(match_value(&Value::from((3, 3)), &clauses).unwrap());
    assert!(!match_value(&Value::from((2, 5)), &clauses).unwrap());
}

#[test]
fn alternates_share_an_action() {
    let clauses = vec![
        Clause::new((0, "x")).or(("x", 0)).then(|_| Ok(true)).unwrap(),
        yes("_", false),
    ];
    assert!(match_value(&Value::from((0, 43)), &clauses).unwrap());
    assert!(match_value(&Value::from((42, 0)), &clauses).unwrap());
    assert!(!match_value(&Value::from((42, 2)), &clauses).unwrap());
}

// Lists

fn square_all(list: &Value) -> MatchOutcome<Value> {
    let clauses = vec![
        Clause::new(Pattern::cons("x", "xs"))
            .then(|b| {
                let x = int(b, "x");
                let rest = square_all(b.get("xs")?)?;
                let mut items = vec![Value::int(x * x)];
                items.extend(rest.as_list().unwrap().iter().cloned());
                Ok(Value::list(items))
            })
            .unwrap(),
        Clause::new(Pattern::Empty)
            .then(|_| Ok(Value::list(vec![])))
            .unwrap(),
    ];
    match_value(list, &clauses)
}

#[test]
fn map_over_list() {
    let input = Value::list(vec![1.into(), 2.into(), 3.into(), 4.into()]);
    let expected = Value::list(vec![1.into(), 4.into(), 9.into(), 16.into()]);
    assert_eq!(square_all(&input).unwrap(), expected);
}

// Types and binders

#[test]
fn type_patterns() {
    let clauses = vec![yes(TypeDesc::Int, false), yes(TypeDesc::Str, true)];
    assert!(match_value(&Value::string("hello world"), &clauses).unwrap());
}

fn logic(op: Value) -> MatchOutcome<Value> {
    let clauses = vec![
        Clause::new((
            Pattern::lit("+"),
            Pattern::bind("x", TypeDesc::Int),
            Pattern::bind("y", TypeDesc::Int),
        ))
        .then(|b| Ok(Value::int(int(b, "x") + int(b, "y"))))
        .unwrap(),
        Clause::new((
            Pattern::lit("or"),
            Pattern::bind("x", TypeDesc::Bool),
            Pattern::bind("y", TypeDesc::Bool),
        ))
        .then(|b| {
            let x = b.get("x")?.as_bool().unwrap();
            let y = b.get("y")?.as_bool().unwrap();
            Ok(Value::Bool(x || y))
        })
        .unwrap(),
    ];
    match_value(&op, &clauses)
}

#[test]
fn as_binds_after_type_test() {
    assert_eq!(logic(Value::from(("or", true, false))).unwrap(), Value::Bool(true));
    assert_eq!(logic(Value::from(("+", 39, 3))).unwrap(), Value::int(42));
    assert!(logic(Value::from(("or", 1, 2))).unwrap_err().is_no_match());
}

#[test]
fn deep_as() {
    let pattern = Pattern::cons(
        "_",
        Pattern::bind("r", Pattern::cons(Pattern::bind("x", TypeDesc::Int), "_")),
    );
    let clauses = vec![Clause::new(pattern)
        .then(|b| Ok(format!("{} is in {}", b.get("x")?, b.get("r")?)))
        .unwrap()];
    let target = Value::list(vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(match_value(&target, &clauses).unwrap(), "2 is in [2, 3]");
}

#[test]
fn literal_wrapped_target_is_unwrapped() {
    let clauses = vec![yes(5, true), yes("_", false)];
    assert!(match_value(&Value::literal(Value::int(5)), &clauses).unwrap());
    let typed = vec![yes(TypeDesc::Int, true), yes("_", false)];
    assert!(match_value(&Value::literal(Value::int(5)), &typed).unwrap());
}

// Structural values

#[test]
fn constructor_patterns() {
    let c = Constructor::new("C", 3);
    let target = c
        .construct(vec![1.into(), 2.into(), Value::string("3")])
        .unwrap();
    let clauses = vec![
        Clause::new(c.pattern(vec![3.into(), "b".into(), "c".into()]).unwrap())
            .then(|b| Ok(b.get("b")?.clone()))
            .unwrap(),
        Clause::new(c.pattern(vec!["a".into(), "b".into(), Pattern::lit("3")]).unwrap())
            .then(|b| Ok(b.get("a")?.clone()))
            .unwrap(),
        Clause::new(c.pattern(vec!["a".into(), "b".into(), "c".into()]).unwrap())
            .then(|b| Ok(b.get("c")?.clone()))
            .unwrap(),
        Clause::new("_").then(|_| Ok(Value::Void)).unwrap(),
    ];
    assert_eq!(match_value(&target, &clauses).unwrap(), Value::int(1));
}

#[test]
fn constructor_arity_is_checked() {
    let c = Constructor::new("C", 3);
    let err = c.construct(vec![1.into()]).unwrap_err();
    assert_eq!(err.to_string(), "C expects 3 arguments, got 1");
    let err = c.pattern(vec!["a".into()]).unwrap_err();
    assert!(matches!(err.kind, MatchErrorKind::Arity { expected: 3, got: 1, .. }));
}

#[derive(Clone)]
struct Arith {
    add: Constructor,
    mult: Constructor,
    num: Constructor,
}

impl Arith {
    fn new() -> Self {
        let expr = Family::new("expr");
        Arith {
            add: Constructor::in_family(&expr, "Add", 2),
            mult: Constructor::in_family(&expr, "Mult", 2),
            num: Constructor::in_family(&expr, "Num", 1),
        }
    }

    fn num(&self, n: i64) -> Value {
        self.num.construct(vec![Value::int(n)]).unwrap()
    }

    fn num_pat(&self, name: &str) -> Pattern {
        self.num.pattern(vec![name.into()]).unwrap()
    }

    /// Clauses reducing `ctor(lhs, rhs)` one step, combining numbers with `op`.
    fn binary(&self, ctor: &Constructor, op: fn(i64, i64) -> i64) -> Vec<Clause<Value>> {
        let both = ctor.pattern(vec![self.num_pat("n1"), self.num_pat("n2")]).unwrap();
        let left = ctor.pattern(vec![self.num_pat("n1"), "n2".into()]).unwrap();
        let any = ctor.pattern(vec!["n1".into(), "n2".into()]).unwrap();
        let (k1, k2, k3) = (self.clone(), self.clone(), self.clone());
        let (c2, c3) = (ctor.clone(), ctor.clone());
        vec![
            Clause::new(both)
                .then(move |b| Ok(k1.num(op(int(b, "n1"), int(b, "n2")))))
                .unwrap(),
            Clause::new(left)
                .then(move |b| {
                    let rhs = k2.step(b.get("n2")?)?;
                    c2.construct(vec![k2.num(int(b, "n1")), rhs])
                })
                .unwrap(),
            Clause::new(any)
                .then(move |b| {
                    let lhs = k3.step(b.get("n1")?)?;
                    c3.construct(vec![lhs, b.get("n2")?.clone()])
                })
                .unwrap(),
        ]
    }

    fn step(&self, e: &Value) -> MatchOutcome<Value> {
        let mut clauses = self.binary(&self.add, |a, b| a + b);
        clauses.extend(self.binary(&self.mult, |a, b| a * b));
        match_value(e, &clauses)
    }

    fn eval(&self, e: &Value) -> MatchOutcome<i64> {
        let k = self.clone();
        let clauses = vec![
            Clause::new(self.num_pat("n")).then(|b| Ok(int(b, "n"))).unwrap(),
            Clause::new("e")
                .then(move |b| k.eval(&k.step(b.get("e")?)?))
                .unwrap(),
        ];
        match_value(e, &clauses)
    }
}

#[test]
fn arithmetic_reduction() {
    let k = Arith::new();
    let mult = k.mult.construct(vec![k.num(4), k.num(2)]).unwrap();
    let inner = k.add.construct(vec![k.num(0), k.num(1)]).unwrap();
    let right = k.add.construct(vec![k.num(1), inner]).unwrap();
    let expr = k.add.construct(vec![mult, right]).unwrap();
    assert_eq!(k.eval(&expr).unwrap(), 10);
}

// Custom decomposition

#[derive(Debug)]
struct Summer {
    sum: i64,
}

impl Summer {
    fn new(nums: &[i64]) -> Self {
        Summer {
            sum: nums.iter().sum(),
        }
    }
}

impl Decomposable for Summer {
    fn decompose(&self) -> MatchOutcome<Value> {
        Ok(Value::from(("SUM", self.sum)))
    }

    fn pattern(mut parts: Vec<Pattern>) -> MatchOutcome<Pattern> {
        let sum = parts.pop().unwrap_or(Pattern::Wildcard);
        Ok(Pattern::tuple(vec![Pattern::lit("SUM"), sum]))
    }
}

#[test]
fn custom_decomposition() {
    let target = Value::object(Summer::new(&[1, 2, 3, 4, 5]));
    let clauses = vec![
        Clause::new(Summer::pattern(vec![54.into()]).unwrap())
            .then(|_| Ok(None))
            .unwrap(),
        Clause::new(Summer::pattern(vec![Pattern::bind("x", TypeDesc::Int)]).unwrap())
            .then(|b| Ok(Some(int(b, "x"))))
            .unwrap(),
    ];
    assert_eq!(match_value(&target, &clauses).unwrap(), Some(15));
}

// Piecewise dispatchers

fn factorial() -> Dispatcher<i64> {
    let fact = Dispatcher::define(
        "factorial",
        vec![ClauseItem::pattern(1), Action::constant(1).into()],
    )
    .unwrap();
    fact.case(vec![ClauseItem::pattern(0), Action::constant(0).into()])
        .unwrap();
    let recur = fact.downgrade();
    fact.case(vec![
        ClauseItem::pattern(Pattern::bind("n", TypeDesc::Int)),
        Guard::named(&["n"], |args| args[0].as_int().is_some_and(|n| n > 1)).into(),
        Action::named(&["n"], move |args| {
            let n = args[0].as_int().unwrap();
            Ok(recur.call(vec![Value::int(n - 1)])? * n)
        })
        .into(),
    ])
    .unwrap();
    fact
}

#[test]
fn separate_definition_factorial() {
    let fact = factorial();
    assert_eq!(fact.call(vec![Value::int(5)]).unwrap(), 120);
    let err = fact.call(vec![Value::int(-5)]).unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(
        err.display_with_notes(),
        "no pattern matches (-5)\n  note: in dispatcher `factorial`"
    );
}

#[test]
fn separate_definition_mixed_arity() {
    let foo = Dispatcher::define(
        "foo",
        vec![
            ClauseItem::pattern(Pattern::bind("x", Pattern::lit("Dog."))),
            ClauseItem::action(|b| Ok(b.get("x")?.display_value())),
        ],
    )
    .unwrap();
    foo.case(vec![
        ClauseItem::pattern(42),
        Action::constant("it's 42!!".to_string()).into(),
    ])
    .unwrap();
    foo.case(vec![
        ClauseItem::pattern("a"),
        ClauseItem::pattern(TypeDesc::Int),
        Action::constant("cdrnum".to_string()).into(),
    ])
    .unwrap();
    foo.case(vec![Action::constant("EMPTY".to_string()).into()])
        .unwrap();

    assert_eq!(foo.call(vec![42.into()]).unwrap(), "it's 42!!");
    assert_eq!(foo.call(vec![3.into(), 2.into()]).unwrap(), "cdrnum");
    assert_eq!(foo.call(vec!["Dog.".into()]).unwrap(), "Dog.");
    assert_eq!(foo.call(vec![]).unwrap(), "EMPTY");
    assert!(foo.call(vec![3.into(), "a".into()]).unwrap_err().is_no_match());
    assert!(foo.call(vec![22.into()]).unwrap_err().is_no_match());
}

// Match objects

#[test]
fn match_object() {
    let matcher = Matcher::new(vec![Clause::new(42)
        .then(|_| Ok(Value::string("yes")))
        .unwrap()]);
    matcher
        .add(vec![
            ClauseItem::pattern("x"),
            Guard::named(&["x"], |args| args[0].as_int().is_some()).into(),
            ClauseItem::action(|b| Ok(b.get("x")?.clone())),
        ])
        .unwrap();
    matcher
        .add(vec![
            ClauseItem::pattern(("x", "y")),
            ClauseItem::action(|b| Ok(Value::int(int(b, "x") + int(b, "y")))),
        ])
        .unwrap();

    assert_eq!(matcher.invoke(&42.into()).unwrap(), Value::string("yes"));
    assert_eq!(matcher.invoke(&120.into()).unwrap(), Value::int(120));
    assert_eq!(matcher.invoke(&Value::from((1, 2))).unwrap(), Value::int(3));
    assert!(matcher.invoke(&"bluh".into()).unwrap_err().is_no_match());

    matcher
        .add(vec![
            ClauseItem::pattern("_"),
            Action::constant(Value::string("miss")).into(),
        ])
        .unwrap();
    assert_eq!(matcher.invoke(&"bluh".into()).unwrap(), Value::string("miss"));
}

// Usage errors

#[test]
fn guard_reading_unbound_variable() {
    let clauses = vec![Clause::new("n")
        .when(|b| Ok(int(b, "n") > 0 && b.get("m")?.as_int().is_some()))
        .then(|_| Ok(()))
        .unwrap()];
    let err = match_value(&Value::int(1), &clauses).unwrap_err();
    assert_eq!(err.to_string(), "variable `m` is not bound by the pattern");
}

#[test]
fn named_guard_rejected_before_matching() {
    let err = Clause::<()>::new("n")
        .guard(Guard::named(&["m"], |_| true))
        .then(|_| Ok(()))
        .unwrap_err();
    assert!(matches!(err.kind, MatchErrorKind::GuardBinding { .. }));
}

#[test]
fn malformed_definitions() {
    let err = Dispatcher::<i64>::define("f", vec![ClauseItem::pattern(1)]).unwrap_err();
    assert_eq!(err.to_string(), "malformed clause: clause has no action");
    let err = Clause::<i64>::from_items(vec![
        ClauseItem::pattern(1),
        ClauseItem::or(2),
        ClauseItem::pattern(3),
        Action::constant(0).into(),
    ])
    .unwrap_err();
    assert!(matches!(err.kind, MatchErrorKind::MalformedClause { .. }));
}

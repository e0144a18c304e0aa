//! Task builder contract.

mod common;

use std::io::Cursor;

use ceres_calc::{CalcEngine, CalcValue};
use ceres_core::{Error, TaskBuilder};
use common::executor;

#[test]
fn build_without_code_raises_a_definition_error() {
    let err = TaskBuilder::<CalcEngine>::new()
        .input("n", 12)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Definition(_)));
}

#[test]
fn code_can_be_read_from_a_stream() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code_from(Cursor::new("x <- 6 * 7"))
        .unwrap()
        .build()
        .unwrap();
    let result = exec.execute(task).unwrap();
    assert_eq!(result.output().unwrap(), Some(&CalcValue::Number(42.0)));
}

#[test]
fn last_write_wins_when_a_name_is_supplied_twice() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code("n")
        .input("n", 1)
        .input("n", 12)
        .build()
        .unwrap();
    let result = exec.execute(task).unwrap();
    assert_eq!(result.output().unwrap(), Some(&CalcValue::Number(12.0)));
}

#[test]
fn a_native_rebind_replaces_a_primitive_of_the_same_name() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code("n")
        .input("n", 1)
        .native_input("n", CalcValue::Number(99.0))
        .build()
        .unwrap();
    let result = exec.execute(task).unwrap();
    assert_eq!(result.output().unwrap(), Some(&CalcValue::Number(99.0)));
    assert!(result.inputs().primitive("n").is_none());
}

#[test]
fn each_builder_produces_exactly_one_task() {
    // `build` consumes the builder, so reuse is rejected at compile time;
    // two tasks require two builders.
    let exec = executor();
    for _ in 0..2 {
        let task = TaskBuilder::<CalcEngine>::new().code("x<-1").build().unwrap();
        assert!(exec.execute(task).unwrap().success());
    }
}

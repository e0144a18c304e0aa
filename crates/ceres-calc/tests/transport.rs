//! Cross-process relay of packaged tasks and results, with serde_json
//! standing in for the embedding framework's transport.

mod common;

use ceres_calc::{CalcEngine, CalcValue};
use ceres_core::{Error, PackagedResult, PackagedTask, TaskBuilder};
use common::executor;

#[test]
fn packaged_task_relays_and_executes_remotely() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code("x<-2*z")
        .native_input("z", CalcValue::Vector(vec![1.0, 2.0, 3.0]))
        .build()
        .unwrap();

    let wire = serde_json::to_string(&task.package().unwrap()).unwrap();
    let received: PackagedTask = serde_json::from_str(&wire).unwrap();

    let result = exec.execute(received.unpack::<CalcEngine>()).unwrap();
    assert!(result.success());
    assert_eq!(
        result.output().unwrap(),
        Some(&CalcValue::Vector(vec![2.0, 4.0, 6.0]))
    );
}

#[test]
fn packaged_result_reconstructs_output_and_inputs() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code("x<-z+n")
        .native_input("z", CalcValue::Number(2.0))
        .input("n", 40)
        .build()
        .unwrap();
    let original = exec.execute(task).unwrap();
    assert!(original.success());

    let wire = serde_json::to_string(&original.package().unwrap()).unwrap();
    let received: PackagedResult = serde_json::from_str(&wire).unwrap();
    assert!(received.success());

    let result = received.unpack::<CalcValue>();
    assert!(result.success());
    assert_eq!(result.output().unwrap(), Some(&CalcValue::Number(42.0)));
    assert_eq!(result.elapsed(), original.elapsed());
    assert_eq!(
        result.inputs().native("z").unwrap(),
        Some(&CalcValue::Number(2.0))
    );
    assert_eq!(
        result.inputs().primitive("n").and_then(|p| p.as_int()),
        Some(40)
    );
}

#[test]
fn native_mode_results_can_still_be_packaged() {
    // Payloads kept native in-process are encoded on demand at packaging
    // time.
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new()
        .code("x<-z")
        .encode_inputs(false)
        .encode_output(false)
        .native_input("z", CalcValue::Number(7.0))
        .build()
        .unwrap();
    let original = exec.execute(task).unwrap();

    let packaged = original.package().unwrap();
    let result = packaged.unpack::<CalcValue>();
    assert_eq!(result.output().unwrap(), Some(&CalcValue::Number(7.0)));
    assert_eq!(
        result.inputs().native("z").unwrap(),
        Some(&CalcValue::Number(7.0))
    );
}

#[test]
fn failed_result_relays_its_error_text() {
    let exec = executor();
    let task = TaskBuilder::<CalcEngine>::new().code("x<-n").build().unwrap();
    let original = exec.execute(task).unwrap();
    assert!(!original.success());

    let wire = serde_json::to_string(&original.package().unwrap()).unwrap();
    let received: PackagedResult = serde_json::from_str(&wire).unwrap();
    let result = received.unpack::<CalcValue>();

    assert!(!result.success());
    assert_eq!(result.error(), original.error());
    assert_eq!(result.output().unwrap(), None);
    match result.cause() {
        Some(Error::Relayed(chain)) => assert!(chain.contains("object `n` not found")),
        other => panic!("unexpected cause: {other:?}"),
    }
}

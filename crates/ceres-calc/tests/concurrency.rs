//! Concurrent executions over a shared pool.

mod common;

use std::thread;

use ceres_calc::CalcValue;
use ceres_core::TaskBuilder;
use common::executor_with_cap;

#[test]
fn concurrent_executions_never_deadlock_and_all_succeed() {
    let exec = executor_with_cap(4);

    let mut handles = Vec::new();
    for worker in 0..16 {
        let exec = exec.clone();
        handles.push(thread::spawn(move || {
            for step in 0..8 {
                let task = TaskBuilder::new()
                    .code("x<-n+1")
                    .input("n", i64::from(worker * 8 + step))
                    .build()
                    .unwrap();
                let result = exec.execute(task).unwrap();
                assert!(result.success());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Burst load may over-provision, but retention stays bounded.
    assert!(exec.pool().idle_count() <= exec.pool().max_idle());
    assert!(exec.pool().idle_count() >= 1);
}

#[test]
fn batch_execution_completes_with_bounded_retention() {
    let exec = executor_with_cap(4);
    let tasks: Vec<_> = (0..100)
        .map(|i| {
            TaskBuilder::new()
                .code("2*n")
                .input("n", i64::from(i))
                .build()
                .unwrap()
        })
        .collect();

    let results = exec.execute_batch(tasks);
    assert_eq!(results.len(), 100);
    for (i, result) in results.into_iter().enumerate() {
        let result = result.unwrap();
        assert!(result.success());
        assert_eq!(
            result.output().unwrap(),
            Some(&CalcValue::Number((2 * i) as f64))
        );
    }
    assert!(exec.pool().idle_count() <= exec.pool().max_idle());
}

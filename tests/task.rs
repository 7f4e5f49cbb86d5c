#![cfg(feature = "std")]

use std::time::Duration;

use crossbeam_channel::bounded;

use guarded_vec::{
    task::{spawn, Failure},
    StorageError, Vec as GVec,
};

#[test]
fn task_result() {
    let pending = spawn(|| {
        let mut v = GVec::<u32>::new();
        v.extend(0..10);
        v.erase(2..8);
        Ok(v)
    });
    let v = pending.wait().unwrap();
    assert_eq!(v, [0, 1, 8, 9]);
}

#[test]
fn task_storage_failure() {
    let pending = spawn(|| {
        let mut v = GVec::<u64>::from([1]);
        v.try_reserve(usize::MAX)?;
        Ok(v.len())
    });
    assert_eq!(
        pending.wait(),
        Err(Failure::Storage(StorageError::LengthError))
    );
}

#[test]
fn task_construction_failure() {
    let pending = spawn(|| {
        let mut v = GVec::<String>::new();
        v.push_with(|| panic!("no value"));
        Ok(v)
    });
    match pending.wait() {
        Err(Failure::Construction(msg)) => assert_eq!(msg, "no value"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn task_wait_timeout() {
    let (release_tx, release_rx) = bounded::<()>(1);
    let pending = spawn(move || {
        let _ = release_rx.recv();
        Ok(5u8)
    });
    let pending = match pending.wait_timeout(Duration::from_millis(10)) {
        Err(pending) => pending,
        Ok(outcome) => panic!("outcome delivered early: {:?}", outcome),
    };
    release_tx.send(()).unwrap();
    assert_eq!(pending.wait_timeout(Duration::from_secs(10)).ok(), Some(Ok(5)));
}

#[test]
fn failure_display() {
    assert_eq!(
        Failure::Storage(StorageError::LengthError).to_string(),
        "Storage failure: Exceeded maximum container size"
    );
    assert_eq!(
        Failure::Construction("boom".into()).to_string(),
        "Construction failure: boom"
    );
    assert_eq!(Failure::Disconnected.to_string(), "Worker disconnected");
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_flag::atomic::AtomicFlag;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::{
    Arc,
    Barrier,
};
use std::thread;

const NUM_THREADS: usize = 10;
const ITERATIONS_PER_THREAD: usize = 1000;

// Writers, readers and togglers racing on one flag
#[test]
fn test_concurrent_mixed_operations() {
    let repeat: i32 = 10_000;
    let flag = Arc::new(AtomicFlag::default());
    let barrier = Arc::new(Barrier::new(4));
    let mut handles = vec![];

    {
        let flag = flag.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..repeat {
                flag.set();
            }
        }));
    }
    {
        let flag = flag.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..repeat {
                let _ = flag.is_set();
            }
        }));
    }
    {
        let flag = flag.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..repeat {
                flag.clear();
            }
        }));
    }
    {
        let flag = flag.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..repeat {
                flag.toggle();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Nothing wrapped, so the cell holds a value some store or CAS wrote
    let raw = flag.inner().load(Ordering::SeqCst);
    assert!((0..=repeat + 1).contains(&raw));
    assert_eq!(flag.is_set(), raw & 1 == 1);
}

#[test]
fn test_concurrent_toggle() {
    let flag = Arc::new(AtomicFlag::new(false));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let flag = flag.clone();
        let handle = thread::spawn(move || {
            for _ in 0..ITERATIONS_PER_THREAD {
                flag.toggle();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Even number of toggles
    assert!(!flag.is_set());
}

// Every successful toggle owns one transition, so the returned previous
// values split evenly between true and false.
#[test]
fn test_concurrent_toggle_previous_values() {
    let flag = Arc::new(AtomicFlag::new(false));
    let saw_true = Arc::new(AtomicUsize::new(0));
    let saw_false = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let flag = flag.clone();
        let saw_true = saw_true.clone();
        let saw_false = saw_false.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                if flag.toggle() {
                    saw_true.fetch_add(1, Ordering::Relaxed);
                } else {
                    saw_false.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let total = NUM_THREADS * ITERATIONS_PER_THREAD;
    assert_eq!(saw_false.load(Ordering::Relaxed), total / 2);
    assert_eq!(saw_true.load(Ordering::Relaxed), total / 2);
    assert!(!flag.is_set());
}

#[test]
fn test_concurrent_set_once() {
    let flag = Arc::new(AtomicFlag::new(false));
    let success_count = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let flag = flag.clone();
        let success_count = success_count.clone();
        let barrier = barrier.clone();
        let handle = thread::spawn(move || {
            barrier.wait();
            if flag.compare_and_set(false, true) {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Only one thread should succeed
    assert!(flag.is_set());
    assert_eq!(success_count.load(Ordering::Relaxed), 1);
}

#[test]
fn test_concurrent_toggle_across_overflow() {
    let flag = Arc::new(AtomicFlag::default());
    flag.inner().store(i32::MAX - 100, Ordering::SeqCst);
    let start = flag.is_set();
    let mut handles = vec![];

    for _ in 0..NUM_THREADS {
        let flag = flag.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..51 {
                flag.toggle();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // 510 toggles: wrapped past i32::MAX and ended on the start value
    assert_eq!(flag.is_set(), start);
    assert!(flag.inner().load(Ordering::SeqCst) < 0);
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Atomic Flag Example
//!
//! Demonstrates using an atomic flag for thread coordination and embedding
//! it in a serialized structure.

use prism3_flag::{
    AtomicFlag,
    FlagError,
};
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Serialize)]
struct Status {
    worker: &'static str,
    running: AtomicFlag,
}

fn main() -> Result<(), FlagError> {
    println!("=== Atomic Flag Example ===\n");

    // Example 1: Simple flag
    println!("1. Simple Flag:");
    let flag = AtomicFlag::default();
    println!("   Initial value: {}", flag);

    flag.set();
    println!("   After set(): {}", flag);

    let prev = flag.toggle();
    println!("   After toggle(): {} (was {})", flag, prev);

    // Example 2: One-time initialization
    println!("\n2. One-time Initialization:");
    let initialized = Arc::new(AtomicFlag::default());
    let mut handles = vec![];

    for i in 0..5 {
        let initialized = initialized.clone();
        let handle = thread::spawn(move || {
            if initialized.compare_and_set(false, true) {
                println!("   Thread {} performed initialization", i);
                thread::sleep(Duration::from_millis(100));
            } else {
                println!("   Thread {} skipped (already initialized)", i);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("initializer thread panicked");
    }

    println!("   Final state: initialized = {}", initialized);

    // Example 3: Stop signal
    println!("\n3. Stop Signal:");
    let stop = Arc::new(AtomicFlag::default());
    let stop_clone = stop.clone();

    let worker = thread::spawn(move || {
        let mut rounds = 0u32;
        while stop_clone.is_clear() {
            rounds += 1;
            thread::sleep(Duration::from_millis(10));
        }
        rounds
    });

    thread::sleep(Duration::from_millis(50));
    stop.set();
    let rounds = worker.join().expect("worker thread panicked");
    println!("   Worker stopped after {} rounds", rounds);

    // Example 4: Text round trip
    println!("\n4. Text Round Trip:");
    let status = Status {
        worker: "indexer",
        running: AtomicFlag::new(true),
    };
    match serde_json::to_string(&status) {
        Ok(json) => println!("   Serialized: {}", json),
        Err(err) => println!("   Serialization failed: {}", err),
    }

    status.running.from_text(b"false")?;
    println!("   After from_text(false): {}", status.running);

    if let Err(err) = status.running.from_text(b"maybe") {
        println!("   Rejected input: {}", err);
    }
    println!("   Value unchanged: {}", status.running);

    println!("\n=== Example completed ===");
    Ok(())
}

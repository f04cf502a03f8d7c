//! # Concurrent Producers Example
//!
//! Several producer threads push events into one shared [`Store`] while a
//! consumer periodically drains acknowledged events with a single
//! enumerate pass.
//!
//! ## 🎯 What This Example Shows
//!
//! - **Shared Handles**: cloning a `Store` hands the same sequence to many threads
//! - **Filtered Deletion**: `enumerate_mut` marks and removes events in one pass
//! - **Compound Atomicity**: a write guard pops only when a batch is available
//!
//! Run with:
//! ```bash
//! cargo run --example concurrent_producers
//! ```

use seqstore::prelude::*;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Event {
    producer: usize,
    seq: usize,
    acked: bool,
}

fn main() -> StoreResult<()> {
    println!("🚀 Starting concurrent producers example\n");

    let store: Store<Event> = Store::new(1024);

    thread::scope(|s| {
        for producer in 0..4 {
            let store = store.clone();
            s.spawn(move || {
                for seq in 0..250 {
                    store.add(Event {
                        producer,
                        seq,
                        acked: seq % 3 == 0,
                    });
                }
            });
        }

        let consumer = store.clone();
        s.spawn(move || {
            thread::sleep(Duration::from_millis(5));
            let mut ack = |_: usize, event: &mut Event| -> StoreResult<Action> {
                Ok(if event.acked {
                    Action::Delete
                } else {
                    Action::Continue
                })
            };
            if let Ok(visited) = consumer.enumerate_mut(&mut ack) {
                println!("🧹 Early sweep visited {visited} events");
            }
        });
    });

    // Sweep whatever the early pass missed
    let visited = store.enumerate_mut(|_, event| -> StoreResult<Action> {
        Ok(if event.acked {
            Action::Delete
        } else {
            Action::Continue
        })
    })?;
    println!("🧹 Final sweep visited {visited} events");
    println!("📊 Pending events: {}", store.len());

    // Take a batch of up to 10 only if at least 10 are waiting
    let batch: Vec<Event> = {
        let mut guard = store.lock();
        if guard.len() >= 10 {
            (0..10).filter_map(|_| guard.pop()).collect()
        } else {
            Vec::new()
        }
    };

    for event in &batch {
        println!("   • producer {} seq {}", event.producer, event.seq);
    }

    println!("\n🎉 {} events remain queued", store.len());
    Ok(())
}

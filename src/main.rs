use LinkedQueueMini::core::buildcore::QueueSystem;
use LinkedQueueMini::core::log::append_logs;
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_thread_names(true)
        .without_time()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "output.ndjson".to_string());
    let system = Arc::new(QueueSystem::<u32>::new());

    // enqueue 1, 2, 3 -> dequeue -> reverse -> drain
    for i in 1..=3 {
        system.enqueue(i)?;
    }
    println!("dequeue -> {}", system.dequeue()?);
    println!("size    -> {}", system.queue_state()?.0);
    system.reverse()?;
    while let Ok(item) = system.dequeue() {
        println!("dequeue -> {item}");
    }

    // Refill from several threads sharing the same queue
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let system = Arc::clone(&system);
            thread::spawn(move || {
                for i in 0..3 {
                    if let Err(e) = system.enqueue(t * 10 + i) {
                        tracing::error!("enqueue failed: {e}");
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("worker thread panicked");
        }
    }

    let (size, _) = system.queue_state()?;
    let sum = system.fold(0u64, |acc, x| acc + u64::from(*x))?;
    let small = system.all(|x| *x < 40)?;
    println!("size {size}, sum {sum}, all < 40: {small}");

    let system = Arc::try_unwrap(system).map_err(|_| "queue system still shared")?;
    let logs = system.destroy(|item| tracing::info!(item, "released"))?;

    append_logs(&logs, &path)?;
    println!("wrote {} log entries to {path}", logs.len());
    Ok(())
}

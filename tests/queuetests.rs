use LinkedQueueMini::core::buildcore::QueueSystem;
use LinkedQueueMini::core::error::QueueError;
use LinkedQueueMini::core::log::{Op, State};
use LinkedQueueMini::core::queue::Queue;

#[test]
fn test_enqueue_dequeue_scenario() {
    let mut queue = Queue::new();
    queue.enqueue(1);
    queue.enqueue(2);
    queue.enqueue(3);

    assert_eq!(queue.dequeue(), Ok(1));
    assert_eq!(queue.size(), 2);

    // [2, 3] reversed is [3, 2]
    queue.reverse();
    assert_eq!(queue.dequeue(), Ok(3));
    assert_eq!(queue.dequeue(), Ok(2));
    assert_eq!(queue.size(), 0);
    assert_eq!(queue.dequeue(), Err(QueueError::Empty));
}

#[test]
fn test_peek_does_not_mutate() {
    let queue: Queue<_> = ["a", "b", "c", "d"].into_iter().collect();
    for (i, expected) in ["a", "b", "c", "d"].iter().enumerate() {
        assert_eq!(queue.peek(i), Ok(expected));
    }
    assert_eq!(queue.size(), 4);
    assert_eq!(
        queue.peek(4),
        Err(QueueError::IndexOutOfRange { index: 4, size: 4 })
    );
}

#[test]
fn test_fold_and_all() {
    let queue: Queue<u32> = (1..=10).collect();
    assert_eq!(queue.fold(0, |acc, _| acc + 1), 10);
    assert_eq!(queue.fold(0, |acc, x| acc + x), 55);
    assert!(queue.all(|x| *x <= 10));
    assert!(!queue.all(|x| *x < 10));
    assert!(Queue::<u32>::new().all(|_| false));
}

#[test]
fn test_destroy_hands_back_owned_items() {
    let mut queue = Queue::new();
    for word in ["one", "two", "three"] {
        queue.enqueue(word.to_string());
    }
    queue.dequeue().unwrap();

    let mut released = Vec::new();
    queue.destroy(|s| released.push(s));
    assert_eq!(released, vec!["two".to_string(), "three".to_string()]);
}

#[test]
fn test_queue_system_scenario_log() {
    let system = QueueSystem::new();
    for i in 1..=3 {
        system.enqueue(i).unwrap();
    }
    assert_eq!(system.dequeue(), Ok(1));
    system.reverse().unwrap();
    assert_eq!(system.dequeue(), Ok(3));
    assert_eq!(system.dequeue(), Ok(2));
    assert_eq!(system.dequeue(), Err(QueueError::Empty));
    assert_eq!(system.queue_state(), Ok((0, true)));

    let logs = system.destroy(|_: i32| panic!("queue should be empty")).unwrap();
    let last = logs.last().unwrap();
    assert_eq!((last.op, last.state, last.size_after), (Op::Dequeue, State::Failed, 0));
    assert_eq!(logs.len(), 8);
}

// Chain, Stack and Queue through the public API.
use rb_chain_maps::{Chain, Queue, Stack};

#[test]
fn chain_scan_and_remove_matching() {
    let mut c: Chain<(u32, &str)> = Chain::new();
    c.append((1, "a"));
    c.append((2, "b"));
    c.append((3, "c"));
    assert_eq!(c.len(), 3);
    assert_eq!(c.remove_first(|e| e.0 == 2), Some((2, "b")));
    let scanned: Vec<u32> = c.iter().map(|e| e.0).collect();
    assert_eq!(scanned, vec![1, 3]);
    assert_eq!(c.get(5), None);
    assert!(!c.is_empty());
}

#[test]
fn stack_is_lifo_and_queue_is_fifo() {
    let mut s = Stack::new();
    let mut q = Queue::new();
    for i in 0..5 {
        s.push(i);
        q.enqueue(i);
    }
    let popped: Vec<i32> = std::iter::from_fn(|| s.pop()).collect();
    let dequeued: Vec<i32> = std::iter::from_fn(|| q.dequeue()).collect();
    assert_eq!(popped, vec![4, 3, 2, 1, 0]);
    assert_eq!(dequeued, vec![0, 1, 2, 3, 4]);
    assert!(s.is_empty() && q.is_empty());
}

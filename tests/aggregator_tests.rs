use jstack_flame::aggregator::metrics::{calculate_sample_distribution, create_hot_path};
use jstack_flame::aggregator::{calculate_hot_paths, CollapsedStack, StackAggregate, StateTally};

#[test]
fn test_aggregate_counts_and_orders() {
    let mut agg = StackAggregate::new();
    for stack in ["main;b", "main;a", "main;b", "main;b"] {
        agg.increment(stack);
    }

    let stacks = agg.finalize();

    assert_eq!(
        stacks,
        vec![
            CollapsedStack::new("main;a", 1),
            CollapsedStack::new("main;b", 3),
        ]
    );
    assert_eq!(agg.total_samples(), 4);
}

#[test]
fn test_merge_then_finalize_resorts() {
    let mut first = StackAggregate::new();
    first.increment("z");

    let mut second = StackAggregate::new();
    second.increment("a");
    second.increment("z");

    first.merge(second);

    let lines: Vec<String> = first.finalize().iter().map(|s| s.to_line()).collect();
    assert_eq!(lines, vec!["a 1", "z 2"]);
}

#[test]
fn test_state_tally_merge() {
    let mut left = StateTally::new();
    left.record("RUNNABLE");

    let mut right = StateTally::new();
    right.record("RUNNABLE");
    right.record("BLOCKED");

    left.merge(right);

    assert_eq!(left.get("RUNNABLE"), 2);
    assert_eq!(left.to_map().keys().collect::<Vec<_>>(), vec!["BLOCKED", "RUNNABLE"]);
}

#[test]
fn test_calculate_hot_paths() {
    let stacks = vec![
        CollapsedStack::new("main;compute", 20),
        CollapsedStack::new("main;execute", 50),
        CollapsedStack::new("main;storage", 30),
    ];

    let hot_paths = calculate_hot_paths(&stacks, 100, 2);

    assert_eq!(hot_paths.len(), 2);
    assert_eq!(hot_paths[0].stack, "main;execute");
    assert_eq!(hot_paths[0].samples, 50);
    assert_eq!(hot_paths[0].percentage, 50.0);
}

#[test]
fn test_calculate_sample_distribution() {
    let stacks = vec![
        CollapsedStack::new("stack1", 5),
        CollapsedStack::new("stack2", 3),
        CollapsedStack::new("stack3", 1),
        CollapsedStack::new("stack4", 1),
    ];

    let dist = calculate_sample_distribution(&stacks);

    assert_eq!(dist.total_samples, 10);
    assert_eq!(dist.stack_count, 4);
    assert_eq!(dist.mean_samples_per_stack, 2.5);
    assert_eq!(dist.median_samples_per_stack, 3);
    assert!(!dist.is_highly_concentrated());
}

#[test]
fn test_create_hot_path() {
    let hot_path = create_hot_path(&CollapsedStack::new("test;path", 25), 100);

    assert_eq!(hot_path.stack, "test;path");
    assert_eq!(hot_path.samples, 25);
    assert_eq!(hot_path.percentage, 25.0);
}

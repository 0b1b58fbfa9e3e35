//! Property tests for generated benchmark pairs.

use pecheck_bench::{BenchmarkConfig, GarbageLayout, generate_random_benchmark};
use proptest::prelude::*;

/// `(n, d, m)` with `0 <= m <= d <= n <= 6`.
fn arb_sizes() -> impl Strategy<Value = (u32, u32, u32)> {
    (0_u32..=6)
        .prop_flat_map(|n| (Just(n), 0..=n))
        .prop_flat_map(|(n, d)| (Just(n), Just(d), 0..=d))
}

fn arb_layout() -> impl Strategy<Value = GarbageLayout> {
    prop_oneof![Just(GarbageLayout::Trailing), Just(GarbageLayout::Leading)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_pairs_have_requested_roles(
        (n, d, m) in arb_sizes(),
        layout in arb_layout(),
        seed in any::<u64>(),
    ) {
        let config = BenchmarkConfig::new(n, d, m).with_seed(seed).with_layout(layout);
        let (a, b) = config.generate().unwrap();

        for circuit in [&a, &b] {
            prop_assert_eq!(circuit.num_qubits(), n as usize);
            prop_assert_eq!(circuit.num_qubits_without_ancillae(), d as usize);
            prop_assert_eq!(circuit.num_measured_qubits(), m as usize);
            for inst in circuit {
                for q in &inst.qubits {
                    prop_assert!(q.0 < n);
                }
            }
        }
        prop_assert_eq!(a.garbage(), b.garbage());
        prop_assert_eq!(a.ancillary(), b.ancillary());
    }

    #[test]
    fn garbage_gates_only_touch_garbage(seed in any::<u64>()) {
        // Without a shared block every gate must sit on a garbage qubit.
        let config = BenchmarkConfig::new(5, 4, 2)
            .with_seed(seed)
            .with_gates(0, 12)
            .with_layout(GarbageLayout::Leading);
        let (a, b) = config.generate().unwrap();

        for circuit in [&a, &b] {
            for inst in circuit {
                for q in &inst.qubits {
                    prop_assert!(circuit.is_garbage(*q));
                }
            }
        }
    }
}

#[test]
fn test_entropy_seeded_generation() {
    let (a, b) = generate_random_benchmark(4, 3, 2).unwrap();
    assert_eq!(a.num_ancillae(), 1);
    assert_eq!(b.num_garbage(), 2);
}

#[test]
fn test_entropy_seeded_rejects_bad_sizes() {
    assert!(generate_random_benchmark(2, 3, 1).is_err());
}

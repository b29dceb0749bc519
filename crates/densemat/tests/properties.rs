//! Property-based tests using proptest.
//!
//! These tests check the algebraic identities the matrix operations must keep.

use densemat::{DenseMatrix, ProductConfig};
use proptest::prelude::*;

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = DenseMatrix> {
    proptest::collection::vec(-10.0f64..10.0, rows * cols).prop_map(move |data| {
        DenseMatrix::from_shape_vec((rows, cols), data).expect("Test data should be valid")
    })
}

fn any_matrix() -> impl Strategy<Value = DenseMatrix> {
    (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| matrix_strategy(rows, cols))
}

fn same_shape_pair() -> impl Strategy<Value = (DenseMatrix, DenseMatrix)> {
    (1usize..7, 1usize..7)
        .prop_flat_map(|(rows, cols)| (matrix_strategy(rows, cols), matrix_strategy(rows, cols)))
}

fn chain_of_three() -> impl Strategy<Value = (DenseMatrix, DenseMatrix, DenseMatrix)> {
    (1usize..6, 1usize..6, 1usize..6, 1usize..6).prop_flat_map(|(m, k, n, p)| {
        (
            matrix_strategy(m, k),
            matrix_strategy(k, n),
            matrix_strategy(n, p),
        )
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn transpose_twice_is_identity(m in any_matrix()) {
        prop_assert_eq!(m.transpose().transpose(), &m);
    }

    #[test]
    fn transpose_cache_is_consistent(m in any_matrix()) {
        let (rows, cols) = m.shape();
        let t = m.transpose();
        prop_assert_eq!(t.shape(), (cols, rows));
        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(t.as_slice()[j * rows + i], m.as_slice()[i * cols + j]);
            }
        }
    }

    #[test]
    fn add_is_commutative((a, b) in same_shape_pair()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn subtract_is_antisymmetric((a, b) in same_shape_pair()) {
        let ab = a.subtract(&b).unwrap();
        let ba = b.subtract(&a).unwrap();
        prop_assert_eq!(ab, -ba);
    }

    #[test]
    fn elementwise_multiply_is_commutative((a, b) in same_shape_pair()) {
        prop_assert_eq!(
            a.multiply_elementwise(&b).unwrap(),
            b.multiply_elementwise(&a).unwrap()
        );
    }

    #[test]
    fn pow_zero_is_all_ones(m in any_matrix()) {
        let ones = m.pow_elementwise(0);
        prop_assert_eq!(ones.shape(), m.shape());
        prop_assert!(ones.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn matmul_is_associative((a, b, c) in chain_of_three()) {
        let left = a.matmul(&b).unwrap().matmul(&c).unwrap();
        let right = a.matmul(&b.matmul(&c).unwrap()).unwrap();
        prop_assert_eq!(left.shape(), right.shape());
        for (l, r) in left.as_slice().iter().zip(right.as_slice()) {
            prop_assert!(close(*l, *r), "{} vs {}", l, r);
        }
    }

    #[test]
    fn blocked_product_matches_serial((a, b, _c) in chain_of_three(), block in 1usize..6) {
        let serial = a.matmul_with(&b, &ProductConfig::serial()).unwrap();
        let blocked = a.matmul_with(&b, &ProductConfig::new(0, Some(block))).unwrap();
        prop_assert_eq!(serial.shape(), blocked.shape());
        for (s, p) in serial.as_slice().iter().zip(blocked.as_slice()) {
            prop_assert!(close(*s, *p), "{} vs {}", s, p);
        }
    }

    #[test]
    fn text_rendering_parses_back_to_same_shape(m in any_matrix()) {
        let parsed: DenseMatrix = m.to_string().parse().unwrap();
        prop_assert_eq!(parsed.shape(), m.shape());
        for (p, o) in parsed.as_slice().iter().zip(m.as_slice()) {
            prop_assert!((p - o).abs() <= 0.005 + 1e-12);
        }
    }
}

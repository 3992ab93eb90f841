//! Integration tests for COG <-> CSG reindexing.

use gather_reindex::gather::{cog_to_csg_with_config, csg_to_cog_with_config};
use gather_reindex::math::Array2;
use gather_reindex::{cog_to_csg, csg_to_cog, GatherError, ReindexConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn random_cog(rng: &mut StdRng, receivers: usize, depths: usize, times: usize) -> Vec<Array2<f64>> {
    (0..receivers)
        .map(|_| {
            let data = (0..depths * times).map(|_| rng.gen_range(-3.0..3.0)).collect();
            Array2::from_shape_vec((depths, times), data).expect("random COG element")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Round trip and shape contract
// ---------------------------------------------------------------------------

#[test]
fn round_trip_restores_seeded_cog() {
    init_logging();
    let (receivers, depths, times) = (8, 100, 50);
    let cog = random_cog(&mut seeded_rng(), receivers, depths, times);

    let csg = cog_to_csg(&cog).unwrap();
    let back = csg_to_cog(&csg).unwrap();

    assert_eq!(back.len(), receivers);
    for (r, (orig, conv)) in cog.iter().zip(back.iter()).enumerate() {
        assert_eq!(conv.shape(), (depths, times));
        for (a, b) in orig.as_slice().iter().zip(conv.as_slice()) {
            assert!(
                (a - b).abs() <= 1e-9,
                "receiver {} differs after round trip: {} vs {}",
                r,
                a,
                b
            );
        }
    }
    // Copying alone introduces no drift.
    assert_eq!(back, cog);
}

#[test]
fn csg_shape_contract() {
    init_logging();
    let cog = random_cog(&mut seeded_rng(), 8, 100, 50);
    let csg = cog_to_csg(&cog).unwrap();

    assert_eq!(csg.len(), 100);
    for m in &csg {
        assert_eq!(m.shape(), (8, 50));
    }

    let cog_again = csg_to_cog(&csg).unwrap();
    assert_eq!(cog_again.len(), 8);
    for m in &cog_again {
        assert_eq!(m.shape(), (100, 50));
    }
}

#[test]
fn round_trip_from_csg_side() {
    init_logging();
    let csg = random_cog(&mut seeded_rng(), 12, 5, 7);
    let cog = csg_to_cog(&csg).unwrap();
    assert_eq!(cog.len(), 5);
    assert_eq!(cog[0].shape(), (12, 7));
    assert_eq!(cog_to_csg(&cog).unwrap(), csg);
}

#[test]
fn element_mapping_is_bit_identical() {
    init_logging();
    let mut rng = seeded_rng();
    let mut cog = random_cog(&mut rng, 4, 6, 3);
    cog[1][(2, 0)] = f64::NAN;
    cog[3][(5, 2)] = f64::INFINITY;
    cog[0][(0, 1)] = -0.0;

    let csg = cog_to_csg(&cog).unwrap();
    for r in 0..4 {
        for s in 0..6 {
            for t in 0..3 {
                assert_eq!(
                    csg[s][(r, t)].to_bits(),
                    cog[r][(s, t)].to_bits(),
                    "CSG[{}][({}, {})] does not match COG[{}][({}, {})]",
                    s,
                    r,
                    t,
                    r,
                    s,
                    t
                );
            }
        }
    }
}

#[test]
#[allow(clippy::approx_constant)]
fn single_scalar_gather() {
    let cog = vec![Array2::from_shape_vec((1, 1), vec![3.14f64]).unwrap()];
    let csg = cog_to_csg(&cog).unwrap();
    assert_eq!(csg.len(), 1);
    assert_eq!(csg[0].shape(), (1, 1));
    assert_eq!(csg[0][(0, 0)], 3.14);

    let back = csg_to_cog(&csg).unwrap();
    assert_eq!(back[0][(0, 0)], 3.14);
}

#[test]
fn integer_payload_round_trip() {
    let cog: Vec<Array2<u32>> = (0..3u32)
        .map(|r| {
            let data = (0..4 * 2).map(|i| r * 100 + i).collect();
            Array2::from_shape_vec((4, 2), data).unwrap()
        })
        .collect();
    let csg = cog_to_csg(&cog).unwrap();
    assert_eq!(csg[2].as_slice(), &[4, 5, 104, 105, 204, 205]);
    assert_eq!(csg_to_cog(&csg).unwrap(), cog);
}

#[test]
fn input_is_left_untouched() {
    let cog = random_cog(&mut seeded_rng(), 3, 4, 5);
    let snapshot = cog.clone();
    let mut csg = cog_to_csg(&cog).unwrap();

    // Output owns its buffers; writing into it must not reach the input.
    csg[0][(0, 0)] = 1234.5;
    assert_eq!(cog, snapshot);
}

#[test]
fn execution_modes_agree() {
    init_logging();
    let cog = random_cog(&mut seeded_rng(), 8, 64, 32);
    let seq = cog_to_csg_with_config(&cog, &ReindexConfig::sequential()).unwrap();
    let par = cog_to_csg_with_config(&cog, &ReindexConfig::parallel()).unwrap();
    assert_eq!(seq, par);

    let back_seq = csg_to_cog_with_config(&seq, &ReindexConfig::sequential()).unwrap();
    let back_par = csg_to_cog_with_config(&par, &ReindexConfig::parallel()).unwrap();
    assert_eq!(back_seq, back_par);
    assert_eq!(back_par, cog);
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[test]
fn empty_input_fails_both_directions() {
    let empty: Vec<Array2<f64>> = Vec::new();
    assert_eq!(cog_to_csg(&empty), Err(GatherError::EmptyInput));
    assert_eq!(csg_to_cog(&empty), Err(GatherError::EmptyInput));
}

#[test]
fn mismatched_shapes_fail() {
    init_logging();
    let gather = vec![Array2::<f64>::zeros((5, 10)), Array2::<f64>::zeros((6, 10))];
    let expected = GatherError::ShapeMismatch {
        index: 1,
        expected: (5, 10),
        found: (6, 10),
    };
    assert_eq!(cog_to_csg(&gather), Err(expected.clone()));
    assert_eq!(csg_to_cog(&gather), Err(expected.clone()));
    assert_eq!(
        expected.to_string(),
        "Gather element 1 has shape (6, 10) but expected (5, 10)"
    );
}

#[test]
fn zero_depth_cog_loses_receiver_count() {
    let cog = vec![Array2::<f64>::zeros((0, 4)); 3];
    let csg = cog_to_csg(&cog).unwrap();
    assert!(csg.is_empty());
    // Nothing is left to infer R from on the way back.
    assert_eq!(csg_to_cog(&csg), Err(GatherError::EmptyInput));
}

#[test]
fn zero_receiver_csg_loses_depth_count() {
    let csg = vec![Array2::<f64>::zeros((0, 4)); 2];
    let cog = csg_to_cog(&csg).unwrap();
    assert!(cog.is_empty());
    assert_eq!(cog_to_csg(&cog), Err(GatherError::EmptyInput));
}

#[test]
fn mismatched_time_axis_fails() {
    let gather = vec![
        Array2::<f32>::zeros((3, 4)),
        Array2::<f32>::zeros((3, 4)),
        Array2::<f32>::zeros((3, 5)),
    ];
    match cog_to_csg(&gather) {
        Err(GatherError::ShapeMismatch { index, .. }) => assert_eq!(index, 2),
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}

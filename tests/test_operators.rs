use genmelody::{
    breeding::{CrossoverOperator, MutationOperator, SinglePointCrossover, ToggleMutation},
    error::MelodyError,
    fitness::{Candidate, FitnessEvaluator, MelodyFitness},
    genome::{Genome, GenomeShape},
    music::{PitchValue, Scale, ScaleLibrary, ScalePattern},
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelection, SelectionStrategy},
};

fn a_major() -> Scale {
    ScaleLibrary::standard().build_scale(45, "major").unwrap()
}

#[test]
fn test_major_scale_for_every_root() {
    const MAJOR: [u8; 14] = [2, 2, 1, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 1];
    let library = ScaleLibrary::standard();

    for root in 0..=103u8 {
        let scale = library.build_scale(root, "major").unwrap();
        assert_eq!(scale.values()[0], PitchValue::Rest);
        assert_eq!(scale.pitches().len(), 15);

        let mut expected = root;
        for (i, pitch) in scale.pitches().iter().enumerate() {
            if i > 0 {
                expected += MAJOR[i - 1];
            }
            assert_eq!(*pitch, PitchValue::Note(expected));
        }
        assert!(scale.pitches().windows(2).all(|w| w[0] < w[1]));
    }

    assert!(library.build_scale(104, "major").is_err());
}

#[test]
fn test_unknown_scale_name() {
    let result = ScaleLibrary::standard().build_scale(45, "lydian");
    assert!(matches!(result, Err(MelodyError::UnknownScale(_))));
}

#[test]
fn test_fitness_is_deterministic() {
    let mut rng = RandomNumberGenerator::from_seed(42);
    let fitness = MelodyFitness::default();

    for _ in 0..20 {
        let genome = Genome::random(GenomeShape::default(), &a_major(), &mut rng);
        let first = fitness.evaluate(&genome);
        assert!(first.is_finite());
        assert_eq!(first, fitness.evaluate(&genome.clone()));
    }
}

#[test]
fn test_degenerate_candidates_score_zero() {
    let mut rng = RandomNumberGenerator::from_seed(42);
    let genome = Genome::random(GenomeShape::default(), &a_major(), &mut rng);
    let flat = genome.flatten();
    let fitness = MelodyFitness::default();

    assert_eq!(fitness.evaluate_candidate(Candidate::from(&flat)), 0.0);
    assert_eq!(fitness.evaluate_candidate(Candidate::Missing), 0.0);
    assert_eq!(
        fitness.evaluate_candidate(Candidate::from(&genome)),
        fitness.evaluate(&genome)
    );
}

#[test]
fn test_crossover_preserves_note_count() {
    let mut rng = RandomNumberGenerator::from_seed(7);
    let scale = a_major();

    for _ in 0..50 {
        let a = Genome::random(GenomeShape::default(), &scale, &mut rng);
        let b = Genome::random(GenomeShape::default(), &scale, &mut rng);

        let (child_a, child_b) = SinglePointCrossover.crossover(&a, &b, &mut rng).unwrap();

        assert_eq!(
            child_a.flatten().len() + child_b.flatten().len(),
            a.flatten().len() + b.flatten().len()
        );
        assert_eq!(child_a.shape(), a.shape());
        assert!(child_a.is_within(&scale) && child_b.is_within(&scale));

        // every position comes from one of the two parents
        for i in 0..a.len() {
            let pair = (child_a.notes()[i], child_b.notes()[i]);
            let from_a = (a.notes()[i], b.notes()[i]);
            let from_b = (b.notes()[i], a.notes()[i]);
            assert!(pair == from_a || pair == from_b);
        }
    }
}

#[test]
fn test_crossover_of_single_note_is_noop() {
    let mut rng = RandomNumberGenerator::from_seed(7);
    let a = Genome::from_bars(vec![vec![PitchValue::Note(45)]]).unwrap();
    let b = Genome::from_bars(vec![vec![PitchValue::Rest]]).unwrap();

    let (child_a, child_b) = SinglePointCrossover.crossover(&a, &b, &mut rng).unwrap();

    assert_eq!(child_a, a);
    assert_eq!(child_b, b);
}

#[test]
fn test_crossover_rejects_mismatched_parents() {
    let mut rng = RandomNumberGenerator::from_seed(7);
    let a = Genome::random(GenomeShape::new(8, 16), &a_major(), &mut rng);
    let b = Genome::random(GenomeShape::new(4, 16), &a_major(), &mut rng);

    let result = SinglePointCrossover.crossover(&a, &b, &mut rng);
    assert!(matches!(
        result,
        Err(MelodyError::ShapeMismatch {
            left: 128,
            right: 64
        })
    ));
}

#[test]
fn test_mutation_extremes() {
    let scale = Scale::from_pattern(45, ScalePattern::MinorPentatonic).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(13);
    let original = Genome::random(GenomeShape::default(), &scale, &mut rng);

    let mut untouched = original.clone();
    ToggleMutation.mutate(&mut untouched, 0.0, &scale, &mut rng);
    assert_eq!(untouched, original);

    let mut toggled = original.clone();
    ToggleMutation.mutate(&mut toggled, 1.0, &scale, &mut rng);
    for (before, after) in original.notes().iter().zip(toggled.notes()) {
        match before {
            PitchValue::Note(_) => assert_eq!(*after, PitchValue::Rest),
            PitchValue::Rest => {
                assert!(!after.is_rest());
                assert!(scale.contains(after));
            }
        }
    }
}

#[test]
fn test_roulette_prefers_fitter_parents() {
    let mut rng = RandomNumberGenerator::from_seed(21);
    let fitness = [100.0, 1.0, 0.0, -5.0];
    let selection = RouletteWheelSelection::new();

    let mut hits = [0usize; 4];
    for _ in 0..500 {
        let (a, b) = selection.select_indices(&fitness, &mut rng).unwrap();
        hits[a] += 1;
        hits[b] += 1;
    }

    assert!(hits[0] > hits[1] * 10);
    assert_eq!(hits[2], 0);
    assert_eq!(hits[3], 0);
}

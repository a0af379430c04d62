use genmelody::{
    evolution::{EvolutionOptions, MelodyEngine},
    genome::{FlatSequence, GenomeShape},
    music::{PitchValue, ScaleLibrary, Tempo},
    render::{MidiRenderer, RenderOptions},
    rng::RandomNumberGenerator,
};
use midly::{MidiMessage, Smf, TrackEventKind};

#[test]
fn test_write_population_to_directory() {
    let scale = ScaleLibrary::standard().build_scale(45, "minor").unwrap();
    let options = EvolutionOptions::builder()
        .num_generations(3)
        .population_size(4)
        .shape(GenomeShape::new(2, 8))
        .build();
    let mut rng = RandomNumberGenerator::from_seed(10);
    let results = MelodyEngine::default()
        .run(&options, &scale, &mut rng)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let renderer = MidiRenderer::new(RenderOptions::with_tempo(Tempo::new(90).unwrap())).unwrap();
    let paths = renderer
        .write_population(&results, dir.path(), "out", &mut rng)
        .unwrap();

    assert_eq!(paths.len(), 4);
    assert_eq!(paths[0], dir.path().join("out0.mid"));

    for (path, result) in paths.iter().zip(&results) {
        let bytes = std::fs::read(path).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.tracks.len(), 1);

        let note_ons = smf.tracks[0]
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOn { .. },
                        ..
                    }
                )
            })
            .count();
        assert_eq!(note_ons, result.genome.len() - result.genome.rest_count());
    }
}

#[test]
fn test_write_single_melody() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("melodies").join("run1");
    let renderer = MidiRenderer::new(RenderOptions::default()).unwrap();
    let melody = FlatSequence::new(vec![PitchValue::Note(57), PitchValue::Rest]);
    let path = nested.join("single.mid");

    std::fs::create_dir_all(&nested).unwrap();
    renderer
        .write(&melody, &path, &mut RandomNumberGenerator::from_seed(1))
        .unwrap();

    assert!(path.exists());
}

#[test]
fn test_seeded_rendering_is_reproducible() {
    let renderer = MidiRenderer::new(RenderOptions::default()).unwrap();
    let melody = FlatSequence::new((45..60).map(PitchValue::Note).collect());

    let a = renderer
        .to_bytes(&melody, &mut RandomNumberGenerator::from_seed(4))
        .unwrap();
    let b = renderer
        .to_bytes(&melody, &mut RandomNumberGenerator::from_seed(4))
        .unwrap();

    assert_eq!(a, b);
}

// MIDI output for evolved melodies.
//
// A melody is played in row-major order as one Standard MIDI File track
// (format 0). Every note gets a random length and every position a random
// advance of the playhead, so the rhythm is chosen at render time rather
// than evolved. Rests still advance the playhead but emit no events.
//
// Uses the `midly` crate for MIDI writing.

use std::path::{Path, PathBuf};

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use tracing::debug;

use crate::error::{MelodyError, Result};
use crate::evolution::EvolutionResult;
use crate::genome::FlatSequence;
use crate::music::{PitchValue, Tempo};
use crate::rng::RandomNumberGenerator;

/// Everything the renderer needs besides the notes themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub tempo: Tempo,
    pub channel: u8,
    pub volume: u8,
    /// Candidate note lengths in beats.
    pub durations: Vec<f64>,
    /// Candidate playhead advances in beats.
    pub advances: Vec<f64>,
    pub ticks_per_quarter: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            channel: 0,
            volume: 100,
            durations: vec![0.5, 0.75, 1.0],
            advances: vec![0.25, 0.5, 1.0],
            ticks_per_quarter: 480,
        }
    }
}

impl RenderOptions {
    pub fn with_tempo(tempo: Tempo) -> Self {
        Self {
            tempo,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel > 15 {
            return Err(MelodyError::Configuration(format!(
                "MIDI channel must be 0..=15, got {}",
                self.channel
            )));
        }
        if self.volume > 127 {
            return Err(MelodyError::Configuration(format!(
                "MIDI volume must be 0..=127, got {}",
                self.volume
            )));
        }
        if self.ticks_per_quarter == 0 || self.ticks_per_quarter > 0x7FFF {
            return Err(MelodyError::Configuration(format!(
                "Ticks per quarter must be 1..=32767, got {}",
                self.ticks_per_quarter
            )));
        }
        if !all_positive(&self.durations) {
            return Err(MelodyError::Configuration(
                "Note durations must be a non-empty list of positive beat lengths".to_string(),
            ));
        }
        if !all_positive(&self.advances) {
            return Err(MelodyError::Configuration(
                "Note advances must be a non-empty list of positive beat lengths".to_string(),
            ));
        }
        Ok(())
    }
}

/// Largest delta time a track event can carry (28 bits).
const MAX_DELTA: u32 = 0x0FFF_FFFF;

fn checked_tick(time: u32, ticks: u32) -> Result<u32> {
    time.checked_add(ticks)
        .ok_or_else(|| MelodyError::Render("Melody is too long for a MIDI track".to_string()))
}

fn all_positive(beats: &[f64]) -> bool {
    !beats.is_empty() && beats.iter().all(|b| b.is_finite() && *b > 0.0)
}

/// Turns flat melodies into MIDI files.
#[derive(Debug, Clone)]
pub struct MidiRenderer {
    options: RenderOptions,
}

/// Note-offs sort ahead of note-ons on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventOrder {
    Off,
    On,
}

impl MidiRenderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn beats_to_ticks(&self, beats: f64) -> Result<u32> {
        let ticks = (beats * self.options.ticks_per_quarter as f64).round();
        if ticks > u32::MAX as f64 {
            return Err(MelodyError::Render(format!(
                "{} beats do not fit in a MIDI track",
                beats
            )));
        }
        Ok(ticks as u32)
    }

    /// Builds an in-memory single-track SMF for `sequence`.
    pub fn render(
        &self,
        sequence: &FlatSequence,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Smf<'static>> {
        let channel = u4::new(self.options.channel);
        let vel = u7::new(self.options.volume);

        let mut events: Vec<(u32, EventOrder, u8)> = Vec::new();
        let mut time: u32 = 0;

        for note in sequence {
            let duration = *rng
                .choose(&self.options.durations)
                .ok_or_else(|| MelodyError::Render("no note durations".to_string()))?;
            if let PitchValue::Note(pitch) = note {
                if *pitch > 127 {
                    return Err(MelodyError::Render(format!(
                        "Pitch {} is outside the MIDI range",
                        pitch
                    )));
                }
                let off = checked_tick(time, self.beats_to_ticks(duration)?)?;
                events.push((time, EventOrder::On, *pitch));
                events.push((off, EventOrder::Off, *pitch));
            }
            let advance = *rng
                .choose(&self.options.advances)
                .ok_or_else(|| MelodyError::Render("no note advances".to_string()))?;
            time = checked_tick(time, self.beats_to_ticks(advance)?)?;
        }

        events.sort_by_key(|&(tick, order, _)| (tick, order));

        let mut track: Track<'static> = Vec::with_capacity(events.len() + 2);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(
                self.options.tempo.micros_per_quarter(),
            ))),
        });

        let mut last_tick = 0;
        for (tick, order, pitch) in events {
            let key = u7::new(pitch);
            let message = match order {
                EventOrder::On => MidiMessage::NoteOn { key, vel },
                EventOrder::Off => MidiMessage::NoteOff { key, vel: u7::new(0) },
            };
            let delta = tick - last_tick;
            if delta > MAX_DELTA {
                return Err(MelodyError::Render(format!(
                    "Gap of {} ticks between events exceeds the MIDI delta limit",
                    delta
                )));
            }
            track.push(TrackEvent {
                delta: u28::new(delta),
                kind: TrackEventKind::Midi { channel, message },
            });
            last_tick = tick;
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.options.ticks_per_quarter)),
        ));
        smf.tracks.push(track);
        Ok(smf)
    }

    /// Renders `sequence` to the bytes of a `.mid` file.
    pub fn to_bytes(
        &self,
        sequence: &FlatSequence,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<u8>> {
        let smf = self.render(sequence, rng)?;
        let mut buf = Vec::new();
        smf.write(&mut buf)
            .map_err(|e| MelodyError::Render(e.to_string()))?;
        Ok(buf)
    }

    /// Renders `sequence` and writes it to `path`.
    pub fn write(
        &self,
        sequence: &FlatSequence,
        path: &Path,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let bytes = self.to_bytes(sequence, rng)?;
        std::fs::write(path, &bytes)?;
        debug!(path = %path.display(), notes = sequence.len(), "wrote midi file");
        Ok(())
    }

    /// Writes one file per result, `{stem}{i}.mid` in `dir`, best first.
    pub fn write_population(
        &self,
        results: &[EvolutionResult],
        dir: &Path,
        stem: &str,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let path = dir.join(format!("{}{}.mid", stem, i));
                self.write(&result.genome.flatten(), &path, rng)?;
                Ok(path)
            })
            .collect()
    }
}

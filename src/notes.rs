/*
Note Table
==========

The synth front-ends pick pitch from seven natural notes plus an octave
number. Base frequencies are the equal-tempered values for octave 4 (middle C
octave), rounded to two decimals:

    C 261.63   D 293.66   E 329.63   F 349.23   G 392.00   A 440.00   B 493.88

Other octaves double or halve:

    frequency = base[note] * 2^(octave - 4)

Keyboard layout (home row):

    a s d f g h j
    C D E F G A B
*/

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ToneError;

/// Octave at which `Note::base_frequency` is defined.
pub const REFERENCE_OCTAVE: i32 = 4;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Note {
    pub const ALL: [Note; 7] = [Note::C, Note::D, Note::E, Note::F, Note::G, Note::A, Note::B];

    /// Frequency in Hz at `REFERENCE_OCTAVE`.
    pub fn base_frequency(self) -> f64 {
        match self {
            Note::C => 261.63,
            Note::D => 293.66,
            Note::E => 329.63,
            Note::F => 349.23,
            Note::G => 392.00,
            Note::A => 440.00,
            Note::B => 493.88,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::D => "D",
            Note::E => "E",
            Note::F => "F",
            Note::G => "G",
            Note::A => "A",
            Note::B => "B",
        }
    }

    /// Home-row key binding: a s d f g h j.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'a' => Some(Note::C),
            's' => Some(Note::D),
            'd' => Some(Note::E),
            'f' => Some(Note::F),
            'g' => Some(Note::G),
            'h' => Some(Note::A),
            'j' => Some(Note::B),
            _ => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Note {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToneError::UnknownNote {
                name: s.to_string(),
            })
    }
}

/// `base_frequency[note] * 2^(octave - 4)`
#[inline]
pub fn note_frequency(note: Note, octave: i32) -> f64 {
    note.base_frequency() * 2.0_f64.powi(octave - REFERENCE_OCTAVE)
}

/// Selected note and octave. `note` is `None` until the player picks one,
/// which renders as silence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub note: Option<Note>,
    pub octave: i32,
}

impl Pitch {
    pub fn new(note: Note, octave: i32) -> Self {
        Self {
            note: Some(note),
            octave,
        }
    }

    pub fn select(&mut self, note: Note) {
        self.note = Some(note);
    }

    pub fn octave_up(&mut self) {
        self.octave = self.octave.saturating_add(1);
    }

    pub fn octave_down(&mut self) {
        self.octave = self.octave.saturating_sub(1);
    }

    /// 0.0 when no note is selected.
    pub fn frequency_hz(&self) -> f64 {
        self.note
            .map(|note| note_frequency(note, self.octave))
            .unwrap_or(0.0)
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Self {
            note: None,
            octave: REFERENCE_OCTAVE,
        }
    }
}

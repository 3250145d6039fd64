// Four-channel chip player driver.
//
// Pair this driver with a generated soundtrack table. Tables use the
// sequence-based layout: each note entry is [start, pitch, sustain] and the
// song spans `sequences` blocks of 32 ticks. Channels play at the runtime's
// default volume; exports carrying per-channel volumes need a driver variant
// that reads them.

/// Ticks spanned by one block.
const BLOCK_TICKS: u32 = 32;

/// Runtime frames per tick, tuned for the default export tempo.
const FRAMES_PER_TICK: u32 = 4;

/// Playback volume (0-100).
const VOLUME: u32 = 60;

/// Frequency in Hz for each pitch of the three-octave table (C0 to C3).
const FREQUENCIES: [u16; 37] = [
    130, 140, 150, 160, 170, 180, 190, 200, 210, //
    220, 230, 250, 260, 280, 290, 310, 330, 350, //
    370, 390, 410, 440, 460, 490, 520, 550, 600, //
    620, 660, 700, 750, 780, 840, 880, 940, 980, //
    1000,
];

/// Lowest pitch in the table.
const BASE_PITCH: u32 = 36;

// Hardware channels.
const CHANNEL_PULSE1: u32 = 0;
const CHANNEL_PULSE2: u32 = 1;
const CHANNEL_TRIANGLE: u32 = 2;
const CHANNEL_NOISE: u32 = 3;

// Pulse duty modes, shifted into flag bits 2-3.
const MODE_12_5: u32 = 0;
const MODE_25: u32 = 1;
const MODE_50: u32 = 2;
const MODE_75: u32 = 3;

extern "C" {
    fn tone(frequency: u32, duration: u32, volume: u32, flags: u32);
}

/// A generated soundtrack.
pub struct Track {
    pub ticks: u32,
    pub sequences: u32,
    pub channels: [Channel; 4],
}

/// One channel of a soundtrack.
pub struct Channel {
    pub instrument: u32,
    pub notes: &'static [[u32; 3]],
}

/// Plays a track, one tick at a time.
pub struct Player {
    track: &'static Track,
    frame: u32,
    tick: u32,
}

impl Player {
    pub const fn new(track: &'static Track) -> Self {
        Self {
            track,
            frame: 0,
            tick: 0,
        }
    }

    /// Advance playback by one runtime frame. Call once per update.
    pub fn update(&mut self) {
        self.frame += 1;
        if self.frame < FRAMES_PER_TICK {
            return;
        }
        self.frame = 0;

        for (index, channel) in self.track.channels.iter().enumerate() {
            for note in channel.notes {
                if note[0] == self.tick {
                    play(index as u32, channel.instrument, note[1], note[2]);
                }
            }
        }

        self.tick += 1;
        if self.tick >= self.track.sequences * BLOCK_TICKS {
            self.tick = 0;
        }
    }
}

/// Start one note on a hardware channel.
fn play(channel: u32, instrument: u32, pitch: u32, sustain: u32) {
    let index = pitch.wrapping_sub(BASE_PITCH) as usize;
    if index >= FREQUENCIES.len() {
        // Pitch outside the table: leave the channel silent.
        return;
    }

    let mode = match instrument {
        2 => MODE_75,
        3 => MODE_12_5,
        4 => MODE_25,
        _ => MODE_50,
    };
    let hardware = match channel {
        0 => CHANNEL_PULSE1,
        1 => CHANNEL_PULSE2,
        2 => CHANNEL_TRIANGLE,
        _ => CHANNEL_NOISE,
    };
    let flags = (mode << 2) | hardware;

    unsafe {
        tone(FREQUENCIES[index] as u32, sustain, VOLUME, flags);
    }
}

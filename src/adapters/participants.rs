//! Non-learning participants: random, scripted and human console input

use std::io::{self, BufRead, Read, Write};

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{Error, Result, ports::Participant, tictactoe::Board};

/// Uniform-random player
pub struct RandomParticipant {
    name: String,
    rng: StdRng,
}

impl RandomParticipant {
    /// Create a new random participant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a new random participant with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Participant for RandomParticipant {
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::InvalidState {
                state: board.state_key().into_string(),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plays a fixed list of actions in order, whether or not they are legal
pub struct ScriptedParticipant {
    name: String,
    actions: Vec<usize>,
    next: usize,
}

impl ScriptedParticipant {
    pub fn new(name: impl Into<String>, actions: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            actions,
            next: 0,
        }
    }
}

impl Participant for ScriptedParticipant {
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        let action = self
            .actions
            .get(self.next)
            .copied()
            .ok_or_else(|| Error::InvalidState {
                state: board.state_key().into_string(),
            })?;
        self.next += 1;
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Line-oriented text input for [`ConsoleHuman`]
///
/// Every [`io::Stdin`] handle reads through the process-wide buffer, so two
/// humans sharing a terminal can each own one without stealing input.
pub trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineSource for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<R: Read> LineSource for io::BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Human player typing cell numbers on a text stream.
///
/// Anything that is not the index of an empty cell is ignored and the
/// prompt is repeated.
pub struct ConsoleHuman<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> ConsoleHuman<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: LineSource, W: Write> Participant for ConsoleHuman<R, W> {
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        loop {
            write!(self.output, "{}, choose a cell (0-8): ", self.name)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed {
                    participant: self.name.clone(),
                });
            }

            if let Ok(action) = line.trim().parse::<usize>() {
                if board.is_empty(action) {
                    return Ok(action);
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

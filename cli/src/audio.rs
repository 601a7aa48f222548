use std::io::{self, Write};
use tandem_core::{MoveOutcome, SessionState};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sound {
    Reveal,
    Cascade,
    Flag,
    WrongFlag,
    Unflag,
    Mine,
    Correct,
    Wrong,
    GoodSurprise,
    BadSurprise,
    Win,
    Lose,
}

impl Sound {
    pub fn for_move(outcome: MoveOutcome) -> Option<Self> {
        Some(match outcome {
            MoveOutcome::NoChange => return None,
            MoveOutcome::Revealed { cells: 1 } => Self::Reveal,
            MoveOutcome::Revealed { .. } => Self::Cascade,
            MoveOutcome::HitMine => Self::Mine,
            MoveOutcome::Flagged { correct: true } => Self::Flag,
            MoveOutcome::Flagged { correct: false } => Self::WrongFlag,
            MoveOutcome::Unflagged => Self::Unflag,
        })
    }

    pub const fn for_answer(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Wrong }
    }

    pub const fn for_surprise(good: bool) -> Self {
        if good { Self::GoodSurprise } else { Self::BadSurprise }
    }

    pub fn for_end(state: SessionState) -> Option<Self> {
        match state {
            SessionState::Active => None,
            SessionState::Won => Some(Self::Win),
            SessionState::Lost => Some(Self::Lose),
        }
    }

    /// Cues loud enough to ring the terminal bell.
    const fn is_alert(self) -> bool {
        matches!(self, Self::Mine | Self::WrongFlag | Self::BadSurprise | Self::Win | Self::Lose)
    }
}

/// Plays game cues. Owned by whoever drives the game, there is no global instance.
pub struct AudioService {
    sink: Option<Box<dyn Write>>,
}

impl AudioService {
    /// Rings the bell on stderr.
    pub fn terminal() -> Self {
        Self::with_sink(io::stderr())
    }

    pub fn muted() -> Self {
        Self { sink: None }
    }

    pub fn with_sink(sink: impl Write + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.sink.is_none()
    }

    pub fn play(&mut self, sound: Sound) {
        log::debug!("Sound cue {:?}", sound);
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if sound.is_alert() {
            if let Err(err) = sink.write_all(b"\x07").and_then(|()| sink.flush()) {
                log::warn!("Could not play {:?}: {err}", sound);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn only_alerts_ring_the_bell() {
        let buf = SharedBuf::default();
        let mut audio = AudioService::with_sink(buf.clone());

        audio.play(Sound::Reveal);
        audio.play(Sound::Mine);
        audio.play(Sound::Flag);
        audio.play(Sound::Win);

        assert_eq!(buf.0.borrow().as_slice(), b"\x07\x07");
    }

    #[test]
    fn muted_service_stays_quiet() {
        let mut audio = AudioService::muted();
        audio.play(Sound::Lose);
        assert!(audio.is_muted());
    }

    #[test]
    fn move_sounds() {
        assert_eq!(Sound::for_move(MoveOutcome::NoChange), None);
        assert_eq!(Sound::for_move(MoveOutcome::Revealed { cells: 1 }), Some(Sound::Reveal));
        assert_eq!(Sound::for_move(MoveOutcome::Revealed { cells: 9 }), Some(Sound::Cascade));
        assert_eq!(Sound::for_move(MoveOutcome::HitMine), Some(Sound::Mine));
    }

    #[test]
    fn activation_sounds() {
        assert_eq!(Sound::for_answer(true), Sound::Correct);
        assert_eq!(Sound::for_answer(false), Sound::Wrong);
        assert_eq!(Sound::for_surprise(false), Sound::BadSurprise);
        assert_eq!(Sound::for_end(SessionState::Active), None);
        assert_eq!(Sound::for_end(SessionState::Lost), Some(Sound::Lose));
    }
}

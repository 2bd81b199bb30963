//! Sound-effect provider interface.
//!
//! The core only ever triggers a sound as a side effect of an event (a shot
//! fired); the provider's lifetime belongs to the caller.  Handles are shared
//! `Rc`s so a pool `dispose()` releases them with its slots.

use std::rc::Rc;

pub trait SoundFx {
    fn play(&self);
}

/// No-op provider for tests and muted sessions.
pub struct Silent;

impl SoundFx for Silent {
    fn play(&self) {}
}

pub fn silent() -> Rc<dyn SoundFx> {
    Rc::new(Silent)
}

/// Terminal-bell provider: the one sound a bare terminal can make.
pub struct Bell;

impl SoundFx for Bell {
    fn play(&self) {
        use std::io::Write;
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

pub fn bell() -> Rc<dyn SoundFx> {
    Rc::new(Bell)
}

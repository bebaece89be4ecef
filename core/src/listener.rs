/// Receives the end of a game. At most one of the two methods is called, and only once.
pub trait OutcomeListener {
    fn on_win(&mut self);
    fn on_loss(&mut self);
}

impl OutcomeListener for () {
    fn on_win(&mut self) {}
    fn on_loss(&mut self) {}
}

/// A pair of closures used as an [`OutcomeListener`].
#[derive(Clone, Debug)]
pub struct Callbacks<W, L> {
    on_win: W,
    on_loss: L,
}

impl<W: FnMut(), L: FnMut()> Callbacks<W, L> {
    pub fn new(on_win: W, on_loss: L) -> Self {
        Self { on_win, on_loss }
    }
}

impl<W: FnMut(), L: FnMut()> OutcomeListener for Callbacks<W, L> {
    fn on_win(&mut self) {
        (self.on_win)()
    }

    fn on_loss(&mut self) {
        (self.on_loss)()
    }
}

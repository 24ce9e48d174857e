use std::cell::RefCell;
use std::rc::Rc;

use crate::frame::{AnimationLoop, FrameScheduler, LoopError};
use crate::time::TimeSource;

use super::App;

/// Plugs `app` into `anim` and starts it.
///
/// Registers the app as viewport listener and error handler, then starts the
/// loop with update/render closures that forward to the app. The app is
/// notified of the current viewport once before the first frame.
pub fn attach<A, S, T>(app: &Rc<RefCell<A>>, anim: &mut AnimationLoop<S, T>) -> Result<(), LoopError>
where
    A: App + 'static,
    S: FrameScheduler,
    T: TimeSource + Clone,
{
    app.borrow_mut().on_resize(anim.viewport().state());

    let listener = Rc::clone(app);
    anim.viewport_mut()
        .subscribe(move |viewport| listener.borrow_mut().on_resize(viewport));

    let handler = Rc::clone(app);
    anim.on_error(move |err| handler.borrow_mut().on_error(err));

    let updater = Rc::clone(app);
    let renderer = Rc::clone(app);
    anim.start(
        move |time| updater.borrow_mut().update(time),
        move |ctx| renderer.borrow_mut().render(ctx),
    )
}

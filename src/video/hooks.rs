// Engine hooks - injected input handler and callback types
//
// The engine may supply its own input poll; the default is a no-op. This is
// the overridable hook the engine links in on targets that have input
// hardware at all.

/// Input poll hook, invoked once per tic by the backend.
pub trait InputHandler {
    /// One-time setup, called during graphics initialization
    fn init(&mut self) {}

    /// Poll for pending input events
    fn poll(&mut self) {}
}

/// Default input handler that does nothing.
pub struct NoopInput;

impl InputHandler for NoopInput {}

/// Callback the engine registers to decide whether the mouse should be
/// grabbed. Never invoked by this backend; registration is kept only to
/// satisfy the engine's interface.
pub type GrabMouseCallback = fn() -> bool;
